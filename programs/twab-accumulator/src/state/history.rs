use crate::components::ring_store::RingBuffer;
use crate::state::record::{Observation, Record};
use crate::utils::constants::MAX_CARDINALITY;
use bytemuck::{Pod, Zeroable};

/// Ring of TWAB records embedded in [`crate::state::TwabAccount`].
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct TwabHistory {
    pub records: [Record; MAX_CARDINALITY],
    pub next_index: u16,
    pub cardinality: u16,
    /// Non-zero once the oldest record has been overwritten.
    pub evicted: u8,
    pub _padding: [u8; 11], // Padding for alignment
}

impl RingBuffer for TwabHistory {
    type Item = Record;

    #[inline(always)]
    fn slots(&self) -> &[Record] {
        &self.records
    }

    #[inline(always)]
    fn slots_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    #[inline(always)]
    fn next_index(&self) -> u16 {
        self.next_index
    }

    #[inline(always)]
    fn cardinality(&self) -> u16 {
        self.cardinality
    }

    #[inline(always)]
    fn set_cursor(&mut self, next_index: u16, cardinality: u16) {
        self.next_index = next_index;
        self.cardinality = cardinality;
    }

    #[inline(always)]
    fn has_evicted(&self) -> bool {
        self.evicted != 0
    }

    #[inline(always)]
    fn mark_evicted(&mut self) {
        self.evicted = 1;
    }
}

/// Ring of reserve observations embedded in [`crate::state::ReserveAccumulator`].
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct ReserveHistory {
    pub observations: [Observation; MAX_CARDINALITY],
    pub next_index: u16,
    pub cardinality: u16,
    pub evicted: u8,
    pub _padding: [u8; 11],
}

impl RingBuffer for ReserveHistory {
    type Item = Observation;

    #[inline(always)]
    fn slots(&self) -> &[Observation] {
        &self.observations
    }

    #[inline(always)]
    fn slots_mut(&mut self) -> &mut [Observation] {
        &mut self.observations
    }

    #[inline(always)]
    fn next_index(&self) -> u16 {
        self.next_index
    }

    #[inline(always)]
    fn cardinality(&self) -> u16 {
        self.cardinality
    }

    #[inline(always)]
    fn set_cursor(&mut self, next_index: u16, cardinality: u16) {
        self.next_index = next_index;
        self.cardinality = cardinality;
    }

    #[inline(always)]
    fn has_evicted(&self) -> bool {
        self.evicted != 0
    }

    #[inline(always)]
    fn mark_evicted(&mut self) {
        self.evicted = 1;
    }
}
