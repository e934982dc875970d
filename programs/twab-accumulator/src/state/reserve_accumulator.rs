use crate::components::{checkpoint_writer, range_query};
use crate::error::{TwabError, TwabResult};
use crate::state::history::ReserveHistory;
use anchor_lang::prelude::*;

/// Running total of everything a reserve has ever received, indexed over time
/// so that "how much arrived between T0 and T1" is a subtraction.
#[account(zero_copy)]
#[repr(C)]
pub struct ReserveAccumulator {
    pub authority: Pubkey,
    pub total_accumulated: u128,
    pub created_at: i64,
    pub version: u8,
    pub bump: u8,
    pub _padding: [u8; 6],
    pub history: ReserveHistory,
    pub reserved: [u64; 8],
}

impl ReserveAccumulator {
    pub const LEN: usize = 8 + core::mem::size_of::<ReserveAccumulator>();

    /// Records an externally computed running total.
    pub fn checkpoint(&mut self, total: u128, timestamp: u64) -> TwabResult<bool> {
        let appended = checkpoint_writer::record_observation(&mut self.history, total, timestamp)?;
        self.total_accumulated = total.max(self.total_accumulated);
        Ok(appended)
    }

    pub fn deposit(&mut self, amount: u128, timestamp: u64) -> TwabResult<bool> {
        let total = self
            .total_accumulated
            .checked_add(amount)
            .ok_or(TwabError::Overflow)?;
        self.checkpoint(total, timestamp)
    }

    #[inline]
    pub fn accumulated_at(&self, target: u64) -> TwabResult<u128> {
        range_query::accumulated_at(&self.history, target)
    }

    #[inline]
    pub fn accumulated_between(&self, start: u64, end: u64) -> TwabResult<u128> {
        range_query::accumulated_between(&self.history, start, end)
    }
}
