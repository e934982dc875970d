use crate::components::ring_store::Timestamped;
use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};
use ethnum::U256;

/// 256-bit running integral of balance over time, split into two words so it
/// can live inside a zero-copy account.
///
/// `balance * elapsed` is at most 192 bits wide, so the accumulator has
/// headroom for the lifetime of any realistic ledger.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, AnchorSerialize, AnchorDeserialize,
)]
#[repr(C)]
pub struct Cumulative {
    pub hi: u128,
    pub lo: u128,
}

impl Cumulative {
    pub const ZERO: Self = Self { hi: 0, lo: 0 };

    #[inline(always)]
    pub fn get(self) -> U256 {
        U256::from_words(self.hi, self.lo)
    }

    #[inline(always)]
    pub fn from_u256(value: U256) -> Self {
        let (hi, lo) = value.into_words();
        Self { hi, lo }
    }

    #[inline(always)]
    pub const fn from_u128(value: u128) -> Self {
        Self { hi: 0, lo: value }
    }
}

impl From<U256> for Cumulative {
    fn from(value: U256) -> Self {
        Self::from_u256(value)
    }
}

impl From<Cumulative> for U256 {
    fn from(value: Cumulative) -> Self {
        value.get()
    }
}

/// One balance change: the integral up to `timestamp`, and the balance that
/// holds at and after `timestamp`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, AnchorSerialize, AnchorDeserialize,
)]
#[repr(C)]
pub struct Record {
    pub cumulative: Cumulative,
    pub balance: u128,
    pub timestamp: u64,
    pub _padding: [u8; 8],
}

impl Record {
    /// The implicit predecessor of the very first write.
    pub const ZERO: Self = Self {
        cumulative: Cumulative::ZERO,
        balance: 0,
        timestamp: 0,
        _padding: [0; 8],
    };

    #[inline(always)]
    pub fn new(cumulative: U256, balance: u128, timestamp: u64) -> Self {
        Self {
            cumulative: Cumulative::from_u256(cumulative),
            balance,
            timestamp,
            _padding: [0; 8],
        }
    }

    /// Integral as of `target`, holding `balance` constant since `timestamp`.
    ///
    /// Callers guarantee `target >= self.timestamp`; a target in the past is
    /// treated as zero elapsed time.
    #[inline]
    pub fn cumulative_at(&self, target: u64) -> Option<U256> {
        let elapsed = target.saturating_sub(self.timestamp);
        let accrued = U256::from(self.balance).checked_mul(U256::from(elapsed))?;
        self.cumulative.get().checked_add(accrued)
    }
}

impl Timestamped for Record {
    #[inline(always)]
    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// Reserve history entry: total ever accumulated as of `timestamp`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, AnchorSerialize, AnchorDeserialize,
)]
#[repr(C)]
pub struct Observation {
    pub amount: u128,
    pub timestamp: u64,
    pub _padding: [u8; 8],
}

impl Observation {
    #[inline(always)]
    pub const fn new(amount: u128, timestamp: u64) -> Self {
        Self {
            amount,
            timestamp,
            _padding: [0; 8],
        }
    }
}

impl Timestamped for Observation {
    #[inline(always)]
    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

/// A record together with its logical position (0 = oldest).
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct IndexedRecord {
    pub index: u16,
    pub record: Record,
}
