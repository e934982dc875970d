use crate::error::AccumulatorError;
use anchor_lang::prelude::*;

/// Cluster unix time as the unsigned instant the accumulators index by.
#[inline]
pub fn unix_now() -> Result<u64> {
    let timestamp_now = Clock::get()?.unix_timestamp;
    require!(timestamp_now >= 0, AccumulatorError::InvalidClock);
    Ok(timestamp_now as u64)
}
