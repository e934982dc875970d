//! Read-only queries over TWAB and reserve histories.
//!
//! Balances are a step function: a record's balance holds from its own
//! timestamp until the next record. Only the cumulative integral is ever
//! interpolated; the balance value itself never is.

use crate::components::ring_store::{RingBuffer, Timestamped};
use crate::error::{TwabError, TwabResult};
use crate::state::record::{Observation, Record};
use ethnum::U256;

/// Integral of balance as of `target`.
///
/// 1. Empty history: zero.
/// 2. At or after the newest record: extrapolate the newest balance forward.
/// 3. Before the oldest record: zero while the first write is still retained,
///    `InsufficientHistory` once it has been evicted.
/// 4. Otherwise interpolate from the record in effect at `target`.
pub fn cumulative_at<R: RingBuffer<Item = Record>>(history: &R, target: u64) -> TwabResult<U256> {
    let Ok((_, newest)) = history.newest() else {
        return Ok(U256::ZERO);
    };

    let before = if target >= newest.timestamp {
        newest
    } else {
        match history.search_at_or_before(target) {
            Some((_, record)) => record,
            None => {
                ensure_nothing_evicted(history, target)?;
                return Ok(U256::ZERO);
            }
        }
    };

    before.cumulative_at(target).ok_or(TwabError::Overflow)
}

/// A target before the oldest entry reads as "nothing yet" only while the
/// ring still holds the very first write.
#[inline]
fn ensure_nothing_evicted<R: RingBuffer>(history: &R, target: u64) -> TwabResult<()> {
    if !history.has_evicted() {
        return Ok(());
    }
    let oldest = history.oldest()?.1.timestamp();
    Err(TwabError::InsufficientHistory { oldest, target })
}

/// Balance in effect at `target`.
///
/// Targets at or after `current_time` (and any target against an empty
/// history) answer with the ledger's `current_balance` directly. A target
/// before the oldest retained record reads as zero; use
/// [`average_balance_between`] when evicted history must be detected.
pub fn balance_at<R: RingBuffer<Item = Record>>(
    history: &R,
    current_balance: u128,
    target: u64,
    current_time: u64,
) -> u128 {
    if target >= current_time || history.is_empty() {
        return current_balance;
    }

    history
        .search_at_or_before(target)
        .map(|(_, record)| record.balance)
        .unwrap_or(0)
}

/// Time-weighted average balance over `[start, end]`.
///
/// This is `(cum(end) - cum(start)) / (end - start)` evaluated on a clamped
/// window, so it differs from the plain formula whenever the window reaches
/// past `current_time`:
///
/// - `end` is clamped to `current_time`, then `start` is clamped to `end`.
///   The future is never extrapolated into the average.
/// - Equal bounds after clamping answer with the instantaneous balance
///   instead of dividing by zero.
/// - A window reaching before the oldest retained record fails with
///   `InsufficientHistory` once the ring has evicted anything.
pub fn average_balance_between<R: RingBuffer<Item = Record>>(
    history: &R,
    current_balance: u128,
    start: u64,
    end: u64,
    current_time: u64,
) -> TwabResult<u128> {
    if start > end {
        return Err(TwabError::InvalidRange { start, end });
    }

    let end = end.min(current_time);
    let start = start.min(end);
    if start == end {
        if start < current_time && history.search_at_or_before(start).is_none() {
            ensure_nothing_evicted(history, start)?;
        }
        return Ok(balance_at(history, current_balance, start, current_time));
    }

    let start_cumulative = cumulative_at(history, start)?;
    let end_cumulative = cumulative_at(history, end)?;
    let accrued = end_cumulative
        .checked_sub(start_cumulative)
        .ok_or(TwabError::Overflow)?;

    narrow(accrued / U256::from(end - start))
}

/// Total accumulated by the reserve as of `target`; no interpolation.
///
/// Before the oldest observation the total is zero, unless that observation
/// is no longer the first one ever recorded.
pub fn accumulated_at<R: RingBuffer<Item = Observation>>(
    history: &R,
    target: u64,
) -> TwabResult<u128> {
    let Ok((_, newest)) = history.newest() else {
        return Ok(0);
    };
    if target >= newest.timestamp {
        return Ok(newest.amount);
    }

    match history.search_at_or_before(target) {
        Some((_, observation)) => Ok(observation.amount),
        None => {
            ensure_nothing_evicted(history, target)?;
            Ok(0)
        }
    }
}

/// Amount the reserve accumulated between `start` and `end`.
pub fn accumulated_between<R: RingBuffer<Item = Observation>>(
    history: &R,
    start: u64,
    end: u64,
) -> TwabResult<u128> {
    if start > end {
        return Err(TwabError::InvalidRange { start, end });
    }

    let before = accumulated_at(history, start)?;
    accumulated_at(history, end)?
        .checked_sub(before)
        .ok_or(TwabError::Overflow)
}

#[inline]
fn narrow(value: U256) -> TwabResult<u128> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(TwabError::Overflow);
    }
    Ok(lo)
}
