//! The only code path that mutates a TWAB history.
//!
//! Every function validates completely before touching the ring, so an error
//! always leaves the history exactly as it was.

use crate::components::ring_store::RingBuffer;
use crate::error::{DecreaseContext, TwabError, TwabResult};
use crate::state::record::{Observation, Record};

/// Outcome of a balance write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceUpdate {
    pub new_balance: u128,
    /// `false` when the write coalesced into the newest record.
    pub wrote_new_record: bool,
}

/// Newest record, or the zero record before the first write.
#[inline]
fn previous_record<R: RingBuffer<Item = Record>>(history: &R) -> Record {
    history
        .newest()
        .map(|(_, record)| record)
        .unwrap_or(Record::ZERO)
}

#[inline]
fn ensure_not_stale(previous: &Record, timestamp: u64) -> TwabResult<()> {
    if timestamp < previous.timestamp {
        return Err(TwabError::StaleTimestamp {
            newest: previous.timestamp,
            given: timestamp,
        });
    }
    Ok(())
}

/// Record appended after `previous`, integrating its balance up to `timestamp`.
#[inline]
pub fn derive_next_record(previous: &Record, balance: u128, timestamp: u64) -> TwabResult<Record> {
    let cumulative = previous
        .cumulative_at(timestamp)
        .ok_or(TwabError::Overflow)?;
    Ok(Record::new(cumulative, balance, timestamp))
}

fn write_balance<R: RingBuffer<Item = Record>>(
    history: &mut R,
    new_balance: u128,
    timestamp: u64,
) -> TwabResult<bool> {
    let previous = previous_record(history);
    ensure_not_stale(&previous, timestamp)?;

    if !history.is_empty() && previous.timestamp == timestamp {
        history.replace_newest(Record {
            balance: new_balance,
            ..previous
        })?;
        return Ok(false);
    }

    let record = derive_next_record(&previous, new_balance, timestamp)?;
    history.push(record);
    Ok(true)
}

pub fn increase_balance<R: RingBuffer<Item = Record>>(
    history: &mut R,
    current_balance: u128,
    amount: u128,
    timestamp: u64,
) -> TwabResult<BalanceUpdate> {
    let new_balance = current_balance
        .checked_add(amount)
        .ok_or(TwabError::Overflow)?;
    let wrote_new_record = write_balance(history, new_balance, timestamp)?;

    Ok(BalanceUpdate {
        new_balance,
        wrote_new_record,
    })
}

/// Symmetric to [`increase_balance`]. The balance check runs first and is the
/// only validation of the decrease itself; `context` is echoed back on failure.
pub fn decrease_balance<R: RingBuffer<Item = Record>>(
    history: &mut R,
    current_balance: u128,
    amount: u128,
    timestamp: u64,
    context: DecreaseContext,
) -> TwabResult<BalanceUpdate> {
    if amount > current_balance {
        return Err(TwabError::InsufficientBalance(context));
    }
    let new_balance = current_balance - amount;
    let wrote_new_record = write_balance(history, new_balance, timestamp)?;

    Ok(BalanceUpdate {
        new_balance,
        wrote_new_record,
    })
}

/// Appends a caller-built record without a balance event.
///
/// The record must be exactly the one the append rule would produce: a
/// strictly later timestamp, the balance the ledger currently tracks, and the
/// newest cumulative extended by the newest balance over the elapsed time.
/// Before the first write that cumulative is zero.
pub fn push_checkpoint<R: RingBuffer<Item = Record>>(
    history: &mut R,
    current_balance: u128,
    record: Record,
) -> TwabResult<()> {
    if record.balance != current_balance {
        return Err(TwabError::InvalidCheckpoint);
    }

    let previous = previous_record(history);
    if !history.is_empty() && record.timestamp <= previous.timestamp {
        return Err(TwabError::StaleTimestamp {
            newest: previous.timestamp,
            given: record.timestamp,
        });
    }

    let expected = derive_next_record(&previous, record.balance, record.timestamp)?;
    if record.cumulative != expected.cumulative {
        return Err(TwabError::InvalidCheckpoint);
    }

    history.push(expected);
    Ok(())
}

/// Extends the history to `timestamp` at the current balance. Returns `false`
/// when the newest record already sits at `timestamp`.
pub fn checkpoint<R: RingBuffer<Item = Record>>(
    history: &mut R,
    current_balance: u128,
    timestamp: u64,
) -> TwabResult<bool> {
    let previous = previous_record(history);
    ensure_not_stale(&previous, timestamp)?;

    if !history.is_empty() && previous.timestamp == timestamp {
        return Ok(false);
    }

    let record = derive_next_record(&previous, current_balance, timestamp)?;
    history.push(record);
    Ok(true)
}

/// Records a reserve's running total at `timestamp`.
///
/// Totals only grow. An unchanged total is ignored, and a same-instant total
/// replaces the newest observation. Returns whether a new observation was
/// appended.
pub fn record_observation<R: RingBuffer<Item = Observation>>(
    history: &mut R,
    total: u128,
    timestamp: u64,
) -> TwabResult<bool> {
    let Ok((_, newest)) = history.newest() else {
        history.push(Observation::new(total, timestamp));
        return Ok(true);
    };

    if timestamp < newest.timestamp {
        return Err(TwabError::StaleTimestamp {
            newest: newest.timestamp,
            given: timestamp,
        });
    }
    if total < newest.amount {
        return Err(TwabError::InvalidCheckpoint);
    }
    if total == newest.amount {
        return Ok(false);
    }

    let observation = Observation::new(total, timestamp);
    if timestamp == newest.timestamp {
        history.replace_newest(observation)?;
        return Ok(false);
    }

    history.push(observation);
    Ok(true)
}
