use crate::instructions::update_balance::UpdateBalance;
use crate::state::record::Record;
use crate::utils::clock::unix_now;
use crate::utils::events::CheckpointPushed;
use anchor_lang::prelude::*;

/// Appends a ledger-built record without a balance event, e.g. to pre-warm
/// history ahead of a draw or snapshot.
pub fn push_checkpoint(ctx: Context<UpdateBalance>, record: Record) -> Result<()> {
    let mut accumulator = ctx.accounts.accumulator.load_mut()?;
    accumulator.push_checkpoint(record)?;

    emit!(CheckpointPushed {
        accumulator: ctx.accounts.accumulator.key(),
        timestamp: record.timestamp,
        balance: record.balance,
        cardinality: accumulator.cardinality(),
    });

    Ok(())
}

/// Extends history to the current cluster time at the unchanged balance.
/// Returns whether a record was appended.
pub fn checkpoint(ctx: Context<UpdateBalance>) -> Result<bool> {
    let timestamp = unix_now()?;
    let mut accumulator = ctx.accounts.accumulator.load_mut()?;

    let appended = accumulator.checkpoint(timestamp)?;
    if appended {
        emit!(CheckpointPushed {
            accumulator: ctx.accounts.accumulator.key(),
            timestamp,
            balance: accumulator.balance,
            cardinality: accumulator.cardinality(),
        });
    }

    Ok(appended)
}
