use crate::error::{AccumulatorError, DecreaseContext};
use crate::state::twab_account::TwabAccount;
use crate::utils::clock::unix_now;
use crate::utils::events::{BalanceDecreased, BalanceIncreased};
use anchor_lang::prelude::*;

/// Ledger-signed write access to one accumulator.
///
/// Shared by the balance instructions and the warm-up checkpoint
/// instructions: every mutation requires the ledger recorded at creation.
#[derive(Accounts)]
pub struct UpdateBalance<'info> {
    #[account(
        mut,
        has_one = ledger @ AccumulatorError::UnauthorizedLedger,
    )]
    pub accumulator: AccountLoader<'info, TwabAccount>,

    pub ledger: Signer<'info>,
}

/// Reports a balance increase at the current cluster time and returns the
/// new balance.
pub fn increase_balance(ctx: Context<UpdateBalance>, amount: u128) -> Result<u128> {
    let timestamp = unix_now()?;
    let mut accumulator = ctx.accounts.accumulator.load_mut()?;

    let update = accumulator.increase_balance(amount, timestamp)?;

    emit!(BalanceIncreased {
        accumulator: ctx.accounts.accumulator.key(),
        amount,
        new_balance: update.new_balance,
        timestamp,
        wrote_new_record: update.wrote_new_record,
        cardinality: accumulator.cardinality(),
    });

    Ok(update.new_balance)
}

/// Reports a balance decrease. Fails with `InsufficientBalance` (and the
/// caller's `context` in the logs) when `amount` exceeds the balance.
pub fn decrease_balance(
    ctx: Context<UpdateBalance>,
    amount: u128,
    context: DecreaseContext,
) -> Result<u128> {
    let timestamp = unix_now()?;
    let mut accumulator = ctx.accounts.accumulator.load_mut()?;

    let update = accumulator.decrease_balance(amount, timestamp, context)?;

    emit!(BalanceDecreased {
        accumulator: ctx.accounts.accumulator.key(),
        amount,
        new_balance: update.new_balance,
        timestamp,
        context,
        wrote_new_record: update.wrote_new_record,
        cardinality: accumulator.cardinality(),
    });

    Ok(update.new_balance)
}
