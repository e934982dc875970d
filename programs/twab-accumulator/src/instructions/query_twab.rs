use crate::state::record::IndexedRecord;
use crate::state::twab_account::TwabAccount;
use crate::utils::clock::unix_now;
use anchor_lang::prelude::*;

/// Read-only access for query facades (rewards, voting power, draws).
/// Results travel back through return data.
#[derive(Accounts)]
pub struct QueryTwab<'info> {
    pub accumulator: AccountLoader<'info, TwabAccount>,
}

pub fn get_balance_at(ctx: Context<QueryTwab>, target_time: u64) -> Result<u128> {
    let current_time = unix_now()?;
    let accumulator = ctx.accounts.accumulator.load()?;
    Ok(accumulator.get_balance_at(target_time, current_time))
}

pub fn get_average_balance_between(
    ctx: Context<QueryTwab>,
    start_time: u64,
    end_time: u64,
) -> Result<u128> {
    let current_time = unix_now()?;
    let accumulator = ctx.accounts.accumulator.load()?;
    Ok(accumulator.get_average_balance_between(start_time, end_time, current_time)?)
}

pub fn oldest_record(ctx: Context<QueryTwab>) -> Result<IndexedRecord> {
    let accumulator = ctx.accounts.accumulator.load()?;
    Ok(accumulator.oldest_record()?)
}

pub fn newest_record(ctx: Context<QueryTwab>) -> Result<IndexedRecord> {
    let accumulator = ctx.accounts.accumulator.load()?;
    Ok(accumulator.newest_record()?)
}
