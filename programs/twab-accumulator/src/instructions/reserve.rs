use crate::error::AccumulatorError;
use crate::state::reserve_accumulator::ReserveAccumulator;
use crate::utils::clock::unix_now;
use crate::utils::constants::{LAYOUT_VERSION, RESERVE_SEED};
use crate::utils::events::{ReserveCheckpointed, ReserveInitialized};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitializeReserve<'info> {
    #[account(
        init,
        payer = authority,
        space = ReserveAccumulator::LEN,
        seeds = [RESERVE_SEED, authority.key().as_ref()],
        bump,
    )]
    pub reserve: AccountLoader<'info, ReserveAccumulator>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateReserve<'info> {
    #[account(
        mut,
        has_one = authority @ AccumulatorError::UnauthorizedAuthority,
    )]
    pub reserve: AccountLoader<'info, ReserveAccumulator>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct QueryReserve<'info> {
    pub reserve: AccountLoader<'info, ReserveAccumulator>,
}

pub fn initialize_reserve(ctx: Context<InitializeReserve>) -> Result<()> {
    let timestamp_now = Clock::get()?.unix_timestamp;

    let mut reserve = ctx.accounts.reserve.load_init()?;
    reserve.authority = ctx.accounts.authority.key();
    reserve.total_accumulated = 0;
    reserve.created_at = timestamp_now;
    reserve.version = LAYOUT_VERSION;
    reserve.bump = ctx.bumps.reserve;

    emit!(ReserveInitialized {
        reserve: ctx.accounts.reserve.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: timestamp_now,
    });

    Ok(())
}

/// Adds `amount` to the running total and checkpoints it at cluster time.
pub fn deposit_reserve(ctx: Context<UpdateReserve>, amount: u128) -> Result<u128> {
    let timestamp = unix_now()?;
    let mut reserve = ctx.accounts.reserve.load_mut()?;

    let appended = reserve.deposit(amount, timestamp)?;

    emit!(ReserveCheckpointed {
        reserve: ctx.accounts.reserve.key(),
        total_accumulated: reserve.total_accumulated,
        timestamp,
        appended,
    });

    Ok(reserve.total_accumulated)
}

/// Records an externally tracked running total at cluster time.
pub fn checkpoint_reserve(ctx: Context<UpdateReserve>, total_accumulated: u128) -> Result<bool> {
    let timestamp = unix_now()?;
    let mut reserve = ctx.accounts.reserve.load_mut()?;

    let appended = reserve.checkpoint(total_accumulated, timestamp)?;
    if !appended {
        msg!(
            "reserve total {} coalesced at {}",
            total_accumulated,
            timestamp
        );
    }

    emit!(ReserveCheckpointed {
        reserve: ctx.accounts.reserve.key(),
        total_accumulated: reserve.total_accumulated,
        timestamp,
        appended,
    });

    Ok(appended)
}

pub fn get_reserve_accumulated_between(
    ctx: Context<QueryReserve>,
    start_time: u64,
    end_time: u64,
) -> Result<u128> {
    let reserve = ctx.accounts.reserve.load()?;
    Ok(reserve.accumulated_between(start_time, end_time)?)
}
