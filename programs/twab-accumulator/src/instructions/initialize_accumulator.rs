use crate::state::twab_account::TwabAccount;
use crate::utils::constants::{LAYOUT_VERSION, TWAB_SEED};
use crate::utils::events::AccumulatorInitialized;
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct AccumulatorConfig {
    /// Account, pool or ticket holder the new accumulator tracks.
    pub subject: Pubkey,
}

/// Creates the empty accumulator for one subject of one ledger.
///
/// The PDA is derived from both keys, so a subject can be tracked by several
/// ledgers without their histories ever aliasing.
#[derive(Accounts)]
#[instruction(config: AccumulatorConfig)]
pub struct InitializeAccumulator<'info> {
    #[account(
        init,
        payer = payer,
        space = TwabAccount::LEN,
        seeds = [TWAB_SEED, ledger.key().as_ref(), config.subject.as_ref()],
        bump,
    )]
    pub accumulator: AccountLoader<'info, TwabAccount>,

    /// Ledger authority that will own all writes to the accumulator.
    pub ledger: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_accumulator(
    ctx: Context<InitializeAccumulator>,
    config: AccumulatorConfig,
) -> Result<()> {
    let timestamp_now = Clock::get()?.unix_timestamp;

    let mut accumulator = ctx.accounts.accumulator.load_init()?;
    accumulator.subject = config.subject;
    accumulator.ledger = ctx.accounts.ledger.key();
    accumulator.balance = 0;
    accumulator.created_at = timestamp_now;
    accumulator.version = LAYOUT_VERSION;
    accumulator.bump = ctx.bumps.accumulator;
    // History starts zeroed: cursor at slot 0, cardinality 0.

    msg!(
        "twab accumulator created for subject {} (ledger {})",
        config.subject,
        accumulator.ledger
    );

    emit!(AccumulatorInitialized {
        accumulator: ctx.accounts.accumulator.key(),
        ledger: ctx.accounts.ledger.key(),
        subject: config.subject,
        timestamp: timestamp_now,
    });

    Ok(())
}
