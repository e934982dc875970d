use anchor_lang::prelude::*;
use crate::error::DecreaseContext;

#[event]
pub struct AccumulatorInitialized {
    pub accumulator: Pubkey,
    pub ledger: Pubkey,
    pub subject: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct BalanceIncreased {
    pub accumulator: Pubkey,
    pub amount: u128,
    pub new_balance: u128,
    pub timestamp: u64,
    pub wrote_new_record: bool,
    pub cardinality: u16,
}

#[event]
pub struct BalanceDecreased {
    pub accumulator: Pubkey,
    pub amount: u128,
    pub new_balance: u128,
    pub timestamp: u64,
    pub context: DecreaseContext,
    pub wrote_new_record: bool,
    pub cardinality: u16,
}

#[event]
pub struct CheckpointPushed {
    pub accumulator: Pubkey,
    pub timestamp: u64,
    pub balance: u128,
    pub cardinality: u16,
}

#[event]
pub struct ReserveInitialized {
    pub reserve: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ReserveCheckpointed {
    pub reserve: Pubkey,
    pub total_accumulated: u128,
    pub timestamp: u64,
    pub appended: bool,
}
