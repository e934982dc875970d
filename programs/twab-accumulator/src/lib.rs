#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod components;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use error::DecreaseContext;
pub use instructions::*;
pub use state::record::{IndexedRecord, Record};

declare_id!("7jtN4UNEtnXPEwkXhUCLdoSqpHYxMP8XqyyZy38esJdA");

#[program]
pub mod twab_accumulator {
    use super::*;

    pub fn initialize_accumulator(
        ctx: Context<InitializeAccumulator>,
        config: AccumulatorConfig,
    ) -> Result<()> {
        instructions::initialize_accumulator(ctx, config)
    }

    pub fn increase_balance(ctx: Context<UpdateBalance>, amount: u128) -> Result<u128> {
        instructions::increase_balance(ctx, amount)
    }

    pub fn decrease_balance(
        ctx: Context<UpdateBalance>,
        amount: u128,
        context: DecreaseContext,
    ) -> Result<u128> {
        instructions::decrease_balance(ctx, amount, context)
    }

    pub fn push_checkpoint(ctx: Context<UpdateBalance>, record: Record) -> Result<()> {
        instructions::push_checkpoint(ctx, record)
    }

    pub fn checkpoint(ctx: Context<UpdateBalance>) -> Result<bool> {
        instructions::checkpoint(ctx)
    }

    pub fn get_balance_at(ctx: Context<QueryTwab>, target_time: u64) -> Result<u128> {
        instructions::get_balance_at(ctx, target_time)
    }

    pub fn get_average_balance_between(
        ctx: Context<QueryTwab>,
        start_time: u64,
        end_time: u64,
    ) -> Result<u128> {
        instructions::get_average_balance_between(ctx, start_time, end_time)
    }

    pub fn oldest_record(ctx: Context<QueryTwab>) -> Result<IndexedRecord> {
        instructions::oldest_record(ctx)
    }

    pub fn newest_record(ctx: Context<QueryTwab>) -> Result<IndexedRecord> {
        instructions::newest_record(ctx)
    }

    pub fn initialize_reserve(ctx: Context<InitializeReserve>) -> Result<()> {
        instructions::initialize_reserve(ctx)
    }

    pub fn deposit_reserve(ctx: Context<UpdateReserve>, amount: u128) -> Result<u128> {
        instructions::deposit_reserve(ctx, amount)
    }

    pub fn checkpoint_reserve(
        ctx: Context<UpdateReserve>,
        total_accumulated: u128,
    ) -> Result<bool> {
        instructions::checkpoint_reserve(ctx, total_accumulated)
    }

    pub fn get_reserve_accumulated_between(
        ctx: Context<QueryReserve>,
        start_time: u64,
        end_time: u64,
    ) -> Result<u128> {
        instructions::get_reserve_accumulated_between(ctx, start_time, end_time)
    }
}
