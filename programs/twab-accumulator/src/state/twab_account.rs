use crate::components::{checkpoint_writer, range_query, BalanceUpdate, RingBuffer};
use crate::error::{DecreaseContext, TwabResult};
use crate::state::history::TwabHistory;
use crate::state::record::{IndexedRecord, Record};
use anchor_lang::prelude::*;

/// Per-subject time-weighted balance index.
///
/// One account exists per `(ledger, subject)` pair and is derived from
/// `[TWAB_SEED, ledger, subject]`. Only the ledger may write; anyone may read.
///
/// # Layout
///
/// Header fields are ordered so that no implicit padding exists under either
/// 8- or 16-byte `u128` alignment: 96 header bytes, the ring, then reserved
/// space.
#[account(zero_copy)]
#[repr(C)]
pub struct TwabAccount {
    /// Account, pool or ticket holder whose balance is tracked.
    pub subject: Pubkey,

    /// Balance ledger authorised to report changes for `subject`.
    pub ledger: Pubkey,

    /// Balance as of the latest write; always equal to the newest record's
    /// balance once any history exists.
    pub balance: u128,

    pub created_at: i64,
    pub version: u8,
    pub bump: u8,
    pub _padding: [u8; 6],

    pub history: TwabHistory,

    pub reserved: [u64; 8], // reserved for future use
}

impl TwabAccount {
    pub const LEN: usize = 8 + core::mem::size_of::<TwabAccount>();

    #[inline(always)]
    pub fn cardinality(&self) -> u16 {
        self.history.cardinality
    }

    pub fn increase_balance(&mut self, amount: u128, timestamp: u64) -> TwabResult<BalanceUpdate> {
        let update =
            checkpoint_writer::increase_balance(&mut self.history, self.balance, amount, timestamp)?;
        self.balance = update.new_balance;
        Ok(update)
    }

    pub fn decrease_balance(
        &mut self,
        amount: u128,
        timestamp: u64,
        context: DecreaseContext,
    ) -> TwabResult<BalanceUpdate> {
        let update = checkpoint_writer::decrease_balance(
            &mut self.history,
            self.balance,
            amount,
            timestamp,
            context,
        )?;
        self.balance = update.new_balance;
        Ok(update)
    }

    pub fn push_checkpoint(&mut self, record: Record) -> TwabResult<()> {
        checkpoint_writer::push_checkpoint(&mut self.history, self.balance, record)
    }

    pub fn checkpoint(&mut self, timestamp: u64) -> TwabResult<bool> {
        checkpoint_writer::checkpoint(&mut self.history, self.balance, timestamp)
    }

    #[inline]
    pub fn get_balance_at(&self, target: u64, current_time: u64) -> u128 {
        range_query::balance_at(&self.history, self.balance, target, current_time)
    }

    #[inline]
    pub fn get_average_balance_between(
        &self,
        start: u64,
        end: u64,
        current_time: u64,
    ) -> TwabResult<u128> {
        range_query::average_balance_between(&self.history, self.balance, start, end, current_time)
    }

    pub fn oldest_record(&self) -> TwabResult<IndexedRecord> {
        let (index, record) = self.history.oldest()?;
        Ok(IndexedRecord {
            index: index as u16,
            record,
        })
    }

    pub fn newest_record(&self) -> TwabResult<IndexedRecord> {
        let (index, record) = self.history.newest()?;
        Ok(IndexedRecord {
            index: index as u16,
            record,
        })
    }
}
