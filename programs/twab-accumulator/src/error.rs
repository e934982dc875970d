use anchor_lang::prelude::*;
use core::fmt;

/// On-chain error codes surfaced to clients.
///
/// The first block mirrors [`TwabError`] one-to-one; the second covers account
/// validation performed by the instruction handlers.
#[error_code]
pub enum AccumulatorError {
    #[msg("Decrease amount exceeds the current balance")]
    InsufficientBalance,
    #[msg("Query window start is after its end")]
    InvalidRange,
    #[msg("Balance or cumulative arithmetic overflowed")]
    Overflow,
    #[msg("Accumulator has no recorded history")]
    EmptyHistory,
    #[msg("Timestamp is earlier than the newest recorded entry")]
    StaleTimestamp,
    #[msg("Checkpoint is inconsistent with the recorded history")]
    InvalidCheckpoint,
    #[msg("Query reaches before the oldest retained entry")]
    InsufficientHistory,

    #[msg("Signer is not the ledger that owns this accumulator")]
    UnauthorizedLedger,
    #[msg("Signer is not the reserve authority")]
    UnauthorizedAuthority,
    #[msg("Cluster clock returned a negative unix timestamp")]
    InvalidClock,
}

/// Caller-supplied reason attached to a failed decrease.
///
/// The writer never inspects it; it only travels back inside
/// [`TwabError::InsufficientBalance`] so the ledger can tell which of its own
/// flows tripped the check.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecreaseContext {
    Transfer,
    Burn,
    Withdraw,
    Delegate,
    Other(u16),
}

impl fmt::Display for DecreaseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecreaseContext::Transfer => f.write_str("transfer"),
            DecreaseContext::Burn => f.write_str("burn"),
            DecreaseContext::Withdraw => f.write_str("withdraw"),
            DecreaseContext::Delegate => f.write_str("delegate"),
            DecreaseContext::Other(code) => write!(f, "other({code})"),
        }
    }
}

/// Errors produced by the ring store, checkpoint writer and range queries.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwabError {
    #[error("insufficient balance for {0}")]
    InsufficientBalance(DecreaseContext),
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: u64, end: u64 },
    #[error("arithmetic overflow")]
    Overflow,
    #[error("empty history")]
    EmptyHistory,
    #[error("stale timestamp {given}, newest entry is at {newest}")]
    StaleTimestamp { newest: u64, given: u64 },
    #[error("checkpoint does not extend the recorded history")]
    InvalidCheckpoint,
    #[error("target {target} predates the oldest retained entry at {oldest}")]
    InsufficientHistory { oldest: u64, target: u64 },
}

impl TwabError {
    pub fn code(&self) -> AccumulatorError {
        match self {
            TwabError::InsufficientBalance(_) => AccumulatorError::InsufficientBalance,
            TwabError::InvalidRange { .. } => AccumulatorError::InvalidRange,
            TwabError::Overflow => AccumulatorError::Overflow,
            TwabError::EmptyHistory => AccumulatorError::EmptyHistory,
            TwabError::StaleTimestamp { .. } => AccumulatorError::StaleTimestamp,
            TwabError::InvalidCheckpoint => AccumulatorError::InvalidCheckpoint,
            TwabError::InsufficientHistory { .. } => AccumulatorError::InsufficientHistory,
        }
    }
}

impl From<TwabError> for anchor_lang::error::Error {
    fn from(err: TwabError) -> Self {
        // Program error codes are unit variants; log the typed detail so the
        // decrease context is still visible in transaction logs.
        msg!("twab-accumulator: {}", err);
        err.code().into()
    }
}

pub type TwabResult<T> = core::result::Result<T, TwabError>;
