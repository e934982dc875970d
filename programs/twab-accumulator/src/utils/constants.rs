/// State constants
pub const MAX_CARDINALITY: usize = 128; // power of 2, keeps the account under the 10KiB init limit
pub const MAX_CARDINALITY_U16: u16 = MAX_CARDINALITY as u16;

/// PDA seed constants
pub const TWAB_SEED: &[u8] = b"twab";
pub const RESERVE_SEED: &[u8] = b"reserve";

/// Layout version stamped into every account created by this program.
pub const LAYOUT_VERSION: u8 = 1;
