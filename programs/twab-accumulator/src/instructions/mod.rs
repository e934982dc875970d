pub mod initialize_accumulator;
pub mod push_checkpoint;
pub mod query_twab;
pub mod reserve;
pub mod update_balance;

pub use initialize_accumulator::*;
pub use push_checkpoint::*;
pub use query_twab::*;
pub use reserve::*;
pub use update_balance::*;
