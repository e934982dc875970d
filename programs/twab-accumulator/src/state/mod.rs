pub mod history;
pub mod record;
pub mod reserve_accumulator;
pub mod twab_account;

pub use history::*;
pub use record::*;
pub use reserve_accumulator::*;
pub use twab_account::*;
