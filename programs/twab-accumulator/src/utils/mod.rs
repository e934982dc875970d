pub mod clock;
pub mod constants;
pub mod events;
