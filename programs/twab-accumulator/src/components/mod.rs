pub mod checkpoint_writer;
pub mod range_query;
pub mod ring_store;

pub use checkpoint_writer::*;
pub use range_query::*;
pub use ring_store::*;
