#![warn(clippy::uninlined_format_args)]

pub mod json_store;
pub mod memory;
mod records;

pub use json_store::JsonLedgerStore;
pub use memory::InMemoryLedger;
