//! Data models for the rental catalog and ledger

pub mod book;
pub mod date;
pub mod transaction;

// Re-export commonly used types
pub use book::{Book, BookFilter, RateRange};
pub use transaction::{HoldingStatus, Transaction};
