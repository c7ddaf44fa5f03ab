//! Data models.

pub mod config;
pub mod transaction;

pub use config::{CamsConfig, ExtractionConfig, OutputConfig};
pub use transaction::{RawTransaction, TransactionRecord, TransactionType};
