//! Core library for CAMS consolidated account statement processing.
//!
//! This crate provides:
//! - PDF access (password pre-check, per-page text extraction)
//! - Line classification and folio/fund tracking over statement text
//! - Transaction line parsing with exact decimal amounts
//! - Post-processing of stamp duty and STT charge lines

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{CamsError, PdfError, Result, ScanError};
pub use models::config::{CamsConfig, ExtractionConfig, OutputConfig};
pub use models::transaction::{RawTransaction, TransactionRecord, TransactionType};
pub use pdf::{PasswordChecker, PasswordStatus, PdfExtractor, StatementDocument, TextProvider};
pub use statement::{ExtractionStatus, StatementExtraction, StatementExtractor};

/// Re-export the decimal type used for amounts.
pub use rust_decimal::Decimal;
