//! Transaction extraction from consolidated account statement text.

mod extractor;
pub mod folio;
mod postprocess;
pub mod rules;
mod scanner;

pub use extractor::{ExtractionStatus, StatementExtraction, StatementExtractor};
pub use folio::{clean_fund_name, FolioContext, FolioTracker, LineDisposition};
pub use postprocess::PostProcessor;
pub use scanner::StatementScanner;
