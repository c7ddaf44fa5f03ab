//! Statement extraction: password pre-check, page scan and post-processing.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use super::postprocess::PostProcessor;
use super::scanner::StatementScanner;
use crate::error::ScanError;
use crate::models::config::ExtractionConfig;
use crate::models::transaction::{RawTransaction, TransactionRecord};
use crate::pdf::{PasswordChecker, PasswordStatus, PdfExtractor, StatementDocument, TextProvider};

/// Terminal status of an extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStatus {
    Success,
    /// The document is encrypted and the password is wrong.
    InvalidPassword,
    /// The file is not a usable PDF.
    InvalidFile,
    /// Reading or scanning a page failed; carries the cause.
    ScanFailure(String),
    /// The scan found no transaction lines.
    NoDataExtracted,
    /// Every extracted line was a charge that got merged or dropped.
    NoDataAfterProcessing,
}

impl ExtractionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::InvalidPassword => f.write_str("Incorrect password provided for PDF."),
            Self::InvalidFile => f.write_str("The selected file is not a valid PDF."),
            Self::ScanFailure(cause) => write!(
                f,
                "An unexpected error occurred during PDF processing: {}",
                cause
            ),
            Self::NoDataExtracted => f.write_str("No transaction data extracted from PDF."),
            Self::NoDataAfterProcessing => {
                f.write_str("No transaction data to write to CSV after processing.")
            }
        }
    }
}

/// Records and status of one extraction.
///
/// `records` is `None` when the document was rejected before scanning and
/// empty for every other failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementExtraction {
    pub records: Option<Vec<TransactionRecord>>,
    pub status: ExtractionStatus,
}

impl StatementExtraction {
    fn rejected(status: ExtractionStatus) -> Self {
        Self { records: None, status }
    }

    fn failed(status: ExtractionStatus) -> Self {
        Self {
            records: Some(Vec::new()),
            status,
        }
    }

    /// Records of a successful extraction, empty otherwise.
    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records.unwrap_or_default()
    }
}

/// Extracts transactions from statements read through a text provider.
///
/// Holds no per-run state; every call scans with a fresh [`StatementScanner`].
#[derive(Debug, Clone)]
pub struct StatementExtractor<P = PdfExtractor> {
    provider: P,
    config: ExtractionConfig,
}

impl StatementExtractor<PdfExtractor> {
    /// Extractor reading PDF files.
    pub fn new(config: ExtractionConfig) -> Self {
        Self::with_provider(PdfExtractor::new(), config)
    }
}

impl Default for StatementExtractor<PdfExtractor> {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl<P> StatementExtractor<P> {
    pub fn with_provider(provider: P, config: ExtractionConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Scan already extracted page texts. `None` pages are skipped.
    pub fn extract_text_pages<'a, I>(&self, pages: I) -> StatementExtraction
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut scanner = StatementScanner::new(&self.config);
        for text in pages.into_iter().flatten() {
            scanner.scan_page(text);
        }
        self.finish(scanner.finish())
    }

    /// Post-process raw transactions into the final result.
    pub fn finish(&self, raw: Vec<RawTransaction>) -> StatementExtraction {
        if raw.is_empty() {
            return StatementExtraction::failed(ExtractionStatus::NoDataExtracted);
        }

        let raw_count = raw.len();
        let records = PostProcessor::new(&self.config).process(raw);
        if records.is_empty() {
            return StatementExtraction::failed(ExtractionStatus::NoDataAfterProcessing);
        }

        info!("Extracted {} transactions ({} raw lines)", records.len(), raw_count);
        StatementExtraction {
            records: Some(records),
            status: ExtractionStatus::Success,
        }
    }
}

impl<P> StatementExtractor<P>
where
    P: TextProvider + PasswordChecker,
{
    /// Extract all transactions from the statement at `path`.
    ///
    /// Never fails: every problem is reported through the returned status.
    pub fn extract(&self, path: &Path, password: Option<&str>) -> StatementExtraction {
        match self.provider.check(path, password) {
            PasswordStatus::Valid => {}
            PasswordStatus::InvalidPassword => {
                return StatementExtraction::rejected(ExtractionStatus::InvalidPassword);
            }
            PasswordStatus::InvalidFile => {
                return StatementExtraction::rejected(ExtractionStatus::InvalidFile);
            }
        }

        match self.scan(path, password) {
            Ok(raw) => self.finish(raw),
            Err(e) => {
                // records gathered before the fault are not returned
                warn!("Scan of {} failed: {}", path.display(), e);
                StatementExtraction::failed(ExtractionStatus::ScanFailure(e.to_string()))
            }
        }
    }

    /// Scan every page in order and collect raw transactions.
    pub fn scan(&self, path: &Path, password: Option<&str>) -> Result<Vec<RawTransaction>, ScanError> {
        let document = self.provider.open(path, password)?;
        let page_count = document.page_count();
        debug!("Scanning {} pages of {}", page_count, path.display());

        let mut scanner = StatementScanner::new(&self.config);
        for page in 1..=page_count {
            let text = document
                .page_text(page)
                .map_err(|source| ScanError::Page { page, source })?;

            match text {
                Some(text) => scanner.scan_page(&text),
                None => debug!("Page {} has no text, skipping", page),
            }
        }

        Ok(scanner.finish())
    }
}
