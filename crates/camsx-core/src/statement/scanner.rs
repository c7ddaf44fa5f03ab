//! Line-by-line scan of statement pages.

use tracing::trace;

use super::folio::{FolioTracker, LineDisposition};
use super::rules::{classify, starts_with_date, LineClass, TransactionLineParser};
use crate::models::config::ExtractionConfig;
use crate::models::transaction::RawTransaction;

/// Scans statement text in document order, collecting raw transactions.
///
/// All state lives in the scanner, so each extraction uses its own.
#[derive(Debug, Clone)]
pub struct StatementScanner {
    tracker: FolioTracker,
    parser: TransactionLineParser,
    records: Vec<RawTransaction>,
}

impl StatementScanner {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            tracker: FolioTracker::new(config),
            parser: TransactionLineParser::new(),
            records: Vec::new(),
        }
    }

    /// Scan every line of one page.
    pub fn scan_page(&mut self, text: &str) {
        for raw_line in text.lines() {
            self.scan_line(raw_line);
        }
    }

    /// Scan a single line of page text.
    pub fn scan_line(&mut self, raw_line: &str) {
        let line = raw_line.trim();
        if line.is_empty() {
            return;
        }

        let class = classify(line);
        if let LineClass::FolioHeader(folio_number) = class {
            self.tracker.start_folio(folio_number);
            return;
        }

        if self.tracker.observe(line, raw_line) == LineDisposition::Consumed {
            return;
        }

        let Some(context) = self.tracker.context() else {
            trace!("No folio/fund context, dropping: {}", line);
            return;
        };

        if class == LineClass::BoilerplateSkip || !starts_with_date(line) {
            return;
        }

        match self.parser.parse(line) {
            Some(fields) => {
                trace!("Transaction: {}", line);
                self.records
                    .push(fields.into_raw(context.folio_number, context.fund_name));
            }
            None => trace!("Dated line is not a transaction: {}", line),
        }
    }

    /// Transactions collected so far.
    pub fn records(&self) -> &[RawTransaction] {
        &self.records
    }

    pub fn finish(self) -> Vec<RawTransaction> {
        self.records
    }
}
