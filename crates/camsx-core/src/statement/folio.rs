//! Folio and fund-name tracking across statement lines.
//!
//! A folio header opens a section. The fund name follows a couple of lines
//! later, often wrapped over several lines, so the tracker buffers lines that
//! look like a scheme name until the joined text matches the fund-name
//! grammar or the search window runs out.

use tracing::{debug, warn};

use super::rules::classifier::starts_with_date;
use super::rules::patterns::{FUND_NAME, PARENTHETICAL, SCHEME_CODE_PREFIX, SCHEME_CODE_START};
use crate::models::config::ExtractionConfig;

/// Fund-name search state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum FundNameSearch {
    /// Not looking for a fund name.
    #[default]
    Idle,
    /// A folio header was seen and its fund name is not resolved yet.
    AwaitingFundName {
        /// Non-header lines seen since the folio header.
        lines_seen: usize,
        /// Raw lines of a possibly wrapped fund name.
        buffer: Vec<String>,
    },
}

/// What the scan should do with a line after the tracker has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDisposition {
    /// The line belongs to the fund-name search.
    Consumed,
    /// The line may be a transaction.
    Continue,
}

/// Folio number and cleaned fund name a transaction is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolioContext<'a> {
    pub folio_number: &'a str,
    pub fund_name: &'a str,
}

/// Tracks the current folio and resolves its fund name.
#[derive(Debug, Clone)]
pub struct FolioTracker {
    fund_name_offset: usize,
    fund_name_start_limit: usize,
    fund_name_timeout: usize,
    folio_number: Option<String>,
    raw_fund_name: Option<String>,
    fund_name: Option<String>,
    search: FundNameSearch,
}

impl FolioTracker {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            fund_name_offset: config.fund_name_offset,
            fund_name_start_limit: config.fund_name_start_limit,
            fund_name_timeout: config.fund_name_timeout,
            folio_number: None,
            raw_fund_name: None,
            fund_name: None,
            search: FundNameSearch::Idle,
        }
    }

    /// Open a new folio section, forgetting the previous fund name.
    pub fn start_folio(&mut self, folio_number: String) {
        debug!("Folio found: {}", folio_number);
        self.folio_number = Some(folio_number);
        self.raw_fund_name = None;
        self.fund_name = None;
        self.search = FundNameSearch::AwaitingFundName {
            lines_seen: 0,
            buffer: Vec::new(),
        };
    }

    /// Feed a non-header line. `line` is stripped, `raw_line` keeps the
    /// original spacing for fund-name reconstruction.
    pub fn observe(&mut self, line: &str, raw_line: &str) -> LineDisposition {
        let FundNameSearch::AwaitingFundName { lines_seen, buffer } = &mut self.search else {
            return LineDisposition::Continue;
        };

        *lines_seen += 1;
        let seen = *lines_seen;
        let mut resolved = None;
        let mut no_name_start = false;

        if seen >= self.fund_name_offset {
            if SCHEME_CODE_START.is_match(line) || !buffer.is_empty() {
                buffer.push(raw_line.to_string());
                let combined = buffer.join(" ");
                resolved = FUND_NAME
                    .captures(combined.trim())
                    .map(|caps| caps["name"].trim().to_string());
            } else if seen > self.fund_name_start_limit {
                no_name_start = true;
            }
        }

        if let Some(name) = resolved {
            self.set_fund_name(name);
            self.search = FundNameSearch::Idle;
        } else if no_name_start || seen > self.fund_name_timeout {
            warn!(
                "No fund name found for folio {} after {} lines",
                self.folio_number.as_deref().unwrap_or_default(),
                seen
            );
            self.search = FundNameSearch::Idle;
        }

        match self.search {
            FundNameSearch::AwaitingFundName { .. } => LineDisposition::Consumed,
            // the line that ended the search can still be a transaction
            FundNameSearch::Idle if starts_with_date(line) => LineDisposition::Continue,
            FundNameSearch::Idle => LineDisposition::Consumed,
        }
    }

    fn set_fund_name(&mut self, raw_name: String) {
        let cleaned = clean_fund_name(&raw_name);
        debug!("Fund name found: '{}' -> '{}'", raw_name, cleaned);
        self.fund_name = Some(cleaned);
        self.raw_fund_name = Some(raw_name);
    }

    /// Folio and fund name, once both are known.
    pub fn context(&self) -> Option<FolioContext<'_>> {
        let folio_number = self.folio_number.as_deref()?;
        let fund_name = self.fund_name.as_deref().filter(|name| !name.is_empty())?;
        Some(FolioContext {
            folio_number,
            fund_name,
        })
    }

    /// Fund name as captured, before cleaning.
    pub fn raw_fund_name(&self) -> Option<&str> {
        self.raw_fund_name.as_deref()
    }

    pub fn is_awaiting_fund_name(&self) -> bool {
        matches!(self.search, FundNameSearch::AwaitingFundName { .. })
    }
}

/// Strip the scheme code and parenthetical annotations from a captured name.
pub fn clean_fund_name(raw_name: &str) -> String {
    let without_notes = PARENTHETICAL.replace_all(raw_name, "");
    let without_notes = without_notes.replace("(Non-Demat)", "");
    SCHEME_CODE_PREFIX
        .replace(without_notes.trim(), "")
        .trim()
        .to_string()
}
