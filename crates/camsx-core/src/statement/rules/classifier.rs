//! Line classification: folio headers, boilerplate and transaction candidates.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{DATE_START, FOLIO_HEADER, STATEMENT_SERIAL};

/// Classification of one stripped statement line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Start of a folio section, with the folio number.
    FolioHeader(String),
    /// Headers, disclaimers, totals and other non-transaction text.
    BoilerplateSkip,
    /// Anything else; parsed as a transaction if it starts with a date.
    Candidate,
}

/// Sentinel printed for folios without activity.
const NO_TRANSACTIONS: &str = "*** no transactions during this statement period ***";

/// Phrases (lowercase) whose whole-word presence marks a line as boilerplate.
const BOILERPLATE_PHRASES: &[&str] = &[
    "our mission",
    "consolidated account statement",
    "email id:",
    "phone res:",
    "phone off:",
    "mobile:",
    "this consolidated account statement is brought to you",
    "if you find any folios missing",
    "this statement may not reflect the complete information",
    "portfolio summary",
    "cost value",
    "closing unit balance:",
    "nav on",
    "total cost value:",
    "market value on",
    "entry load:",
    "exit load:",
    "important note -",
    "wef",
    "gst identification number",
    "kyc:",
    "pan:",
    "registrar:",
    "nominee",
    "page",
    "date transaction amount units nav unit",
];

/// Skipped only when the line does not start with a date, so a fund or
/// description containing the word still parses.
const TOTAL_PHRASE: &str = "total";

struct Boilerplate {
    phrase: &'static str,
    pattern: Regex,
}

fn whole_word(phrase: &str) -> Regex {
    Regex::new(&format!(r"(?:^|\s){}(?:$|\s)", regex::escape(phrase))).unwrap()
}

lazy_static! {
    static ref BOILERPLATE: Vec<Boilerplate> = BOILERPLATE_PHRASES
        .iter()
        .map(|&phrase| Boilerplate { phrase, pattern: whole_word(phrase) })
        .collect();

    static ref TOTAL: Regex = whole_word(TOTAL_PHRASE);

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Classify a stripped line.
pub fn classify(line: &str) -> LineClass {
    if let Some(caps) = FOLIO_HEADER.captures(line) {
        return LineClass::FolioHeader(caps[1].to_string());
    }
    if is_boilerplate(line) {
        LineClass::BoilerplateSkip
    } else {
        LineClass::Candidate
    }
}

/// Whether a line starts with a `DD-Mon-YYYY` date.
pub fn starts_with_date(line: &str) -> bool {
    DATE_START.is_match(line)
}

/// Whether a line is statement boilerplate.
///
/// Matching is case-insensitive and on whole words; runs of layout spacing
/// count as a single space.
pub fn is_boilerplate(line: &str) -> bool {
    let lower = line.to_lowercase();
    let normalized = WHITESPACE_RUN.replace_all(lower.trim(), " ");

    if normalized.contains(NO_TRANSACTIONS) || STATEMENT_SERIAL.is_match(&normalized) {
        return true;
    }
    if let Some(entry) = BOILERPLATE.iter().find(|b| b.pattern.is_match(&normalized)) {
        tracing::trace!("Boilerplate '{}': {}", entry.phrase, line);
        return true;
    }
    TOTAL.is_match(&normalized) && !starts_with_date(line)
}
