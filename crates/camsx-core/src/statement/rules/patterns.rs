//! Named line patterns for CAMS consolidated account statements.

use lazy_static::lazy_static;
use regex::Regex;

/// Numeric column: digits/commas/periods/hyphens, a parenthesized number, or `--`.
const NUMERIC_FIELD: &str = r"[\d,.-]+|\([\d,.-]+\)|--";

lazy_static! {
    // "Folio No: 123456789/12"
    pub static ref FOLIO_HEADER: Regex = Regex::new(
        r"^Folio No:\s*([\w/]+)"
    ).unwrap();

    // Leading scheme code of a fund-name line: "B92Z-" or "INF123A01018-"
    pub static ref SCHEME_CODE_START: Regex = Regex::new(
        r"^[A-Z0-9]+-"
    ).unwrap();

    // Scheme code and name, up to the ISIN / annotation suffix or end of line
    pub static ref FUND_NAME: Regex = Regex::new(
        r"(?i)^(?P<name>[A-Z0-9]+-[A-Za-z0-9\s().'/,\-:&]+?)(?:\s*-\s*ISIN:|\s*\(formerly known as|\s*\(Non-Demat\)|$|\s*\(Advisor:)"
    ).unwrap();

    // Scheme code prefix removed from a cleaned fund name
    pub static ref SCHEME_CODE_PREFIX: Regex = Regex::new(
        r"^[A-Za-z0-9]+-\s*"
    ).unwrap();

    // Any parenthetical annotation, with its leading whitespace
    pub static ref PARENTHETICAL: Regex = Regex::new(
        r"\s*\([^)]*\)"
    ).unwrap();

    // "01-Apr-2023" at line start
    pub static ref DATE_START: Regex = Regex::new(
        r"^\d{2}-[A-Za-z]{3}-\d{4}"
    ).unwrap();

    // Date, description, amount, units, NAV, unit balance
    pub static ref TRANSACTION_FULL: Regex = Regex::new(&format!(
        r"^(?P<date>\d{{2}}-[A-Za-z]{{3}}-\d{{4}})\s+(?P<transaction>.+?)\s+(?P<amount>{n})\s+(?P<units>{n})\s+(?P<nav>{n})\s+(?P<balance>{n})$",
        n = NUMERIC_FIELD
    )).unwrap();

    // Date, description, amount
    pub static ref TRANSACTION_AMOUNT_ONLY: Regex = Regex::new(&format!(
        r"^(?P<date>\d{{2}}-[A-Za-z]{{3}}-\d{{4}})\s+(?P<transaction>.+?)\s+(?P<amount>{n})$",
        n = NUMERIC_FIELD
    )).unwrap();

    // Statement serial printed in page footers: "CAMSCASWS-12345"
    pub static ref STATEMENT_SERIAL: Regex = Regex::new(
        r"(?i)(?:^|\s)camscasws-\d+(?:$|\s)"
    ).unwrap();
}

/// Every named line shape, for lookup by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinePattern {
    FolioHeader,
    SchemeCodeStart,
    FundName,
    DateStart,
    TransactionFull,
    TransactionAmountOnly,
    StatementSerial,
}

impl LinePattern {
    pub const ALL: [LinePattern; 7] = [
        LinePattern::FolioHeader,
        LinePattern::SchemeCodeStart,
        LinePattern::FundName,
        LinePattern::DateStart,
        LinePattern::TransactionFull,
        LinePattern::TransactionAmountOnly,
        LinePattern::StatementSerial,
    ];

    /// Compiled regex for this pattern.
    pub fn regex(self) -> &'static Regex {
        match self {
            LinePattern::FolioHeader => &FOLIO_HEADER,
            LinePattern::SchemeCodeStart => &SCHEME_CODE_START,
            LinePattern::FundName => &FUND_NAME,
            LinePattern::DateStart => &DATE_START,
            LinePattern::TransactionFull => &TRANSACTION_FULL,
            LinePattern::TransactionAmountOnly => &TRANSACTION_AMOUNT_ONLY,
            LinePattern::StatementSerial => &STATEMENT_SERIAL,
        }
    }

    pub fn is_match(self, line: &str) -> bool {
        self.regex().is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for pattern in LinePattern::ALL {
            assert!(!pattern.regex().as_str().is_empty(), "{:?}", pattern);
        }
    }

    #[test]
    fn test_folio_header() {
        let caps = FOLIO_HEADER.captures("Folio No: 123456789/12   PAN: ABCDE1234F").unwrap();
        assert_eq!(&caps[1], "123456789/12");
        assert!(!LinePattern::FolioHeader.is_match("Old Folio No: 1/1"));
    }

    #[test]
    fn test_scheme_code_start() {
        assert!(LinePattern::SchemeCodeStart.is_match("B92Z-Aditya Birla Sun Life Frontline Equity"));
        assert!(!LinePattern::SchemeCodeStart.is_match("Registrar : CAMS"));
        assert!(!LinePattern::SchemeCodeStart.is_match("abc-lowercase"));
    }

    #[test]
    fn test_fund_name_stops_at_isin() {
        let caps = FUND_NAME
            .captures("INF123A01018-ABC Growth Fund - ISIN: INF123A01018")
            .unwrap();
        assert_eq!(&caps["name"], "INF123A01018-ABC Growth Fund");
    }

    #[test]
    fn test_fund_name_stops_at_annotations() {
        let caps = FUND_NAME
            .captures("P8042-XYZ Flexi Cap Fund - Direct Plan (Non-Demat) - ISIN: INF0")
            .unwrap();
        assert_eq!(&caps["name"], "P8042-XYZ Flexi Cap Fund - Direct Plan");

        let caps = FUND_NAME
            .captures("K12-New Name Fund (formerly known as Old Name Fund)")
            .unwrap();
        assert_eq!(&caps["name"], "K12-New Name Fund");

        let caps = FUND_NAME
            .captures("K12-Some Fund Regular Growth(Advisor: ARN-0000)")
            .unwrap();
        assert_eq!(&caps["name"], "K12-Some Fund Regular Growth");
    }

    #[test]
    fn test_fund_name_requires_scheme_code() {
        assert!(!LinePattern::FundName.is_match("Registrar : CAMS"));
    }

    #[test]
    fn test_date_start() {
        assert!(LinePattern::DateStart.is_match("01-Apr-2023 Purchase"));
        assert!(!LinePattern::DateStart.is_match("1-Apr-2023 Purchase"));
        assert!(!LinePattern::DateStart.is_match("Opening 01-Apr-2023"));
    }

    #[test]
    fn test_statement_serial() {
        assert!(LinePattern::StatementSerial.is_match("Page 2 of 4 CAMSCASWS-123456"));
        assert!(!LinePattern::StatementSerial.is_match("CAMSCASWS-"));
    }

    #[test]
    fn test_transaction_shapes() {
        let line = "01-Apr-2023 Purchase 5,000.00 123.456 40.5000 987.654";
        assert!(LinePattern::TransactionFull.is_match(line));

        let line = "05-Apr-2023 Dividend Reinvestment 100.00";
        assert!(!LinePattern::TransactionFull.is_match(line));
        assert!(LinePattern::TransactionAmountOnly.is_match(line));
    }
}
