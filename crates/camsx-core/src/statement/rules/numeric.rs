//! Numeric column normalization.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Placeholder printed for a column that is not reported.
const NOT_REPORTED: &str = "--";

/// Convert statement number text to an exact decimal.
///
/// Thousands separators are dropped and `(1,234.50)` reads as `-1234.50`.
/// Empty text, `--` and anything that does not parse yield `None`; a bad
/// column never aborts a record.
pub fn normalize_amount(text: Option<&str>) -> Option<Decimal> {
    let text = text?.trim();
    if text.is_empty() || text == NOT_REPORTED {
        return None;
    }

    let cleaned = text.replace(',', "");
    let signed = match cleaned.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => format!("-{}", inner),
        None => cleaned,
    };

    Decimal::from_str(&signed).ok()
}
