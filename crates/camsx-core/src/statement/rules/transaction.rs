//! Transaction line grammar.

use regex::Captures;
use rust_decimal::Decimal;

use super::numeric::normalize_amount;
use super::patterns::{TRANSACTION_AMOUNT_ONLY, TRANSACTION_FULL};
use crate::models::transaction::RawTransaction;

/// Fields of one matched transaction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFields {
    pub date: String,
    pub transaction: String,
    pub amount: Option<Decimal>,
    pub units: Option<Decimal>,
    pub nav: Option<Decimal>,
    /// Running unit balance; parsed but not carried into records.
    pub unit_balance: Option<Decimal>,
}

impl TransactionFields {
    /// Attach the folio section context.
    pub fn into_raw(self, folio_number: &str, fund_name: &str) -> RawTransaction {
        RawTransaction {
            fund_name: fund_name.to_string(),
            folio_number: folio_number.to_string(),
            date: self.date,
            transaction: self.transaction,
            amount: self.amount,
            units: self.units,
            nav: self.nav,
        }
    }
}

/// Parses date-prefixed transaction lines.
///
/// The full form (amount, units, NAV, unit balance) is tried before the
/// amount-only form used by cash distributions and charges.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionLineParser;

impl TransactionLineParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one stripped line, or `None` if it is not a transaction.
    pub fn parse(&self, line: &str) -> Option<TransactionFields> {
        if let Some(caps) = TRANSACTION_FULL.captures(line) {
            return Some(TransactionFields {
                units: number(&caps, "units"),
                nav: number(&caps, "nav"),
                unit_balance: number(&caps, "balance"),
                ..base_fields(&caps)
            });
        }

        TRANSACTION_AMOUNT_ONLY
            .captures(line)
            .map(|caps| base_fields(&caps))
    }
}

fn base_fields(caps: &Captures<'_>) -> TransactionFields {
    TransactionFields {
        date: caps["date"].to_string(),
        transaction: caps["transaction"].trim().to_string(),
        amount: number(caps, "amount"),
        units: None,
        nav: None,
        unit_balance: None,
    }
}

fn number(caps: &Captures<'_>, name: &str) -> Option<Decimal> {
    normalize_amount(caps.name(name).map(|m| m.as_str()))
}
