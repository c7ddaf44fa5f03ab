//! Mutual fund transaction records extracted from a statement.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Date layout used by the statement (`01-Apr-2023`).
pub const STATEMENT_DATE_FORMAT: &str = "%d-%b-%Y";

/// A transaction line as parsed from the statement, before post-processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Cleaned fund name of the enclosing folio section.
    pub fund_name: String,

    /// Folio the transaction belongs to.
    pub folio_number: String,

    /// Transaction date as printed (`DD-Mon-YYYY`).
    pub date: String,

    /// Free-text description, e.g. "Purchase" or "*** Stamp Duty ***".
    pub transaction: String,

    /// Transaction amount; negative for redemptions.
    pub amount: Option<Decimal>,

    /// Units transacted.
    pub units: Option<Decimal>,

    /// NAV at transaction time.
    pub nav: Option<Decimal>,
}

/// Direction of a transaction, derived from the sign of its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionType {
    Purchase,
    Redemption,
    /// Amount absent or zero.
    #[default]
    #[serde(rename = "")]
    Unclassified,
}

impl TransactionType {
    /// Classify by the sign of an amount.
    pub fn from_amount(amount: Option<Decimal>) -> Self {
        match amount {
            Some(a) if a > Decimal::ZERO => Self::Purchase,
            Some(a) if a < Decimal::ZERO => Self::Redemption,
            _ => Self::Unclassified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Redemption => "Redemption",
            Self::Unclassified => "",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post-processed transaction, ready for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub fund_name: String,
    pub folio_number: String,
    pub transaction: String,
    pub transaction_type: TransactionType,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl TransactionRecord {
    /// Column order for tabular output.
    pub const CSV_HEADER: [&'static str; 8] = [
        "Fund Name",
        "Folio Number",
        "Transaction",
        "Transaction Type",
        "Date",
        "Units",
        "NAV",
        "Amount",
    ];

    /// Build a record from a raw transaction, classifying its direction.
    pub fn from_raw(raw: RawTransaction) -> Self {
        Self {
            transaction_type: TransactionType::from_amount(raw.amount),
            fund_name: raw.fund_name,
            folio_number: raw.folio_number,
            transaction: raw.transaction,
            date: raw.date,
            units: raw.units,
            nav: raw.nav,
            amount: raw.amount,
        }
    }

    /// Add a charge to this record's amount, treating an absent amount as zero.
    ///
    /// The transaction type follows the new amount.
    pub fn add_charge(&mut self, charge: Decimal) {
        let amount = self.amount.unwrap_or(Decimal::ZERO) + charge;
        self.amount = Some(amount);
        self.transaction_type = TransactionType::from_amount(self.amount);
    }

    /// One output row in [`Self::CSV_HEADER`] order. Absent numbers are empty.
    pub fn csv_row(&self) -> [String; 8] {
        [
            self.fund_name.clone(),
            self.folio_number.clone(),
            self.transaction.clone(),
            self.transaction_type.to_string(),
            self.date.clone(),
            format_optional(self.units),
            format_optional(self.nav),
            format_optional(self.amount),
        ]
    }

    /// Parse the statement date into a calendar date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, STATEMENT_DATE_FORMAT).ok()
    }
}

fn format_optional(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
