//! Charge-line handling and transaction classification.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::transaction::{RawTransaction, TransactionRecord};

/// Turns raw transactions into output records in one forward pass.
///
/// - stamp duty lines are added to the amount of the preceding output record
///   and never emitted themselves; with no preceding record the charge is lost
/// - STT lines are dropped
/// - everything else is classified by the sign of its amount
#[derive(Debug, Clone)]
pub struct PostProcessor {
    stamp_duty_marker: String,
    stt_marker: String,
}

impl PostProcessor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            stamp_duty_marker: config.stamp_duty_marker.clone(),
            stt_marker: config.stt_marker.clone(),
        }
    }

    pub fn process(&self, raw: Vec<RawTransaction>) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = Vec::with_capacity(raw.len());

        for row in raw {
            if row.transaction == self.stamp_duty_marker {
                match (row.amount, records.last_mut()) {
                    (Some(charge), Some(previous)) => previous.add_charge(charge),
                    (Some(charge), None) => {
                        debug!("Stamp duty {} on {} has no preceding transaction", charge, row.date)
                    }
                    (None, _) => {}
                }
                continue;
            }

            if row.transaction == self.stt_marker {
                continue;
            }

            records.push(TransactionRecord::from_raw(row));
        }

        records
    }
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::TransactionType;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    fn row(transaction: &str, amount: Option<Decimal>) -> RawTransaction {
        RawTransaction {
            fund_name: "ABC Growth Fund".to_string(),
            folio_number: "1/1".to_string(),
            date: "01-Apr-2023".to_string(),
            transaction: transaction.to_string(),
            amount,
            units: dec("24.691"),
            nav: dec("40.5000"),
        }
    }

    #[test]
    fn test_stamp_duty_merges_into_previous() {
        let out = PostProcessor::default().process(vec![
            row("Purchase", dec("1000")),
            row("*** Stamp Duty ***", dec("5")),
        ]);

        let mut expected = TransactionRecord::from_raw(row("Purchase", dec("1000")));
        expected.amount = dec("1005");
        assert_eq!(out, vec![expected]);
    }

    #[test]
    fn test_stt_is_dropped() {
        let out = PostProcessor::default().process(vec![
            row("Redemption", dec("-500")),
            row("*** STT Paid ***", dec("3")),
        ]);

        assert_eq!(out, vec![TransactionRecord::from_raw(row("Redemption", dec("-500")))]);
        assert_eq!(out[0].transaction_type, TransactionType::Redemption);
    }

    #[test]
    fn test_stamp_duty_after_stt_reaches_earlier_record() {
        let out = PostProcessor::default().process(vec![
            row("Purchase", dec("100.00")),
            row("*** STT Paid ***", dec("0.10")),
            row("*** Stamp Duty ***", dec("0.01")),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].amount, dec("100.01"));
    }

    #[test]
    fn test_leading_stamp_duty_is_discarded() {
        let out = PostProcessor::default().process(vec![
            row("*** Stamp Duty ***", dec("5")),
            row("Purchase", dec("1000")),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].amount, dec("1000"));
    }

    #[test]
    fn test_stamp_duty_on_absent_amount() {
        let out = PostProcessor::default().process(vec![
            row("Switch In", None),
            row("*** Stamp Duty ***", dec("0.25")),
            row("*** Stamp Duty ***", None),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].amount, dec("0.25"));
        assert_eq!(out[0].transaction_type, TransactionType::Purchase);
    }

    #[test]
    fn test_classification() {
        let out = PostProcessor::default().process(vec![
            row("Purchase", dec("1000")),
            row("Redemption", dec("-500")),
            row("Bonus", None),
            row("Adjustment", dec("0")),
        ]);
        let types: Vec<_> = out.iter().map(|r| r.transaction_type).collect();
        assert_eq!(
            types,
            vec![
                TransactionType::Purchase,
                TransactionType::Redemption,
                TransactionType::Unclassified,
                TransactionType::Unclassified,
            ]
        );
    }

    #[test]
    fn test_only_charges_yield_nothing() {
        let out = PostProcessor::default().process(vec![
            row("*** STT Paid ***", dec("3")),
            row("*** Stamp Duty ***", dec("1")),
        ]);
        assert!(out.is_empty());
    }
}
