//! Rendering of extracted transactions.

use std::path::Path;

use camsx_core::{Decimal, TransactionRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV with the fixed statement columns
    Csv,
    /// JSON array of records
    Json,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_records(records: &[TransactionRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

pub fn format_csv(records: &[TransactionRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(TransactionRecord::CSV_HEADER)?;
    for record in records {
        wtr.write_record(record.csv_row())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Write records as CSV to a file.
pub fn write_csv(path: &Path, records: &[TransactionRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(TransactionRecord::CSV_HEADER)?;
    for record in records {
        wtr.write_record(record.csv_row())?;
    }

    wtr.flush()?;
    Ok(())
}

fn format_text(records: &[TransactionRecord]) -> String {
    let mut output = String::new();

    let dates: Vec<_> = records.iter().filter_map(|r| r.parsed_date()).collect();
    if let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) {
        output.push_str(&format!("Period: {} to {}\n", first, last));
    }
    output.push_str(&format!("Transactions: {}\n", records.len()));

    let mut current: Option<(&str, &str)> = None;
    for record in records {
        let key = (record.folio_number.as_str(), record.fund_name.as_str());
        if current != Some(key) {
            output.push_str(&format!("\n{} (Folio {})\n", record.fund_name, record.folio_number));
            current = Some(key);
        }

        output.push_str(&format!(
            "  {}  {:<40} {:>14} {:>12} {:>10}  {}\n",
            record.date,
            record.transaction,
            optional(record.amount),
            optional(record.units),
            optional(record.nav),
            record.transaction_type
        ));
    }

    output
}

fn optional(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
