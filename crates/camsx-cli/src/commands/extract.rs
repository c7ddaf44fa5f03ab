//! Extract command - transactions from a single statement.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use camsx_core::{StatementExtractor, TransactionRecord};

use super::load_config;
use super::output::{format_records, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Statement PDF
    #[arg(required = true)]
    input: PathBuf,

    /// PDF password (usually PAN in capitals)
    #[arg(short, long)]
    password: Option<String>,

    /// Output file, "-" for stdout (default: timestamped CSV in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let records = extract_file(args.input.clone(), args.password.clone(), &config).await?;
    let output = format_records(&records, args.format)?;

    match &args.output {
        Some(path) if path.as_os_str() == "-" => print!("{}", output),
        Some(path) => {
            fs::write(path, &output)?;
            println!(
                "{} {} transactions written to {}",
                style("✓").green(),
                records.len(),
                path.display()
            );
        }
        None => {
            let name = config
                .output
                .file_name(&chrono::Local::now(), args.format.extension());
            fs::write(&name, &output)?;
            println!(
                "{} {} transactions written to {}",
                style("✓").green(),
                records.len(),
                name
            );
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Run one extraction off the async runtime, failing on any non-success status.
pub async fn extract_file(
    input: PathBuf,
    password: Option<String>,
    config: &camsx_core::CamsConfig,
) -> anyhow::Result<Vec<TransactionRecord>> {
    let extractor = StatementExtractor::new(config.extraction.clone());

    let result = tokio::task::spawn_blocking(move || {
        extractor.extract(&input, password.as_deref())
    })
    .await?;

    if !result.status.is_success() {
        anyhow::bail!("{}", result.status);
    }

    Ok(result.into_records())
}
