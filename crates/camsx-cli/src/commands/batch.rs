//! Batch processing command for multiple statements.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use camsx_core::{CamsConfig, StatementExtractor, TransactionRecord};

use super::load_config;
use super::output::{format_records, write_csv, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Password shared by all statements
    #[arg(short, long)]
    password: Option<String>,

    /// Output directory
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Also write all transactions into one CSV
    #[arg(long)]
    combined: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    records: Vec<TransactionRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} statements to process",
        style("ℹ").blue(),
        files.len()
    );

    let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Each task gets its own extractor; nothing is shared between scans.
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let extractor = StatementExtractor::new(config.extraction.clone());
        let password = args.password.clone();

        tasks.spawn_blocking(move || {
            let file_start = Instant::now();
            let result = extractor.extract(&path, password.as_deref());
            drop(permit);

            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            let error = (!result.status.is_success()).then(|| result.status.to_string());
            (
                index,
                ProcessResult {
                    path,
                    records: result.into_records(),
                    error,
                    processing_time_ms,
                },
            )
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(done) => done,
            Err(e) if args.continue_on_error => {
                overall_pb.inc(1);
                warn!("Extraction task failed: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        overall_pb.inc(1);

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                tasks.abort_all();
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), error_msg);
            }
        }
        results.push((index, result));
    }

    overall_pb.finish_with_message("Complete");
    results.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = results.into_iter().map(|(_, r)| r).collect();

    write_outputs(&results, &output_dir, args.format)?;

    if args.combined {
        let combined_path = output_dir.join(combined_file_name(&config));
        let all: Vec<TransactionRecord> = results
            .iter()
            .flat_map(|r| r.records.iter().cloned())
            .collect();

        write_csv(&combined_path, &all)?;
        println!(
            "{} Combined CSV written to {}",
            style("✓").green(),
            combined_path.display()
        );
    }

    let successful: Vec<_> = results.iter().filter(|r| r.error.is_none()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} transactions",
        style(successful.len()).green(),
        style(failed.len()).red(),
        successful.iter().map(|r| r.records.len()).sum::<usize>()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_outputs(
    results: &[ProcessResult],
    output_dir: &std::path::Path,
    format: OutputFormat,
) -> anyhow::Result<()> {
    for result in results.iter().filter(|r| r.error.is_none()) {
        let output_name = result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("statement");

        let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));
        fs::write(&output_path, format_records(&result.records, format)?)?;
        debug!(
            "Wrote {} transactions to {} in {}ms",
            result.records.len(),
            output_path.display(),
            result.processing_time_ms
        );
    }
    Ok(())
}

fn combined_file_name(config: &CamsConfig) -> String {
    config.output.file_name(&chrono::Local::now(), "csv")
}
