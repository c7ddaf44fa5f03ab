//! Configuration structures for statement extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CamsError, Result};

/// Main configuration for camsx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CamsConfig {
    /// Line scan and post-processing configuration.
    pub extraction: ExtractionConfig,

    /// Output file configuration.
    pub output: OutputConfig,
}

/// Statement scan configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines after a folio header before the fund-name search starts.
    pub fund_name_offset: usize,

    /// Give up on the fund name when nothing looks like a scheme code
    /// once this many lines have passed.
    pub fund_name_start_limit: usize,

    /// Give up on a fund name that has not matched after this many lines.
    pub fund_name_timeout: usize,

    /// Description of charge lines merged into the preceding transaction.
    pub stamp_duty_marker: String,

    /// Description of tax lines that are dropped.
    pub stt_marker: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fund_name_offset: 2,
            fund_name_start_limit: 3,
            fund_name_timeout: 5,
            stamp_duty_marker: "*** Stamp Duty ***".to_string(),
            stt_marker: "*** STT Paid ***".to_string(),
        }
    }
}

/// Output file naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix of generated CSV file names.
    pub file_prefix: String,

    /// chrono format string appended to the prefix.
    pub timestamp_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: "cams_consolidated".to_string(),
            timestamp_format: "%d%m%Y_%H_%M_%S".to_string(),
        }
    }
}

impl OutputConfig {
    /// Name of an output file written at `now`.
    pub fn file_name<Tz>(&self, now: &chrono::DateTime<Tz>, extension: &str) -> String
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format!("{}_{}.{}", self.file_prefix, now.format(&self.timestamp_format), extension)
    }
}

impl CamsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the fund-name window is ordered.
    pub fn validate(&self) -> Result<()> {
        let e = &self.extraction;
        if e.fund_name_offset > e.fund_name_start_limit || e.fund_name_start_limit > e.fund_name_timeout {
            return Err(CamsError::Config(format!(
                "fund name window must satisfy offset <= start_limit <= timeout (got {} / {} / {})",
                e.fund_name_offset, e.fund_name_start_limit, e.fund_name_timeout
            )));
        }
        if e.stamp_duty_marker.is_empty() || e.stt_marker.is_empty() {
            return Err(CamsError::Config("charge markers must not be empty".to_string()));
        }
        Ok(())
    }
}
