//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod output;

use std::path::{Path, PathBuf};

use tracing::debug;

use camsx_core::CamsConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("camsx")
        .join("config.json")
}

/// Load the configuration from `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CamsConfig> {
    if let Some(path) = config_path {
        return Ok(CamsConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        return Ok(CamsConfig::from_file(&default_path)?);
    }

    Ok(CamsConfig::default())
}
