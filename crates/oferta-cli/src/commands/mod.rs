//! Subcommands and the helpers they share.

pub mod config;
pub mod extract;
pub mod generate;

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use oferta_core::models::config::OfertaConfig;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oferta")
        .join("config.json")
}

/// Load configuration from `--config`, the user config file, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<OfertaConfig> {
    if let Some(path) = config_path {
        return Ok(OfertaConfig::from_file(Path::new(path))?);
    }

    let user_config = default_config_path();
    if user_config.exists() {
        debug!("Using configuration from {}", user_config.display());
        return Ok(OfertaConfig::from_file(&user_config)?);
    }

    Ok(OfertaConfig::default())
}

/// Today's report, named after the export date (DDMMYYYY.PDF).
pub fn todays_report() -> PathBuf {
    PathBuf::from(format!("{}.PDF", Local::now().format("%d%m%Y")))
}

/// Resolve the report path and make sure it exists.
pub fn resolve_input(input: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let path = match input {
        Some(path) => path,
        None => {
            let path = todays_report();
            debug!("No input given, looking for today's report {}", path.display());
            path
        }
    };

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(path)
}
