use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brandsync_core::LookupStrategy;
use serde::Deserialize;

use crate::cli::OutputFormat;

/// Defaults read from `config.toml`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub endpoint_url: Option<String>,
    pub profile: Option<String>,
    pub lookup: Option<LookupStrategy>,
    pub format: Option<OutputFormat>,
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("brandsync").join("config.toml"))
}

/// Loads the config file.
///
/// An explicit path must exist; the default location is optional.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(FileConfig::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let cfg = parse(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(cfg)
}

pub fn parse(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}
