use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::logic::estimator::EconomicConstants;
use crate::logic::path::PathMatch;

/// Read-only settings, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub economics: EconomicConstants,
    /// How directory membership is tested for listings and search
    #[serde(default)]
    pub path_match: PathMatch,
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(text).context("Failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load from the resolved location, or fall back to defaults
    pub fn load_or_default(cli_path: Option<&str>) -> Result<Self> {
        match get_config_path(cli_path)? {
            Some(path) => {
                log::debug!("Loading config from: {:?}", path);
                Self::load(&path)
            }
            None => {
                log::debug!("No config file found, using defaults");
                Ok(Config::default())
            }
        }
    }
}

/// Determine the config file path with fallback logic
///
/// An explicit path must exist. Otherwise `<config_dir>/siaview/config.yaml`
/// is tried, then `./config.yaml`; finding neither is not an error.
pub fn get_config_path(cli_path: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("siaview").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}
