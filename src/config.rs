//! Configuration file support for floodview
//!
//! Reads from .floodview/config.toml

use crate::chart::ChartStyle;
use crate::format::Locale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Number formatting settings
    #[serde(default)]
    pub format: FormatConfig,

    /// Chart display settings
    #[serde(default)]
    pub charts: ChartStyle,

    /// Where and how dashboards are written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Number formatting configuration
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct FormatConfig {
    /// Digit grouping for counts ("en-IN" or "en-US")
    /// Default: en-IN
    #[serde(default)]
    pub locale: Locale,
}

/// Output configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Directory for auto-named dashboards
    /// Default: floodview-reports
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Page title
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("floodview-reports")
}

fn default_title() -> String {
    "Flood Damage Assessment".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            title: default_title(),
        }
    }
}

impl Config {
    /// Load config from .floodview/config.toml
    /// Returns default config if file doesn't exist
    pub fn load() -> Self {
        if let Some(path) = Self::find_config_path() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("ignoring {}: {}", path.display(), e),
                },
                Err(e) => log::warn!("cannot read {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Find config.toml by walking up directory tree
    fn find_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut dir = current_dir.as_path();

        loop {
            let config_path = dir.join(".floodview").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }
}
