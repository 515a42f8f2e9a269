//! Configuration handling for the query runner
//!
//! Settings are layered: built-in defaults, then an optional `northwind.toml`
//! file, then environment variables, then command-line flags (applied by the
//! binary).
//!
//! ## Environment Variables
//!
//! - `NORTHWIND_DATA` - Path of a dataset JSON file replacing the embedded data
//! - `NORTHWIND_TURNOVER_THRESHOLD` - Threshold of the turnover filter (task 1)
//! - `NORTHWIND_LARGE_ORDER_THRESHOLD` - Threshold of the large-order filter (task 3)
//! - `NORTHWIND_FORMAT` - Output format, `text` or `json`
//!
//! These can be set in a `.env` file in the working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::report::OutputFormat;
use crate::tasks::TaskParams;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "northwind.toml";

/// Environment variable names
pub const ENV_DATA: &str = "NORTHWIND_DATA";
pub const ENV_TURNOVER_THRESHOLD: &str = "NORTHWIND_TURNOVER_THRESHOLD";
pub const ENV_LARGE_ORDER_THRESHOLD: &str = "NORTHWIND_LARGE_ORDER_THRESHOLD";
pub const ENV_FORMAT: &str = "NORTHWIND_FORMAT";

pub const DEFAULT_TURNOVER_THRESHOLD: f64 = 100.0;
pub const DEFAULT_LARGE_ORDER_THRESHOLD: f64 = 10_000.0;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset file; the embedded dataset is used when unset
    pub data_path: Option<PathBuf>,
    /// Turnover above which a customer is listed by task 1
    pub turnover_threshold: f64,
    /// Order total above which a customer is listed by task 3
    pub large_order_threshold: f64,
    /// Output format of the reporter
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            turnover_threshold: DEFAULT_TURNOVER_THRESHOLD,
            large_order_threshold: DEFAULT_LARGE_ORDER_THRESHOLD,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from a directory
    ///
    /// Loads `.env` from the directory if present, reads `northwind.toml` if it
    /// exists (defaults otherwise) and applies environment overrides.
    pub fn load(dir: &Path) -> AppResult<Self> {
        let env_path = dir.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }

        let config_path = dir.join(CONFIG_FILE_NAME);
        let mut config = if config_path.exists() {
            Self::read_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn read_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Relative data paths are resolved against the config file location
        if let (Some(data), Some(parent)) = (&config.data_path, path.parent()) {
            if data.is_relative() {
                config.data_path = Some(parent.join(data));
            }
        }

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply process environment variable overrides to the configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Empty values are ignored; values that fail to parse are ignored with a
    /// warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(data) = var(ENV_DATA) {
            self.data_path = Some(PathBuf::from(data));
        }

        if let Some(raw) = var(ENV_TURNOVER_THRESHOLD) {
            match raw.parse::<f64>() {
                Ok(value) => self.turnover_threshold = value,
                Err(_) => {
                    tracing::warn!("Ignoring {}={}: not a number", ENV_TURNOVER_THRESHOLD, raw)
                }
            }
        }

        if let Some(raw) = var(ENV_LARGE_ORDER_THRESHOLD) {
            match raw.parse::<f64>() {
                Ok(value) => self.large_order_threshold = value,
                Err(_) => {
                    tracing::warn!("Ignoring {}={}: not a number", ENV_LARGE_ORDER_THRESHOLD, raw)
                }
            }
        }

        if let Some(raw) = var(ENV_FORMAT) {
            match raw.parse::<OutputFormat>() {
                Ok(format) => self.format = format,
                Err(_) => tracing::warn!("Ignoring {}={}: expected text or json", ENV_FORMAT, raw),
            }
        }
    }

    /// Query parameters derived from this configuration
    pub fn task_params(&self) -> TaskParams {
        TaskParams {
            turnover_threshold: self.turnover_threshold,
            large_order_threshold: self.large_order_threshold,
        }
    }
}
