//! Configuration management
//!
//! Handles loading of the optional JSON configuration file, with
//! environment variable overrides applied on top.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{CalcError, CalcResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        let mut config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides()?;
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// `SPREAD_DEBOUNCE_MS` and `SPREAD_LOG_DIR` win over the file
    pub fn apply_env_overrides(&mut self) -> CalcResult<()> {
        if let Ok(raw) = std::env::var("SPREAD_DEBOUNCE_MS") {
            self.watch.debounce_ms = raw.trim().parse().map_err(|_| CalcError::InvalidConfig {
                key: "SPREAD_DEBOUNCE_MS",
                reason: format!("'{}' is not a whole number of milliseconds", raw),
            })?;
        }
        if let Ok(dir) = std::env::var("SPREAD_LOG_DIR") {
            self.logging.dir = dir;
        }
        Ok(())
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.watch.debounce_ms == 0 {
            return Err(CalcError::InvalidConfig {
                key: "watch.debounce_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.logging.file && self.logging.dir.trim().is_empty() {
            return Err(CalcError::InvalidConfig {
                key: "logging.dir",
                reason: "must not be empty when file logging is enabled".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings for the interactive `watch` loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce window for edits, in milliseconds
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig { debounce_ms: 100 }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for log files
    pub dir: String,
    /// Also write a log file per run
    #[serde(default)]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: "logs".to_string(),
            file: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.watch.debounce(), Duration::from_millis(100));
        assert_eq!(config.logging.dir, "logs");
        assert!(!config.logging.file);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "watch": { "debounce_ms": 250 } }"#).unwrap();
        assert_eq!(config.watch.debounce_ms, 250);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let mut config = Config::default();
        config.watch.debounce_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(CalcError::InvalidConfig { key: "watch.debounce_ms", .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("spread_config_{}.json", std::process::id()));
        fs::write(&path, r#"{ "logging": { "dir": "out", "file": true } }"#).unwrap();
        let config = Config::from_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.logging.dir, "out");
        assert!(config.logging.file);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::from_file("/nonexistent/spread.json").is_err());
    }
}
