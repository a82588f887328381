//! Toolkit configuration loaded from JSON
//!
//! Every key is optional; missing keys take the defaults below.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currency::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Directory holding goals.json, expenses.json and conversions.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Conversions kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Leading schedule rows shown before the final payment
    #[serde(default = "default_preview_months")]
    pub preview_months: usize,

    /// Optional CSV rate snapshot (from,to,rate); the built-in table is used otherwise
    #[serde(default)]
    pub rates_path: Option<PathBuf>,

    /// Currency used for display when none is given
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_history_limit() -> usize { DEFAULT_HISTORY_LIMIT }
fn default_preview_months() -> usize { 12 }
fn default_base_currency() -> String { "USD".to_string() }

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_limit: default_history_limit(),
            preview_months: default_preview_months(),
            rates_path: None,
            base_currency: default_base_currency(),
        }
    }
}

impl ToolkitConfig {
    /// Parse a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the given file, or use defaults when no path is supplied
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be at least 1".to_string()));
        }
        if self.base_currency.trim().is_empty() {
            return Err(ConfigError::Invalid("base_currency is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let config = ToolkitConfig::from_json_str(r#"{ "history_limit": 25 }"#).unwrap();
        assert_eq!(config.history_limit, 25);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.preview_months, 12);
        assert_eq!(config.base_currency, "USD");
        assert!(config.rates_path.is_none());

        assert_eq!(ToolkitConfig::from_json_str("{}").unwrap(), ToolkitConfig::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ToolkitConfig::from_json_str(r#"{ "history_limit": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ToolkitConfig::from_json_str(r#"{ "history_limit": "ten" }"#),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_no_path_uses_defaults() {
        assert_eq!(ToolkitConfig::load_or_default(None).unwrap(), ToolkitConfig::default());
        assert!(matches!(
            ToolkitConfig::load_or_default(Some(Path::new("/nonexistent/finance.json"))),
            Err(ConfigError::Read { .. })
        ));
    }
}
