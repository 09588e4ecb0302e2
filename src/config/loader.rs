use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Default location: `<config_dir>/quotebook/config.toml`, falling back
    /// to the current directory when the platform has no config dir.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("quotebook").join("config.toml")
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`.
    ///
    /// A missing file yields `Config::default()`; an existing file must
    /// parse and validate.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - sync interval, batch limit and timeout are positive
    /// - the endpoint is an http(s) URL
    /// - the remote category is not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sync = &self.sync;
        let invalid = |message: &str| {
            Err(ConfigError::ValidationError {
                message: message.to_string(),
            })
        };

        if sync.interval_seconds == 0 {
            return invalid("sync.interval_seconds must be greater than 0");
        }
        if sync.batch_limit == 0 {
            return invalid("sync.batch_limit must be greater than 0");
        }
        if sync.timeout_seconds == 0 {
            return invalid("sync.timeout_seconds must be greater than 0");
        }
        if !(sync.endpoint.starts_with("http://") || sync.endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "sync.endpoint '{}' must start with http:// or https://",
                    sync.endpoint
                ),
            });
        }
        if sync.remote_category.trim().is_empty() {
            return invalid("sync.remote_category must not be empty");
        }

        Ok(())
    }
}
