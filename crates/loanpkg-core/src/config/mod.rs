//! Configuration parsing and management.
//!
//! The engine reads an optional TOML file that tunes validation reporting
//! and logging. Every key has a default, so an empty file is valid.
//!
//! ```toml
//! [validation]
//! iteration_limit = 10
//!
//! [log]
//! level = "info"
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enforcement::{DEFAULT_ITERATION_LIMIT, ValidationEnv};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Validation reporting settings.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks value ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when `iteration_limit` is zero or
    /// the log level is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.iteration_limit == 0 {
            return Err(ConfigError::Validation(
                "validation.iteration_limit must be at least 1".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "log.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the environment for a validation pass evaluated at `now`.
    #[must_use]
    pub fn env_at(&self, now: DateTime<Utc>) -> ValidationEnv {
        ValidationEnv::at(now).with_iteration_limit(self.validation.iteration_limit)
    }
}

/// Validation reporting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// How many element positions an iteration tag lists before the rest
    /// are counted as omitted.
    #[serde(default = "default_iteration_limit")]
    pub iteration_limit: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            iteration_limit: default_iteration_limit(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"loanpkg_core=debug"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_iteration_limit() -> usize {
    DEFAULT_ITERATION_LIMIT
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// I/O error reading configuration file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Validation error.
    #[error("configuration validation failed: {0}")]
    Validation(String),
}
