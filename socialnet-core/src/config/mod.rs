//! Configuration management for SocialNet
//!
//! Configuration comes from defaults, a TOML file, or `SOCIALNET_*`
//! environment variables, and is validated before use.

use serde::{Deserialize, Serialize};
use std::env;

mod error;

pub use error::ConfigError;

use crate::command::OutputFormat;
use crate::logging::LogLevel;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine configuration
    pub engine: EngineConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Result rendering configuration
    pub output: OutputConfig,
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Value the post clock starts from; the first post gets `initial_timestamp + 1`
    pub initial_timestamp: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include target module
    pub with_target: bool,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// How command results are written
    pub format: OutputFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            with_target: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: SOCIALNET_<SECTION>_<KEY>
    /// Example: SOCIALNET_ENGINE_INITIAL_TIMESTAMP=1000
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay any `SOCIALNET_*` variables onto this configuration
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(start) = env::var("SOCIALNET_ENGINE_INITIAL_TIMESTAMP") {
            self.engine.initial_timestamp = start.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid initial timestamp: {}", e))
            })?;
        }

        if let Ok(level) = env::var("SOCIALNET_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(json) = env::var("SOCIALNET_LOG_JSON") {
            self.logging.json_format = json
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid JSON flag: {}", e)))?;
        }

        if let Ok(format) = env::var("SOCIALNET_OUTPUT_FORMAT") {
            self.output.format = OutputFormat::from_str(&format).ok_or_else(|| {
                ConfigError::InvalidValue(format!("Invalid output format: {}", format))
            })?;
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError(e.to_string()))?;

        let config: Self =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if LogLevel::from_str(&self.logging.level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }

        if self.engine.initial_timestamp == u64::MAX {
            return Err(ConfigError::ValidationFailed(
                "initial_timestamp leaves no room for posts".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, contents).map_err(|e| ConfigError::FileWriteError(e.to_string()))?;

        Ok(())
    }
}
