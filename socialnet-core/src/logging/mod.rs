//! Logging subsystem for SocialNet
//!
//! Structured logging through `tracing`. Events always go to stderr so that
//! stdout carries nothing but command results. `RUST_LOG`, when set, takes
//! precedence over the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod error;
mod level;

pub use error::LoggingError;
pub use level::LogLevel;

use crate::config::LoggingConfig;

/// Configuration for the logging subsystem
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// The minimum log level to display
    pub level: LogLevel,
    /// Whether to include target module information
    pub with_target: bool,
    /// Whether to use JSON formatting
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

impl LogConfig {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            with_target: true,
            json_format: false,
        }
    }

    /// Build from the `[logging]` section of the application config
    pub fn from_settings(settings: &LoggingConfig) -> Result<Self, LoggingError> {
        let level = LogLevel::from_str(&settings.level)
            .ok_or_else(|| LoggingError::UnknownLevel(settings.level.clone()))?;
        Ok(Self::new(level)
            .with_target(settings.with_target)
            .json_format(settings.json_format))
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    pub fn json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
    }
}

/// Install the global subscriber.
///
/// # Example
/// ```
/// use socialnet_core::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::new(LogLevel::Debug).with_target(false);
/// init_logging(config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), LoggingError> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    let registry = tracing_subscriber::registry().with(config.env_filter());

    let result = if config.json_format {
        registry.with(fmt_layer.json()).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };

    result.map_err(|e| LoggingError::InitializationFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Warn);
        assert!(config.with_target);
        assert!(!config.json_format);
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new(LogLevel::Debug)
            .with_target(false)
            .json_format(true);

        assert_eq!(config.level, LogLevel::Debug);
        assert!(!config.with_target);
        assert!(config.json_format);
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggingConfig {
            level: "Info".to_string(),
            json_format: true,
            with_target: false,
        };
        let config = LogConfig::from_settings(&settings).unwrap();
        assert_eq!(config.level, LogLevel::Info);
        assert!(config.json_format);
        assert!(!config.with_target);

        let bad = LoggingConfig {
            level: "chatty".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(
            LogConfig::from_settings(&bad).unwrap_err(),
            LoggingError::UnknownLevel("chatty".to_string())
        );
    }

    #[test]
    fn test_second_init_fails() {
        // Whichever call loses the race reports an error instead of panicking
        let first = init_logging(LogConfig::default());
        let second = init_logging(LogConfig::default());
        assert!(first.is_err() || second.is_err());
    }
}
