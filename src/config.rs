//! Runtime configuration
//!
//! Everything is read from environment variables at startup. A `.env` file in
//! the working directory is honoured outside of tests.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// Storage key the snapshot lives under unless overridden.
pub const DEFAULT_STORAGE_KEY: &str = "wealthwise-state";

/// Delay before the advisor's canned reply is appended.
pub const DEFAULT_CHAT_DELAY_MS: u64 = 1500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub chat_delay: Duration,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./.wealthwise"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            chat_delay: Duration::from_millis(DEFAULT_CHAT_DELAY_MS),
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenv::dotenv().ok();
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("WEALTHWISE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let storage_key = match lookup("WEALTHWISE_STORAGE_KEY") {
            Some(key) if key.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(
                    "WEALTHWISE_STORAGE_KEY".to_string(),
                    "storage key must not be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let chat_delay = match lookup("WEALTHWISE_CHAT_DELAY_MS") {
            Some(raw) => {
                let millis = raw.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue("WEALTHWISE_CHAT_DELAY_MS".to_string(), e.to_string())
                })?;
                Duration::from_millis(millis)
            }
            None => defaults.chat_delay,
        };

        let log_level = match lookup("WEALTHWISE_LOG_LEVEL") {
            Some(raw) => raw.trim().parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "WEALTHWISE_LOG_LEVEL".to_string(),
                    format!("'{}' is not a valid log level", raw),
                )
            })?,
            None => defaults.log_level,
        };

        Ok(Self {
            data_dir,
            storage_key,
            chat_delay,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.chat_delay, Duration::from_millis(1500));
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("WEALTHWISE_DATA_DIR", "/tmp/ww"),
            ("WEALTHWISE_STORAGE_KEY", "alt-key"),
            ("WEALTHWISE_CHAT_DELAY_MS", "0"),
            ("WEALTHWISE_LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/ww"));
        assert_eq!(config.storage_key, "alt-key");
        assert_eq!(config.chat_delay, Duration::ZERO);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[("WEALTHWISE_CHAT_DELAY_MS", "soon")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("WEALTHWISE_LOG_LEVEL", "chatty")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("WEALTHWISE_STORAGE_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_config_errors_surface_as_planner_errors() {
        fn load() -> crate::Result<AppConfig> {
            Ok(AppConfig::from_lookup(lookup_from(&[("WEALTHWISE_CHAT_DELAY_MS", "soon")]))?)
        }

        let error = load().unwrap_err();
        assert!(matches!(error, crate::error::PlannerError::Config(_)));
        assert!(error.to_string().contains("WEALTHWISE_CHAT_DELAY_MS"));
    }
}
