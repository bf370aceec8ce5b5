//! Settings read from the environment at startup.
use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Snapshot file location
pub const TABLE_PATH_ENV: &str = "AUCTION_TABLE_PATH";

/// Listing feed request timeout in seconds
pub const FEED_TIMEOUT_ENV: &str = "AUCTION_FEED_TIMEOUT_SECS";

pub const DEFAULT_TABLE_PATH: &str = "auction.json";

pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub table_path: PathBuf,
    pub feed_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            feed_timeout: Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(TABLE_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.table_path = PathBuf::from(path);
        }

        if let Some(value) = lookup(FEED_TIMEOUT_ENV) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: FEED_TIMEOUT_ENV,
                    value: value.clone(),
                })?;
            config.feed_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (TABLE_PATH_ENV, "/tmp/table.json"),
            (FEED_TIMEOUT_ENV, "5"),
        ]))
        .unwrap();
        assert_eq!(config.table_path, PathBuf::from("/tmp/table.json"));
        assert_eq!(config.feed_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        for bad in ["soon", "0", "-3"] {
            let err = AppConfig::from_lookup(lookup(&[(FEED_TIMEOUT_ENV, bad)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: FEED_TIMEOUT_ENV, .. }));
        }
    }
}
