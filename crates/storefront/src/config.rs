//! Runtime configuration, read from the environment once at startup.

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::views::status::DEFAULT_POLL_INTERVAL;

pub const API_URL_VAR: &str = "BAKERY_API_URL";
pub const POLL_INTERVAL_VAR: &str = "BAKERY_POLL_INTERVAL_MS";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the bakery service, without a trailing slash.
    pub api_url: String,
    /// Delay between two order status polls.
    pub poll_interval: Duration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        match lookup(API_URL_VAR) {
            Some(url) if !url.trim().is_empty() => {
                config.api_url = url.trim().trim_end_matches('/').to_string();
            }
            _ => info!("{API_URL_VAR} not set, using default: {DEFAULT_API_URL}"),
        }

        match lookup(POLL_INTERVAL_VAR) {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    key: POLL_INTERVAL_VAR,
                    reason: format!("{raw:?}: {e}"),
                })?;
                if millis == 0 {
                    return Err(ConfigError::Invalid {
                        key: POLL_INTERVAL_VAR,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                config.poll_interval = Duration::from_millis(millis);
            }
            None => info!(
                "{POLL_INTERVAL_VAR} not set, using default: {}",
                config.poll_interval.as_millis()
            ),
        }

        Ok(config)
    }
}
