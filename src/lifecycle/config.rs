//! Runtime configuration.
//!
//! Defaults cover everything, so an empty environment gives a working
//! system. Values come from `FRASERPAY_*` environment variables or a JSON
//! file with the same keys in snake case.

use crate::retry::RetryPolicy;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// PIN that grants student council (admin) access.
    pub admin_pin: String,
    /// Retries after the first attempt for network failures.
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    /// Request channel capacity of each store.
    pub mailbox_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_pin: "123456".to_string(),
            retry_attempts: 3,
            retry_delay_ms: 1000,
            mailbox_size: 100,
        }
    }
}

fn load<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                value,
                reason: e.to_string(),
            }
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            admin_pin: load("FRASERPAY_ADMIN_PIN", defaults.admin_pin)?,
            retry_attempts: load("FRASERPAY_RETRY_ATTEMPTS", defaults.retry_attempts)?,
            retry_delay_ms: load("FRASERPAY_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
            mailbox_size: load("FRASERPAY_MAILBOX_SIZE", defaults.mailbox_size)?,
        };
        config.validate()
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.admin_pin.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "admin_pin",
                value: self.admin_pin,
                reason: "must not be empty".into(),
            });
        }
        if self.mailbox_size == 0 {
            return Err(ConfigError::Invalid {
                key: "mailbox_size",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(self)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}
