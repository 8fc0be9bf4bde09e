//! Configuration loading from environment.

use std::env;
use std::time::Duration;

/// Error type for malformed configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// `None` when `SAGEPAY_TEST_MODE` is unset
    pub test_mode: Option<bool>,
    pub timeout: Option<Duration>,
    pub test_host: Option<String>,
    pub production_host: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// - `SAGEPAY_TEST_MODE` - `true`/`false`
    /// - `SAGEPAY_TIMEOUT_SECS` - per-request timeout
    /// - `SAGEPAY_TEST_HOST`, `SAGEPAY_PRODUCTION_HOST` - host overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let test_mode = lookup("SAGEPAY_TEST_MODE")
            .map(|value| parse_bool("SAGEPAY_TEST_MODE", value))
            .transpose()?;

        let timeout = lookup("SAGEPAY_TIMEOUT_SECS")
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidValue {
                        var: "SAGEPAY_TIMEOUT_SECS",
                        value,
                    })
            })
            .transpose()?;

        Ok(Self {
            test_mode,
            timeout,
            test_host: lookup("SAGEPAY_TEST_HOST").filter(|h| !h.is_empty()),
            production_host: lookup("SAGEPAY_PRODUCTION_HOST").filter(|h| !h.is_empty()),
        })
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { var, value }),
    }
}
