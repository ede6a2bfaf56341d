//! Client configuration loaded from environment variables.

use std::time::Duration;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "RECIPE_API_URL";
pub const TIMEOUT_VAR: &str = "RECIPE_API_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Recipe generation waits on a model, so the bound is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::with_overrides(None, None, lookup)
    }

    /// Like `from_lookup`, but an explicit `base_url` or `timeout` wins and
    /// the matching variable is not read at all.
    pub fn with_overrides(
        base_url: Option<&str>,
        timeout: Option<Duration>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = match base_url {
            Some(url) => parse_base_url(url)?,
            None => match lookup(BASE_URL_VAR) {
                Some(url) => parse_base_url(&url)?,
                None => DEFAULT_BASE_URL.to_string(),
            },
        };

        let timeout = match timeout {
            Some(timeout) => timeout,
            None => match lookup(TIMEOUT_VAR) {
                Some(raw) => parse_timeout(&raw)?,
                None => DEFAULT_TIMEOUT,
            },
        };

        Ok(Self { base_url, timeout })
    }
}

/// Trim a base URL, rejecting blank input.
pub fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl { var: BASE_URL_VAR });
    }
    Ok(trimmed.to_string())
}

/// Parse a whole number of seconds, rejecting zero.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            var: TIMEOUT_VAR,
            value: raw.to_string(),
        }),
    }
}
