//! # News Service Configuration
//!
//! Reads provider credentials and transport settings from the process
//! environment. Binaries load a `.env` file first (via `dotenvy`), so the
//! same variables work in development and deployment.

use std::env;
use thiserror::Error;

/// Environment variable holding the NewsAPI key.
pub const ENV_NEWSAPI_KEY: &str = "NEWSAPI_KEY";
/// Environment variable holding the NewsData key.
pub const ENV_NEWSDATA_KEY: &str = "NEWSDATA_KEY";
/// Environment variable overriding the outbound HTTP timeout (milliseconds).
pub const ENV_HTTP_TIMEOUT_MS: &str = "NEWS_HTTP_TIMEOUT_MS";

const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Errors that can occur while assembling the service configuration.
#[derive(Debug, Error)]
pub enum NewsConfigError {
    /// A variable was present but could not be parsed into its expected type.
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Provider credentials and transport settings.
///
/// A missing (or empty) API key leaves the corresponding provider
/// unconfigured, which disables its branch of the fallback chain
/// regardless of the admin enable flag.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// API key for NewsAPI (provider A), if configured.
    pub newsapi_key: Option<String>,
    /// API key for NewsData (provider B), if configured.
    pub newsdata_key: Option<String>,
    /// Upper bound for a provider request/response cycle, in milliseconds.
    pub http_timeout_ms: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            newsapi_key: None,
            newsdata_key: None,
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
        }
    }
}

impl NewsConfig {
    /// Assembles the configuration from the process environment.
    pub fn from_env() -> Result<Self, NewsConfigError> {
        let http_timeout_ms = match env::var(ENV_HTTP_TIMEOUT_MS) {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| NewsConfigError::InvalidValue {
                    var: ENV_HTTP_TIMEOUT_MS,
                    value: raw,
                })?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_MS,
        };

        Ok(Self {
            newsapi_key: non_empty_var(ENV_NEWSAPI_KEY),
            newsdata_key: non_empty_var(ENV_NEWSDATA_KEY),
            http_timeout_ms,
        })
    }
}

/// Reads an environment variable, treating empty or whitespace-only
/// values as absent.
fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
