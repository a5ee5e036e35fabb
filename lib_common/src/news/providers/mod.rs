//! # Headline Provider Adapters
//!
//! Two structurally identical clients for third-party headline APIs,
//! differing only in endpoint, parameter names, and response shape. Both
//! collapse every failure mode — network error, timeout, non-2xx status,
//! malformed body, missing array, empty result after cleaning — into a
//! [`ProviderError`], so the resolver's fallback chain never needs
//! provider-specific error handling.

use async_trait::async_trait;
use thiserror::Error;

/// Client for the NewsAPI top-headlines endpoint (provider A).
pub mod newsapi;
/// Client for the NewsData latest-news endpoint (provider B).
pub mod newsdata;

pub use newsapi::NewsApiProvider;
pub use newsdata::NewsDataProvider;

/// The uniform "no result" outcome of a provider call.
///
/// Variants exist for log detail only; callers treat every variant the
/// same way and move on to the next source.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered but produced no usable headlines.
    #[error("provider returned no usable result")]
    NoResult,

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {0}")]
    HttpStatus(u16),

    /// Network failure, timeout, or a 2xx body that did not decode.
    #[error("provider transport error: {0}")]
    Transport(String),
}

/// A source of cleaned breaking-news headlines.
#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    /// Short provider tag used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Whether an API key is configured. An unconfigured provider's branch
    /// is skipped regardless of its admin enable flag.
    fn is_configured(&self) -> bool;

    /// Fetches and cleans the current headlines.
    async fn fetch_headlines(&self) -> Result<Vec<String>, ProviderError>;
}
