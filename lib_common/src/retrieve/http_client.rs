//! # HTTP Retrieval Utilities
//!
//! A thin, asynchronous API client wrapper around `reqwest` with a
//! bounded per-request timeout and standardized JSON response handling.

use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Explicit transport configuration for an `ApiClient`.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Upper bound for a whole request/response cycle, in milliseconds.
    pub timeout_ms: u64,
    /// Value sent as the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: "NewsDesk/1.0".to_string(),
        }
    }
}

/// A standardized container for API responses.
///
/// This struct wraps the deserialized data along with metadata about the
/// HTTP transaction.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The successfully deserialized response body, if any.
    pub data: Option<T>,
    /// The raw error body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
}

/// A flexible asynchronous HTTP client.
///
/// Handles base URLs, query parameters, and JSON decoding. Failures past
/// the timeout are surfaced as errors, never retried.
pub struct ApiClient {
    /// The underlying reqwest client.
    inner: reqwest::Client,
    /// The base URL to which all relative paths are joined.
    base_url: Url,
}

impl ApiClient {
    /// Creates a new `ApiClient` instance.
    ///
    /// # Arguments
    /// * `base_url` - The absolute base URL for the API (e.g., "https://api.example.com/").
    /// * `config` - Transport configuration (timeout, user agent).
    ///
    /// # Errors
    /// Returns an error if the base URL is not a valid absolute URL or the
    /// underlying client cannot be constructed.
    pub fn new(base_url: &str, config: HttpClientConfig) -> anyhow::Result<Self> {
        let url = Url::parse(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            inner: client,
            base_url: url,
        })
    }

    /// Performs a GET request and handles the response.
    ///
    /// # Arguments
    /// * `path` - The relative path to append to the base URL.
    /// * `query` - Query parameters appended to the request URL.
    ///
    /// # Errors
    /// Returns an error on URL joining failure, network/timeout failure, or
    /// a 2xx response whose body does not decode into `T`. Non-2xx status
    /// codes are NOT errors; they come back as `success = false` with the
    /// raw body captured for logging.
    pub async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> anyhow::Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let full_url = self.base_url.join(path)?;
        let response = self.inner.get(full_url).query(query).send().await?;

        let status = response.status();
        let success = status.is_success();

        if success {
            let data = response.json::<T>().await?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
            })
        } else {
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
            })
        }
    }
}
