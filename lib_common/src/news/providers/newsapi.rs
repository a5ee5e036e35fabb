//! # NewsAPI Client
//!
//! This module provides a dedicated client for the NewsAPI top-headlines
//! endpoint, the primary automated source of the breaking-news chain. It
//! encapsulates the request parameters, the strict response schema, and
//! the mapping of raw article titles into cleaned headlines.
//!
//! Successful calls are counted against the daily quota by the resolver,
//! not here; the adapter itself is stateless.

use crate::loggers::loggerlocal::LoggerLocal;
use crate::news::headline::{clean_headline, REGION_QUERY};
use crate::news::providers::{HeadlineProvider, ProviderError};
use crate::retrieve::{ApiClient, HttpClientConfig};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

const BASE_URL: &str = "https://newsapi.org/";
const TOP_HEADLINES_PATH: &str = "v2/top-headlines";
const PAGE_SIZE: &str = "5";

/// Response schema of the top-headlines endpoint.
///
/// Only the fields the service consumes are modeled; an absent `articles`
/// array is treated as "no result" rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    /// The `articles` array; absent on error payloads.
    pub articles: Option<Vec<NewsApiArticle>>,
}

/// A single article entry.
#[derive(Debug, Deserialize)]
pub struct NewsApiArticle {
    /// The raw article title; may be null or empty upstream.
    #[serde(default)]
    pub title: Option<String>,
}

/// # NewsAPI Provider
///
/// Adapter for the NewsAPI top-headlines endpoint.
pub struct NewsApiProvider {
    /// The underlying HTTP client, pre-configured for the NewsAPI base URL.
    client: ApiClient,
    /// API key; `None` leaves the provider unconfigured.
    api_key: Option<String>,
    /// A shared logger for recording the outcomes of API calls.
    logger: Arc<LoggerLocal>,
}

impl NewsApiProvider {
    /// Initializes a new NewsAPI client.
    ///
    /// # Arguments
    /// * `api_key` - The NewsAPI key, or `None` to leave the provider disabled.
    /// * `http` - Transport configuration (timeout).
    /// * `logger` - A shared `LoggerLocal` instance.
    pub fn new(
        api_key: Option<String>,
        http: HttpClientConfig,
        logger: Arc<LoggerLocal>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: ApiClient::new(BASE_URL, http)?,
            api_key,
            logger,
        })
    }
}

#[async_trait]
impl HeadlineProvider for NewsApiProvider {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_headlines(&self) -> Result<Vec<String>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::NoResult);
        };

        let query = [
            ("language", "en"),
            ("pageSize", PAGE_SIZE),
            ("q", REGION_QUERY),
            ("apiKey", api_key),
        ];

        let response = match self.client.get::<NewsApiResponse>(TOP_HEADLINES_PATH, &query).await {
            Ok(response) => response,
            Err(e) => {
                let msg = format!("NewsAPI request failed: {}", e);
                self.logger.error(&msg, None).await;
                return Err(ProviderError::Transport(e.to_string()));
            }
        };

        if !response.success {
            self.logger
                .error(
                    &format!("NewsAPI returned HTTP {}", response.status),
                    Some(serde_json::json!({ "body": response.error_body })),
                )
                .await;
            return Err(ProviderError::HttpStatus(response.status));
        }

        let articles = response
            .data
            .and_then(|body| body.articles)
            .ok_or(ProviderError::NoResult)?;

        let headlines: Vec<String> = articles
            .iter()
            .filter_map(|article| article.title.as_deref())
            .map(clean_headline)
            .filter(|title| !title.is_empty())
            .collect();

        if headlines.is_empty() {
            self.logger.warn("NewsAPI returned no usable articles", None).await;
            return Err(ProviderError::NoResult);
        }

        self.logger
            .debug(
                "NewsAPI headlines fetched",
                Some(serde_json::json!({ "count": headlines.len() })),
            )
            .await;
        Ok(headlines)
    }
}
