//! # NewsData Client
//!
//! Secondary headline source, consulted when NewsAPI is disabled, out of
//! quota budget, or failing. Same contract as the NewsAPI adapter with a
//! different endpoint, parameter spelling (`apikey`, `category=top`), and
//! response shape (`results` instead of `articles`).

use crate::loggers::loggerlocal::LoggerLocal;
use crate::news::headline::{clean_headline, REGION_QUERY};
use crate::news::providers::{HeadlineProvider, ProviderError};
use crate::retrieve::{ApiClient, HttpClientConfig};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

const BASE_URL: &str = "https://newsdata.io/";
const LATEST_NEWS_PATH: &str = "api/1/latest";

/// Response schema of the latest-news endpoint.
#[derive(Debug, Deserialize)]
pub struct NewsDataResponse {
    /// The `results` array; absent on error payloads.
    pub results: Option<Vec<NewsDataArticle>>,
}

/// A single result entry.
#[derive(Debug, Deserialize)]
pub struct NewsDataArticle {
    /// The raw article title; may be null or empty upstream.
    #[serde(default)]
    pub title: Option<String>,
}

/// # NewsData Provider
///
/// Adapter for the NewsData latest-news endpoint.
pub struct NewsDataProvider {
    client: ApiClient,
    api_key: Option<String>,
    logger: Arc<LoggerLocal>,
}

impl NewsDataProvider {
    /// Initializes a new NewsData client.
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
impl HeadlineProvider for NewsDataProvider {
    fn name(&self) -> &'static str {
        "newsdata"
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
            ("category", "top"),
            ("q", REGION_QUERY),
            ("apikey", api_key),
        ];

        let response = match self.client.get::<NewsDataResponse>(LATEST_NEWS_PATH, &query).await {
            Ok(response) => response,
            Err(e) => {
                let msg = format!("NewsData request failed: {}", e);
                self.logger.error(&msg, None).await;
                return Err(ProviderError::Transport(e.to_string()));
            }
        };

        if !response.success {
            self.logger
                .error(
                    &format!("NewsData returned HTTP {}", response.status),
                    Some(serde_json::json!({ "body": response.error_body })),
                )
                .await;
            return Err(ProviderError::HttpStatus(response.status));
        }

        let results = response
            .data
            .and_then(|body| body.results)
            .ok_or(ProviderError::NoResult)?;

        let headlines: Vec<String> = results
            .iter()
            .filter_map(|article| article.title.as_deref())
            .map(clean_headline)
            .filter(|title| !title.is_empty())
            .collect();

        if headlines.is_empty() {
            self.logger.warn("NewsData returned no usable articles", None).await;
            return Err(ProviderError::NoResult);
        }

        self.logger
            .debug(
                "NewsData headlines fetched",
                Some(serde_json::json!({ "count": headlines.len() })),
            )
            .await;
        Ok(headlines)
    }
}
