//! # Breaking News Resolver
//!
//! The layered decision policy behind `GET /breaking-news`. Sources are
//! consulted in fixed priority order and the first one that produces
//! headlines wins:
//!
//! 1. the admin's manual override list,
//! 2. the primary cache (1 hour),
//! 3. the daily-quota gate (limit reached serves the 1-day fallback cache
//!    or the static list, without touching any provider),
//! 4. NewsAPI,
//! 5. NewsData,
//! 6. the static fallback list.
//!
//! Provider failures are absorbed here — logged, then the chain moves on.
//! Only store I/O failures propagate; the HTTP layer degrades those to the
//! static list.

use crate::connections::{NewsStore, StoreError};
use crate::loggers::loggerlocal::LoggerLocal;
use crate::news::headline::fallback_headlines;
use crate::news::providers::HeadlineProvider;
use crate::news::quota::DailyQuota;
use crate::news::settings::{SettingsError, SettingsRepo};
use crate::news::BreakingNewsSettings;
use crate::utils::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Primary cache key, refreshed on every successful resolution.
pub const CACHE_KEY_PRIMARY: &str = "breaking_news";
/// Longer-lived copy used when the quota gate closes the provider branch.
pub const CACHE_KEY_FALLBACK: &str = "breaking_news_fallback";

/// TTL of the primary cache entry.
pub const CACHE_TTL_PRIMARY: Duration = Duration::from_secs(60 * 60);
/// TTL of the emergency fallback copy.
pub const CACHE_TTL_FALLBACK: Duration = Duration::from_secs(24 * 60 * 60);

const QUOTA_MESSAGE: &str = "Daily news request limit reached; serving fallback headlines.";

/// Cached headline payload, stored as JSON under both cache keys.
#[derive(Debug, Serialize, Deserialize)]
struct CachedHeadlineSet {
    headlines: Vec<String>,
}

/// Which branch of the chain produced the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NewsSource {
    Manual,
    Cache,
    Fallback,
    ProviderA,
    ProviderB,
}

/// A resolved set of breaking-news headlines.
#[derive(Debug, Clone, Serialize)]
pub struct BreakingNews {
    /// Cleaned headlines, in serving order.
    pub headlines: Vec<String>,
    /// The branch that produced them.
    pub source: NewsSource,
    /// Optional operator-facing note (e.g., the quota gate closed).
    pub message: Option<String>,
}

/// Failures that escape the chain. Provider errors never appear here.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// # Breaking News Resolver
///
/// Owns the settings repository, the daily quota, and the two provider
/// adapters, and walks the fallback chain for each request. All shared
/// state lives in the injected store; the resolver itself is stateless and
/// cheap to share behind an `Arc`.
pub struct BreakingNewsResolver {
    store: Arc<dyn NewsStore>,
    settings: SettingsRepo,
    quota: DailyQuota,
    newsapi: Arc<dyn HeadlineProvider>,
    newsdata: Arc<dyn HeadlineProvider>,
    logger: Arc<LoggerLocal>,
}

impl BreakingNewsResolver {
    /// Creates a resolver over the given store, clock, and providers.
    pub fn new(
        store: Arc<dyn NewsStore>,
        clock: Arc<dyn Clock>,
        newsapi: Arc<dyn HeadlineProvider>,
        newsdata: Arc<dyn HeadlineProvider>,
        logger: Arc<LoggerLocal>,
    ) -> Self {
        Self {
            settings: SettingsRepo::new(store.clone()),
            quota: DailyQuota::new(store.clone(), clock),
            store,
            newsapi,
            newsdata,
            logger,
        }
    }

    /// Walks the fallback chain and returns the first available headline set.
    pub async fn get_breaking_news(&self) -> Result<BreakingNews, ResolverError> {
        let settings = self.settings.load().await?;

        // 1. Manual override: the operator's curated list beats everything.
        if settings.use_manual_news && !settings.manual_news.is_empty() {
            return Ok(BreakingNews {
                headlines: settings.manual_news,
                source: NewsSource::Manual,
                message: None,
            });
        }

        // 2. Primary cache.
        if let Some(headlines) = self.read_cache(CACHE_KEY_PRIMARY).await? {
            return Ok(BreakingNews {
                headlines,
                source: NewsSource::Cache,
                message: None,
            });
        }

        // 3. Quota gate. When the daily budget is spent, no provider is
        // consulted at all; the longer-lived cache copy (or the static
        // list) carries the feed until midnight.
        if self.quota.is_exhausted().await? {
            self.logger.info(QUOTA_MESSAGE, None).await;
            let headlines = self
                .read_cache(CACHE_KEY_FALLBACK)
                .await?
                .unwrap_or_else(fallback_headlines);
            return Ok(BreakingNews {
                headlines,
                source: NewsSource::Fallback,
                message: Some(QUOTA_MESSAGE.to_string()),
            });
        }

        // 4. NewsAPI. Quota is only charged for successful calls.
        if settings.use_newsapi && self.newsapi.is_configured() {
            match self.newsapi.fetch_headlines().await {
                Ok(headlines) => {
                    self.quota.record_request().await?;
                    self.write_cache_tiers(&headlines).await?;
                    return Ok(BreakingNews {
                        headlines,
                        source: NewsSource::ProviderA,
                        message: None,
                    });
                }
                Err(e) => {
                    self.logger
                        .warn(
                            &format!("{} unavailable ({}); trying next source", self.newsapi.name(), e),
                            None,
                        )
                        .await;
                }
            }
        }

        // 5. NewsData.
        if settings.use_newsdata && self.newsdata.is_configured() {
            match self.newsdata.fetch_headlines().await {
                Ok(headlines) => {
                    self.write_cache_tiers(&headlines).await?;
                    return Ok(BreakingNews {
                        headlines,
                        source: NewsSource::ProviderB,
                        message: None,
                    });
                }
                Err(e) => {
                    self.logger
                        .warn(
                            &format!("{} unavailable ({}); trying next source", self.newsdata.name(), e),
                            None,
                        )
                        .await;
                }
            }
        }

        // 6. Static fallback, cached like any other result so the next
        // hour of requests is served from the cache branch.
        let headlines = fallback_headlines();
        self.write_cache_tiers(&headlines).await?;
        Ok(BreakingNews {
            headlines,
            source: NewsSource::Fallback,
            message: None,
        })
    }

    /// Returns the current admin settings (defaults for absent keys).
    pub async fn settings(&self) -> Result<BreakingNewsSettings, SettingsError> {
        self.settings.load().await
    }

    /// Validates and persists new settings, then invalidates the primary
    /// cache so the next request re-evaluates the chain instead of serving
    /// stale provider data.
    pub async fn update_settings(&self, settings: BreakingNewsSettings) -> Result<(), SettingsError> {
        self.settings.save(&settings).await?;
        self.store.forget(CACHE_KEY_PRIMARY).await?;
        self.logger.info("Breaking news settings updated", None).await;
        Ok(())
    }

    /// Reads a cached headline set; a corrupt or empty entry counts as a miss.
    async fn read_cache(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<CachedHeadlineSet>(&raw) {
            Ok(cached) if !cached.headlines.is_empty() => Ok(Some(cached.headlines)),
            Ok(_) => Ok(None),
            Err(e) => {
                self.logger
                    .warn(
                        &format!("Discarding corrupt cache entry '{}': {}", key, e),
                        None,
                    )
                    .await;
                Ok(None)
            }
        }
    }

    /// Writes a headline set into both cache tiers.
    async fn write_cache_tiers(&self, headlines: &[String]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&CachedHeadlineSet {
            headlines: headlines.to_vec(),
        })
        .map_err(|e| StoreError::Backend(format!("cache serialization: {}", e)))?;

        self.store
            .put(CACHE_KEY_PRIMARY, &payload, Some(CACHE_TTL_PRIMARY))
            .await?;
        self.store
            .put(CACHE_KEY_FALLBACK, &payload, Some(CACHE_TTL_FALLBACK))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::MemoryStore;
    use crate::loggers::loggerlocal::LoggerLocalOptions;
    use crate::news::headline::FALLBACK_HEADLINES;
    use crate::news::providers::ProviderError;
    use crate::news::quota::COUNTER_KEY_PREFIX;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now_utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Scripted provider that records every invocation into a shared log.
    struct MockProvider {
        tag: &'static str,
        configured: bool,
        responses: Mutex<VecDeque<Result<Vec<String>, ProviderError>>>,
        calls: AtomicUsize,
        call_log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl MockProvider {
        fn new(
            tag: &'static str,
            responses: Vec<Result<Vec<String>, ProviderError>>,
            call_log: Arc<Mutex<Vec<&'static str>>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                tag,
                configured: true,
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
                call_log,
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HeadlineProvider for MockProvider {
        fn name(&self) -> &'static str {
            self.tag
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn fetch_headlines(&self) -> Result<Vec<String>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.call_log.lock().unwrap().push(self.tag);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ProviderError::NoResult))
        }
    }

    struct Harness {
        store: Arc<MemoryStore>,
        resolver: BreakingNewsResolver,
        newsapi: Arc<MockProvider>,
        newsdata: Arc<MockProvider>,
        call_log: Arc<Mutex<Vec<&'static str>>>,
    }

    fn quiet_logger() -> Arc<LoggerLocal> {
        Arc::new(LoggerLocal::new(
            "resolver_test".to_string(),
            Some(LoggerLocalOptions {
                use_tty: None,
                use_file: None,
                log_dir: None,
            }),
        ))
    }

    const TEST_DATE: &str = "2025-06-10";

    fn harness(
        newsapi_responses: Vec<Result<Vec<String>, ProviderError>>,
        newsdata_responses: Vec<Result<Vec<String>, ProviderError>>,
    ) -> Harness {
        let store = Arc::new(MemoryStore::new());
        let call_log = Arc::new(Mutex::new(Vec::new()));
        let newsapi = MockProvider::new("newsapi", newsapi_responses, call_log.clone());
        let newsdata = MockProvider::new("newsdata", newsdata_responses, call_log.clone());
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap(),
        ));
        let resolver = BreakingNewsResolver::new(
            store.clone(),
            clock,
            newsapi.clone(),
            newsdata.clone(),
            quiet_logger(),
        );
        Harness {
            store,
            resolver,
            newsapi,
            newsdata,
            call_log,
        }
    }

    async fn prime_cache(store: &MemoryStore, key: &str, headlines: &[&str]) {
        let payload = serde_json::to_string(&CachedHeadlineSet {
            headlines: headlines.iter().map(|h| h.to_string()).collect(),
        })
        .unwrap();
        store.put(key, &payload, None).await.unwrap();
    }

    #[tokio::test]
    async fn manual_override_beats_cache_and_providers() {
        let h = harness(vec![Ok(vec!["Provider headline".to_string()])], vec![]);
        h.resolver
            .update_settings(BreakingNewsSettings {
                use_manual_news: true,
                manual_news: vec!["Manual one".to_string(), "Manual two".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();
        // Primed after the update so the entry survives the cache invalidation.
        prime_cache(&h.store, CACHE_KEY_PRIMARY, &["Cached headline"]).await;

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::Manual);
        assert_eq!(news.headlines, vec!["Manual one", "Manual two"]);
        assert_eq!(h.newsapi.call_count(), 0);
        assert_eq!(h.newsdata.call_count(), 0);
    }

    #[tokio::test]
    async fn manual_mode_with_empty_list_falls_through() {
        let h = harness(vec![Ok(vec!["Provider headline".to_string()])], vec![]);
        h.resolver
            .update_settings(BreakingNewsSettings {
                use_manual_news: true,
                manual_news: vec![],
                ..Default::default()
            })
            .await
            .unwrap();

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::ProviderA);
    }

    #[tokio::test]
    async fn primary_cache_short_circuits_providers() {
        let h = harness(vec![Ok(vec!["Fresh".to_string()])], vec![]);
        prime_cache(&h.store, CACHE_KEY_PRIMARY, &["Cached headline"]).await;

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::Cache);
        assert_eq!(news.headlines, vec!["Cached headline"]);
        assert_eq!(h.newsapi.call_count(), 0);
        assert_eq!(h.newsdata.call_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_quota_serves_fallback_cache_without_any_provider_call() {
        let h = harness(
            vec![Ok(vec!["Should not be fetched".to_string()])],
            vec![Ok(vec!["Nor this".to_string()])],
        );
        h.store
            .put(&format!("{}{}", COUNTER_KEY_PREFIX, TEST_DATE), "100", None)
            .await
            .unwrap();
        prime_cache(&h.store, CACHE_KEY_FALLBACK, &["Yesterday's headline"]).await;

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::Fallback);
        assert_eq!(news.headlines, vec!["Yesterday's headline"]);
        assert!(news.message.is_some());
        assert_eq!(h.newsapi.call_count(), 0);
        assert_eq!(h.newsdata.call_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_quota_without_fallback_cache_serves_static_list() {
        let h = harness(vec![], vec![]);
        h.store
            .put(&format!("{}{}", COUNTER_KEY_PREFIX, TEST_DATE), "100", None)
            .await
            .unwrap();

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::Fallback);
        assert_eq!(news.headlines, fallback_headlines());
        assert_eq!(h.newsapi.call_count(), 0);
    }

    #[tokio::test]
    async fn newsapi_success_charges_quota_and_fills_both_tiers() {
        let h = harness(vec![Ok(vec!["Alpha".to_string(), "Beta".to_string()])], vec![]);

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::ProviderA);
        assert_eq!(news.headlines, vec!["Alpha", "Beta"]);
        assert_eq!(h.newsdata.call_count(), 0);

        let counter = h
            .store
            .get(&format!("{}{}", COUNTER_KEY_PREFIX, TEST_DATE))
            .await
            .unwrap();
        assert_eq!(counter.as_deref(), Some("1"));

        for key in [CACHE_KEY_PRIMARY, CACHE_KEY_FALLBACK] {
            let raw = h.store.get(key).await.unwrap().expect("tier written");
            let cached: CachedHeadlineSet = serde_json::from_str(&raw).unwrap();
            assert_eq!(cached.headlines, vec!["Alpha", "Beta"]);
        }
    }

    #[tokio::test]
    async fn failing_newsapi_falls_through_to_newsdata_in_order() {
        let h = harness(
            vec![Err(ProviderError::HttpStatus(500))],
            vec![Ok(vec!["Second source".to_string()])],
        );

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::ProviderB);
        assert_eq!(news.headlines, vec!["Second source"]);
        assert_eq!(*h.call_log.lock().unwrap(), vec!["newsapi", "newsdata"]);

        // Failed calls are not charged against the quota.
        let counter = h
            .store
            .get(&format!("{}{}", COUNTER_KEY_PREFIX, TEST_DATE))
            .await
            .unwrap();
        assert_eq!(counter, None);
    }

    #[tokio::test]
    async fn both_providers_failing_serves_and_caches_static_list() {
        let h = harness(
            vec![Err(ProviderError::NoResult)],
            vec![Err(ProviderError::Transport("timeout".to_string()))],
        );

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::Fallback);
        assert_eq!(news.headlines, fallback_headlines());
        assert_eq!(*h.call_log.lock().unwrap(), vec!["newsapi", "newsdata"]);

        for key in [CACHE_KEY_PRIMARY, CACHE_KEY_FALLBACK] {
            let raw = h.store.get(key).await.unwrap().expect("tier written");
            let cached: CachedHeadlineSet = serde_json::from_str(&raw).unwrap();
            assert_eq!(cached.headlines.len(), FALLBACK_HEADLINES.len());
        }
    }

    #[tokio::test]
    async fn disabled_providers_yield_the_static_list_deterministically() {
        let h = harness(
            vec![Ok(vec!["Should stay untouched".to_string()])],
            vec![Ok(vec!["Also untouched".to_string()])],
        );
        h.resolver
            .update_settings(BreakingNewsSettings {
                use_newsapi: false,
                use_newsdata: false,
                ..Default::default()
            })
            .await
            .unwrap();

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::Fallback);
        assert_eq!(news.headlines, fallback_headlines());
        assert_eq!(news.headlines.len(), 5);
        assert_eq!(h.newsapi.call_count(), 0);
        assert_eq!(h.newsdata.call_count(), 0);
    }

    #[tokio::test]
    async fn update_settings_invalidates_the_primary_cache() {
        let h = harness(vec![], vec![]);
        prime_cache(&h.store, CACHE_KEY_PRIMARY, &["Stale provider headline"]).await;

        h.resolver
            .update_settings(BreakingNewsSettings {
                use_newsapi: false,
                use_newsdata: false,
                ..Default::default()
            })
            .await
            .unwrap();

        let news = h.resolver.get_breaking_news().await.unwrap();
        assert_ne!(news.headlines, vec!["Stale provider headline".to_string()]);
        assert_eq!(news.source, NewsSource::Fallback);
        assert_eq!(news.headlines, fallback_headlines());
    }

    #[tokio::test]
    async fn unconfigured_provider_branch_is_skipped() {
        let store = Arc::new(MemoryStore::new());
        let call_log = Arc::new(Mutex::new(Vec::new()));
        let mut unconfigured = MockProvider::new("newsapi", vec![], call_log.clone());
        Arc::get_mut(&mut unconfigured).unwrap().configured = false;
        let newsdata = MockProvider::new(
            "newsdata",
            vec![Ok(vec!["From second".to_string()])],
            call_log.clone(),
        );
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap(),
        ));
        let resolver = BreakingNewsResolver::new(
            store,
            clock,
            unconfigured.clone(),
            newsdata.clone(),
            quiet_logger(),
        );

        let news = resolver.get_breaking_news().await.unwrap();
        assert_eq!(news.source, NewsSource::ProviderB);
        assert_eq!(unconfigured.call_count(), 0);
    }

    #[tokio::test]
    async fn second_request_is_served_from_cache_after_a_provider_success() {
        let h = harness(vec![Ok(vec!["Alpha".to_string()])], vec![]);

        let first = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(first.source, NewsSource::ProviderA);

        let second = h.resolver.get_breaking_news().await.unwrap();
        assert_eq!(second.source, NewsSource::Cache);
        assert_eq!(second.headlines, first.headlines);
        assert_eq!(h.newsapi.call_count(), 1);
    }
}
