//! # Daily Provider Quota
//!
//! NewsAPI's free tier caps requests per day, so successful calls are
//! counted against a per-date key. The key carries a one-day TTL: a new
//! day means a new key, which starts implicitly at zero.

use crate::connections::{NewsStore, StoreError};
use crate::utils::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Maximum successful NewsAPI calls per calendar date.
pub const MAX_REQUESTS_PER_DAY: i64 = 100;

/// Counter key prefix; the full key is `news_api_requests_{YYYY-MM-DD}`.
pub const COUNTER_KEY_PREFIX: &str = "news_api_requests_";

/// TTL bound to the counter key on its first increment.
pub const COUNTER_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Date-bucketed request counter for the primary provider.
pub struct DailyQuota {
    store: Arc<dyn NewsStore>,
    clock: Arc<dyn Clock>,
}

impl DailyQuota {
    pub fn new(store: Arc<dyn NewsStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn counter_key(&self) -> String {
        format!("{}{}", COUNTER_KEY_PREFIX, self.clock.today())
    }

    /// Number of counted requests so far today (0 when the key is absent
    /// or holds garbage).
    pub async fn used_today(&self) -> Result<i64, StoreError> {
        let count = self
            .store
            .get(&self.counter_key())
            .await?
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(0);
        Ok(count)
    }

    /// Whether today's budget is spent.
    pub async fn is_exhausted(&self) -> Result<bool, StoreError> {
        Ok(self.used_today().await? >= MAX_REQUESTS_PER_DAY)
    }

    /// Records one successful provider call, returning the new count.
    pub async fn record_request(&self) -> Result<i64, StoreError> {
        self.store.incr(&self.counter_key(), COUNTER_TTL).await
    }
}
