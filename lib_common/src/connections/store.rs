//! # Store Abstraction
//!
//! The breaking-news service keeps all of its persistent state — cached
//! headline sets, admin settings, and the daily provider request counter —
//! in one key/value store. The trait below is the seam between the
//! resolver and the concrete backend so tests can substitute an in-memory
//! fake for Redis.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Errors from the Redis driver (connection, protocol, type).
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Backend-independent failures (e.g., a counter value that is not an integer).
    #[error("Store error: {0}")]
    Backend(String),
}

/// Key/value store with TTL support and an atomic counter.
///
/// TTL semantics match Redis: a `put` with a TTL replaces any previous
/// expiry; `incr` creates the key with the given TTL on first increment
/// and leaves the expiry untouched afterwards.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Reads the value at `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` at `key`. `ttl = None` persists until overwritten or forgotten.
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn forget(&self, key: &str) -> Result<(), StoreError>;

    /// Atomically increments the integer at `key`, returning the new value.
    ///
    /// The key is created as `1` with `ttl` if it does not exist yet.
    async fn incr(&self, key: &str, ttl: Duration) -> Result<i64, StoreError>;
}
