//! # Connections Module
//!
//! This module handles the key/value store backing the breaking-news
//! cache, settings, and daily request counters.

/// The `NewsStore` trait and shared store error type.
pub mod store;

/// Redis-backed store implementation.
pub mod cache_redis;

/// In-memory store implementation with TTL eviction.
pub mod cache_memory;

pub use cache_memory::MemoryStore;
pub use cache_redis::RedisStore;
pub use store::{NewsStore, StoreError};
