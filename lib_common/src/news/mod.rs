//! # Breaking News Module
//!
//! This module groups the whole breaking-news pipeline: the headline
//! cleaning filter, the admin-controlled settings, the daily provider
//! quota, the upstream provider adapters, and the fallback-chain resolver
//! that ties them together. The `servers` crate exposes it over HTTP.

#![forbid(unsafe_code)]

/// Headline cleaning filter and static headline constants.
pub mod headline;
/// Admin settings for the breaking-news feed (manual mode, provider flags).
pub mod settings;
/// Daily request quota for the primary provider.
pub mod quota;
/// Upstream headline provider adapters.
pub mod providers;
/// The fallback-chain resolver.
pub mod resolver;

pub use resolver::{BreakingNews, BreakingNewsResolver, NewsSource, ResolverError};
pub use settings::{BreakingNewsSettings, SettingsError, SettingsRepo};
