// Shared library for the NewsDesk breaking-news service.
//
// Each top-level module folder is gated behind a cargo feature of the same
// name so consumers only compile the parts they use.

/// Environment-driven service configuration (provider keys, timeouts).
#[cfg(feature = "configs")]
pub mod configs;

/// Key/value store layer: the `NewsStore` trait, Redis driver, in-memory store.
#[cfg(feature = "connections")]
pub mod connections;

/// Structured local logging with TTY coloring and rotated log files.
#[cfg(feature = "loggers")]
pub mod loggers;

/// The breaking-news core: cleaning, settings, quota, providers, resolver.
#[cfg(feature = "news")]
pub mod news;

/// Generic HTTP retrieval client used by the provider adapters.
#[cfg(feature = "retrieve")]
pub mod retrieve;

/// General helpers (clock abstraction for date bucketing).
#[cfg(feature = "utils")]
pub mod utils;
