//! # Data Retrieval Module
//!
//! This module provides a centralized location for generic data retrieval
//! clients and utilities, primarily focused on HTTP-based interactions.
//!
//! ## Purpose:
//! The goal of the `retrieve` module is to offer a consistent way to fetch
//! data from external news providers, encapsulating request building,
//! timeouts, and standardized response handling. The provider adapters in
//! `news::providers` build on this layer and keep only parsing and
//! fallback logic for themselves.
//!
//! Note that the client performs **no retries**: upstream failures are
//! absorbed by the resolver's provider fallback chain instead.

#![forbid(unsafe_code)]

/// Generic HTTP API client with a bounded request timeout.
pub mod http_client;

pub use http_client::{ApiClient, ApiResponse, HttpClientConfig};
