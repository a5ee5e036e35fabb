//! # Breaking News Settings
//!
//! Admin-controlled configuration of the breaking-news feed: a manual
//! override list plus per-provider enable flags. Persisted as four keys in
//! the shared store, with no expiry — settings live until the next update.

use crate::connections::{NewsStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Store key for the manual-mode flag.
pub const KEY_USE_MANUAL: &str = "breaking_news_use_manual";
/// Store key for the manual headline list (JSON array of strings).
pub const KEY_MANUAL_ITEMS: &str = "breaking_news_manual_items";
/// Store key for the NewsAPI enable flag.
pub const KEY_USE_NEWSAPI: &str = "breaking_news_use_newsapi";
/// Store key for the NewsData enable flag.
pub const KEY_USE_NEWSDATA: &str = "breaking_news_use_newsdata";

/// Maximum accepted length of a single manual headline, in characters.
pub const MAX_MANUAL_HEADLINE_CHARS: usize = 500;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending field (e.g., `manual_news.2`).
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

/// Errors raised by settings reads and writes.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The update payload failed validation; nothing was persisted.
    #[error("Validation failed: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The four admin-controlled settings of the breaking-news feed.
///
/// Field names match the admin API payload
/// (`use_manual_news` / `manual_news` / `use_newsapi` / `use_newsdata`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakingNewsSettings {
    /// When true and `manual_news` is non-empty, the curated list is served
    /// ahead of every automated source.
    pub use_manual_news: bool,
    /// Operator-curated headlines, served verbatim in manual mode.
    pub manual_news: Vec<String>,
    /// Whether the NewsAPI branch of the chain may run.
    pub use_newsapi: bool,
    /// Whether the NewsData branch of the chain may run.
    pub use_newsdata: bool,
}

impl Default for BreakingNewsSettings {
    fn default() -> Self {
        Self {
            use_manual_news: false,
            manual_news: Vec::new(),
            use_newsapi: true,
            use_newsdata: true,
        }
    }
}

impl BreakingNewsSettings {
    /// Checks the update payload against the validation rules.
    ///
    /// Only `manual_news` carries a rule today: every entry must be at most
    /// [`MAX_MANUAL_HEADLINE_CHARS`] characters. All issues are collected
    /// and reported together.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut issues = Vec::new();
        for (index, item) in self.manual_news.iter().enumerate() {
            if item.chars().count() > MAX_MANUAL_HEADLINE_CHARS {
                issues.push(ValidationIssue {
                    field: format!("manual_news.{}", index),
                    message: format!(
                        "must not be longer than {} characters",
                        MAX_MANUAL_HEADLINE_CHARS
                    ),
                });
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Validation(issues))
        }
    }
}

/// Reads and writes [`BreakingNewsSettings`] against the shared store.
pub struct SettingsRepo {
    store: Arc<dyn NewsStore>,
}

impl SettingsRepo {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self { store }
    }

    /// Loads the settings, falling back to defaults for absent keys.
    ///
    /// Unparseable stored values are treated as absent rather than fatal:
    /// a corrupt entry degrades to its default instead of taking the feed
    /// down.
    pub async fn load(&self) -> Result<BreakingNewsSettings, SettingsError> {
        let defaults = BreakingNewsSettings::default();

        let use_manual_news = self
            .load_bool(KEY_USE_MANUAL)
            .await?
            .unwrap_or(defaults.use_manual_news);
        let manual_news = match self.store.get(KEY_MANUAL_ITEMS).await? {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_default(),
            None => defaults.manual_news,
        };
        let use_newsapi = self
            .load_bool(KEY_USE_NEWSAPI)
            .await?
            .unwrap_or(defaults.use_newsapi);
        let use_newsdata = self
            .load_bool(KEY_USE_NEWSDATA)
            .await?
            .unwrap_or(defaults.use_newsdata);

        Ok(BreakingNewsSettings {
            use_manual_news,
            manual_news,
            use_newsapi,
            use_newsdata,
        })
    }

    /// Validates and persists the settings wholesale.
    pub async fn save(&self, settings: &BreakingNewsSettings) -> Result<(), SettingsError> {
        settings.validate()?;

        let manual_json = serde_json::to_string(&settings.manual_news)
            .map_err(|e| StoreError::Backend(format!("manual_news serialization: {}", e)))?;

        self.store
            .put(KEY_USE_MANUAL, bool_str(settings.use_manual_news), None)
            .await?;
        self.store.put(KEY_MANUAL_ITEMS, &manual_json, None).await?;
        self.store
            .put(KEY_USE_NEWSAPI, bool_str(settings.use_newsapi), None)
            .await?;
        self.store
            .put(KEY_USE_NEWSDATA, bool_str(settings.use_newsdata), None)
            .await?;
        Ok(())
    }

    async fn load_bool(&self, key: &str) -> Result<Option<bool>, SettingsError> {
        Ok(self
            .store
            .get(key)
            .await?
            .and_then(|raw| raw.parse::<bool>().ok()))
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connections::MemoryStore;

    fn repo() -> SettingsRepo {
        SettingsRepo::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn load_returns_defaults_on_empty_store() {
        let settings = repo().load().await.unwrap();
        assert_eq!(settings, BreakingNewsSettings::default());
        assert!(settings.use_newsapi && settings.use_newsdata);
        assert!(!settings.use_manual_news);
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let repo = repo();
        let settings = BreakingNewsSettings {
            use_manual_news: true,
            manual_news: vec!["Curated one".to_string(), "Curated two".to_string()],
            use_newsapi: false,
            use_newsdata: true,
        };
        repo.save(&settings).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn headline_at_length_limit_is_accepted() {
        let settings = BreakingNewsSettings {
            manual_news: vec!["x".repeat(MAX_MANUAL_HEADLINE_CHARS)],
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[tokio::test]
    async fn headline_over_length_limit_is_rejected() {
        let repo = repo();
        let settings = BreakingNewsSettings {
            manual_news: vec![
                "fine".to_string(),
                "x".repeat(MAX_MANUAL_HEADLINE_CHARS + 1),
            ],
            ..Default::default()
        };
        let err = repo.save(&settings).await.unwrap_err();
        match err {
            SettingsError::Validation(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "manual_news.1");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        // Nothing was persisted.
        assert_eq!(
            repo.load().await.unwrap(),
            BreakingNewsSettings::default()
        );
    }

    #[tokio::test]
    async fn corrupt_manual_list_degrades_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.put(KEY_MANUAL_ITEMS, "{not json", None).await.unwrap();
        let repo = SettingsRepo::new(store);
        assert!(repo.load().await.unwrap().manual_news.is_empty());
    }
}
