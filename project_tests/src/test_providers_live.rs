//! # Live Provider Fetch Test
//!
//! Connects to the real NewsAPI and NewsData endpoints using the keys from
//! the environment and prints the cleaned headlines. Providers without a
//! configured key are skipped rather than failed, so this runner is safe
//! in CI environments without credentials.

use lib_common::configs::NewsConfig;
use lib_common::loggers::loggerlocal::LoggerLocal;
use lib_common::news::providers::{HeadlineProvider, NewsApiProvider, NewsDataProvider};
use lib_common::retrieve::HttpClientConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let logger = Arc::new(LoggerLocal::new("providers_live".to_string(), None));
    let config = NewsConfig::from_env()?;
    let http = HttpClientConfig {
        timeout_ms: config.http_timeout_ms,
        ..Default::default()
    };

    let providers: Vec<Box<dyn HeadlineProvider>> = vec![
        Box::new(NewsApiProvider::new(
            config.newsapi_key.clone(),
            http.clone(),
            logger.clone(),
        )?),
        Box::new(NewsDataProvider::new(
            config.newsdata_key.clone(),
            http,
            logger.clone(),
        )?),
    ];

    let mut failures = 0;
    for provider in &providers {
        if !provider.is_configured() {
            println!("[SKIP] {} (no API key configured)", provider.name());
            continue;
        }

        println!("[*] Requesting live headlines from {}...", provider.name());
        match provider.fetch_headlines().await {
            Ok(headlines) => {
                println!("[SUCCESS] {} returned {} headlines:", provider.name(), headlines.len());
                for headline in &headlines {
                    println!("    - {}", headline);
                }
            }
            Err(e) => {
                eprintln!("[ERROR] {} fetch failed: {}", provider.name(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
