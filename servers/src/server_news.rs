//! # Breaking News HTTP Server
//!
//! The public JSON API in front of the breaking-news resolver. Exposes the
//! headline feed consumed by the reader frontend and the settings endpoints
//! used by the admin dashboard.
//!
//! ## Key Features:
//! - **Fallback-Chain Resolution**: `GET /breaking-news` walks manual
//!   override, cache, daily quota, NewsAPI, NewsData, and the static list,
//!   in that order, and reports which branch answered.
//! - **Admin Settings**: `GET`/`POST /breaking-news/settings` read and
//!   replace the manual-mode configuration; updates invalidate the primary
//!   cache so changes take effect on the next request.
//! - **Degraded-Mode Responses**: A fatal store failure never empties the
//!   feed — the handler logs it and answers HTTP 500 carrying the static
//!   fallback headlines.
//! - **Configurable**: Port and Redis URL come from command-line arguments
//!   and environment variables via `clap`; provider API keys are read from
//!   the environment (`.env` supported through `dotenvy`).
//! - **Structured Logging**: `tracing` for request-level events plus the
//!   shared `LoggerLocal` used inside `lib_common`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use clap::Parser;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use lib_common::configs::NewsConfig;
use lib_common::connections::{MemoryStore, NewsStore, RedisStore};
use lib_common::loggers::loggerlocal::LoggerLocal;
use lib_common::news::headline::fallback_headlines;
use lib_common::news::providers::{NewsApiProvider, NewsDataProvider};
use lib_common::news::{BreakingNewsResolver, BreakingNewsSettings, SettingsError};
use lib_common::retrieve::HttpClientConfig;
use lib_common::utils::SystemClock;

/// # Application Configuration
///
/// Parsed from command-line arguments and environment variables using `clap`.
/// Provider API keys are intentionally not CLI flags; they are read from the
/// environment by `NewsConfig` so they never show up in process listings.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Breaking-news aggregation API server.")]
struct AppConfig {
    /// HTTP server port. Can be provided via `--port` or `PORT`.
    #[clap(long, env = "PORT", default_value_t = 3000, help = "HTTP server port")]
    port: u16,

    /// Redis connection URL. When absent the server falls back to an
    /// in-process store (state is lost on restart).
    #[clap(long, env = "REDIS_URL", help = "Redis URL (e.g., redis://127.0.0.1/)")]
    redis_url: Option<String>,
}

/// # Application Error
///
/// Errors surfaced by the HTTP handlers, mapped onto the JSON envelopes the
/// frontends expect.
#[derive(Debug)]
enum AppError {
    /// The resolver chain failed fatally (store I/O). The response still
    /// carries the static fallback headlines so the ticker never goes blank.
    BreakingNews(lib_common::news::ResolverError),
    /// A settings read or write failed.
    Settings(SettingsError),
}

impl IntoResponse for AppError {
    /// Converts an `AppError` into a response with the appropriate status
    /// code and JSON body.
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BreakingNews(e) => {
                error!("Breaking news resolution failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "Could not resolve breaking news; serving fallback headlines.",
                        "data": fallback_headlines(),
                    }),
                )
            }
            AppError::Settings(SettingsError::Validation(issues)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "success": false,
                    "message": "Validation failed.",
                    "errors": issues,
                }),
            ),
            AppError::Settings(e) => {
                error!("Settings operation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "Settings store unavailable.",
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Shared resolver handle passed to every route.
type SharedResolver = Arc<BreakingNewsResolver>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load a local .env first so clap's env fallbacks and NewsConfig both
    // see the same variables.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");

    let app_config = AppConfig::parse();
    let news_config = NewsConfig::from_env()?;
    info!(
        "Configuration loaded: port {}, newsapi key {}, newsdata key {}",
        app_config.port,
        if news_config.newsapi_key.is_some() { "present" } else { "absent" },
        if news_config.newsdata_key.is_some() { "present" } else { "absent" },
    );

    let logger = Arc::new(LoggerLocal::new("server_news".to_string(), None));

    // One store backs the cache, the settings, and the daily counter.
    let store: Arc<dyn NewsStore> = match &app_config.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url).await?;
            info!("Connected to Redis store");
            Arc::new(store)
        }
        None => {
            warn!("REDIS_URL not set; using the in-memory store (state is not persistent)");
            Arc::new(MemoryStore::new())
        }
    };

    let http = HttpClientConfig {
        timeout_ms: news_config.http_timeout_ms,
        ..Default::default()
    };
    let newsapi = Arc::new(NewsApiProvider::new(
        news_config.newsapi_key.clone(),
        http.clone(),
        logger.clone(),
    )?);
    let newsdata = Arc::new(NewsDataProvider::new(
        news_config.newsdata_key.clone(),
        http,
        logger.clone(),
    )?);

    let resolver = Arc::new(BreakingNewsResolver::new(
        store,
        Arc::new(SystemClock),
        newsapi,
        newsdata,
        logger,
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/breaking-news", get(get_breaking_news_handler))
        .route(
            "/breaking-news/settings",
            get(get_settings_handler).post(update_settings_handler),
        )
        .layer(cors)
        .with_state(resolver);

    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.port));
    info!("Starting breaking-news server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// # Health Check Endpoint
///
/// Used by monitoring services to verify that the server process is
/// running and responsive to requests.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "OK", "ts": Utc::now().to_rfc3339() }))
}

/// # Breaking News Handler
///
/// `GET /breaking-news` — resolves the current headline set through the
/// fallback chain and reports which source produced it.
async fn get_breaking_news_handler(
    State(resolver): State<SharedResolver>,
) -> Result<impl IntoResponse, AppError> {
    let news = resolver
        .get_breaking_news()
        .await
        .map_err(AppError::BreakingNews)?;

    let mut body = json!({
        "success": true,
        "data": news.headlines,
        "source": news.source,
    });
    if let Some(message) = news.message {
        body["message"] = json!(message);
    }
    Ok((StatusCode::OK, Json(body)))
}

/// # Settings Read Handler
///
/// `GET /breaking-news/settings` — returns the stored settings with
/// defaults filled in for absent keys.
async fn get_settings_handler(
    State(resolver): State<SharedResolver>,
) -> Result<impl IntoResponse, AppError> {
    let settings = resolver.settings().await.map_err(AppError::Settings)?;
    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": settings })),
    ))
}

/// # Settings Update Handler
///
/// `POST /breaking-news/settings` — validates and persists the settings
/// wholesale, then invalidates the primary headline cache.
async fn update_settings_handler(
    State(resolver): State<SharedResolver>,
    Json(settings): Json<BreakingNewsSettings>,
) -> Result<impl IntoResponse, AppError> {
    resolver
        .update_settings(settings)
        .await
        .map_err(AppError::Settings)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Breaking news settings updated.",
        })),
    ))
}

/// Resolves when the process receives CTRL+C or SIGTERM, triggering the
/// graceful shutdown of in-flight requests.
async fn shutdown_signal() {
    // Handler for CTRL+C
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    // Handler for SIGTERM (on UNIX systems)
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    // On non-UNIX systems, `terminate` is a future that never completes.
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
