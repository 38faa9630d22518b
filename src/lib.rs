//! xfeed - Cached feed of recent posts from a fixed set of X accounts
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - GET /tweets, GET /tweets/:account                        │
//! │  - Landing page, metrics, health                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Feed aggregator (merge, sort, cache window)              │
//! │  - Account fetcher (live posts or generated fallback)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Data Layer / X API client                    │
//! │  - Post model, one-slot feed cache                          │
//! │  - X API v2 (user lookup, user timeline, media expansion)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers
//! - `service`: Aggregation, per-account fetch, generated posts
//! - `twitter`: X API v2 client
//! - `data`: Post model and feed cache
//! - `config`: Configuration management
//! - `error`: Error types
//! - `metrics`: Prometheus instruments

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod service;
pub mod twitter;

use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
///
/// Cloned for each request; everything inside is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Merged feed with its cache window
    pub aggregator: Arc<service::FeedAggregator>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Build HTTP client
    /// 2. Build the X API client if a bearer token is configured
    /// 3. Wire fetcher and aggregator
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the API base URL
    /// is invalid
    pub fn new(config: config::AppConfig) -> error::Result<Self> {
        tracing::info!("Initializing application state...");

        // 1. Initialize HTTP client
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("xfeed/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.twitter.timeout_seconds))
            .build()
            .map_err(|e| error::AppError::Internal(e.into()))?;

        // 2. X API client
        let client = twitter::TwitterClient::from_config(&config.twitter, http_client)
            .map_err(|e| error::AppError::Config(e.to_string()))?
            .map(Arc::new);
        if client.is_none() {
            tracing::warn!("No X API bearer token configured; all accounts use generated posts");
        }

        // 3. Pipeline
        let fetcher = Arc::new(service::AccountFetcher::new(client));
        let aggregator = Arc::new(service::FeedAggregator::new(
            config.feed.accounts.clone(),
            fetcher.clone(),
            Duration::from_secs(config.feed.cache_ttl_seconds),
        ));

        tracing::info!(
            accounts = config.feed.accounts.len(),
            cache_ttl_seconds = config.feed.cache_ttl_seconds,
            live = fetcher.is_live(),
            "Application state initialized successfully"
        );

        Ok(Self {
            config: Arc::new(config),
            aggregator,
        })
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(api::page_router())
        .merge(api::feed_router())
        .merge(api::metrics_router())
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&["GET", "/health", "200"])
        .inc();
    "OK"
}

async fn not_found() -> error::AppError {
    error::AppError::NotFound
}
