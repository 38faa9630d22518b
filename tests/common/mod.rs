//! Common test utilities for E2E tests

pub mod mock_upstream;

use tokio::net::TcpListener;
use xfeed::{AppState, config};

pub use mock_upstream::MockUpstream;

/// Bearer token the mock upstream accepts
pub const TEST_BEARER_TOKEN: &str = "test-bearer-token";

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Server without credentials (generated posts only)
    pub async fn new() -> Self {
        Self::with_config(test_config(None)).await
    }

    /// Server talking to a mock X API
    pub async fn live(upstream: &MockUpstream) -> Self {
        Self::with_config(test_config(Some(upstream.base_url()))).await
    }

    /// Create a test server from an explicit configuration
    pub async fn with_config(config: config::AppConfig) -> Self {
        xfeed::metrics::init_metrics();

        let state = AppState::new(config).unwrap();

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        let app = xfeed::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: addr_str,
            state,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

/// Test configuration
///
/// With `upstream` set, the bearer token is configured and requests go to
/// that base URL; otherwise no credentials are present.
pub fn test_config(upstream: Option<String>) -> config::AppConfig {
    let bearer_token = upstream.as_ref().map(|_| TEST_BEARER_TOKEN.to_string());

    config::AppConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            debug: false,
        },
        twitter: config::TwitterConfig {
            bearer_token,
            consumer_key: None,
            consumer_secret: None,
            access_token: None,
            access_token_secret: None,
            api_base_url: upstream.unwrap_or_else(|| "https://api.twitter.com".to_string()),
            max_results: 10,
            timeout_seconds: 5,
        },
        feed: config::FeedConfig {
            accounts: config::DEFAULT_ACCOUNTS
                .iter()
                .map(|a| a.to_string())
                .collect(),
            cache_ttl_seconds: 300,
        },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}
