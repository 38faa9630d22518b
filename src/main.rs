//! xfeed binary entry point

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xfeed::{AppState, config};

/// Application entry point
///
/// # Setup
/// 1. Load .env and configuration
/// 2. Initialize tracing/logging
/// 3. Initialize metrics and AppState
/// 4. Build Axum router
/// 5. Start HTTP server
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (.env first, so TWITTER_* can live there)
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let config = config::AppConfig::load()?;

    // 2. Initialize tracing/logging
    init_tracing(&config);
    tracing::info!("Starting xfeed...");
    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        debug = config.server.debug,
        "Configuration loaded"
    );
    if config.server.debug {
        tracing::warn!("Debug mode is enabled; do not expose this server publicly");
    }

    // 3. Initialize metrics and application state
    xfeed::metrics::init_metrics();
    let state = AppState::new(config.clone())?;

    // 4. Build Axum router
    let app = xfeed::build_router(state);

    // 5. Start HTTP server
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the global subscriber
///
/// `RUST_LOG` wins when set. Otherwise the crate logs at `logging.level`,
/// or `debug` in debug mode.
fn init_tracing(config: &config::AppConfig) {
    let level = if config.server.debug {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let default_filter = format!("xfeed={level},tower_http={level}");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
