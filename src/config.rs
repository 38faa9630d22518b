//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration files (config/default.toml, config/local.toml)
//! 3. Environment variables (XFEED__*, then the TWITTER_* credentials)

use serde::Deserialize;

/// Accounts followed when none are configured
pub const DEFAULT_ACCOUNTS: [&str; 8] = [
    "saylor",
    "martypartymusic",
    "RaoulGMI",
    "Excellion",
    "BitcoinMagazine",
    "rektcapital",
    "APompliano",
    "BTC_Archive",
];

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub twitter: TwitterConfig,
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 5000)
    pub port: u16,
    /// Development mode: debug-level logging and request tracing
    pub debug: bool,
}

impl ServerConfig {
    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// X (Twitter) API configuration
///
/// Every credential is optional. Without a bearer token the feed runs on
/// generated posts only.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    /// App-only bearer token used for all reads
    pub bearer_token: Option<String>,
    /// OAuth 1.0a consumer key
    pub consumer_key: Option<String>,
    /// OAuth 1.0a consumer secret
    pub consumer_secret: Option<String>,
    /// OAuth 1.0a access token
    pub access_token: Option<String>,
    /// OAuth 1.0a access token secret
    pub access_token_secret: Option<String>,
    /// API origin (e.g., "https://api.twitter.com")
    pub api_base_url: String,
    /// Posts requested per account (upstream accepts 5..=100)
    pub max_results: u32,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl TwitterConfig {
    /// Bearer token, if one is set and not blank
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// Feed aggregation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Account handles, in aggregation order
    #[serde(default = "default_accounts")]
    pub accounts: Vec<String>,
    /// How long an aggregate stays fresh, in seconds (default: 300)
    pub cache_ttl_seconds: u64,
}

fn default_accounts() -> Vec<String> {
    DEFAULT_ACCOUNTS.iter().map(|a| a.to_string()).collect()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (XFEED__*)
    /// 5. TWITTER_BEARER_TOKEN and the four OAuth 1.0a variables
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> crate::error::Result<Self> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.debug", true)?
            .set_default("twitter.api_base_url", "https://api.twitter.com")?
            .set_default("twitter.max_results", 10)?
            .set_default("twitter.timeout_seconds", 10)?
            .set_default("feed.cache_ttl_seconds", 300)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("XFEED")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("feed.accounts"),
            )
            .set_override_option("twitter.bearer_token", env_var("TWITTER_BEARER_TOKEN"))?
            .set_override_option("twitter.consumer_key", env_var("TWITTER_CONSUMER_KEY"))?
            .set_override_option(
                "twitter.consumer_secret",
                env_var("TWITTER_CONSUMER_SECRET"),
            )?
            .set_override_option("twitter.access_token", env_var("TWITTER_ACCESS_TOKEN"))?
            .set_override_option(
                "twitter.access_token_secret",
                env_var("TWITTER_ACCESS_TOKEN_SECRET"),
            )?
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.feed.accounts.is_empty() {
            return Err(crate::error::AppError::Config(
                "feed.accounts must contain at least one account".to_string(),
            ));
        }

        if let Some(blank) = self.feed.accounts.iter().position(|a| a.trim().is_empty()) {
            return Err(crate::error::AppError::Config(format!(
                "feed.accounts[{blank}] must not be empty"
            )));
        }

        if self.feed.cache_ttl_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "feed.cache_ttl_seconds must be greater than 0".to_string(),
            ));
        }

        if !(5..=100).contains(&self.twitter.max_results) {
            return Err(crate::error::AppError::Config(format!(
                "twitter.max_results must be between 5 and 100, got {}",
                self.twitter.max_results
            )));
        }

        if url::Url::parse(&self.twitter.api_base_url).is_err() {
            return Err(crate::error::AppError::Config(format!(
                "twitter.api_base_url is not a valid URL: {}",
                self.twitter.api_base_url
            )));
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
