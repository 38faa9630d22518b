//! Account fetcher
//!
//! Produces the post list for one account, hiding whether it came from the
//! X API or was generated.

use std::sync::Arc;

use crate::data::Post;
use crate::metrics::FALLBACK_TOTAL;
use crate::twitter::TwitterClient;

use super::fallback;

/// Per-account fetch with transparent fallback
pub struct AccountFetcher {
    client: Option<Arc<TwitterClient>>,
}

impl AccountFetcher {
    /// Create a fetcher
    ///
    /// # Arguments
    /// * `client` - Live API client, `None` when no credentials are configured
    pub fn new(client: Option<Arc<TwitterClient>>) -> Self {
        Self { client }
    }

    /// Whether a live client is configured
    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    /// Posts for `account`
    ///
    /// Never empty: if the client is missing, fails, or returns nothing,
    /// generated posts are returned instead.
    pub async fn fetch(&self, account: &str) -> Vec<Post> {
        let Some(client) = &self.client else {
            FALLBACK_TOTAL.with_label_values(&["no_credentials"]).inc();
            return fallback::generate_posts(account);
        };

        let posts = client.recent_posts(account).await;
        if posts.is_empty() {
            tracing::info!(%account, "No live posts; using generated posts");
            FALLBACK_TOTAL.with_label_values(&["empty_or_failed"]).inc();
            return fallback::generate_posts(account);
        }

        posts
    }
}
