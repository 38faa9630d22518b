//! Feed aggregator
//!
//! Merges every configured account's posts into one list, newest first,
//! and serves it from the feed cache until it goes stale.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::data::{FeedCache, Post, sort_newest_first};
use crate::metrics::CACHE_REFRESH_DURATION_SECONDS;

use super::AccountFetcher;

/// Aggregate feed service
pub struct FeedAggregator {
    accounts: Vec<String>,
    fetcher: Arc<AccountFetcher>,
    cache: FeedCache,
}

impl FeedAggregator {
    /// Create an aggregator
    ///
    /// # Arguments
    /// * `accounts` - Handles, in the order they are fetched
    /// * `fetcher` - Per-account fetcher, shared with the per-account route
    /// * `ttl` - Cache window for the merged feed
    pub fn new(accounts: Vec<String>, fetcher: Arc<AccountFetcher>, ttl: std::time::Duration) -> Self {
        Self {
            accounts,
            fetcher,
            cache: FeedCache::new(ttl),
        }
    }

    /// Configured handles, in aggregation order
    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    /// Whether `account` is one of the configured handles
    pub fn is_configured(&self, account: &str) -> bool {
        self.accounts.iter().any(|a| a == account)
    }

    /// The merged feed, rebuilt if the cached one is stale
    pub async fn all_posts(&self) -> Arc<Vec<Post>> {
        self.all_posts_at(Utc::now()).await
    }

    /// The merged feed as of `now`
    pub async fn all_posts_at(&self, now: DateTime<Utc>) -> Arc<Vec<Post>> {
        self.cache.get_or_refresh(now, || self.collect()).await
    }

    /// Posts for a single account, always fetched fresh
    pub async fn account_posts(&self, account: &str) -> Vec<Post> {
        self.fetcher.fetch(account).await
    }

    /// When the cached feed was built, if there is one
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.cache.fetched_at().await
    }

    /// Drop the cached feed so the next read rebuilds it
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    /// Fetch every account in order, one at a time, then sort
    async fn collect(&self) -> Vec<Post> {
        let timer = CACHE_REFRESH_DURATION_SECONDS.start_timer();
        let mut posts = Vec::new();

        for account in &self.accounts {
            let account_posts = self.fetcher.fetch(account).await;
            tracing::debug!(%account, count = account_posts.len(), "Collected account posts");
            posts.extend(account_posts);
        }

        sort_newest_first(&mut posts);
        timer.observe_duration();

        tracing::info!(
            accounts = self.accounts.len(),
            posts = posts.len(),
            live = self.fetcher.is_live(),
            "Feed refreshed"
        );

        posts
    }
}
