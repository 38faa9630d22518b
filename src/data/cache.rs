//! In-memory aggregate cache
//!
//! A single volatile slot holding the last merged feed. Cleared on restart.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::models::Post;

/// The stored aggregate and when it was built
#[derive(Debug, Clone)]
struct CacheEntry {
    posts: Arc<Vec<Post>>,
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Check if this entry is still fresh at `now`
    ///
    /// A `now` earlier than `fetched_at` counts as age zero.
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if self.posts.is_empty() {
            return false;
        }
        match (now - self.fetched_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}

// =============================================================================
// Feed Cache
// =============================================================================

/// Feed cache (volatile, one slot)
///
/// Holds the merged feed across all accounts. The slot is replaced
/// wholesale on refresh, never merged. Refreshes run while holding the
/// slot lock, so concurrent stale reads wait for the first refresh and
/// then see its result instead of starting their own.
pub struct FeedCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl FeedCache {
    /// Create an empty cache
    ///
    /// # Arguments
    /// * `ttl` - How long a stored aggregate is served before rebuilding
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    /// Return the stored feed if fresh at `now`, otherwise rebuild it
    ///
    /// `refresh` is only awaited when the slot is empty, holds an empty
    /// feed, or is at least `ttl` old. Its output is stored with
    /// `fetched_at = now`.
    pub async fn get_or_refresh<F, Fut>(&self, now: DateTime<Utc>, refresh: F) -> Arc<Vec<Post>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<Post>>,
    {
        use crate::metrics::{CACHE_HITS_TOTAL, CACHE_MISSES_TOTAL, CACHE_SIZE};

        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.is_fresh(now, self.ttl) {
                tracing::debug!(
                    fetched_at = %entry.fetched_at,
                    posts = entry.posts.len(),
                    "Feed cache hit"
                );
                CACHE_HITS_TOTAL.with_label_values(&["feed"]).inc();
                return entry.posts.clone();
            }
            tracing::debug!(fetched_at = %entry.fetched_at, "Feed cache expired");
        }

        CACHE_MISSES_TOTAL.with_label_values(&["feed"]).inc();

        let posts = Arc::new(refresh().await);
        *slot = Some(CacheEntry {
            posts: posts.clone(),
            fetched_at: now,
        });
        CACHE_SIZE.set(posts.len() as i64);

        posts
    }

    /// When the stored feed was built, if there is one
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.slot.lock().await.as_ref().map(|entry| entry.fetched_at)
    }

    /// Drop the stored feed so the next read rebuilds it
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
        crate::metrics::CACHE_SIZE.set(0);
        tracing::debug!("Feed cache invalidated");
    }
}
