//! Data models
//!
//! The normalized post record shared by the live client, the fallback
//! generator, the aggregate cache and the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Post
// =============================================================================

/// One normalized post from a configured account
///
/// Live posts carry the upstream ID; generated posts use
/// `mock-<account>-<index>-<epoch_seconds>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Handle of the configured account this post came from
    pub account: String,
    pub metrics: PostMetrics,
    /// Direct media URLs, in attachment order
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// Engagement counts
///
/// Missing upstream counts deserialize as zero so all three keys are
/// always present in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

/// Sort posts newest first
///
/// The sort is stable, so posts with equal timestamps keep their
/// insertion order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
