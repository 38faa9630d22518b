//! X API v2 wire types
//!
//! Only the fields this crate requests are modelled. Every field the API
//! may omit is an `Option` so absence deserializes cleanly.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::data::PostMetrics;

/// Envelope returned by `GET /2/users/by/username/:username`
#[derive(Debug, Clone, Deserialize)]
pub struct UserLookupResponse {
    pub data: Option<User>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

/// A resolved user
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
}

/// Envelope returned by `GET /2/users/:id/tweets`
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineResponse {
    /// Absent when the account has no posts in range
    pub data: Option<Vec<Tweet>>,
    pub includes: Option<Includes>,
    #[serde(default)]
    pub errors: Vec<ApiProblem>,
}

/// A single post as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub public_metrics: Option<PostMetrics>,
    pub attachments: Option<Attachments>,
}

impl Tweet {
    /// Media keys referenced by this post, in attachment order
    pub fn media_keys(&self) -> &[String] {
        self.attachments
            .as_ref()
            .map(|a| a.media_keys.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attachments {
    #[serde(default)]
    pub media_keys: Vec<String>,
}

/// Expansion payload shared by all posts in a response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub media: Vec<Media>,
}

impl Includes {
    /// Resolve a media key to a displayable URL
    ///
    /// Prefers the direct `url` (photos) and falls back to
    /// `preview_image_url` (videos, GIFs).
    pub fn media_url(&self, media_key: &str) -> Option<&str> {
        self.media
            .iter()
            .find(|m| m.media_key == media_key)
            .and_then(|m| m.url.as_deref().or(m.preview_image_url.as_deref()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub media_key: String,
    pub url: Option<String>,
    pub preview_image_url: Option<String>,
}

/// Partial-error object the API returns alongside (or instead of) `data`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProblem {
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl ApiProblem {
    pub fn describe(&self) -> String {
        match (&self.title, &self.detail) {
            (Some(title), Some(detail)) => format!("{title}: {detail}"),
            (Some(title), None) => title.clone(),
            (None, Some(detail)) => detail.clone(),
            (None, None) => "unknown problem".to_string(),
        }
    }
}
