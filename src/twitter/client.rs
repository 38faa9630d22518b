//! X API v2 client
//!
//! Fetches the most recent posts of one account and normalizes them
//! into [`Post`] records.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use super::error::{Result, TwitterError};
use super::types::{TimelineResponse, User, UserLookupResponse};
use crate::config::TwitterConfig;
use crate::data::Post;
use crate::metrics::UPSTREAM_REQUESTS_TOTAL;

const TWEET_FIELDS: &str = "created_at,public_metrics,text";
const EXPANSIONS: &str = "attachments.media_keys";
const MEDIA_FIELDS: &str = "url,preview_image_url";

/// OAuth 1.0a user-context credentials
///
/// Accepted for completeness; timeline reads only need the bearer token.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl UserContext {
    fn from_config(config: &TwitterConfig) -> Option<Self> {
        Some(Self {
            consumer_key: config.consumer_key.clone()?,
            consumer_secret: config.consumer_secret.clone()?,
            access_token: config.access_token.clone()?,
            access_token_secret: config.access_token_secret.clone()?,
        })
    }
}

/// X API client
///
/// Only constructible with a bearer token. Without one the feed runs on
/// generated posts and no client exists.
pub struct TwitterClient {
    http: reqwest::Client,
    base_url: Url,
    bearer_token: String,
    max_results: u32,
    timeout: Duration,
    user_context: Option<UserContext>,
}

impl TwitterClient {
    /// Build a client from configuration
    ///
    /// # Returns
    /// `Ok(None)` when no bearer token is configured
    ///
    /// # Errors
    /// Returns error if `api_base_url` cannot be parsed
    pub fn from_config(config: &TwitterConfig, http: reqwest::Client) -> Result<Option<Self>> {
        let Some(bearer_token) = config.bearer_token() else {
            return Ok(None);
        };

        let client = Self {
            http,
            base_url: Url::parse(&config.api_base_url)?,
            bearer_token: bearer_token.to_string(),
            max_results: config.max_results,
            timeout: Duration::from_secs(config.timeout_seconds),
            user_context: UserContext::from_config(config),
        };

        tracing::info!(
            base_url = %client.base_url,
            max_results = client.max_results,
            user_context = client.has_user_context(),
            "X API client initialized"
        );

        Ok(Some(client))
    }

    /// Whether all four OAuth 1.0a strings were supplied
    pub fn has_user_context(&self) -> bool {
        self.user_context.is_some()
    }

    /// Recent posts for `account`, or an empty list on any failure
    ///
    /// Errors are logged here and never propagated.
    pub async fn recent_posts(&self, account: &str) -> Vec<Post> {
        match self.try_recent_posts(account).await {
            Ok(posts) => posts,
            Err(error) => {
                tracing::warn!(
                    %account,
                    %error,
                    kind = error.kind(),
                    "Failed to fetch posts from X API"
                );
                Vec::new()
            }
        }
    }

    /// Recent posts for `account`
    ///
    /// # Returns
    /// Empty list if the handle does not resolve to a user or the user has
    /// no posts
    pub async fn try_recent_posts(&self, account: &str) -> Result<Vec<Post>> {
        let Some(user) = self.lookup_user(account).await? else {
            tracing::info!(%account, "X user not found");
            return Ok(Vec::new());
        };

        let timeline = self.user_timeline(&user.id).await?;
        for problem in &timeline.errors {
            tracing::debug!(%account, problem = %problem.describe(), "Timeline problem");
        }
        let posts = normalize_timeline(account, timeline)?;

        tracing::debug!(%account, user_id = %user.id, count = posts.len(), "Fetched posts from X API");
        Ok(posts)
    }

    /// GET /2/users/by/username/:username
    async fn lookup_user(&self, username: &str) -> Result<Option<User>> {
        let url = self.endpoint(&["2", "users", "by", "username", username])?;
        let response: UserLookupResponse = self.get_json("user_lookup", url).await?;

        if response.data.is_none() {
            for problem in &response.errors {
                tracing::debug!(%username, problem = %problem.describe(), "User lookup problem");
            }
        }

        Ok(response.data)
    }

    /// GET /2/users/:id/tweets
    async fn user_timeline(&self, user_id: &str) -> Result<TimelineResponse> {
        let mut url = self.endpoint(&["2", "users", user_id, "tweets"])?;
        url.query_pairs_mut()
            .append_pair("max_results", &self.max_results.to_string())
            .append_pair("tweet.fields", TWEET_FIELDS)
            .append_pair("expansions", EXPANSIONS)
            .append_pair("media.fields", MEDIA_FIELDS);

        self.get_json("user_timeline", url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: Url) -> Result<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.bearer_token)
            .timeout(self.timeout)
            .send()
            .await
            .inspect_err(|_| {
                UPSTREAM_REQUESTS_TOTAL
                    .with_label_values(&[endpoint, "network_error"])
                    .inc();
            })?;

        let status = response.status();
        if !status.is_success() {
            UPSTREAM_REQUESTS_TOTAL
                .with_label_values(&[endpoint, status.as_str()])
                .inc();
            let body = response.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        UPSTREAM_REQUESTS_TOTAL
            .with_label_values(&[endpoint, "ok"])
            .inc();

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Convert a timeline response into posts attributed to `account`
///
/// Media keys that do not resolve against `includes.media` are skipped.
///
/// # Errors
/// Returns `Malformed` if a post has no `created_at`
pub fn normalize_timeline(account: &str, response: TimelineResponse) -> Result<Vec<Post>> {
    let includes = response.includes.unwrap_or_default();

    response
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|tweet| {
            let created_at = tweet.created_at.ok_or_else(|| {
                TwitterError::Malformed(format!("post {} has no created_at", tweet.id))
            })?;

            let media_urls = tweet
                .media_keys()
                .iter()
                .filter_map(|key| includes.media_url(key))
                .map(str::to_string)
                .collect();

            Ok(Post {
                id: tweet.id,
                text: tweet.text,
                created_at,
                account: account.to_string(),
                metrics: tweet.public_metrics.unwrap_or_default(),
                media_urls,
            })
        })
        .collect()
}
