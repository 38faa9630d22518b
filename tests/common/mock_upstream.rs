//! Minimal stand-in for the X API v2 endpoints the client uses
//!
//! Behaviour is keyed on the requested handle:
//! - `ghost`: user lookup returns a not-found problem
//! - `broken`: user lookup fails with HTTP 500
//! - `quiet`: user exists but has no posts
//! - `garbled`: timeline body is not JSON
//! - anything else: two posts, the newer one with media attachments

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use super::TEST_BEARER_TOKEN;

#[derive(Default)]
struct Recorder {
    requests: AtomicUsize,
    timeline_queries: Mutex<Vec<String>>,
}

/// Running mock server
pub struct MockUpstream {
    addr: String,
    recorder: Arc<Recorder>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let recorder = Arc::new(Recorder::default());

        let app = Router::new()
            .route("/2/users/by/username/:username", get(lookup_user))
            .route("/2/users/:id/tweets", get(user_timeline))
            .with_state(recorder.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, recorder }
    }

    pub fn base_url(&self) -> String {
        self.addr.clone()
    }

    /// Total requests received, across both endpoints
    pub fn request_count(&self) -> usize {
        self.recorder.requests.load(Ordering::SeqCst)
    }

    /// Raw query strings received by the timeline endpoint
    pub async fn timeline_queries(&self) -> Vec<String> {
        self.recorder.timeline_queries.lock().await.clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TEST_BEARER_TOKEN}"))
}

async fn lookup_user(
    State(recorder): State<Arc<Recorder>>,
    headers: HeaderMap,
    Path(username): Path<String>,
) -> Response {
    recorder.requests.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "title": "Unauthorized" }))).into_response();
    }

    match username.as_str() {
        "ghost" => Json(json!({
            "errors": [{
                "value": "ghost",
                "detail": "Could not find user with username: [ghost].",
                "title": "Not Found Error",
                "type": "https://api.twitter.com/2/problems/resource-not-found"
            }]
        }))
        .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => Json(json!({
            "data": { "id": format!("id-{username}"), "name": username, "username": username }
        }))
        .into_response(),
    }
}

async fn user_timeline(
    State(recorder): State<Arc<Recorder>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    recorder.requests.fetch_add(1, Ordering::SeqCst);
    recorder
        .timeline_queries
        .lock()
        .await
        .push(query.unwrap_or_default());

    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let username = id.trim_start_matches("id-");
    match username {
        "quiet" => Json(json!({ "meta": { "result_count": 0 } })).into_response(),
        "garbled" => (
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            "{not json",
        )
            .into_response(),
        _ => {
            let now = Utc::now();
            let newer = (now - Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Millis, true);
            let older = (now - Duration::hours(3)).to_rfc3339_opts(SecondsFormat::Millis, true);

            Json(json!({
                "data": [
                    {
                        "id": format!("{username}-2"),
                        "text": format!("{username} newer post"),
                        "created_at": newer,
                        "public_metrics": {
                            "retweet_count": 20,
                            "reply_count": 5,
                            "like_count": 300,
                            "quote_count": 2
                        },
                        "attachments": { "media_keys": ["3_photo", "7_video", "3_gone"] }
                    },
                    {
                        "id": format!("{username}-1"),
                        "text": format!("{username} older post"),
                        "created_at": older,
                        "public_metrics": { "like_count": 1 }
                    }
                ],
                "includes": {
                    "media": [
                        { "media_key": "3_photo", "type": "photo", "url": "https://pbs.example/photo.jpg" },
                        { "media_key": "7_video", "type": "video", "preview_image_url": "https://pbs.example/preview.jpg" }
                    ]
                },
                "meta": { "result_count": 2 }
            }))
            .into_response()
        }
    }
}
