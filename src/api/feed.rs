//! Feed endpoints
//!
//! - GET /tweets[?refresh=true]
//! - GET /tweets/:account

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};

use serde::Deserialize;

use crate::AppState;
use crate::data::Post;
use crate::error::{AppError, Result};
use crate::metrics::{HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUESTS_TOTAL};

/// Create feed router
///
/// Routes:
/// - GET /tweets
/// - GET /tweets/:account
pub fn feed_router() -> Router<AppState> {
    Router::new()
        .route("/tweets", get(all_posts))
        .route("/tweets/:account", get(account_posts))
}

#[derive(Debug, Default, Deserialize)]
struct FeedQuery {
    /// Drop the cached feed before reading
    #[serde(default)]
    refresh: bool,
}

/// GET /tweets
///
/// Merged feed of every configured account, newest first. Served from
/// the feed cache while fresh, unless `refresh=true` forces a rebuild.
async fn all_posts(State(state): State<AppState>, Query(query): Query<FeedQuery>) -> Response {
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["GET", "/tweets"])
        .start_timer();

    if query.refresh {
        tracing::debug!("Forced feed refresh");
        state.aggregator.invalidate().await;
    }

    let posts = state.aggregator.all_posts().await;

    HTTP_REQUESTS_TOTAL
        .with_label_values(&["GET", "/tweets", "200"])
        .inc();

    Json(posts.as_slice()).into_response()
}

/// GET /tweets/:account
///
/// Posts of one configured account. Never cached.
async fn account_posts(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<Vec<Post>>> {
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["GET", "/tweets/:account"])
        .start_timer();

    if !state.aggregator.is_configured(&account) {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/tweets/:account", "404"])
            .inc();
        return Err(AppError::AccountNotFound(account));
    }

    let posts = state.aggregator.account_posts(&account).await;

    HTTP_REQUESTS_TOTAL
        .with_label_values(&["GET", "/tweets/:account", "200"])
        .inc();

    Ok(Json(posts))
}
