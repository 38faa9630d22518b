//! GET /metrics

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus::{Encoder, TextEncoder};

use crate::metrics::{HTTP_REQUESTS_TOTAL, REGISTRY};

/// Create metrics router
pub fn metrics_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/metrics", get(scrape))
}

/// Render the xfeed registry in Prometheus text format
///
/// The scrape counts itself before gathering, so the returned text
/// includes the current request.
async fn scrape() -> Response {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&["GET", "/metrics", "200"])
        .inc();

    let encoder = TextEncoder::new();
    match encoder.encode_to_string(&REGISTRY.gather()) {
        Ok(body) => (
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            body,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics").into_response()
        }
    }
}
