//! Error types for xfeed
//!
//! All errors surfaced over HTTP are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.
//! Upstream failures never reach this type; they are absorbed by the
//! account fetcher and replaced with generated posts.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested account is not in the configured list (404)
    #[error("User not found")]
    AccountNotFound(String),

    /// Unknown route or resource (404)
    #[error("Resource not found")]
    NotFound,

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// Maps each error variant to appropriate HTTP status code
    /// and JSON error body.
    fn into_response(self) -> Response {
        use axum::Json;

        let (status, error_message, error_type) = match &self {
            AppError::AccountNotFound(account) => {
                tracing::debug!(%account, "Rejected request for unconfigured account");
                (StatusCode::NOT_FOUND, self.to_string(), "account_not_found")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string(), "not_found"),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), "config"),
            AppError::Internal(error) => {
                tracing::error!(%error, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "internal",
                )
            }
        };

        use crate::metrics::ERRORS_TOTAL;
        ERRORS_TOTAL
            .with_label_values(&[error_type, "unknown"])
            .inc();

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
