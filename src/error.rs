//! Crate-wide error type.
//!
//! Every fallible operation returns [`AppError`]. Handlers that need an HTTP
//! status rely on the [`IntoResponse`] impl; provider failures that must be
//! reported with a 200 are turned into `{error}` bodies by the handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors produced by the client, the sinks and the façade
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Network or protocol failure talking to the provider
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Relational store failure
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    /// Wide-column store failure; the driver has several error types, kept as text
    #[error("wide-column store error: {0}")]
    WideColumn(String),

    /// JSON encoding or decoding failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure (binding the listener, reading files)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The provider answered but the payload is not what we expect
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// No data for the requested ticker
    #[error("No data found for ticker {0}")]
    TickerNotFound(String),

    /// The provider reported an error of its own
    #[error("provider error: {0}")]
    Provider(String),

    /// The quote cannot be normalized (zero open price and similar)
    #[error("invalid quote: {0}")]
    InvalidQuote(String),

    /// The provider rejected our credentials (cookie/crumb)
    #[error("unauthorized")]
    Unauthorized,

    /// Outbound rate limit hit on the provider side
    #[error("rate limit exceeded")]
    RateLimitExceeded,

    /// Unexpected HTTP status from the provider
    #[error("unexpected http status: {0}")]
    Unexpected(StatusCode),

    /// Client-side error of an API caller (400)
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid configuration or argument
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status this error maps to when it escapes a handler
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = axum::Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));
        (status, body).into_response()
    }
}
