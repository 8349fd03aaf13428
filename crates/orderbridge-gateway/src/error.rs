//! Error handling for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orderbridge_proto::ErrorEnvelope;

/// Application error type.
///
/// Rendered in the canonical legacy envelope so v1 clients can display it.
#[derive(Debug)]
pub enum AppError {
    /// Internal server error.
    Internal(String),
    /// Not found.
    NotFound(String),
    /// Upstream answered with something unusable.
    Upstream(String),
    /// Upstream did not answer in time.
    UpstreamTimeout(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
            AppError::UpstreamTimeout(msg) => {
                (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT", msg)
            }
        };

        tracing::warn!(status = status.as_u16(), code, message = %message, "request failed");
        (status, Json(ErrorEnvelope::new(code, message))).into_response()
    }
}

impl From<orderbridge_client::Error> for AppError {
    fn from(err: orderbridge_client::Error) -> Self {
        use orderbridge_client::Error;

        match err {
            Error::Timeout { .. } => AppError::UpstreamTimeout(err.to_string()),
            Error::NoFixture { .. } => AppError::NotFound(err.to_string()),
            Error::InvalidUrl { .. } | Error::Fixture(_) | Error::Io(_) => {
                AppError::Internal(err.to_string())
            }
            _ => AppError::Upstream(err.to_string()),
        }
    }
}
