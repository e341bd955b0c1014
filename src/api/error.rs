//! API error types with structured JSON responses.
//!
//! Gateway failures keep their kind on the wire: clients can tell a
//! credential problem from an unreachable or misbehaving upstream.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;
use crate::gateway::GatewayError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),
    #[error("Upstream timed out: {0}")]
    UpstreamTimeout(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Upstream response unreadable: {0}")]
    UpstreamParse(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::UpstreamAuth(detail) => {
                tracing::error!(detail, "Upstream authentication failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_AUTH_FAILED",
                    "Diagnosis provider rejected the gateway credentials".to_string(),
                )
            }
            ApiError::UpstreamUnreachable(detail) => {
                tracing::error!(detail, "Upstream unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_UNREACHABLE",
                    "Diagnosis provider is unreachable".to_string(),
                )
            }
            ApiError::UpstreamTimeout(detail) => {
                tracing::error!(detail, "Upstream timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "UPSTREAM_TIMEOUT",
                    "Diagnosis provider did not answer in time".to_string(),
                )
            }
            ApiError::Upstream(detail) => {
                tracing::error!(detail, "Upstream returned an error");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Diagnosis provider returned an error".to_string(),
                )
            }
            ApiError::UpstreamParse(detail) => {
                tracing::error!(detail, "Upstream response unreadable");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_PARSE_FAILED",
                    "Diagnosis provider response could not be read".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let detail = err.to_string();
        match err {
            GatewayError::Authentication { .. } => ApiError::UpstreamAuth(detail),
            GatewayError::Transport { timed_out: true, .. } => ApiError::UpstreamTimeout(detail),
            GatewayError::Transport { .. } => ApiError::UpstreamUnreachable(detail),
            GatewayError::Upstream { .. } => ApiError::Upstream(detail),
            GatewayError::Parse { .. } => ApiError::UpstreamParse(detail),
            GatewayError::Credentials(_) | GatewayError::Client(_) => ApiError::Internal(detail),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
