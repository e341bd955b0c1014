//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mock_enabled: bool,
    pub stored_results: i64,
    pub version: &'static str,
}

/// `GET /api/v1/health`: liveness plus current fetch mode.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        mock_enabled: ctx.service.is_mock(),
        stored_results: ctx.service.stored_results()?,
        version: crate::config::APP_VERSION,
    }))
}
