//! Diagnosis result endpoints.
//!
//! - `POST /api/v1/save`: persist an outcome, `201` with the stored record
//! - `GET /api/v1/results/:id`: read one back

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::DiagnosisResult;

pub async fn save(
    State(ctx): State<ApiContext>,
    Json(result): Json<DiagnosisResult>,
) -> Result<(StatusCode, Json<DiagnosisResult>), ApiError> {
    let saved = ctx.service.save_diagnosis(result)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DiagnosisResult>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid result ID format".into()))?;

    ctx.service
        .find_diagnosis(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Diagnosis result {id} not found")))
}
