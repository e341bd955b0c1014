use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{DiagnosisCandidate, DiagnosisRequest};

/// `POST /api/v1/diagnosis`: ranked diagnosis candidates for the request.
pub async fn diagnose(
    State(ctx): State<ApiContext>,
    Json(request): Json<DiagnosisRequest>,
) -> Result<Json<Vec<DiagnosisCandidate>>, ApiError> {
    let candidates = ctx.service.get_diagnosis(&request).await?;
    Ok(Json(candidates))
}
