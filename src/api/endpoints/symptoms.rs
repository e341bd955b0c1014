use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Symptom;

/// `GET /api/v1/symptoms`: the symptom catalog, in upstream order.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Symptom>>, ApiError> {
    let symptoms = ctx.service.get_symptoms().await?;
    Ok(Json(symptoms))
}
