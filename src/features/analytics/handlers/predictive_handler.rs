use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::analytics::dtos::{PredictiveQuery, PredictiveResultDto};
use crate::features::analytics::services::PredictiveService;
use crate::shared::types::ApiResponse;

/// Predictive summary of reports created inside a date window
#[utoipa::path(
    get,
    path = "/api/predictive",
    tag = "Analytics",
    params(PredictiveQuery),
    responses(
        (status = 200, description = "Predictive summary", body = ApiResponse<PredictiveResultDto>),
        (status = 400, description = "Missing or invalid date"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_predictive(
    State(service): State<Arc<PredictiveService>>,
    Query(query): Query<PredictiveQuery>,
) -> Result<Json<ApiResponse<PredictiveResultDto>>, AppError> {
    let result = service
        .analyze(query.start_date.as_deref(), query.end_date.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}
