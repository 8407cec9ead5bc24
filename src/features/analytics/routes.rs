use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::analytics::handlers;
use crate::features::analytics::services::PredictiveService;

/// Create analytics routes
pub fn routes(predictive_service: Arc<PredictiveService>) -> Router {
    Router::new()
        .route("/api/predictive", get(handlers::get_predictive))
        .with_state(predictive_service)
}
