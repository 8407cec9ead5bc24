use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::denuncias::handlers;
use crate::features::denuncias::services::DenunciaService;

/// Create routes for report intake, lookup and status changes
///
/// Note: these routes are public; the acting agent travels in the request body
pub fn routes(service: Arc<DenunciaService>) -> Router {
    Router::new()
        .route(
            "/api/denuncia",
            get(handlers::list_denuncias).post(handlers::create_denuncia),
        )
        .route(
            "/api/denuncia/status",
            patch(handlers::update_denuncia_status_by_body),
        )
        .route("/api/denuncia/{id}", get(handlers::get_denuncia))
        .route(
            "/api/denuncia/{id}/status",
            get(handlers::get_denuncia_status).patch(handlers::update_denuncia_status),
        )
        .with_state(service)
}
