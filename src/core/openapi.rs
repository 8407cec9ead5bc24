use utoipa::{Modify, OpenApi};

use crate::features::analytics::{dtos as analytics_dtos, handlers as analytics_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::denuncias::{
    dtos as denuncias_dtos, handlers as denuncias_handlers, models as denuncias_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        denuncias_handlers::create_denuncia,
        denuncias_handlers::list_denuncias,
        denuncias_handlers::get_denuncia,
        denuncias_handlers::get_denuncia_status,
        denuncias_handlers::update_denuncia_status,
        denuncias_handlers::update_denuncia_status_by_body,
        // Analytics
        analytics_handlers::get_predictive,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            denuncias_models::DenunciaType,
            denuncias_models::DenunciaStatus,
            denuncias_models::Severity,
            denuncias_models::AssignedAgent,
            denuncias_models::PerformedBy,
            denuncias_models::DenunciaAction,
            denuncias_dtos::CreateDenunciaDto,
            denuncias_dtos::UpdateStatusDto,
            denuncias_dtos::UpdateStatusByBodyDto,
            denuncias_dtos::DenunciaResponseDto,
            ApiResponse<denuncias_dtos::DenunciaResponseDto>,
            ApiResponse<Vec<denuncias_dtos::DenunciaResponseDto>>,
            // Analytics
            analytics_dtos::RiskCount,
            analytics_dtos::RegionCount,
            analytics_dtos::HourlyCount,
            analytics_dtos::StatusCount,
            analytics_dtos::Hotspot,
            analytics_dtos::PredictiveAnalysisDto,
            analytics_dtos::PredictiveMetricsDto,
            analytics_dtos::PredictiveResultDto,
            ApiResponse<analytics_dtos::PredictiveResultDto>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
        )
    ),
    tags(
        (name = "denuncias", description = "Citizen report intake, lookup and status workflow"),
        (name = "Analytics", description = "Predictive summary over a date window"),
        (name = "Dashboard", description = "Aggregates for the agent dashboard"),
    ),
    info(
        title = "Help City API",
        version = "0.1.0",
        description = "API documentation for Help City",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let openapi = ApiDoc::openapi();
        for path in [
            "/api/denuncia",
            "/api/denuncia/{id}",
            "/api/denuncia/{id}/status",
            "/api/denuncia/status",
            "/api/predictive",
            "/api/dashboard/summary",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "City".into(),
            version: "9.9.9".into(),
            description: "Docs".into(),
        }
        .modify(&mut openapi);

        assert_eq!(openapi.info.title, "City");
        assert_eq!(openapi.info.version, "9.9.9");
        assert_eq!(openapi.info.description.as_deref(), Some("Docs"));
    }
}
