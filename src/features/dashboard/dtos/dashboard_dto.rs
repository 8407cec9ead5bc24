use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::analytics::dtos::{HourlyCount, Hotspot, RegionCount, RiskCount, StatusCount};

/// Aggregates behind the agent dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub total: i64,
    /// Reports whose `risco` is `critico`
    pub critical_count: i64,
    pub risk_distribution: Vec<RiskCount>,
    /// Busiest regions first
    pub region_distribution: Vec<RegionCount>,
    pub hourly_distribution: Vec<HourlyCount>,
    pub status_distribution: Vec<StatusCount>,
    pub hotspots: Vec<Hotspot>,
}
