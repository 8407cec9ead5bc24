use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::denuncias::models::Severity;

// ============================================================================
// Distributions
// ============================================================================

/// Reports per risk level; unclassified reports count as `indefinido`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskCount {
    pub level: String,
    pub count: i64,
}

/// Reports per region (first comma-separated segment of the address)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegionCount {
    pub name: String,
    pub count: i64,
}

/// Reports per hour of day, always 24 entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Region ranked by volume, with a severity inferred from the count alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Hotspot {
    pub region: String,
    pub count: i64,
    pub severity: Severity,
}

// ============================================================================
// Predictive summary
// ============================================================================

/// Query parameters for the predictive summary
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveQuery {
    /// Window start (exclusive): RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Window end (exclusive), same formats
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictiveAnalysisDto {
    pub temporal: String,
    pub area: String,
    pub effectiveness: String,
    pub recommendation: String,
}

/// Simulated model-quality figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveMetricsDto {
    pub precision: u32,
    pub recall: u32,
    pub f1_score: f64,
    pub latency: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveResultDto {
    pub row_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_hour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_region: Option<String>,
    pub analysis: PredictiveAnalysisDto,
    pub metrics: PredictiveMetricsDto,
    pub risk_distribution: Vec<RiskCount>,
    pub region_distribution: Vec<RegionCount>,
    pub hourly_distribution: Vec<HourlyCount>,
}
