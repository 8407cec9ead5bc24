use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::analytics::dtos::{
    PredictiveAnalysisDto, PredictiveMetricsDto, PredictiveResultDto,
};
use crate::features::analytics::services::aggregation;
use crate::features::denuncias::repositories::DenunciaRepository;

const NO_REPORTS_TEXT: &str = "No reports in the selected period";

/// Parse a window bound: RFC 3339, a naive datetime (UTC) or a bare date (midnight UTC)
pub fn parse_date_param(raw: Option<&str>, name: &str) -> Result<DateTime<Utc>> {
    let value = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing required parameter: {}", name)))?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(AppError::BadRequest(format!(
        "Invalid {}: '{}'. Use YYYY-MM-DD or an ISO 8601 datetime",
        name, value
    )))
}

/// Fixed figures reported alongside every analysis
fn simulated_metrics() -> PredictiveMetricsDto {
    PredictiveMetricsDto {
        precision: 90,
        recall: 85,
        f1_score: 0.88,
        latency: 20,
    }
}

/// Service for the predictive summary over a date window
pub struct PredictiveService {
    repository: Arc<dyn DenunciaRepository>,
    utc_offset_minutes: i32,
}

impl PredictiveService {
    pub fn new(repository: Arc<dyn DenunciaRepository>, utc_offset_minutes: i32) -> Self {
        Self {
            repository,
            utc_offset_minutes,
        }
    }

    /// Summarize reports created strictly between `start_date` and `end_date`
    pub async fn analyze(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<PredictiveResultDto> {
        let start = parse_date_param(start_date, "startDate")?;
        let end = parse_date_param(end_date, "endDate")?;

        let records = self.repository.list_created_between(start, end).await?;
        let offset = self.utc_offset_minutes;

        let peak_hour = aggregation::peak_hour(&records, offset);
        let regions = aggregation::tally_regions(&records);
        let top_region = regions
            .mode()
            .map(|(region, count)| (region.to_string(), count));

        // Simulated, differs on every call
        let reduction: u32 = rand::thread_rng().gen_range(0..=50);

        let analysis = match (peak_hour, &top_region) {
            (Some(hour), Some((region, count))) => PredictiveAnalysisDto {
                temporal: format!(
                    "Peak of occurrences between {}h and {}h",
                    hour,
                    (hour + 1) % 24
                ),
                area: format!("{} had {} occurrences", region, count),
                effectiveness: format!(
                    "Simulated interventions reduced occurrences by {}%",
                    reduction
                ),
                recommendation: format!(
                    "Reinforce patrolling in {} between {}h and {}h",
                    region,
                    hour,
                    (hour + 2) % 24
                ),
            },
            _ => PredictiveAnalysisDto {
                temporal: NO_REPORTS_TEXT.to_string(),
                area: NO_REPORTS_TEXT.to_string(),
                effectiveness: format!(
                    "Simulated interventions reduced occurrences by {}%",
                    reduction
                ),
                recommendation: "Not enough data for a recommendation".to_string(),
            },
        };

        tracing::debug!(
            "Predictive summary {} -> {}: {} reports",
            start,
            end,
            records.len()
        );

        Ok(PredictiveResultDto {
            row_count: records.len() as i64,
            peak_hour,
            top_region: top_region.map(|(region, _)| region),
            analysis,
            metrics: simulated_metrics(),
            risk_distribution: aggregation::risk_distribution(&records),
            region_distribution: aggregation::region_distribution(&records, None),
            hourly_distribution: aggregation::hourly_distribution(&records, offset),
        })
    }
}
