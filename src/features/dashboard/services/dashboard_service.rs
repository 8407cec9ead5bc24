use std::sync::Arc;

use crate::core::error::Result;
use crate::features::analytics::services::aggregation;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::denuncias::models::Severity;
use crate::features::denuncias::repositories::DenunciaRepository;
use crate::shared::constants::{HOTSPOTS_LIMIT, TOP_REGIONS_LIMIT};

/// Service for dashboard aggregates over every stored report
pub struct DashboardService {
    repository: Arc<dyn DenunciaRepository>,
    utc_offset_minutes: i32,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DenunciaRepository>, utc_offset_minutes: i32) -> Self {
        Self {
            repository,
            utc_offset_minutes,
        }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let records = self.repository.list_all().await?;

        let critical_count = records
            .iter()
            .filter(|d| d.risco == Some(Severity::Critical))
            .count() as i64;

        Ok(DashboardSummaryDto {
            total: records.len() as i64,
            critical_count,
            risk_distribution: aggregation::risk_distribution(&records),
            region_distribution: aggregation::region_distribution(
                &records,
                Some(TOP_REGIONS_LIMIT),
            ),
            hourly_distribution: aggregation::hourly_distribution(
                &records,
                self.utc_offset_minutes,
            ),
            status_distribution: aggregation::status_distribution(&records),
            hotspots: aggregation::hotspots(&records, HOTSPOTS_LIMIT),
        })
    }
}
