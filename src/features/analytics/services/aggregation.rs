//! Pure aggregations over report lists.
//!
//! Inputs are expected in ascending `created_at` order; every "first
//! encountered" tie-break below refers to that order.

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::features::analytics::dtos::{HourlyCount, Hotspot, RegionCount, RiskCount, StatusCount};
use crate::features::denuncias::models::{Denuncia, Severity};
use crate::shared::constants::{NO_REGION, UNCLASSIFIED_RISK};

/// Counts kept in first-seen key order
#[derive(Debug, Default)]
pub struct Tally {
    entries: Vec<(String, i64)>,
}

impl Tally {
    pub fn add(&mut self, key: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key.to_string(), 1)),
        }
    }

    /// Highest count; ties go to the key seen first
    pub fn mode(&self) -> Option<(&str, i64)> {
        self.entries
            .iter()
            .fold(None::<&(String, i64)>, |best, entry| match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            })
            .map(|(key, count)| (key.as_str(), *count))
    }

    /// Entries by descending count, first-seen order among equals
    pub fn ranked(&self) -> Vec<(String, i64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn into_entries(self) -> Vec<(String, i64)> {
        self.entries
    }
}

/// First comma-separated segment of the address, trimmed
pub fn region_of(endereco: Option<&str>) -> String {
    endereco
        .and_then(|e| e.split(',').next())
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(NO_REGION)
        .to_string()
}

/// Hour of day (0-23) at the given offset from UTC
pub fn hour_of(created_at: DateTime<Utc>, utc_offset_minutes: i32) -> u32 {
    (created_at + Duration::minutes(i64::from(utc_offset_minutes))).hour()
}

pub fn tally_regions(records: &[Denuncia]) -> Tally {
    let mut tally = Tally::default();
    for record in records {
        tally.add(&region_of(record.endereco.as_deref()));
    }
    tally
}

/// Modal hour of day; ties go to the hour seen first
pub fn peak_hour(records: &[Denuncia], utc_offset_minutes: i32) -> Option<u32> {
    let mut tally = Tally::default();
    for record in records {
        tally.add(&hour_of(record.created_at, utc_offset_minutes).to_string());
    }
    tally.mode().and_then(|(hour, _)| hour.parse().ok())
}

pub fn hourly_distribution(records: &[Denuncia], utc_offset_minutes: i32) -> Vec<HourlyCount> {
    let mut counts = [0i64; 24];
    for record in records {
        counts[hour_of(record.created_at, utc_offset_minutes) as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(hour, count)| HourlyCount {
            hour: hour as u32,
            count: *count,
        })
        .collect()
}

pub fn risk_distribution(records: &[Denuncia]) -> Vec<RiskCount> {
    let mut tally = Tally::default();
    for record in records {
        tally.add(record.risco.map(|r| r.as_str()).unwrap_or(UNCLASSIFIED_RISK));
    }
    tally
        .into_entries()
        .into_iter()
        .map(|(level, count)| RiskCount { level, count })
        .collect()
}

/// Regions by descending count, at most `limit` when given
pub fn region_distribution(records: &[Denuncia], limit: Option<usize>) -> Vec<RegionCount> {
    let ranked = tally_regions(records).ranked();
    ranked
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(name, count)| RegionCount { name, count })
        .collect()
}

pub fn status_distribution(records: &[Denuncia]) -> Vec<StatusCount> {
    let mut tally = Tally::default();
    for record in records {
        tally.add(record.status.as_str());
    }
    tally
        .into_entries()
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect()
}

/// Severity of a region judged by report volume only
pub fn infer_severity_by_count(count: i64) -> Severity {
    match count {
        c if c >= 50 => Severity::Critical,
        c if c >= 30 => Severity::High,
        c if c >= 10 => Severity::Medium,
        _ => Severity::Low,
    }
}

pub fn hotspots(records: &[Denuncia], limit: usize) -> Vec<Hotspot> {
    tally_regions(records)
        .ranked()
        .into_iter()
        .take(limit)
        .map(|(region, count)| Hotspot {
            region,
            count,
            severity: infer_severity_by_count(count),
        })
        .collect()
}
