use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::denuncias::models::{Denuncia, DenunciaFilter, NewDenuncia, StatusChange};

/// Persistence seam for citizen reports.
///
/// The service layer owns validation and audit-entry construction; an
/// implementation only stores and retrieves.
#[async_trait]
pub trait DenunciaRepository: Send + Sync {
    async fn insert(&self, denuncia: &NewDenuncia) -> Result<Denuncia>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Denuncia>>;

    /// Matching reports, newest first
    async fn list(&self, filter: &DenunciaFilter) -> Result<Vec<Denuncia>>;

    /// Reports with `start < created_at < end`, oldest first
    async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Denuncia>>;

    /// Every report, oldest first
    async fn list_all(&self) -> Result<Vec<Denuncia>>;

    /// Write status, timestamp, optional agent and the audit entry as one
    /// unit. Returns `None` when no report has this id.
    async fn apply_status_change(
        &self,
        id: Uuid,
        change: &StatusChange,
    ) -> Result<Option<Denuncia>>;
}
