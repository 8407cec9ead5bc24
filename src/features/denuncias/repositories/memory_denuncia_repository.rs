use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::denuncias::models::{
    Denuncia, DenunciaFilter, DenunciaStatus, NewDenuncia, StatusChange,
};

use super::DenunciaRepository;

/// Store backed by a vector, used by service and handler tests
#[derive(Default)]
pub struct InMemoryDenunciaRepository {
    records: RwLock<Vec<Denuncia>>,
}

impl InMemoryDenunciaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, denuncia: Denuncia) {
        self.records.write().await.push(denuncia);
    }
}

/// The record as it exists right after insertion
fn inserted(denuncia: &NewDenuncia) -> Denuncia {
    Denuncia {
        id: denuncia.id,
        tipo: denuncia.tipo,
        descricao: denuncia.descricao.clone(),
        endereco: denuncia.endereco.clone(),
        latitude: denuncia.latitude.clone(),
        longitude: denuncia.longitude.clone(),
        image_base64: denuncia.image_base64.clone(),
        status: DenunciaStatus::Pending,
        risco: denuncia.risco,
        assigned_agent: None,
        actions: Vec::new(),
        source: denuncia.source.clone(),
        created_at: denuncia.created_at,
        updated_at: None,
    }
}

/// Same effect as the single UPDATE of the Postgres store
fn apply(record: &mut Denuncia, change: &StatusChange) {
    record.status = change.status;
    record.updated_at = Some(change.updated_at);
    if let Some(agent) = &change.assigned_agent {
        record.assigned_agent = Some(agent.clone());
    }
    record.actions.push(change.action.clone());
}

fn sorted_by_created_at(mut records: Vec<Denuncia>) -> Vec<Denuncia> {
    records.sort_by_key(|d| d.created_at);
    records
}

#[async_trait]
impl DenunciaRepository for InMemoryDenunciaRepository {
    async fn insert(&self, denuncia: &NewDenuncia) -> Result<Denuncia> {
        let record = inserted(denuncia);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Denuncia>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self, filter: &DenunciaFilter) -> Result<Vec<Denuncia>> {
        let records = self.records.read().await;
        let matching = records.iter().filter(|d| filter.matches(d)).cloned().collect();
        let mut matching = sorted_by_created_at(matching);
        matching.reverse();
        Ok(matching)
    }

    async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Denuncia>> {
        let records = self.records.read().await;
        let window = records
            .iter()
            .filter(|d| d.created_at > start && d.created_at < end)
            .cloned()
            .collect();
        Ok(sorted_by_created_at(window))
    }

    async fn list_all(&self) -> Result<Vec<Denuncia>> {
        Ok(sorted_by_created_at(self.records.read().await.clone()))
    }

    async fn apply_status_change(
        &self,
        id: Uuid,
        change: &StatusChange,
    ) -> Result<Option<Denuncia>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|d| d.id == id).map(|record| {
            apply(record, change);
            record.clone()
        }))
    }
}
