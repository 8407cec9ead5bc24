use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::denuncias::dtos::{CreateDenunciaDto, UpdateStatusDto};
use crate::features::denuncias::models::{
    Denuncia, DenunciaAction, DenunciaFilter, DenunciaStatus, NewDenuncia, PerformedBy,
    StatusChange,
};
use crate::features::denuncias::repositories::DenunciaRepository;
use crate::modules::classifier::DenunciaClassifier;
use crate::shared::constants::{AGENT_ROLE, DEFAULT_SOURCE, SYSTEM_ACTOR_ID, SYSTEM_ACTOR_NAME};

/// Service for report intake, lookup and the status workflow
pub struct DenunciaService {
    repository: Arc<dyn DenunciaRepository>,
    classifier: Option<Arc<dyn DenunciaClassifier>>,
}

impl DenunciaService {
    pub fn new(repository: Arc<dyn DenunciaRepository>) -> Self {
        Self {
            repository,
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Option<Arc<dyn DenunciaClassifier>>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Validate and store a new report.
    ///
    /// Status is always `pendente` with an empty audit log, whatever the caller sent.
    pub async fn create(&self, dto: CreateDenunciaDto) -> Result<Denuncia> {
        dto.validate()?;

        let tipo = dto
            .parsed_tipo()
            .ok_or_else(|| AppError::Validation(vec![format!("tipo: unknown type '{}'", dto.tipo)]))?;

        let risco = match &self.classifier {
            Some(classifier) => {
                match classifier
                    .classify(&dto.descricao, dto.image_base64.as_deref())
                    .await
                {
                    Ok(classification) => {
                        tracing::info!(
                            "Report classified: suggested tipo={}, risco={}, confidence={:.2}",
                            classification.category,
                            classification.severity,
                            classification.confidence
                        );
                        Some(classification.severity)
                    }
                    Err(e) => {
                        tracing::warn!("Classifier failed, storing report unclassified: {}", e);
                        None
                    }
                }
            }
            None => None,
        };

        let source = dto
            .source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        let new_denuncia = NewDenuncia {
            id: Uuid::now_v7(),
            tipo,
            descricao: dto.descricao,
            endereco: dto.endereco,
            latitude: dto.latitude,
            longitude: dto.longitude,
            image_base64: dto.image_base64,
            risco,
            source,
            created_at: Utc::now(),
        };

        let denuncia = self.repository.insert(&new_denuncia).await?;
        tracing::info!("Report {} created (tipo={})", denuncia.id, denuncia.tipo);

        Ok(denuncia)
    }

    /// Reports matching the filter, newest first
    pub async fn list(&self, filter: &DenunciaFilter) -> Result<Vec<Denuncia>> {
        self.repository.list(filter).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Denuncia> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Change a report's status and append the matching audit entry
    pub async fn update_status(&self, id: Uuid, dto: UpdateStatusDto) -> Result<Denuncia> {
        dto.validate()?;

        let status = dto.parsed_status().ok_or_else(|| {
            AppError::Validation(vec![format!("status: unknown status '{}'", dto.status)])
        })?;

        let now = Utc::now();
        let action = build_status_action(status, &dto, now);
        let change = StatusChange {
            status,
            updated_at: now,
            assigned_agent: dto.assigned_agent,
            action,
        };

        let updated = self
            .repository
            .apply_status_change(id, &change)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Report {} moved to status {}", id, status);

        Ok(updated)
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Report {} not found", id))
}

/// Audit entry for a status change; the supplied agent is the actor, else the system
fn build_status_action(
    status: DenunciaStatus,
    dto: &UpdateStatusDto,
    timestamp: DateTime<Utc>,
) -> DenunciaAction {
    let notes = dto
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);

    let mut description = format!("Status changed to {}", status);
    if let Some(notes) = &notes {
        description.push_str(&format!(". Notes: {}", notes));
    }

    let performed_by = match &dto.assigned_agent {
        Some(agent) => PerformedBy {
            id: agent.id.clone(),
            name: agent.name.clone(),
            role: AGENT_ROLE.to_string(),
        },
        None => PerformedBy {
            id: SYSTEM_ACTOR_ID.to_string(),
            name: SYSTEM_ACTOR_NAME.to_string(),
            role: AGENT_ROLE.to_string(),
        },
    };

    DenunciaAction {
        id: Uuid::now_v7(),
        description,
        performed_by,
        timestamp,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::denuncias::models::{AssignedAgent, DenunciaType, Severity};
    use crate::features::denuncias::repositories::InMemoryDenunciaRepository;
    use crate::modules::classifier::{Classification, KeywordClassifier};
    use crate::shared::test_helpers::{sample_create_dto, sample_denuncia};
    use async_trait::async_trait;

    struct FailingClassifier;

    #[async_trait]
    impl DenunciaClassifier for FailingClassifier {
        async fn classify(&self, _text: &str, _image: Option<&str>) -> Result<Classification> {
            Err(AppError::ExternalServiceError("model offline".into()))
        }
    }

    struct CriticalClassifier;

    #[async_trait]
    impl DenunciaClassifier for CriticalClassifier {
        async fn classify(&self, _text: &str, _image: Option<&str>) -> Result<Classification> {
            Ok(Classification {
                category: DenunciaType::Violence,
                severity: Severity::Critical,
                confidence: 0.93,
            })
        }
    }

    fn service() -> (Arc<InMemoryDenunciaRepository>, DenunciaService) {
        let repository = Arc::new(InMemoryDenunciaRepository::new());
        let service = DenunciaService::new(repository.clone());
        (repository, service)
    }

    fn update(status: &str, notes: Option<&str>, agent: Option<AssignedAgent>) -> UpdateStatusDto {
        UpdateStatusDto {
            status: status.to_string(),
            notes: notes.map(String::from),
            assigned_agent: agent,
        }
    }

    #[tokio::test]
    async fn test_create_forces_pending_with_empty_log() {
        let (_, service) = service();
        let before = Utc::now();

        let created = service.create(sample_create_dto()).await.unwrap();

        assert!(created.created_at >= before);
        assert_eq!(created.status, DenunciaStatus::Pending);
        assert!(created.actions.is_empty());
        assert!(created.assigned_agent.is_none());
        assert_eq!(created.source, "Web");
        assert_eq!(created.risco, None);
        assert_eq!(
            service.get_by_id(created.id).await.unwrap().descricao,
            created.descricao
        );
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_and_stores_nothing() {
        let (repository, service) = service();
        let dto = CreateDenunciaDto {
            descricao: "curto".into(),
            latitude: "north".into(),
            ..sample_create_dto()
        };

        match service.create(dto).await {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("descricao: "));
                assert!(errors[1].starts_with("latitude: "));
            }
            other => panic!("expected validation error, got {:?}", other.map(|d| d.id)),
        }
        assert!(repository.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resubmitting_creates_duplicates() {
        let (repository, service) = service();
        let first = service.create(sample_create_dto()).await.unwrap();
        let second = service.create(sample_create_dto()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repository.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_classifier_sets_risk_but_keeps_type() {
        let (_, service) = service();
        let service = service.with_classifier(Some(Arc::new(CriticalClassifier)));

        let created = service.create(sample_create_dto()).await.unwrap();

        assert_eq!(created.risco, Some(Severity::Critical));
        assert_eq!(created.tipo, DenunciaType::PoorLighting);
    }

    #[tokio::test]
    async fn test_classifier_failure_does_not_block_intake() {
        let (_, service) = service();
        let service = service.with_classifier(Some(Arc::new(FailingClassifier)));

        let created = service.create(sample_create_dto()).await.unwrap();
        assert_eq!(created.risco, None);
    }

    #[tokio::test]
    async fn test_keyword_classifier_stores_low_risk() {
        let (_, service) = service();
        let service = service.with_classifier(Some(Arc::new(KeywordClassifier)));

        let created = service.create(sample_create_dto()).await.unwrap();
        assert_eq!(created.risco, Some(Severity::Low));
    }

    #[tokio::test]
    async fn test_update_status_with_agent_and_notes() {
        let (_, service) = service();
        let created = service.create(sample_create_dto()).await.unwrap();
        let agent = AssignedAgent {
            id: "a1".into(),
            name: "Ana".into(),
            badge: "B-7".into(),
        };

        let before = Utc::now();
        let updated = service
            .update_status(
                created.id,
                update("resolvido", Some("unit dispatched"), Some(agent.clone())),
            )
            .await
            .unwrap();

        assert_eq!(updated.status, DenunciaStatus::Resolved);
        assert_eq!(updated.assigned_agent, Some(agent));
        assert!(updated.updated_at.is_some_and(|t| t >= before));
        assert_eq!(updated.actions.len(), 1);

        let action = &updated.actions[0];
        assert_eq!(
            action.description,
            "Status changed to resolvido. Notes: unit dispatched"
        );
        assert_eq!(action.performed_by.id, "a1");
        assert_eq!(action.performed_by.name, "Ana");
        assert_eq!(action.performed_by.role, "agent");
        assert_eq!(action.notes.as_deref(), Some("unit dispatched"));
        assert_eq!(Some(action.timestamp), updated.updated_at);
    }

    #[tokio::test]
    async fn test_update_status_without_agent_uses_system_actor() {
        let (_, service) = service();
        let created = service.create(sample_create_dto()).await.unwrap();

        let updated = service
            .update_status(created.id, update("em-analise", Some("   "), None))
            .await
            .unwrap();

        assert_eq!(updated.status, DenunciaStatus::UnderReview);
        assert!(updated.assigned_agent.is_none());
        let action = &updated.actions[0];
        assert_eq!(action.description, "Status changed to em-analise");
        assert_eq!(action.performed_by.id, "system");
        assert_eq!(action.performed_by.name, "System");
        assert_eq!(action.performed_by.role, "agent");
        assert!(action.notes.is_none());
    }

    #[tokio::test]
    async fn test_audit_log_only_grows() {
        let (_, service) = service();
        let created = service.create(sample_create_dto()).await.unwrap();

        let first = service
            .update_status(created.id, update("verificado", None, None))
            .await
            .unwrap();
        // Any status may follow any other
        let second = service
            .update_status(created.id, update("pendente", None, None))
            .await
            .unwrap();

        assert_eq!(second.status, DenunciaStatus::Pending);
        assert_eq!(second.actions.len(), 2);
        assert_eq!(second.actions[0], first.actions[0]);
    }

    #[tokio::test]
    async fn test_update_keeps_agent_when_none_supplied() {
        let (repository, service) = service();
        let mut existing = sample_denuncia("Poste apagado na esquina", None);
        existing.assigned_agent = Some(AssignedAgent {
            id: "a2".into(),
            name: "Bruno".into(),
            badge: "C-1".into(),
        });
        repository.seed(existing.clone()).await;

        let updated = service
            .update_status(existing.id, update("verified", None, None))
            .await
            .unwrap();

        assert_eq!(updated.status, DenunciaStatus::Verified);
        assert_eq!(updated.assigned_agent, existing.assigned_agent);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (repository, service) = service();
        service.create(sample_create_dto()).await.unwrap();

        let result = service
            .update_status(Uuid::now_v7(), update("resolvido", None, None))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        let stored = repository.list_all().await.unwrap();
        assert!(stored.iter().all(|d| d.actions.is_empty()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_append_every_action() {
        const UPDATES: usize = 32;
        let (repository, service) = service();
        let service = Arc::new(service);
        let id = service.create(sample_create_dto()).await.unwrap().id;

        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..UPDATES {
            let service = service.clone();
            let status = if n % 2 == 0 { "em-analise" } else { "verificado" };
            let notes = format!("round {}", n);
            tasks.spawn(async move {
                service
                    .update_status(id, update(status, Some(&notes), None))
                    .await
            });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
        }

        let stored = repository.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.actions.len(), UPDATES);
        let ids: std::collections::HashSet<Uuid> = stored.actions.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), UPDATES);
        let notes: std::collections::HashSet<&str> = stored
            .actions
            .iter()
            .filter_map(|a| a.notes.as_deref())
            .collect();
        assert_eq!(notes.len(), UPDATES);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_status() {
        let (_, service) = service();
        let created = service.create(sample_create_dto()).await.unwrap();

        let result = service
            .update_status(created.id, update("closed", None, None))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(
            service.get_by_id(created.id).await.unwrap().status,
            DenunciaStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts_newest_first() {
        let (repository, service) = service();
        let mut older = sample_denuncia("Poste apagado na Rua das Flores", Some("Centro, Rua A"));
        older.created_at = Utc::now() - chrono::Duration::hours(2);
        let mut newer = sample_denuncia("Outro poste apagado perto do mercado", Some("centro"));
        newer.created_at = Utc::now() - chrono::Duration::hours(1);
        let other = sample_denuncia("Carro abandonado há semanas", Some("Bairro Novo"));
        repository.seed(older.clone()).await;
        repository.seed(newer.clone()).await;
        repository.seed(other).await;

        let filter = DenunciaFilter::from_pairs([("endereco", "CENTRO"), ("status", "x")]);
        let results = service.list(&filter).await.unwrap();

        let ids: Vec<Uuid> = results.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(service.list(&DenunciaFilter::default()).await.unwrap().len(), 3);
    }
}
