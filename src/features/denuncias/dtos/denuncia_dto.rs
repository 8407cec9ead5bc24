use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::denuncias::models::{
    AssignedAgent, Denuncia, DenunciaAction, DenunciaStatus, DenunciaType, Severity,
};

fn validate_tipo(value: &str) -> Result<(), ValidationError> {
    value.parse::<DenunciaType>().map(|_| ()).map_err(|_| {
        ValidationError::new("invalid_tipo").with_message(
            "Type must be one of violencia, drogas, vandalismo, iluminacao, abandono, outros"
                .into(),
        )
    })
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    value.parse::<DenunciaStatus>().map(|_| ()).map_err(|_| {
        ValidationError::new("invalid_status").with_message(
            "Status must be one of pendente, em-analise, verificado, resolvido, falso-positivo"
                .into(),
        )
    })
}

/// Request DTO for submitting a report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDenunciaDto {
    /// Category, e.g. `iluminacao` (English aliases such as `poor-lighting` are accepted)
    #[validate(custom(function = "validate_tipo"))]
    pub tipo: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub descricao: String,

    pub endereco: Option<String>,

    #[validate(regex(
        path = *crate::shared::validation::COORDINATE_REGEX,
        message = "Latitude must be a decimal number"
    ))]
    pub latitude: String,

    #[validate(regex(
        path = *crate::shared::validation::COORDINATE_REGEX,
        message = "Longitude must be a decimal number"
    ))]
    pub longitude: String,

    /// Optional photo, base64 encoded
    pub image_base64: Option<String>,

    /// Origin tag, defaults to `Web`
    pub source: Option<String>,
}

impl CreateDenunciaDto {
    /// Category after validation has accepted the raw value
    pub fn parsed_tipo(&self) -> Option<DenunciaType> {
        self.tipo.parse().ok()
    }
}

/// Request DTO for changing a report's status
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusDto {
    #[validate(custom(function = "validate_status"))]
    pub status: String,

    /// Free text appended to the audit entry
    pub notes: Option<String>,

    /// Replaces the assigned agent and is recorded as the actor
    pub assigned_agent: Option<AssignedAgent>,
}

impl UpdateStatusDto {
    pub fn parsed_status(&self) -> Option<DenunciaStatus> {
        self.status.parse().ok()
    }
}

/// Status update carrying the report id in the body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusByBodyDto {
    pub id: String,
    #[serde(flatten)]
    pub update: UpdateStatusDto,
}

/// Response DTO for a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DenunciaResponseDto {
    pub id: Uuid,
    pub tipo: DenunciaType,
    pub descricao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco: Option<String>,
    pub latitude: String,
    pub longitude: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    pub status: DenunciaStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risco: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_agent: Option<AssignedAgent>,
    pub actions: Vec<DenunciaAction>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Denuncia> for DenunciaResponseDto {
    fn from(d: Denuncia) -> Self {
        Self {
            id: d.id,
            tipo: d.tipo,
            descricao: d.descricao,
            endereco: d.endereco,
            latitude: d.latitude,
            longitude: d.longitude,
            image_base64: d.image_base64,
            status: d.status,
            risco: d.risco,
            assigned_agent: d.assigned_agent,
            actions: d.actions,
            source: d.source,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
