use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Incident category, stored as the `denuncia_type` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "denuncia_type")]
pub enum DenunciaType {
    #[sqlx(rename = "violencia")]
    #[serde(rename = "violencia", alias = "violence")]
    Violence,
    #[sqlx(rename = "drogas")]
    #[serde(rename = "drogas", alias = "drugs")]
    Drugs,
    #[sqlx(rename = "vandalismo")]
    #[serde(rename = "vandalismo", alias = "vandalism")]
    Vandalism,
    #[sqlx(rename = "iluminacao")]
    #[serde(rename = "iluminacao", alias = "poor-lighting")]
    PoorLighting,
    #[sqlx(rename = "abandono")]
    #[serde(rename = "abandono", alias = "abandoned-site")]
    AbandonedSite,
    #[sqlx(rename = "outros")]
    #[serde(rename = "outros", alias = "other")]
    Other,
}

impl DenunciaType {
    pub const ALL: [DenunciaType; 6] = [
        DenunciaType::Violence,
        DenunciaType::Drugs,
        DenunciaType::Vandalism,
        DenunciaType::PoorLighting,
        DenunciaType::AbandonedSite,
        DenunciaType::Other,
    ];

    /// Value stored and returned on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            DenunciaType::Violence => "violencia",
            DenunciaType::Drugs => "drogas",
            DenunciaType::Vandalism => "vandalismo",
            DenunciaType::PoorLighting => "iluminacao",
            DenunciaType::AbandonedSite => "abandono",
            DenunciaType::Other => "outros",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            DenunciaType::Violence => "violence",
            DenunciaType::Drugs => "drugs",
            DenunciaType::Vandalism => "vandalism",
            DenunciaType::PoorLighting => "poor-lighting",
            DenunciaType::AbandonedSite => "abandoned-site",
            DenunciaType::Other => "other",
        }
    }

    /// Human label, also used as a candidate label for image classification
    pub fn label(&self) -> &'static str {
        match self {
            DenunciaType::Violence => "Assalto",
            DenunciaType::Drugs => "Uso de Drogas",
            DenunciaType::Vandalism => "Vandalismo",
            DenunciaType::PoorLighting => "Iluminação Pública",
            DenunciaType::AbandonedSite => "Área Degradada",
            DenunciaType::Other => "Outros",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl std::fmt::Display for DenunciaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DenunciaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle || t.alias() == needle)
            .ok_or_else(|| format!("unknown report type '{}'", s))
    }
}

/// Report status, stored as the `denuncia_status` database enum
///
/// No transition graph is enforced: any status may replace any other.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "denuncia_status")]
pub enum DenunciaStatus {
    #[default]
    #[sqlx(rename = "pendente")]
    #[serde(rename = "pendente", alias = "pending")]
    Pending,
    #[sqlx(rename = "em-analise")]
    #[serde(rename = "em-analise", alias = "under-review")]
    UnderReview,
    #[sqlx(rename = "verificado")]
    #[serde(rename = "verificado", alias = "verified")]
    Verified,
    #[sqlx(rename = "resolvido")]
    #[serde(rename = "resolvido", alias = "resolved")]
    Resolved,
    #[sqlx(rename = "falso-positivo")]
    #[serde(rename = "falso-positivo", alias = "false-positive")]
    FalsePositive,
}

impl DenunciaStatus {
    pub const ALL: [DenunciaStatus; 5] = [
        DenunciaStatus::Pending,
        DenunciaStatus::UnderReview,
        DenunciaStatus::Verified,
        DenunciaStatus::Resolved,
        DenunciaStatus::FalsePositive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DenunciaStatus::Pending => "pendente",
            DenunciaStatus::UnderReview => "em-analise",
            DenunciaStatus::Verified => "verificado",
            DenunciaStatus::Resolved => "resolvido",
            DenunciaStatus::FalsePositive => "falso-positivo",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            DenunciaStatus::Pending => "pending",
            DenunciaStatus::UnderReview => "under-review",
            DenunciaStatus::Verified => "verified",
            DenunciaStatus::Resolved => "resolved",
            DenunciaStatus::FalsePositive => "false-positive",
        }
    }
}

impl std::fmt::Display for DenunciaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DenunciaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == needle || st.alias() == needle)
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

/// Risk level (`risco`), stored as the `denuncia_severity` database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "denuncia_severity")]
pub enum Severity {
    #[sqlx(rename = "baixo")]
    #[serde(rename = "baixo", alias = "low")]
    Low,
    #[sqlx(rename = "medio")]
    #[serde(rename = "medio", alias = "medium")]
    Medium,
    #[sqlx(rename = "alto")]
    #[serde(rename = "alto", alias = "high")]
    High,
    #[sqlx(rename = "critico")]
    #[serde(rename = "critico", alias = "critical")]
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "baixo",
            Severity::Medium => "medio",
            Severity::High => "alto",
            Severity::Critical => "critico",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Agent responsible for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignedAgent {
    pub id: String,
    pub name: String,
    pub badge: String,
}

/// Who performed an audited action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PerformedBy {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// One entry of a report's append-only audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DenunciaAction {
    pub id: Uuid,
    pub description: String,
    pub performed_by: PerformedBy,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A citizen report as held by the store
#[derive(Debug, Clone, PartialEq)]
pub struct Denuncia {
    pub id: Uuid,
    pub tipo: DenunciaType,
    pub descricao: String,
    pub endereco: Option<String>,
    pub latitude: String,
    pub longitude: String,
    pub image_base64: Option<String>,
    pub status: DenunciaStatus,
    pub risco: Option<Severity>,
    pub assigned_agent: Option<AssignedAgent>,
    pub actions: Vec<DenunciaAction>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Data for inserting a new report; status and audit log are not caller-controlled
#[derive(Debug, Clone)]
pub struct NewDenuncia {
    pub id: Uuid,
    pub tipo: DenunciaType,
    pub descricao: String,
    pub endereco: Option<String>,
    pub latitude: String,
    pub longitude: String,
    pub image_base64: Option<String>,
    pub risco: Option<Severity>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Everything a status update writes, applied as one unit
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: DenunciaStatus,
    pub updated_at: DateTime<Utc>,
    pub assigned_agent: Option<AssignedAgent>,
    pub action: DenunciaAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parses_wire_values_and_aliases() {
        assert_eq!("violencia".parse::<DenunciaType>(), Ok(DenunciaType::Violence));
        assert_eq!("Violence".parse::<DenunciaType>(), Ok(DenunciaType::Violence));
        assert_eq!(
            "poor-lighting".parse::<DenunciaType>(),
            Ok(DenunciaType::PoorLighting)
        );
        assert_eq!(" abandono ".parse::<DenunciaType>(), Ok(DenunciaType::AbandonedSite));
        assert!("assalto".parse::<DenunciaType>().is_err());
    }

    #[test]
    fn test_status_parses_wire_values_and_aliases() {
        assert_eq!("resolvido".parse::<DenunciaStatus>(), Ok(DenunciaStatus::Resolved));
        assert_eq!(
            "under-review".parse::<DenunciaStatus>(),
            Ok(DenunciaStatus::UnderReview)
        );
        assert!("closed".parse::<DenunciaStatus>().is_err());
        assert_eq!(DenunciaStatus::default(), DenunciaStatus::Pending);
    }

    #[test]
    fn test_serde_uses_wire_values() {
        assert_eq!(
            serde_json::to_string(&DenunciaStatus::FalsePositive).unwrap(),
            "\"falso-positivo\""
        );
        let parsed: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(parsed, Severity::Critical);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"critico\"");
    }

    #[test]
    fn test_labels_round_trip() {
        for tipo in DenunciaType::ALL {
            assert_eq!(DenunciaType::from_label(tipo.label()), Some(tipo));
        }
        assert_eq!(DenunciaType::from_label("Enchente"), None);
    }
}
