#[cfg(test)]
use chrono::{DateTime, Utc};
#[cfg(test)]
use fake::{faker::lorem::en::Sentence, Fake};
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::features::denuncias::dtos::CreateDenunciaDto;
#[cfg(test)]
use crate::features::denuncias::models::{Denuncia, DenunciaStatus, DenunciaType};

/// Intake payload that passes validation
#[cfg(test)]
pub fn sample_create_dto() -> CreateDenunciaDto {
    CreateDenunciaDto {
        tipo: "iluminacao".to_string(),
        descricao: "Poste apagado na esquina da escola".to_string(),
        endereco: Some("Centro, Rua das Flores 120".to_string()),
        latitude: "-23.5505".to_string(),
        longitude: "-46.6333".to_string(),
        image_base64: None,
        source: None,
    }
}

/// Stored report created now, status `pendente`
#[cfg(test)]
pub fn sample_denuncia(descricao: &str, endereco: Option<&str>) -> Denuncia {
    Denuncia {
        id: Uuid::now_v7(),
        tipo: DenunciaType::PoorLighting,
        descricao: descricao.to_string(),
        endereco: endereco.map(String::from),
        latitude: "-23.5505".to_string(),
        longitude: "-46.6333".to_string(),
        image_base64: None,
        status: DenunciaStatus::Pending,
        risco: None,
        assigned_agent: None,
        actions: Vec::new(),
        source: "Web".to_string(),
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// Stored report with a generated description, created at the given instant
#[cfg(test)]
pub fn sample_denuncia_at(created_at: DateTime<Utc>, endereco: Option<&str>) -> Denuncia {
    let descricao: String = Sentence(4..8).fake();
    Denuncia {
        created_at,
        ..sample_denuncia(&descricao, endereco)
    }
}
