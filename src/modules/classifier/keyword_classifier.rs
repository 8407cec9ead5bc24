use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::denuncias::models::{DenunciaType, Severity};

use super::{Classification, DenunciaClassifier};

/// Checked in order; the first category with a matching keyword wins
const KEYWORDS: &[(DenunciaType, &[&str])] = &[
    (
        DenunciaType::PoorLighting,
        &["luz", "iluminação", "iluminacao", "poste", "streetlight", "lighting"],
    ),
    (
        DenunciaType::Violence,
        &["assalto", "roubo", "robbery", "assault", "mugging"],
    ),
    (
        DenunciaType::Vandalism,
        &["pichação", "pichacao", "vandalismo", "graffiti", "vandalism"],
    ),
    (
        DenunciaType::Drugs,
        &["droga", "entorpecente", "drug", "narcotic"],
    ),
    (
        DenunciaType::AbandonedSite,
        &["abandono", "sujeira", "abandoned", "garbage", "trash"],
    ),
];

/// Category from keywords in the description; severity is always the lowest
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn identify_type(text: &str) -> DenunciaType {
        let lower = text.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(tipo, _)| *tipo)
            .unwrap_or(DenunciaType::Other)
    }
}

#[async_trait]
impl DenunciaClassifier for KeywordClassifier {
    async fn classify(&self, text: &str, _image_base64: Option<&str>) -> Result<Classification> {
        Ok(Classification {
            category: Self::identify_type(text),
            severity: Severity::Low,
            confidence: 0.0,
        })
    }
}
