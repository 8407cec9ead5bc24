//! Report classification
//!
//! Optional collaborator of report intake: when configured it derives a risk
//! level (and a suggested category) from the description and photo. Intake
//! never depends on it succeeding.

mod huggingface_classifier;
mod keyword_classifier;

pub use huggingface_classifier::HuggingFaceClassifier;
pub use keyword_classifier::KeywordClassifier;

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::config::{ClassifierConfig, ClassifierProvider};
use crate::core::error::{AppError, Result};
use crate::features::denuncias::models::{DenunciaType, Severity};

/// Outcome of classifying one report
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: DenunciaType,
    pub severity: Severity,
    /// Score behind `severity`, 0.0 when no model was involved
    pub confidence: f64,
}

#[async_trait]
pub trait DenunciaClassifier: Send + Sync {
    async fn classify(&self, text: &str, image_base64: Option<&str>) -> Result<Classification>;
}

/// Build the classifier selected by configuration, `None` when disabled
pub fn build_classifier(config: &ClassifierConfig) -> Result<Option<Arc<dyn DenunciaClassifier>>> {
    match config.provider {
        ClassifierProvider::None => Ok(None),
        ClassifierProvider::Keyword => Ok(Some(Arc::new(KeywordClassifier))),
        ClassifierProvider::HuggingFace => {
            let token = config.api_token.clone().ok_or_else(|| {
                AppError::Internal("HUGGINGFACE_API_TOKEN is required".to_string())
            })?;
            let classifier = HuggingFaceClassifier::new(
                token,
                config.text_model_url.clone(),
                config.image_model_url.clone(),
                config.timeout,
            )?;
            Ok(Some(Arc::new(classifier)))
        }
    }
}
