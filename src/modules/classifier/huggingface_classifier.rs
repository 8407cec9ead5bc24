use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::denuncias::models::{DenunciaType, Severity};

use super::{Classification, DenunciaClassifier, KeywordClassifier};

/// Minimum zero-shot score for an image label to be trusted
const IMAGE_LABEL_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Text models answer either flat or wrapped in one more list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl TextResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            TextResponse::Nested(outer) => outer.into_iter().flatten().collect(),
            TextResponse::Flat(scores) => scores,
        }
    }
}

/// Zero-shot pipelines answer as parallel arrays or as a list of pairs
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageResponse {
    Parallel { labels: Vec<String>, scores: Vec<f64> },
    Pairs(Vec<LabelScore>),
}

impl ImageResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            ImageResponse::Parallel { labels, scores } => labels
                .into_iter()
                .zip(scores)
                .map(|(label, score)| LabelScore { label, score })
                .collect(),
            ImageResponse::Pairs(scores) => scores,
        }
    }
}

/// Classifier backed by the Hugging Face inference API
pub struct HuggingFaceClassifier {
    client: reqwest::Client,
    api_token: String,
    text_model_url: String,
    image_model_url: String,
}

impl HuggingFaceClassifier {
    pub fn new(
        api_token: String,
        text_model_url: String,
        image_model_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("HelpCityCore/1.0 (citizen-report-system)")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_token,
            text_model_url,
            image_model_url,
        })
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Classifier request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Classifier returned status {}",
                response.status()
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse classifier response: {}", e))
        })
    }

    async fn negative_score(&self, text: &str) -> Result<f64> {
        let response: TextResponse = self
            .post_json(&self.text_model_url, json!({ "inputs": text }))
            .await?;
        Ok(negative_score_of(&response.into_scores()))
    }

    async fn classify_image(&self, image_base64: &str) -> Result<DenunciaType> {
        let labels: Vec<&str> = DenunciaType::ALL.iter().map(|t| t.label()).collect();
        let response: ImageResponse = self
            .post_json(
                &self.image_model_url,
                json!({
                    "inputs": image_base64,
                    "parameters": { "candidate_labels": labels },
                }),
            )
            .await?;
        Ok(decide_type_by_image(&response.into_scores()))
    }
}

/// Score of the `NEGATIVE` label, 0.0 when the model did not return one
pub fn negative_score_of(scores: &[LabelScore]) -> f64 {
    scores
        .iter()
        .find(|s| s.label == "NEGATIVE")
        .map(|s| s.score)
        .unwrap_or(0.0)
}

pub fn severity_from_negative(score: f64) -> Severity {
    if score > 0.8 {
        Severity::Critical
    } else if score > 0.5 {
        Severity::High
    } else if score > 0.2 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Best label above the threshold, `outros` when none qualifies or it is unknown
pub fn decide_type_by_image(results: &[LabelScore]) -> DenunciaType {
    results
        .iter()
        .filter(|r| r.score > IMAGE_LABEL_THRESHOLD)
        .fold(None::<&LabelScore>, |best, current| match best {
            Some(b) if b.score >= current.score => Some(b),
            _ => Some(current),
        })
        .and_then(|top| DenunciaType::from_label(&top.label))
        .unwrap_or(DenunciaType::Other)
}

#[async_trait]
impl DenunciaClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str, image_base64: Option<&str>) -> Result<Classification> {
        let negative = self.negative_score(text).await?;

        let category = match image_base64.filter(|img| !img.is_empty()) {
            Some(image) => self.classify_image(image).await?,
            None => KeywordClassifier::identify_type(text),
        };

        tracing::debug!(
            "Classified report: category={}, negative={:.3}",
            category,
            negative
        );

        Ok(Classification {
            category,
            severity: severity_from_negative(negative),
            confidence: negative,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: &str, score: f64) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn test_severity_thresholds_are_exclusive() {
        assert_eq!(severity_from_negative(0.95), Severity::Critical);
        assert_eq!(severity_from_negative(0.8), Severity::High);
        assert_eq!(severity_from_negative(0.5), Severity::Medium);
        assert_eq!(severity_from_negative(0.2), Severity::Low);
        assert_eq!(severity_from_negative(0.0), Severity::Low);
    }

    #[test]
    fn test_text_response_shapes() {
        let flat: TextResponse = serde_json::from_str(
            r#"[{"label":"POSITIVE","score":0.1},{"label":"NEGATIVE","score":0.9}]"#,
        )
        .unwrap();
        assert_eq!(negative_score_of(&flat.into_scores()), 0.9);

        let nested: TextResponse =
            serde_json::from_str(r#"[[{"label":"NEGATIVE","score":0.4}]]"#).unwrap();
        assert_eq!(negative_score_of(&nested.into_scores()), 0.4);

        let missing: TextResponse =
            serde_json::from_str(r#"[{"label":"POSITIVE","score":1.0}]"#).unwrap();
        assert_eq!(negative_score_of(&missing.into_scores()), 0.0);
    }

    #[test]
    fn test_image_response_shapes() {
        let parallel: ImageResponse = serde_json::from_str(
            r#"{"labels":["Vandalismo","Outros"],"scores":[0.7,0.3]}"#,
        )
        .unwrap();
        assert_eq!(
            decide_type_by_image(&parallel.into_scores()),
            DenunciaType::Vandalism
        );

        let pairs: ImageResponse =
            serde_json::from_str(r#"[{"label":"Uso de Drogas","score":0.6}]"#).unwrap();
        assert_eq!(decide_type_by_image(&pairs.into_scores()), DenunciaType::Drugs);
    }

    #[test]
    fn test_image_below_threshold_is_other() {
        let results = vec![score("Assalto", 0.3), score("Vandalismo", 0.25)];
        assert_eq!(decide_type_by_image(&results), DenunciaType::Other);
    }

    #[test]
    fn test_image_picks_highest_score() {
        let results = vec![
            score("Assalto", 0.35),
            score("Iluminação Pública", 0.55),
            score("Enchente", 0.9),
        ];
        // Unknown label wins on score and falls back to other
        assert_eq!(decide_type_by_image(&results), DenunciaType::Other);

        let results = vec![score("Assalto", 0.35), score("Iluminação Pública", 0.55)];
        assert_eq!(decide_type_by_image(&results), DenunciaType::PoorLighting);
    }
}
