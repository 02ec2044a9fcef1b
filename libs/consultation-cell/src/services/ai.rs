use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use shared_config::AppConfig;

use crate::models::{ConsultationError, InlineImage, Medication, MedicationSuggestions};

const SYMPTOM_ANALYSIS_INSTRUCTION: &str = r#"You are an AI medical assistant for "ArogyaAI", a platform for rural India.
Your role is to provide a preliminary analysis of symptoms.
Analyze the user's symptoms and provide a potential diagnosis, suggest possible next steps, and include a clear disclaimer that this is not a substitute for professional medical advice.
Structure the response in clear, simple language suitable for a non-medical audience. Use Markdown for formatting.
The response should be structured as follows:
1.  **Preliminary Analysis:** A brief summary of possible conditions based on the symptoms.
2.  **Recommended Next Steps:** Suggestions like "rest", "hydration", "monitoring symptoms", or "consulting a doctor".
3.  **Disclaimer:** "This is an AI-generated analysis and not a substitute for professional medical advice. Please consult a qualified doctor for an accurate diagnosis."
Keep the tone helpful, empathetic, and cautious."#;

const MEDICATION_SUGGESTION_INSTRUCTION: &str = "You are an AI medical assistant. Based on the provided symptoms, suggest a list of common, over-the-counter or first-line prescription medications.
For each medication, provide a common name, a suggested dosage (e.g., '500mg'), and frequency (e.g., 'Twice a day').
This is for a doctor's reference, not a direct prescription. Do not include any warnings or disclaimers in the JSON output.";

/// The generative-AI boundary.
#[async_trait]
pub trait SymptomAnalyzer: Send + Sync {
    /// Markdown preliminary analysis of the described symptoms.
    async fn analyze_symptoms(&self, symptoms_text: &str, image: Option<&InlineImage>) -> Result<String>;

    /// Suggested medications for a doctor's reference. Never fails: any error yields an empty list.
    async fn suggest_medications(&self, symptoms_text: &str) -> Vec<Medication>;
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        if !config.is_ai_configured() {
            return Err(anyhow!("GEMINI_API_KEY environment variable not set"));
        }

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            http_client: Client::new(),
        })
    }

    async fn generate_content(&self, body: Value) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Calling Gemini model {}", self.model);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("Gemini API error ({}): {}", status, error_text));
        }

        let ai_response: Value = response.json().await?;
        response_text(&ai_response)
    }

    async fn request_medications(&self, symptoms_text: &str) -> Result<Vec<Medication>> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": MEDICATION_SUGGESTION_INSTRUCTION }] },
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("Symptoms: {}", symptoms_text) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": medication_schema()
            }
        });

        let text = self.generate_content(body).await?;
        let suggestions: MedicationSuggestions = serde_json::from_str(text.trim())?;
        Ok(suggestions.medications)
    }
}

#[async_trait]
impl SymptomAnalyzer for GeminiClient {
    async fn analyze_symptoms(&self, symptoms_text: &str, image: Option<&InlineImage>) -> Result<String> {
        let mut parts = vec![json!({ "text": symptoms_text })];
        if let Some(image) = image {
            parts.push(json!({
                "inlineData": { "mimeType": image.mime_type, "data": image.data }
            }));
        }

        let body = json!({
            "systemInstruction": { "parts": [{ "text": SYMPTOM_ANALYSIS_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": parts }]
        });

        self.generate_content(body).await
    }

    async fn suggest_medications(&self, symptoms_text: &str) -> Vec<Medication> {
        match self.request_medications(symptoms_text).await {
            Ok(medications) => medications,
            Err(e) => {
                error!("Error suggesting medications with Gemini API: {}", e);
                Vec::new()
            }
        }
    }
}

// Concatenates the text parts of the first candidate.
fn response_text(ai_response: &Value) -> Result<String> {
    let parts = ai_response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| anyhow!("Invalid Gemini response format"))?;

    let text: String = parts.iter().filter_map(|part| part["text"].as_str()).collect();
    if text.is_empty() {
        return Err(anyhow!("Gemini response contained no text"));
    }
    Ok(text)
}

fn medication_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "medications": {
                "type": "ARRAY",
                "description": "A list of suggested medications.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Name of the medication." },
                        "dosage": { "type": "STRING", "description": "Dosage of the medication (e.g., '500mg')." },
                        "frequency": { "type": "STRING", "description": "How often to take the medication (e.g., 'Twice a day')." }
                    },
                    "required": ["name", "dosage", "frequency"]
                }
            }
        },
        "required": ["medications"]
    })
}

/// Holds the analyzer when one is configured, so the HTTP layer can report its absence.
pub struct AiAssistant {
    analyzer: Option<Arc<dyn SymptomAnalyzer>>,
}

impl AiAssistant {
    pub fn new(analyzer: Arc<dyn SymptomAnalyzer>) -> Self {
        Self { analyzer: Some(analyzer) }
    }

    pub fn unconfigured() -> Self {
        Self { analyzer: None }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        match GeminiClient::new(config) {
            Ok(client) => Self::new(Arc::new(client)),
            Err(e) => {
                warn!("AI assistant disabled: {}", e);
                Self::unconfigured()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.analyzer.is_some()
    }

    pub async fn analyze_symptoms(
        &self,
        symptoms_text: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, ConsultationError> {
        let analyzer = self.analyzer()?;
        if symptoms_text.trim().is_empty() && image.is_none() {
            return Err(ConsultationError::ValidationError("Describe the symptoms or attach an image".to_string()));
        }

        analyzer.analyze_symptoms(symptoms_text, image).await.map_err(|e| {
            error!("Error analyzing symptoms with Gemini API: {}", e);
            ConsultationError::AiService(
                "Failed to get analysis from AI. Please check your connection or API key.".to_string(),
            )
        })
    }

    pub async fn suggest_medications(&self, symptoms_text: &str) -> Result<Vec<Medication>, ConsultationError> {
        Ok(self.analyzer()?.suggest_medications(symptoms_text).await)
    }

    fn analyzer(&self) -> Result<&Arc<dyn SymptomAnalyzer>, ConsultationError> {
        self.analyzer.as_ref().ok_or(ConsultationError::AiNotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn response_text_joins_parts() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "**Preliminary" }, { "text": " Analysis:**" }] } }]
        });
        assert_eq!(response_text(&response).unwrap(), "**Preliminary Analysis:**");
    }

    #[test]
    fn response_without_candidates_is_an_error() {
        assert!(response_text(&json!({ "promptFeedback": { "blockReason": "SAFETY" } })).is_err());
        assert!(response_text(&json!({ "candidates": [{ "content": { "parts": [] } }] })).is_err());
    }

    #[test]
    fn client_requires_api_key() {
        assert!(GeminiClient::new(&AppConfig::default()).is_err());
    }

    #[tokio::test]
    async fn unconfigured_assistant_reports_absence() {
        let assistant = AiAssistant::unconfigured();
        assert!(!assistant.is_configured());
        assert_matches!(
            assistant.analyze_symptoms("fever", None).await,
            Err(ConsultationError::AiNotConfigured)
        );
        assert_matches!(assistant.suggest_medications("fever").await, Err(ConsultationError::AiNotConfigured));
    }
}
