use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::{AnalyzeSymptomsRequest, SymptomAnalysis};
use crate::services::SymptomError;

const SYSTEM_PROMPT: &str = "You are a medical triage assistant. Given a patient's symptoms and \
past medical records, suggest which kinds of doctors the patient should see. Respond with a JSON \
object of the form {\"relevantDoctorSpecializations\": [\"Cardiologist\", ...]} listing specialist \
titles, most relevant first. Return an empty list when no specialty can be determined.";

/// Turns free-text symptoms into candidate specializations.
#[async_trait]
pub trait SymptomAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalyzeSymptomsRequest) -> Result<SymptomAnalysis, SymptomError>;
}

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct OpenAiSymptomAnalyzer {
    api_key: String,
    base_url: String,
    model: String,
    http_client: Client,
}

impl OpenAiSymptomAnalyzer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_key: config.ai_api_key.clone(),
            base_url: config.ai_base_url.trim_end_matches('/').to_string(),
            model: config.ai_model.clone(),
            http_client: Client::new(),
        }
    }

    fn build_prompt(&self, request: &AnalyzeSymptomsRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!(
                        "Symptoms: {}\n\nPast medical records: {}",
                        request.symptoms,
                        request.medical_records_or_default()
                    )
                }
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.2
        })
    }
}

#[async_trait]
impl SymptomAnalyzer for OpenAiSymptomAnalyzer {
    async fn analyze(&self, request: &AnalyzeSymptomsRequest) -> Result<SymptomAnalysis, SymptomError> {
        if self.api_key.is_empty() {
            return Err(SymptomError::NotConfigured);
        }

        debug!("Requesting symptom analysis from {}", self.base_url);

        let response = self.http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&self.build_prompt(request))
            .send()
            .await
            .map_err(|e| SymptomError::Analysis(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("AI endpoint error ({}): {}", status, error_text);
            return Err(SymptomError::Analysis(format!("AI endpoint returned {}", status)));
        }

        let ai_response: Value = response
            .json()
            .await
            .map_err(|e| SymptomError::Analysis(e.to_string()))?;

        let content = ai_response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| SymptomError::Analysis("Invalid AI response format".to_string()))?;

        parse_analysis(content)
    }
}

/// Parse the model's JSON answer, tolerating a surrounding markdown code fence.
pub fn parse_analysis(content: &str) -> Result<SymptomAnalysis, SymptomError> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let mut analysis: SymptomAnalysis = serde_json::from_str(body).map_err(|e| {
        debug!("Unparseable analysis content: {}", body);
        SymptomError::Analysis(format!("Unparseable analysis: {}", e))
    })?;

    analysis.relevant_doctor_specializations = analysis
        .relevant_doctor_specializations
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(analysis)
}
