use serde::{Deserialize, Serialize};

use doctor_cell::Doctor;

pub const MIN_SYMPTOM_CHARS: usize = 10;
pub const NO_MEDICAL_RECORDS: &str = "No past medical records provided.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeSymptomsRequest {
    pub symptoms: String,
    #[serde(default, alias = "medicalRecords")]
    pub medical_records: Option<String>,
}

impl AnalyzeSymptomsRequest {
    /// Medical records text sent to the analyzer, with a stand-in when none were given.
    pub fn medical_records_or_default(&self) -> &str {
        self.medical_records
            .as_deref()
            .map(str::trim)
            .filter(|records| !records.is_empty())
            .unwrap_or(NO_MEDICAL_RECORDS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    #[serde(default)]
    pub relevant_doctor_specializations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymptomRecommendation {
    pub analysis: SymptomAnalysis,
    pub recommended_doctors: Vec<Doctor>,
    pub used_fallback: bool,
}
