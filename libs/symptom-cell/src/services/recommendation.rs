use std::sync::Arc;

use tracing::info;

use doctor_cell::{DoctorMatchingService, DoctorSource};

use crate::models::{AnalyzeSymptomsRequest, SymptomRecommendation, MIN_SYMPTOM_CHARS};
use crate::services::analyzer::SymptomAnalyzer;
use crate::services::SymptomError;

/// Symptom text in, recommended doctors out.
pub struct RecommendationService {
    analyzer: Arc<dyn SymptomAnalyzer>,
    matching: DoctorMatchingService,
}

impl RecommendationService {
    pub fn new(analyzer: Arc<dyn SymptomAnalyzer>, doctors: Arc<dyn DoctorSource>) -> Self {
        Self {
            analyzer,
            matching: DoctorMatchingService::new(doctors),
        }
    }

    pub async fn recommend(
        &self,
        request: AnalyzeSymptomsRequest,
    ) -> Result<SymptomRecommendation, SymptomError> {
        validate_symptoms(&request.symptoms)?;

        let analysis = self.analyzer.analyze(&request).await?;
        info!(
            "Analysis suggested {} specialization(s)",
            analysis.relevant_doctor_specializations.len()
        );

        let outcome = self.matching
            .find_doctors_for_specializations(&analysis.relevant_doctor_specializations)
            .await
            .map_err(|e| SymptomError::Doctors(e.to_string()))?;

        Ok(SymptomRecommendation {
            analysis,
            recommended_doctors: outcome.doctors,
            used_fallback: outcome.used_fallback,
        })
    }
}

pub fn validate_symptoms(symptoms: &str) -> Result<(), SymptomError> {
    if symptoms.trim().chars().count() < MIN_SYMPTOM_CHARS {
        return Err(SymptomError::Validation(format!(
            "Please describe your symptoms in at least {} characters.",
            MIN_SYMPTOM_CHARS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_symptom_length() {
        assert_matches!(validate_symptoms("headache"), Err(SymptomError::Validation(_)));
        assert_matches!(validate_symptoms("   cough     "), Err(SymptomError::Validation(_)));
        assert!(validate_symptoms("headache and fever").is_ok());
    }
}
