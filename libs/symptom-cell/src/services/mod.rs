pub mod analyzer;
pub mod recommendation;

use thiserror::Error;

use shared_models::error::AppError;

pub use analyzer::{OpenAiSymptomAnalyzer, SymptomAnalyzer};
pub use recommendation::RecommendationService;

#[derive(Debug, Error)]
pub enum SymptomError {
    #[error("{0}")]
    Validation(String),
    #[error("Symptom analysis is not configured")]
    NotConfigured,
    #[error("Symptom analysis failed: {0}")]
    Analysis(String),
    #[error("Failed to load doctors: {0}")]
    Doctors(String),
}

impl From<SymptomError> for AppError {
    fn from(err: SymptomError) -> Self {
        match err {
            SymptomError::Validation(msg) => AppError::ValidationError(msg),
            SymptomError::NotConfigured => AppError::ExternalService(err.to_string()),
            SymptomError::Analysis(_) => AppError::ExternalService(err.to_string()),
            SymptomError::Doctors(_) => AppError::Database(err.to_string()),
        }
    }
}
