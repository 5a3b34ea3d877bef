pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use std::sync::Arc;

use doctor_cell::DoctorSource;

pub use models::{AnalyzeSymptomsRequest, SymptomAnalysis, SymptomRecommendation};
pub use router::symptom_routes;
pub use services::{OpenAiSymptomAnalyzer, RecommendationService, SymptomAnalyzer, SymptomError};

#[derive(Clone)]
pub struct SymptomCellState {
    pub analyzer: Arc<dyn SymptomAnalyzer>,
    pub doctors: Arc<dyn DoctorSource>,
}
