use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::AnalyzeSymptomsRequest;
use crate::services::RecommendationService;
use crate::SymptomCellState;

pub async fn analyze_symptoms(
    State(state): State<SymptomCellState>,
    Json(request): Json<AnalyzeSymptomsRequest>,
) -> Result<Json<Value>, AppError> {
    let service = RecommendationService::new(state.analyzer.clone(), state.doctors.clone());

    let recommendation = service.recommend(request).await?;

    Ok(Json(json!({
        "analysis": recommendation.analysis,
        "recommended_doctors": recommendation.recommended_doctors,
        "used_fallback": recommendation.used_fallback,
        "total": recommendation.recommended_doctors.len()
    })))
}
