use axum::{routing::post, Router};

use crate::handlers;
use crate::SymptomCellState;

pub fn symptom_routes(state: SymptomCellState) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze_symptoms))
        .with_state(state)
}
