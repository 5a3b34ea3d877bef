use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{appointment_routes, AppointmentCellState};
use doctor_cell::{doctor_routes, doctor_source_from_config, DoctorCellState};
use profile_cell::profile_routes;
use shared_config::AppConfig;
use symptom_cell::{symptom_routes, OpenAiSymptomAnalyzer, SymptomCellState};

pub fn create_router(config: Arc<AppConfig>) -> Router {
    // one doctor source for every cell
    let doctors = doctor_source_from_config(&config);

    let symptom_state = SymptomCellState {
        analyzer: Arc::new(OpenAiSymptomAnalyzer::new(&config)),
        doctors: doctors.clone(),
    };
    let appointment_state = AppointmentCellState {
        config: config.clone(),
        doctors: doctors.clone(),
    };

    Router::new()
        .route("/", get(|| async { "MediMatch API is running!" }))
        .nest("/doctors", doctor_routes(DoctorCellState::new(config.clone(), doctors)))
        .nest("/symptoms", symptom_routes(symptom_state))
        .nest("/appointments", appointment_routes(appointment_state))
        .nest("/profile", profile_routes(config))
}
