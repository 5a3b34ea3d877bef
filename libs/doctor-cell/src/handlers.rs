use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::MatchDoctorsRequest;
use crate::services::doctor::{DoctorSeedService, DoctorService, SeedError};
use crate::services::matching::DoctorMatchingService;
use crate::DoctorCellState;

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

pub async fn list_doctors(
    State(state): State<DoctorCellState>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.source.clone());

    let doctors = doctor_service.list_doctors().await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

pub async fn get_doctor(
    State(state): State<DoctorCellState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.source.clone());

    let doctor = doctor_service.get_doctor(&doctor_id).await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

pub async fn get_doctor_slots(
    State(state): State<DoctorCellState>,
    Path(doctor_id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.source.clone());

    let slots = doctor_service.get_slots(&doctor_id, query.date).await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!({
        "doctor_id": slots.doctor_id,
        "date": slots.date,
        "slots": slots.slots,
        "total_slots": slots.slots.len()
    })))
}

pub async fn match_doctors(
    State(state): State<DoctorCellState>,
    Json(request): Json<MatchDoctorsRequest>,
) -> Result<Json<Value>, AppError> {
    let matching_service = DoctorMatchingService::new(state.source.clone());

    let outcome = matching_service
        .find_doctors_for_specializations(&request.specializations)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(json!({
        "doctors": outcome.doctors,
        "used_fallback": outcome.used_fallback,
        "total": outcome.doctors.len()
    })))
}

pub async fn seed_doctors(
    State(state): State<DoctorCellState>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden("Only administrators can seed the doctor catalog".to_string()));
    }

    let seed_service = DoctorSeedService::new(&state.config);

    let seeded = seed_service.seed_catalog(auth.token()).await.map_err(|e| match e {
        SeedError::AlreadySeeded(_) => AppError::Conflict(e.to_string()),
        SeedError::Store(err) => AppError::Database(err.to_string()),
    })?;

    Ok(Json(json!({
        "seeded": seeded.len(),
        "doctors": seeded
    })))
}
