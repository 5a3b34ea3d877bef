// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::TypedHeader;
use chrono::Utc;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{AppointmentError, AppointmentView, BookAppointmentRequest};
use crate::services::booking::AppointmentBookingService;
use crate::AppointmentCellState;

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::DoctorNotFound | AppointmentError::NotFound => AppError::NotFound(err.to_string()),
            AppointmentError::Unauthorized => AppError::Forbidden(err.to_string()),
            AppointmentError::DateInPast(_) | AppointmentError::SlotUnavailable { .. } => {
                AppError::ValidationError(err.to_string())
            }
            AppointmentError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

pub async fn book_appointment(
    State(state): State<AppointmentCellState>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let booking_service = AppointmentBookingService::new(&state.config, state.doctors.clone());

    let appointment = booking_service
        .book_appointment(&user.id, request, auth.token())
        .await?;

    let display_status = appointment.display_status(Utc::now());
    Ok((
        StatusCode::CREATED,
        Json(json!(AppointmentView { appointment, display_status })),
    ))
}

pub async fn list_appointments(
    State(state): State<AppointmentCellState>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state.config, state.doctors.clone());

    let listing = booking_service.list_partitioned(&user.id, auth.token()).await?;

    Ok(Json(json!({
        "upcoming": listing.upcoming,
        "past": listing.past,
        "total": listing.upcoming.len() + listing.past.len()
    })))
}

pub async fn get_appointment(
    State(state): State<AppointmentCellState>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state.config, state.doctors.clone());

    let appointment = booking_service
        .get_appointment(&appointment_id, &user.id, auth.token())
        .await?;

    let display_status = appointment.display_status(Utc::now());
    Ok(Json(json!(AppointmentView { appointment, display_status })))
}
