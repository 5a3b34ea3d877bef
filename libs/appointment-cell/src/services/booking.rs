use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::{return_representation, SupabaseClient};

use doctor_cell::DoctorSource;

use crate::models::{
    Appointment, AppointmentError, AppointmentListing, AppointmentStatus, BookAppointmentRequest,
};

pub struct AppointmentBookingService {
    supabase: SupabaseClient,
    doctors: Arc<dyn DoctorSource>,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig, doctors: Arc<dyn DoctorSource>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            doctors,
        }
    }

    /// Book a slot the doctor currently offers. The new appointment is always `Upcoming`.
    pub async fn book_appointment(
        &self,
        user_id: &str,
        request: BookAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        self.book_appointment_at(user_id, request, auth_token, Utc::now()).await
    }

    pub async fn book_appointment_at(
        &self,
        user_id: &str,
        request: BookAppointmentRequest,
        auth_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Appointment, AppointmentError> {
        info!("Booking appointment for user {} with doctor {} on {} at {}",
              user_id, request.doctor_id, request.date, request.time);

        if request.date < now.date_naive() {
            return Err(AppointmentError::DateInPast(request.date));
        }

        let doctor = self.doctors
            .get_doctor(&request.doctor_id)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?
            .ok_or(AppointmentError::DoctorNotFound)?;

        if !doctor.offers_slot(request.date, &request.time) {
            warn!("Doctor {} has no {} slot on {}", doctor.id, request.time, request.date);
            return Err(AppointmentError::SlotUnavailable {
                date: request.date,
                time: request.time,
            });
        }

        let appointment_data = json!({
            "user_id": user_id,
            "doctor_id": doctor.id,
            "doctor": doctor,
            "date": request.date,
            "time": request.time,
            "status": AppointmentStatus::Upcoming,
            "created_at": now.to_rfc3339()
        });

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/appointments",
            Some(auth_token),
            Some(appointment_data),
            Some(return_representation()),
        ).await.map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or_else(|| {
            AppointmentError::DatabaseError("Failed to create appointment".to_string())
        })?;

        let appointment: Appointment = serde_json::from_value(row)
            .map_err(|e| AppointmentError::DatabaseError(format!("Failed to parse appointment: {}", e)))?;

        info!("Appointment {} booked", appointment.id);
        Ok(appointment)
    }

    pub async fn list_appointments(
        &self,
        user_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Listing appointments for user: {}", user_id);

        let path = format!(
            "/rest/v1/appointments?user_id=eq.{}&order=date.asc",
            urlencoding::encode(user_id)
        );

        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Appointment>, _>>()
            .map_err(|e| AppointmentError::DatabaseError(format!("Failed to parse appointments: {}", e)))
    }

    pub async fn list_partitioned(
        &self,
        user_id: &str,
        auth_token: &str,
    ) -> Result<AppointmentListing, AppointmentError> {
        let appointments = self.list_appointments(user_id, auth_token).await?;
        Ok(AppointmentListing::partition(appointments, Utc::now()))
    }

    pub async fn get_appointment(
        &self,
        appointment_id: &str,
        user_id: &str,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?id=eq.{}",
            urlencoding::encode(appointment_id)
        );

        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(AppointmentError::NotFound)?;
        let appointment: Appointment = serde_json::from_value(row)
            .map_err(|e| AppointmentError::DatabaseError(format!("Failed to parse appointment: {}", e)))?;

        if appointment.user_id != user_id {
            return Err(AppointmentError::Unauthorized);
        }

        Ok(appointment)
    }
}
