// libs/appointment-cell/src/models.rs
use std::cmp::Reverse;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::models::string_or_number;
use doctor_cell::Doctor;

/// Slot labels look like "09:00 AM".
const SLOT_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Assigned by the store; may arrive as a string or a number.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub user_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub doctor_id: String,
    /// Doctor record as it was when the appointment was booked.
    pub doctor: Doctor,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Date plus the parsed slot label, or the start of the day when the label
    /// is not a recognisable clock time.
    pub fn starts_at(&self) -> NaiveDateTime {
        let time = NaiveTime::parse_from_str(self.time.trim(), SLOT_FORMAT)
            .unwrap_or(NaiveTime::MIN);
        self.date.and_time(time)
    }

    /// Upcoming appointments whose start has already gone by.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.status == AppointmentStatus::Upcoming && self.starts_at() < now.naive_utc()
    }

    pub fn display_status(&self, now: DateTime<Utc>) -> DisplayStatus {
        if self.is_past(now) {
            return DisplayStatus::Past;
        }
        match self.status {
            AppointmentStatus::Upcoming => DisplayStatus::Upcoming,
            AppointmentStatus::Completed => DisplayStatus::Completed,
            AppointmentStatus::Cancelled => DisplayStatus::Cancelled,
        }
    }
}

/// Persisted status. Set to `Upcoming` at booking and never changed afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Upcoming => write!(f, "Upcoming"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Presentation status; `Past` is derived and never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DisplayStatus {
    Upcoming,
    Completed,
    Cancelled,
    Past,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub display_status: DisplayStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentListing {
    pub upcoming: Vec<AppointmentView>,
    pub past: Vec<AppointmentView>,
}

impl AppointmentListing {
    /// Split into still-upcoming (soonest first) and everything else (most recent first).
    pub fn partition(appointments: Vec<Appointment>, now: DateTime<Utc>) -> Self {
        let (mut upcoming, mut past): (Vec<_>, Vec<_>) = appointments
            .into_iter()
            .map(|appointment| {
                let display_status = appointment.display_status(now);
                AppointmentView { appointment, display_status }
            })
            .partition(|view| view.display_status == DisplayStatus::Upcoming);

        upcoming.sort_by_key(|view| view.appointment.starts_at());
        past.sort_by_key(|view| Reverse(view.appointment.starts_at()));

        Self { upcoming, past }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Doctor not found")]
    DoctorNotFound,
    #[error("Appointment not found")]
    NotFound,
    #[error("Not authorized to access this appointment")]
    Unauthorized,
    #[error("Appointments cannot be booked for a past date ({0})")]
    DateInPast(NaiveDate),
    #[error("{time} is not an available slot on {date}")]
    SlotUnavailable { date: NaiveDate, time: String },
    #[error("Database error: {0}")]
    DatabaseError(String),
}
