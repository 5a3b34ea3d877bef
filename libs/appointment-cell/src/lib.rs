pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use std::sync::Arc;

use doctor_cell::DoctorSource;
use shared_config::AppConfig;

pub use models::{
    Appointment, AppointmentError, AppointmentListing, AppointmentStatus, BookAppointmentRequest,
    DisplayStatus,
};
pub use router::appointment_routes;
pub use services::AppointmentBookingService;

#[derive(Clone)]
pub struct AppointmentCellState {
    pub config: Arc<AppConfig>,
    pub doctors: Arc<dyn DoctorSource>,
}
