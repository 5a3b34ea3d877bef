pub mod catalog;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use std::sync::Arc;

use shared_config::{AppConfig, DoctorSourceKind};

pub use models::{Doctor, DoctorSlots, MatchDoctorsRequest};
pub use router::doctor_routes;
pub use services::{
    match_doctors, normalize_specialization, CatalogDoctorSource, DoctorMatchingService,
    DoctorSource, MatchOutcome, StoreDoctorSource,
};

/// State shared by the doctor routes.
#[derive(Clone)]
pub struct DoctorCellState {
    pub config: Arc<AppConfig>,
    pub source: Arc<dyn DoctorSource>,
}

impl DoctorCellState {
    pub fn new(config: Arc<AppConfig>, source: Arc<dyn DoctorSource>) -> Self {
        Self { config, source }
    }
}

/// Build the doctor source selected by `DOCTOR_SOURCE`.
pub fn doctor_source_from_config(config: &AppConfig) -> Arc<dyn DoctorSource> {
    match config.doctor_source {
        DoctorSourceKind::Store => Arc::new(StoreDoctorSource::new(config)),
        DoctorSourceKind::Catalog => Arc::new(CatalogDoctorSource::builtin()),
    }
}
