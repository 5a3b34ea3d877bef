use std::sync::Arc;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::{return_representation, SupabaseClient};

use crate::catalog::builtin_doctors;
use crate::models::{Doctor, DoctorSlots};
use crate::services::source::DoctorSource;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("The doctors collection already contains {0} record(s); seeding aborted")]
    AlreadySeeded(usize),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub struct DoctorService {
    source: Arc<dyn DoctorSource>,
}

impl DoctorService {
    pub fn new(source: Arc<dyn DoctorSource>) -> Self {
        Self { source }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.source.list_doctors().await
    }

    /// `Ok(None)` when the doctor does not exist; `Err` only for store failures.
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>> {
        debug!("Fetching doctor: {}", doctor_id);
        self.source.get_doctor(doctor_id).await
    }

    pub async fn get_slots(&self, doctor_id: &str, date: NaiveDate) -> Result<Option<DoctorSlots>> {
        let slots = self.get_doctor(doctor_id).await?.map(|doctor| DoctorSlots {
            slots: doctor.slots_on(date).to_vec(),
            doctor_id: doctor.id,
            date,
        });
        Ok(slots)
    }
}

/// Writes the built-in catalog into an empty `doctors` table.
pub struct DoctorSeedService {
    supabase: SupabaseClient,
}

impl DoctorSeedService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn seed_catalog(&self, auth_token: &str) -> Result<Vec<Doctor>, SeedError> {
        let existing: Vec<Value> = self.supabase.request(
            Method::GET,
            "/rest/v1/doctors?select=id",
            Some(auth_token),
            None,
        ).await?;

        if !existing.is_empty() {
            warn!("Refusing to seed: {} doctors already stored", existing.len());
            return Err(SeedError::AlreadySeeded(existing.len()));
        }

        let doctors = builtin_doctors();
        let rows = serde_json::to_value(&doctors).map_err(anyhow::Error::from)?;

        let inserted: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/doctors",
            Some(auth_token),
            Some(rows),
            Some(return_representation()),
        ).await?;

        if inserted.len() != doctors.len() {
            return Err(SeedError::Store(anyhow!(
                "Expected {} seeded doctors, store returned {}",
                doctors.len(),
                inserted.len()
            )));
        }

        info!("Seeded {} doctors", inserted.len());

        let seeded = inserted
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Doctor>, _>>()
            .map_err(|e| SeedError::Store(anyhow!("Failed to parse seeded doctors: {}", e)))?;

        Ok(seeded)
    }
}
