use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::catalog::builtin_doctors;
use crate::models::Doctor;

/// Read-only access to the doctor collection.
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>>;
}

/// Fixed in-memory collection.
pub struct CatalogDoctorSource {
    doctors: Vec<Doctor>,
}

impl CatalogDoctorSource {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_doctors())
    }
}

#[async_trait]
impl DoctorSource for CatalogDoctorSource {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.doctors.clone())
    }

    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>> {
        Ok(self.doctors.iter().find(|d| d.id == doctor_id).cloned())
    }
}

/// The `doctors` table, read with the anon key.
pub struct StoreDoctorSource {
    supabase: SupabaseClient,
}

impl StoreDoctorSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl DoctorSource for StoreDoctorSource {
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            "/rest/v1/doctors?select=*&order=id.asc",
            None,
            None,
        ).await?;

        debug!("Fetched {} doctor rows", rows.len());

        let mut doctors = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<Doctor>(row) {
                Ok(doctor) => doctors.push(doctor),
                Err(e) => warn!("Skipping malformed doctor record: {}", e),
            }
        }

        Ok(doctors)
    }

    async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>> {
        let path = format!("/rest/v1/doctors?id=eq.{}", urlencoding::encode(doctor_id));
        let rows: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            None,
            None,
        ).await?;

        match rows.into_iter().next() {
            Some(row) => {
                let doctor = serde_json::from_value(row)
                    .with_context(|| format!("Malformed doctor record {}", doctor_id))?;
                Ok(Some(doctor))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_source_lookup() {
        let source = CatalogDoctorSource::builtin();

        assert_eq!(tokio_test::block_on(source.list_doctors()).unwrap().len(), 8);

        let doctor = tokio_test::block_on(source.get_doctor("3")).unwrap().unwrap();
        assert_eq!(doctor.specialization, "Neurology");

        assert!(tokio_test::block_on(source.get_doctor("99")).unwrap().is_none());
    }
}
