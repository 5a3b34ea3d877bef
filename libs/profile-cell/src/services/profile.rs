use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::{merge_duplicates, SupabaseClient};

use crate::models::{MedicalProfile, UpdateProfileRequest};
use crate::services::validation::profile_changes;
use crate::services::ProfileError;

pub struct ProfileService {
    supabase: SupabaseClient,
}

impl ProfileService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn get_profile(
        &self,
        user_id: &str,
        auth_token: &str,
    ) -> Result<Option<MedicalProfile>, ProfileError> {
        debug!("Fetching profile for user: {}", user_id);

        let path = format!("/rest/v1/profiles?id=eq.{}", urlencoding::encode(user_id));
        let result: Vec<Value> = self.supabase.request(
            Method::GET,
            &path,
            Some(auth_token),
            None,
        ).await.map_err(|e| ProfileError::Database(e.to_string()))?;

        match result.into_iter().next() {
            Some(row) => serde_json::from_value(row)
                .map(Some)
                .map_err(|e| ProfileError::Database(format!("Failed to parse profile: {}", e))),
            None => Ok(None),
        }
    }

    /// Create the caller's profile or merge the given fields into it.
    pub async fn upsert_profile(
        &self,
        user_id: &str,
        request: &UpdateProfileRequest,
        auth_token: &str,
    ) -> Result<MedicalProfile, ProfileError> {
        let mut changes = profile_changes(request)?;
        changes.insert("id".to_string(), json!(user_id));
        changes.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/profiles?on_conflict=id",
            Some(auth_token),
            Some(Value::Object(changes)),
            Some(merge_duplicates()),
        ).await.map_err(|e| ProfileError::Database(e.to_string()))?;

        let row = result.into_iter().next().ok_or_else(|| {
            ProfileError::Database("Profile was not returned after saving".to_string())
        })?;

        let profile: MedicalProfile = serde_json::from_value(row)
            .map_err(|e| ProfileError::Database(format!("Failed to parse profile: {}", e)))?;

        info!("Saved profile for user {}", user_id);
        Ok(profile)
    }
}
