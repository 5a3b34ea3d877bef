use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shared_models::auth::User;

/// Row of the `profiles` table; `id` is the owning user's id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub dob: Option<NaiveDate>,
    pub abha_id: Option<String>,
    pub medical_records: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MedicalProfile {
    /// Unsaved profile prefilled from the signed-in identity.
    pub fn draft_for(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.display_name().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            dob: None,
            abha_id: None,
            medical_records: None,
            updated_at: None,
        }
    }
}

/// Body of `PUT /profile`. Optional fields left out keep their stored value;
/// an empty string clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(alias = "fullName")]
    pub full_name: String,
    pub email: String,
    pub dob: Option<String>,
    #[serde(alias = "abhaId")]
    pub abha_id: Option<String>,
    #[serde(alias = "medicalRecords")]
    pub medical_records: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub exists: bool,
    pub profile: MedicalProfile,
}
