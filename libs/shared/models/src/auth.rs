use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims issued by the hosted auth provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub app_metadata: Option<serde_json::Value>,
    pub user_metadata: Option<serde_json::Value>,
    pub aud: Option<String>,
    pub iat: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// Display name carried in the provider's user metadata, if any.
    pub fn display_name(&self) -> Option<String> {
        let metadata = self.metadata.as_ref()?;
        ["full_name", "name", "display_name"]
            .iter()
            .find_map(|key| metadata.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
    }
}
