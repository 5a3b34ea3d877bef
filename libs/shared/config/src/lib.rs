use std::env;
use tracing::warn;

/// Where doctor records are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorSourceKind {
    /// The `doctors` table in the document store.
    Store,
    /// The built-in in-memory catalog.
    Catalog,
}

impl DoctorSourceKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "store" | "supabase" => Some(Self::Store),
            "catalog" | "memory" | "static" => Some(Self::Catalog),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub ai_api_key: String,
    pub ai_base_url: String,
    pub ai_model: String,
    pub doctor_source: DoctorSourceKind,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            ai_api_key: env::var("AI_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("AI_API_KEY not set, symptom analysis will fail");
                    String::new()
                }),
            ai_base_url: env::var("AI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            ai_model: env::var("AI_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            doctor_source: match env::var("DOCTOR_SOURCE") {
                Ok(raw) => DoctorSourceKind::parse(&raw).unwrap_or_else(|| {
                    warn!("Unknown DOCTOR_SOURCE '{}', using store", raw);
                    DoctorSourceKind::Store
                }),
                Err(_) => DoctorSourceKind::Store,
            },
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }

    pub fn is_ai_configured(&self) -> bool {
        !self.ai_api_key.is_empty() && !self.ai_base_url.is_empty()
    }
}
