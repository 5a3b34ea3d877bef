//! Fixtures shared by the cells' integration tests.

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use uuid::Uuid;

use shared_config::{AppConfig, DoctorSourceKind};
use shared_models::auth::User;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub ai_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            ai_base_url: "http://localhost:54322/v1".to_string(),
        }
    }
}

impl TestConfig {
    /// Point both the document store and the AI endpoint at a mock server.
    pub fn with_mock_server(uri: &str) -> Self {
        Self {
            supabase_url: uri.to_string(),
            ai_base_url: format!("{}/v1", uri),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            supabase_jwt_secret: self.jwt_secret.clone(),
            ai_api_key: "test-ai-key".to_string(),
            ai_base_url: self.ai_base_url.clone(),
            ai_model: "gpt-4o".to_string(),
            doctor_source: DoctorSourceKind::Store,
            server_port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
    pub full_name: Option<String>,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("test@example.com", "authenticated")
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
            full_name: None,
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "authenticated")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn with_full_name(mut self, name: &str) -> Self {
        self.full_name = Some(name.to_string());
        self
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
            metadata: self.full_name.as_ref().map(|name| json!({ "full_name": name })),
            created_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "email": user.email,
            "role": user.role,
            "user_metadata": user.full_name.as_ref().map(|name| json!({ "full_name": name })),
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn doctor_response(id: i64, name: &str, specialization: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "specialization": specialization,
            "location": "Community Health Clinic",
            "availability": {
                "2099-08-10": ["09:00 AM", "11:00 AM"],
                "2099-08-11": ["02:00 PM"]
            },
            "image": "https://placehold.co/400x400"
        })
    }

    pub fn appointment_response(user_id: &str, doctor: &Value, date: &str, time: &str, status: &str) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "user_id": user_id,
            "doctor_id": doctor["id"].to_string().trim_matches('"'),
            "doctor": doctor,
            "date": date,
            "time": time,
            "status": status,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn profile_response(user_id: &str) -> Value {
        json!({
            "id": user_id,
            "full_name": "Test User",
            "email": "test@example.com",
            "dob": "1990-01-01",
            "abha_id": "12-3456-7890-1234",
            "medical_records": "Diagnosed with asthma in 2015",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn chat_completion_response(content: &str) -> Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
