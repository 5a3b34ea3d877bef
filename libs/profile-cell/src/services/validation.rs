use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{json, Map, Value};

use crate::models::UpdateProfileRequest;
use crate::services::ProfileError;

const MIN_FULL_NAME_CHARS: usize = 2;
const MAX_EMAIL_LEN: usize = 254;
const DOB_FORMAT: &str = "%Y-%m-%d";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok())
        .as_ref()
}

pub fn validate_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LEN && email_regex().is_some_and(|re| re.is_match(email))
}

/// Blank means "no date of birth".
pub fn parse_dob(raw: &str) -> Result<Option<NaiveDate>, ProfileError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DOB_FORMAT)
        .map(Some)
        .map_err(|_| ProfileError::Validation("Invalid date format, expected YYYY-MM-DD".to_string()))
}

fn optional_text(raw: &str) -> Value {
    let raw = raw.trim();
    if raw.is_empty() { Value::Null } else { json!(raw) }
}

/// Validate an update and turn it into the columns to write.
pub fn profile_changes(request: &UpdateProfileRequest) -> Result<Map<String, Value>, ProfileError> {
    let full_name = request.full_name.trim();
    if full_name.chars().count() < MIN_FULL_NAME_CHARS {
        return Err(ProfileError::Validation(
            "Full name must be at least 2 characters.".to_string(),
        ));
    }

    let email = request.email.trim();
    if !validate_email(email) {
        return Err(ProfileError::Validation("Invalid email address".to_string()));
    }

    let mut changes = Map::new();
    changes.insert("full_name".to_string(), json!(full_name));
    changes.insert("email".to_string(), json!(email));

    if let Some(ref dob) = request.dob {
        changes.insert("dob".to_string(), json!(parse_dob(dob)?));
    }
    if let Some(ref abha_id) = request.abha_id {
        changes.insert("abha_id".to_string(), optional_text(abha_id));
    }
    if let Some(ref records) = request.medical_records {
        changes.insert("medical_records".to_string(), optional_text(records));
    }

    Ok(changes)
}
