pub mod profile;
pub mod validation;

use thiserror::Error;

use shared_models::error::AppError;

pub use profile::ProfileService;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("{0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Validation(msg) => AppError::ValidationError(msg),
            ProfileError::Database(msg) => AppError::Database(msg),
        }
    }
}
