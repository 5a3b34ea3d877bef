pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{MedicalProfile, ProfileResponse, UpdateProfileRequest};
pub use router::profile_routes;
pub use services::{ProfileError, ProfileService};
