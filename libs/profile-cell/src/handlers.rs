use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{MedicalProfile, ProfileResponse, UpdateProfileRequest};
use crate::services::ProfileService;

pub async fn get_profile(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile_service = ProfileService::new(&state);

    let response = match profile_service.get_profile(&user.id, auth.token()).await? {
        Some(profile) => ProfileResponse { exists: true, profile },
        None => ProfileResponse { exists: false, profile: MedicalProfile::draft_for(&user) },
    };

    Ok(Json(response))
}

pub async fn update_profile(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile_service = ProfileService::new(&state);

    let profile = profile_service
        .upsert_profile(&user.id, &request, auth.token())
        .await?;

    Ok(Json(ProfileResponse { exists: true, profile }))
}
