use assert_matches::assert_matches;
use axum::{
    body::Body,
    extract::{Extension, State},
    http::{Request, StatusCode},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use profile_cell::handlers::*;
use profile_cell::{profile_routes, UpdateProfileRequest};
use shared_models::error::AppError;
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

fn create_auth_header(token: &str) -> TypedHeader<Authorization<Bearer>> {
    TypedHeader(Authorization::bearer(token).unwrap())
}

#[tokio::test]
async fn test_get_existing_profile() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_mock_server(&mock_server.uri()).to_arc();
    let user = TestUser::patient("patient@example.com");

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", format!("eq.{}", user.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::profile_response(&user.id)
        ])))
        .mount(&mock_server)
        .await;

    let response = get_profile(
        State(config),
        create_auth_header("token"),
        Extension(user.to_user()),
    ).await.unwrap().0;

    assert!(response.exists);
    assert_eq!(response.profile.full_name, "Test User");
    assert_eq!(response.profile.dob.map(|d| d.to_string()).as_deref(), Some("1990-01-01"));
}

#[tokio::test]
async fn test_get_missing_profile_returns_prefilled_draft() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_mock_server(&mock_server.uri()).to_arc();
    let user = TestUser::patient("jane@example.com").with_full_name("Jane Doe");

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let response = get_profile(
        State(config),
        create_auth_header("token"),
        Extension(user.to_user()),
    ).await.unwrap().0;

    assert!(!response.exists);
    assert_eq!(response.profile.full_name, "Jane Doe");
    assert_eq!(response.profile.email, "jane@example.com");
    assert!(response.profile.medical_records.is_none());
}

#[tokio::test]
async fn test_update_profile_upserts_with_merge() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_mock_server(&mock_server.uri()).to_arc();
    let user = TestUser::patient("test@example.com");

    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("on_conflict", "id"))
        .and(header("Prefer", "resolution=merge-duplicates,return=representation"))
        .and(body_partial_json(json!({
            "id": user.id,
            "full_name": "Test User",
            "dob": "1990-01-01"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::profile_response(&user.id)
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = UpdateProfileRequest {
        full_name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        dob: Some("1990-01-01".to_string()),
        ..Default::default()
    };

    let response = update_profile(
        State(config),
        create_auth_header("token"),
        Extension(user.to_user()),
        Json(request),
    ).await.unwrap().0;

    assert!(response.exists);
    assert_eq!(response.profile.id, user.id);
}

#[tokio::test]
async fn test_update_profile_rejects_invalid_email() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_mock_server(&mock_server.uri()).to_arc();
    let user = TestUser::patient("test@example.com");

    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let request = UpdateProfileRequest {
        full_name: "Test User".to_string(),
        email: "not-an-email".to_string(),
        ..Default::default()
    };

    let result = update_profile(
        State(config),
        create_auth_header("token"),
        Extension(user.to_user()),
        Json(request),
    ).await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_router_rejects_expired_token() {
    let config = TestConfig::default();
    let user = TestUser::patient("test@example.com");
    let token = JwtTestUtils::create_expired_token(&user, &config.jwt_secret);
    let app = profile_routes(config.to_arc());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
