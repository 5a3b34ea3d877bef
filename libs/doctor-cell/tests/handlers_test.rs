use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    body::Body,
    extract::{Extension, Path, Query, State},
    http::{Request, StatusCode},
    Json,
};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::catalog::builtin_doctors_from;
use doctor_cell::handlers::*;
use doctor_cell::models::MatchDoctorsRequest;
use doctor_cell::{doctor_routes, CatalogDoctorSource, DoctorCellState, StoreDoctorSource};
use shared_models::{auth::User, error::AppError};
use shared_utils::test_utils::{JwtTestUtils, MockSupabaseResponses, TestConfig, TestUser};

fn catalog_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 1).unwrap()
}

fn catalog_state() -> DoctorCellState {
    DoctorCellState::new(
        TestConfig::default().to_arc(),
        Arc::new(CatalogDoctorSource::new(builtin_doctors_from(catalog_start()))),
    )
}

fn store_state(mock_server: &MockServer) -> DoctorCellState {
    let config = TestConfig::with_mock_server(&mock_server.uri()).to_arc();
    let source = Arc::new(StoreDoctorSource::new(&config));
    DoctorCellState::new(config, source)
}

fn create_auth_header(token: &str) -> TypedHeader<Authorization<Bearer>> {
    TypedHeader(Authorization::bearer(token).unwrap())
}

async fn mount_store_doctors(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("select", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_response(1, "Dr. Heart", "Cardiology"),
            MockSupabaseResponses::doctor_response(2, "Dr. Kids", "Pediatrics"),
            MockSupabaseResponses::doctor_response(3, "Dr. Everyone", "General Practitioner"),
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_list_doctors_from_catalog() {
    let response = list_doctors(State(catalog_state())).await.unwrap().0;

    assert_eq!(response["total"], 8);
    assert_eq!(response["doctors"][0]["name"], "Dr. Evelyn Reed");
    assert_eq!(response["doctors"][0]["availability"]["2030-03-02"][0], "09:00 AM");
}

#[tokio::test]
async fn test_get_doctor_not_found() {
    let result = get_doctor(State(catalog_state()), Path("404".to_string())).await;
    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_get_doctor_slots() {
    let response = get_doctor_slots(
        State(catalog_state()),
        Path("6".to_string()),
        Query(SlotsQuery { date: NaiveDate::from_ymd_opt(2030, 3, 2).unwrap() }),
    ).await.unwrap().0;

    assert_eq!(response["slots"], json!(["10:00 AM", "12:00 PM", "03:00 PM"]));
    assert_eq!(response["total_slots"], 3);

    let empty = get_doctor_slots(
        State(catalog_state()),
        Path("6".to_string()),
        Query(SlotsQuery { date: NaiveDate::from_ymd_opt(2030, 4, 1).unwrap() }),
    ).await.unwrap().0;
    assert_eq!(empty["total_slots"], 0);
}

#[tokio::test]
async fn test_get_doctor_store_failure_is_not_reported_as_missing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(500)
            .set_body_json(MockSupabaseResponses::error_response("boom", "XX000")))
        .mount(&mock_server)
        .await;

    let result = get_doctor(State(store_state(&mock_server)), Path("1".to_string())).await;
    assert_matches!(result, Err(AppError::Database(_)));

    let slots = get_doctor_slots(
        State(store_state(&mock_server)),
        Path("1".to_string()),
        Query(SlotsQuery { date: NaiveDate::from_ymd_opt(2099, 8, 10).unwrap() }),
    ).await;
    assert_matches!(slots, Err(AppError::Database(_)));
}

#[tokio::test]
async fn test_get_doctor_absent_from_store() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = get_doctor(State(store_state(&mock_server)), Path("7".to_string())).await;
    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_match_doctors_against_store() {
    let mock_server = MockServer::start().await;
    mount_store_doctors(&mock_server).await;

    let response = match_doctors(
        State(store_state(&mock_server)),
        Json(MatchDoctorsRequest { specializations: vec!["Cardiologist".to_string()] }),
    ).await.unwrap().0;

    assert_eq!(response["used_fallback"], false);
    assert_eq!(response["total"], 1);
    assert_eq!(response["doctors"][0]["id"], "1");
}

#[tokio::test]
async fn test_match_doctors_falls_back_to_general_practitioner() {
    let mock_server = MockServer::start().await;
    mount_store_doctors(&mock_server).await;

    let response = match_doctors(
        State(store_state(&mock_server)),
        Json(MatchDoctorsRequest { specializations: vec![] }),
    ).await.unwrap().0;

    assert_eq!(response["used_fallback"], true);
    assert_eq!(response["total"], 1);
    assert_eq!(response["doctors"][0]["specialization"], "General Practitioner");
}

#[tokio::test]
async fn test_store_source_skips_malformed_rows() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_response(1, "Dr. Heart", "Cardiology"),
            { "id": 2, "name": "Dr. Broken", "availability": { "not-a-date": [] } },
        ])))
        .mount(&mock_server)
        .await;

    let response = list_doctors(State(store_state(&mock_server))).await.unwrap().0;
    assert_eq!(response["total"], 1);
}

#[tokio::test]
async fn test_store_error_surfaces_as_database_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(500)
            .set_body_json(MockSupabaseResponses::error_response("boom", "XX000")))
        .mount(&mock_server)
        .await;

    let result = list_doctors(State(store_state(&mock_server))).await;
    assert_matches!(result, Err(AppError::Database(_)));
}

#[tokio::test]
async fn test_seed_requires_admin() {
    let mock_server = MockServer::start().await;
    let patient = TestUser::patient("patient@example.com");

    let result = seed_doctors(
        State(store_state(&mock_server)),
        create_auth_header("token"),
        Extension(patient.to_user()),
    ).await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_seed_aborts_when_collection_not_empty() {
    let mock_server = MockServer::start().await;
    let admin = TestUser::admin("admin@example.com");
    let token = JwtTestUtils::create_test_token(&admin, &TestConfig::default().jwt_secret, Some(1));

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("select", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = seed_doctors(
        State(store_state(&mock_server)),
        create_auth_header(&token),
        Extension(admin.to_user()),
    ).await;

    assert_matches!(result, Err(AppError::Conflict(_)));
}

#[tokio::test]
async fn test_seed_inserts_catalog_into_empty_collection() {
    let mock_server = MockServer::start().await;
    let admin = TestUser::admin("admin@example.com");
    let token = JwtTestUtils::create_test_token(&admin, &TestConfig::default().jwt_secret, Some(1));

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("select", "id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let catalog = serde_json::to_value(doctor_cell::catalog::builtin_doctors()).unwrap();
    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .and(header("Authorization", format!("Bearer {}", token)))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(catalog))
        .expect(1)
        .mount(&mock_server)
        .await;

    let user: User = admin.to_user();
    let response = seed_doctors(
        State(store_state(&mock_server)),
        create_auth_header(&token),
        Extension(user),
    ).await.unwrap().0;

    assert_eq!(response["seeded"], 8);
}

#[tokio::test]
async fn test_router_seed_route_requires_token() {
    let app = doctor_routes(catalog_state());

    let response = app
        .oneshot(Request::builder().method("POST").uri("/seed").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_router_match_route() {
    let app = doctor_routes(catalog_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/match")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "specializations": ["Neurologist"] }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
