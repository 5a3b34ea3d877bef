use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::DoctorCellState;

pub fn doctor_routes(state: DoctorCellState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/match", post(handlers::match_doctors))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/slots", get(handlers::get_doctor_slots));

    let protected_routes = Router::new()
        .route("/seed", post(handlers::seed_doctors))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
