// libs/appointment-cell/src/router.rs
use axum::{
    middleware,
    routing::get,
    Router,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::AppointmentCellState;

pub fn appointment_routes(state: AppointmentCellState) -> Router {
    // every appointment operation belongs to the signed-in user
    let protected_routes = Router::new()
        .route("/", get(handlers::list_appointments).post(handlers::book_appointment))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
