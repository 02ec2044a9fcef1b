use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::services::DoctorService;

pub fn doctor_routes(state: Arc<DoctorService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/schedule", put(handlers::update_schedule))
        .route("/{doctor_id}/overrides", post(handlers::create_override))
        .with_state(state)
}
