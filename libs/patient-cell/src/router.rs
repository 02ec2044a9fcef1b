use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::{PatientService, SessionService};

pub fn patient_routes(state: Arc<PatientService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_patients).post(handlers::add_patient))
        .route("/{patient_id}", get(handlers::get_patient))
        .with_state(state)
}

pub fn user_routes(state: Arc<SessionService>) -> Router {
    Router::new()
        .route("/sign-in", post(handlers::sign_in))
        .with_state(state)
}
