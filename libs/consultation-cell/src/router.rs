use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::{AiAssistant, ConsultationService, PrescriptionService};

pub fn consultation_routes(state: Arc<ConsultationService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_consultations).post(handlers::request_consultation))
        .route("/pending", get(handlers::pending_consultations))
        .route("/{consultation_id}", get(handlers::get_consultation))
        .route("/{consultation_id}/review", post(handlers::review_consultation))
        .with_state(state)
}

pub fn prescription_routes(state: Arc<PrescriptionService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_prescriptions).post(handlers::add_prescription))
        .with_state(state)
}

pub fn ai_routes(state: Arc<AiAssistant>) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze_symptoms))
        .route("/medications", post(handlers::suggest_medications))
        .with_state(state)
}
