use axum::{
    Router,
    routing::get,
};

use appointment_cell::appointment_routes;
use consultation_cell::{ai_routes, consultation_routes, prescription_routes};
use doctor_cell::doctor_routes;
use patient_cell::{patient_routes, user_routes};

use crate::state::ClinicState;

pub fn create_router(state: ClinicState) -> Router {
    Router::new()
        .route("/", get(|| async { "ArogyaAI API is running!" }))
        .nest("/users", user_routes(state.sessions))
        .nest("/patients", patient_routes(state.patients))
        .nest("/doctors", doctor_routes(state.doctors))
        .nest("/appointments", appointment_routes(state.booking))
        .nest("/consultations", consultation_routes(state.consultations))
        .nest("/prescriptions", prescription_routes(state.prescriptions))
        .nest("/ai", ai_routes(state.assistant))
}
