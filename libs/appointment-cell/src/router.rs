use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::BookingService;

pub fn appointment_routes(state: Arc<BookingService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments).post(handlers::book_appointment))
        .route("/available-slots", get(handlers::get_available_slots))
        .route("/doctor/{doctor_id}", get(handlers::get_doctor_appointments))
        .route("/patient/{patient_id}", get(handlers::get_patient_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}/complete", post(handlers::complete_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .with_state(state)
}
