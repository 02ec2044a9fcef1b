use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{AvailableSlotsQuery, BookAppointmentRequest, DoctorAppointmentsQuery};
use crate::services::BookingService;

#[axum::debug_handler]
pub async fn get_available_slots(
    State(booking): State<Arc<BookingService>>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let slots = booking.available_slots(query.doctor_id, query.date).await?;

    Ok(Json(json!({
        "doctor_id": query.doctor_id,
        "date": query.date,
        "slot_minutes": booking.slot_duration().minutes(),
        "available_slots": slots,
        "total_slots": slots.len()
    })))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(booking): State<Arc<BookingService>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = booking.book_appointment(request).await?;
    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(booking): State<Arc<BookingService>>,
) -> Result<Json<Value>, AppError> {
    let appointments = booking.list_appointments().await;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(booking): State<Arc<BookingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = booking.get_appointment(appointment_id).await?;
    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(booking): State<Arc<BookingService>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<DoctorAppointmentsQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = if query.upcoming.unwrap_or(false) {
        booking.upcoming_for_doctor(doctor_id, Local::now().naive_local()).await
    } else {
        booking.doctor_appointments(doctor_id).await
    };

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(booking): State<Arc<BookingService>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = booking.patient_appointments(patient_id).await;

    Ok(Json(json!({
        "patient_id": patient_id,
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(booking): State<Arc<BookingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = booking.complete(appointment_id).await?;
    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(booking): State<Arc<BookingService>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = booking.cancel(appointment_id).await?;
    Ok(Json(json!(appointment)))
}
