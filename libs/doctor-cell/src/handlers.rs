use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, CreateOverrideRequest, DoctorSearchQuery, WeeklySchedule};
use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn list_doctors(
    State(doctors): State<Arc<DoctorService>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let doctors = match query.search.as_deref() {
        Some(term) => doctors.search_doctors(term).await,
        None => doctors.list_doctors().await,
    };

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(doctors): State<Arc<DoctorService>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = doctors.create_doctor(request).await?;
    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(doctors): State<Arc<DoctorService>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let doctor = doctors.get_doctor(doctor_id).await?;
    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(doctors): State<Arc<DoctorService>>,
    Path(doctor_id): Path<Uuid>,
    Json(schedule): Json<WeeklySchedule>,
) -> Result<Json<Value>, AppError> {
    let doctor = doctors.update_schedule(doctor_id, schedule).await?;
    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn create_override(
    State(doctors): State<Arc<DoctorService>>,
    Path(doctor_id): Path<Uuid>,
    Json(request): Json<CreateOverrideRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let entry = doctors.add_override(doctor_id, request).await?;
    Ok((StatusCode::CREATED, Json(json!({
        "doctor_id": doctor_id,
        "override": entry
    }))))
}
