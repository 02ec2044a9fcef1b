use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{CreatePatientRequest, PatientSearchQuery, SignInRequest};
use crate::services::{PatientService, SessionService};

#[axum::debug_handler]
pub async fn list_patients(
    State(patients): State<Arc<PatientService>>,
    Query(query): Query<PatientSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let patients = match query.search.as_deref() {
        Some(term) => patients.search_patients(term).await,
        None => patients.list_patients().await,
    };

    Ok(Json(json!({
        "patients": patients,
        "total": patients.len()
    })))
}

#[axum::debug_handler]
pub async fn add_patient(
    State(patients): State<Arc<PatientService>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let patient = patients.add_patient(request).await?;
    Ok((StatusCode::CREATED, Json(json!(patient))))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(patients): State<Arc<PatientService>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let patient = patients.get_patient(patient_id).await?;
    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn sign_in(
    State(sessions): State<Arc<SessionService>>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<Value>, AppError> {
    let user = sessions.sign_in(request).await?;
    Ok(Json(json!(user)))
}
