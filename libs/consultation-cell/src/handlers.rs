use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    AnalyzeSymptomsRequest, ConsultationQuery, ConsultationStatus, CreateConsultationRequest,
    CreatePrescriptionRequest, PrescriptionQuery, ReviewConsultationRequest, SuggestMedicationsRequest,
};
use crate::services::{AiAssistant, ConsultationService, PrescriptionService};

// ==============================================================================
// CONSULTATIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_consultations(
    State(consultations): State<Arc<ConsultationService>>,
    Query(query): Query<ConsultationQuery>,
) -> Result<Json<Value>, AppError> {
    let mut requests = match query.patient_id {
        Some(patient_id) => consultations.for_patient(patient_id).await,
        None => consultations.list().await,
    };
    if let Some(status) = query.status {
        requests.retain(|request| request.status == status);
    }

    Ok(Json(json!({
        "consultations": requests,
        "total": requests.len()
    })))
}

#[axum::debug_handler]
pub async fn request_consultation(
    State(consultations): State<Arc<ConsultationService>>,
    Json(request): Json<CreateConsultationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let consultation = consultations.request_consultation(request).await?;
    Ok((StatusCode::CREATED, Json(json!(consultation))))
}

#[axum::debug_handler]
pub async fn get_consultation(
    State(consultations): State<Arc<ConsultationService>>,
    Path(consultation_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let consultation = consultations.get(consultation_id).await?;
    Ok(Json(json!(consultation)))
}

#[axum::debug_handler]
pub async fn pending_consultations(
    State(consultations): State<Arc<ConsultationService>>,
) -> Result<Json<Value>, AppError> {
    let requests = consultations.pending().await;

    Ok(Json(json!({
        "consultations": requests,
        "status": ConsultationStatus::Pending,
        "total": requests.len()
    })))
}

#[axum::debug_handler]
pub async fn review_consultation(
    State(consultations): State<Arc<ConsultationService>>,
    Path(consultation_id): Path<Uuid>,
    Json(request): Json<ReviewConsultationRequest>,
) -> Result<Json<Value>, AppError> {
    let consultation = consultations.review(consultation_id, request.doctor_notes).await?;
    Ok(Json(json!(consultation)))
}

// ==============================================================================
// PRESCRIPTIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_prescriptions(
    State(prescriptions): State<Arc<PrescriptionService>>,
    Query(query): Query<PrescriptionQuery>,
) -> Result<Json<Value>, AppError> {
    let prescriptions = match query.patient_id {
        Some(patient_id) => prescriptions.for_patient(patient_id).await,
        None => prescriptions.list().await,
    };

    Ok(Json(json!({
        "prescriptions": prescriptions,
        "total": prescriptions.len()
    })))
}

#[axum::debug_handler]
pub async fn add_prescription(
    State(prescriptions): State<Arc<PrescriptionService>>,
    Json(request): Json<CreatePrescriptionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let prescription = prescriptions.add_prescription(request).await?;
    Ok((StatusCode::CREATED, Json(json!(prescription))))
}

// ==============================================================================
// AI ASSISTANT
// ==============================================================================

#[axum::debug_handler]
pub async fn analyze_symptoms(
    State(assistant): State<Arc<AiAssistant>>,
    Json(request): Json<AnalyzeSymptomsRequest>,
) -> Result<Json<Value>, AppError> {
    let analysis = assistant
        .analyze_symptoms(&request.symptoms_text, request.image.as_ref())
        .await?;

    Ok(Json(json!({ "analysis": analysis })))
}

#[axum::debug_handler]
pub async fn suggest_medications(
    State(assistant): State<Arc<AiAssistant>>,
    Json(request): Json<SuggestMedicationsRequest>,
) -> Result<Json<Value>, AppError> {
    let medications = assistant.suggest_medications(&request.symptoms_text).await?;
    Ok(Json(json!({ "medications": medications })))
}
