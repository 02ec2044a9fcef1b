use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::error::AppError;

// ==============================================================================
// CONSULTATIONS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Pending,
    Reviewed,
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationStatus::Pending => write!(f, "pending"),
            ConsultationStatus::Reviewed => write!(f, "reviewed"),
        }
    }
}

/// A patient's symptom description waiting for, or carrying, a doctor's review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub symptoms_text: String,
    pub status: ConsultationStatus,
    pub doctor_notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultationRequest {
    pub patient_id: Uuid,
    pub symptoms_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewConsultationRequest {
    pub doctor_notes: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultationQuery {
    pub status: Option<ConsultationStatus>,
    pub patient_id: Option<Uuid>,
}

// ==============================================================================
// PRESCRIPTIONS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub consultation_request_id: Uuid,
    pub date: NaiveDate,
    pub medications: Vec<Medication>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub consultation_request_id: Uuid,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrescriptionQuery {
    pub patient_id: Option<Uuid>,
}

// ==============================================================================
// AI ASSISTANT
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    /// Base64 payload without a data-URL prefix.
    pub data: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSymptomsRequest {
    pub symptoms_text: String,
    pub image: Option<InlineImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestMedicationsRequest {
    pub symptoms_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MedicationSuggestions {
    pub medications: Vec<Medication>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsultationError {
    #[error("Consultation request not found: {0}")]
    NotFound(Uuid),

    #[error("Consultation request {0} has already been reviewed")]
    AlreadyReviewed(Uuid),

    #[error("Consultation request {consultation_id} does not belong to patient {patient_id}")]
    PatientMismatch { consultation_id: Uuid, patient_id: Uuid },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("AI assistant is not configured")]
    AiNotConfigured,

    #[error("AI service error: {0}")]
    AiService(String),
}

impl From<ConsultationError> for AppError {
    fn from(err: ConsultationError) -> Self {
        match err {
            ConsultationError::NotFound(_) => AppError::NotFound(err.to_string()),
            ConsultationError::AlreadyReviewed(_) => AppError::Conflict(err.to_string()),
            ConsultationError::PatientMismatch { .. } | ConsultationError::ValidationError(_) => {
                AppError::ValidationError(err.to_string())
            }
            ConsultationError::AiNotConfigured | ConsultationError::AiService(_) => {
                AppError::ExternalService(err.to_string())
            }
        }
    }
}
