use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{ConsultationError, ConsultationRequest, ConsultationStatus, CreateConsultationRequest};

/// Consultation requests, newest first.
#[derive(Debug, Default)]
pub struct ConsultationService {
    requests: RwLock<Vec<ConsultationRequest>>,
}

impl ConsultationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one pending request and one already reviewed request.
    pub fn with_demo_data(pending_patient: Uuid, reviewed_patient: Uuid) -> Self {
        let now = Utc::now();
        let requests = vec![
            ConsultationRequest {
                id: Uuid::new_v4(),
                patient_id: pending_patient,
                symptoms_text: "I've had a persistent dry cough and a slight fever for the past two days. I also feel very tired.".to_string(),
                status: ConsultationStatus::Pending,
                doctor_notes: String::new(),
                created_at: now - Duration::days(1),
            },
            ConsultationRequest {
                id: Uuid::new_v4(),
                patient_id: reviewed_patient,
                symptoms_text: "I have a rash on my arm. It is red, itchy, and has small bumps. I have attached a photo.".to_string(),
                status: ConsultationStatus::Reviewed,
                doctor_notes: "Looks like a mild allergic reaction. I recommend applying a hydrocortisone cream twice a day. If it does not improve in 3 days, please schedule a video call.".to_string(),
                created_at: now - Duration::days(2),
            },
        ];

        Self {
            requests: RwLock::new(requests),
        }
    }

    pub async fn request_consultation(
        &self,
        request: CreateConsultationRequest,
    ) -> Result<ConsultationRequest, ConsultationError> {
        let symptoms_text = request.symptoms_text.trim();
        if symptoms_text.is_empty() {
            return Err(ConsultationError::ValidationError("Symptoms description is required".to_string()));
        }

        let consultation = ConsultationRequest {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            symptoms_text: symptoms_text.to_string(),
            status: ConsultationStatus::Pending,
            doctor_notes: String::new(),
            created_at: Utc::now(),
        };

        info!("Patient {} requested consultation {}", consultation.patient_id, consultation.id);
        self.requests.write().await.insert(0, consultation.clone());
        Ok(consultation)
    }

    pub async fn get(&self, consultation_id: Uuid) -> Result<ConsultationRequest, ConsultationError> {
        self.requests
            .read()
            .await
            .iter()
            .find(|request| request.id == consultation_id)
            .cloned()
            .ok_or(ConsultationError::NotFound(consultation_id))
    }

    pub async fn list(&self) -> Vec<ConsultationRequest> {
        self.requests.read().await.clone()
    }

    pub async fn pending(&self) -> Vec<ConsultationRequest> {
        self.filtered(|request| request.status == ConsultationStatus::Pending).await
    }

    pub async fn for_patient(&self, patient_id: Uuid) -> Vec<ConsultationRequest> {
        self.filtered(|request| request.patient_id == patient_id).await
    }

    pub async fn review(
        &self,
        consultation_id: Uuid,
        doctor_notes: String,
    ) -> Result<ConsultationRequest, ConsultationError> {
        let mut requests = self.requests.write().await;
        let request = requests
            .iter_mut()
            .find(|request| request.id == consultation_id)
            .ok_or(ConsultationError::NotFound(consultation_id))?;

        if request.status == ConsultationStatus::Reviewed {
            return Err(ConsultationError::AlreadyReviewed(consultation_id));
        }

        request.status = ConsultationStatus::Reviewed;
        request.doctor_notes = doctor_notes.trim().to_string();
        debug!("Consultation {} reviewed", consultation_id);

        Ok(request.clone())
    }

    async fn filtered<F>(&self, keep: F) -> Vec<ConsultationRequest>
    where
        F: Fn(&ConsultationRequest) -> bool,
    {
        self.requests
            .read()
            .await
            .iter()
            .filter(|request| keep(request))
            .cloned()
            .collect()
    }
}
