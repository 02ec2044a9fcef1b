use std::sync::Arc;

use chrono::{Duration, Local};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::{ConsultationError, ConsultationStatus, CreatePrescriptionRequest, Medication, Prescription};
use crate::services::consultation::ConsultationService;

pub struct PrescriptionService {
    consultations: Arc<ConsultationService>,
    prescriptions: RwLock<Vec<Prescription>>,
}

impl PrescriptionService {
    pub fn new(consultations: Arc<ConsultationService>) -> Self {
        Self {
            consultations,
            prescriptions: RwLock::new(Vec::new()),
        }
    }

    /// Seeds a prescription by `doctor_id` for the first reviewed consultation, if any.
    pub async fn with_demo_data(consultations: Arc<ConsultationService>, doctor_id: Uuid) -> Self {
        let reviewed = consultations
            .list()
            .await
            .into_iter()
            .find(|request| request.status == ConsultationStatus::Reviewed);

        let prescriptions = reviewed
            .map(|consultation| Prescription {
                id: Uuid::new_v4(),
                patient_id: consultation.patient_id,
                doctor_id,
                consultation_request_id: consultation.id,
                date: Local::now().date_naive() - Duration::days(2),
                medications: vec![Medication {
                    name: "Hydrocortisone Cream 1%".to_string(),
                    dosage: "Apply thin layer".to_string(),
                    frequency: "Twice a day for 3 days".to_string(),
                }],
                notes: "Apply to the affected area. If the rash worsens or does not improve, please book a follow-up appointment.".to_string(),
            })
            .into_iter()
            .collect();

        Self {
            consultations,
            prescriptions: RwLock::new(prescriptions),
        }
    }

    /// Records a prescription against an existing consultation of the same patient.
    pub async fn add_prescription(
        &self,
        request: CreatePrescriptionRequest,
    ) -> Result<Prescription, ConsultationError> {
        let consultation = self.consultations.get(request.consultation_request_id).await?;
        if consultation.patient_id != request.patient_id {
            return Err(ConsultationError::PatientMismatch {
                consultation_id: consultation.id,
                patient_id: request.patient_id,
            });
        }

        if request.medications.is_empty() {
            return Err(ConsultationError::ValidationError("At least one medication is required".to_string()));
        }
        if request.medications.iter().any(|m| m.name.trim().is_empty()) {
            return Err(ConsultationError::ValidationError("Medication name is required".to_string()));
        }

        let prescription = Prescription {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            consultation_request_id: request.consultation_request_id,
            date: request.date.unwrap_or_else(|| Local::now().date_naive()),
            medications: request.medications,
            notes: request.notes,
        };

        info!(
            "Doctor {} prescribed {} medication(s) for patient {}",
            prescription.doctor_id,
            prescription.medications.len(),
            prescription.patient_id
        );
        self.prescriptions.write().await.push(prescription.clone());
        Ok(prescription)
    }

    pub async fn list(&self) -> Vec<Prescription> {
        let mut prescriptions = self.prescriptions.read().await.clone();
        prescriptions.sort_by(|a, b| b.date.cmp(&a.date));
        prescriptions
    }

    /// Most recent first.
    pub async fn for_patient(&self, patient_id: Uuid) -> Vec<Prescription> {
        let mut prescriptions: Vec<Prescription> = self
            .prescriptions
            .read()
            .await
            .iter()
            .filter(|p| p.patient_id == patient_id)
            .cloned()
            .collect();
        prescriptions.sort_by(|a, b| b.date.cmp(&a.date));
        prescriptions
    }
}
