use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::{CreatePatientRequest, Patient, PatientError};

pub const UNKNOWN_PHONE: &str = "N/A";

#[derive(Debug, Default)]
pub struct PatientService {
    patients: RwLock<HashMap<Uuid, Patient>>,
}

impl PatientService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_data() -> Self {
        let patients = [
            Patient::new("Ramesh Kumar", "9876543210"),
            Patient::new("Sunita Devi", "8765432109"),
        ]
        .into_iter()
        .map(|patient| (patient.id, patient))
        .collect();

        Self {
            patients: RwLock::new(patients),
        }
    }

    pub async fn add_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(PatientError::ValidationError("Patient name is required".to_string()));
        }

        let phone = match request.phone.trim() {
            "" => UNKNOWN_PHONE,
            phone => phone,
        };

        let patient = Patient::new(name, phone);
        info!("Registered patient {}", patient.id);

        self.patients.write().await.insert(patient.id, patient.clone());
        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: Uuid) -> Result<Patient, PatientError> {
        self.patients
            .read()
            .await
            .get(&patient_id)
            .cloned()
            .ok_or(PatientError::NotFound(patient_id))
    }

    pub async fn find_by_name(&self, name: &str) -> Option<Patient> {
        let wanted = name.trim().to_lowercase();
        self.patients
            .read()
            .await
            .values()
            .find(|patient| patient.name.to_lowercase() == wanted)
            .cloned()
    }

    pub async fn list_patients(&self) -> Vec<Patient> {
        let mut patients: Vec<Patient> = self.patients.read().await.values().cloned().collect();
        patients.sort_by(|a, b| a.name.cmp(&b.name));
        patients
    }

    /// Case-insensitive match on name, phone or id.
    pub async fn search_patients(&self, term: &str) -> Vec<Patient> {
        let term = term.trim().to_lowercase();
        self.list_patients()
            .await
            .into_iter()
            .filter(|patient| {
                term.is_empty()
                    || patient.name.to_lowercase().contains(&term)
                    || patient.phone.contains(&term)
                    || patient.id.to_string().contains(&term)
            })
            .collect()
    }
}
