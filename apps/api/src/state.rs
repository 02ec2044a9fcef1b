use std::sync::Arc;

use appointment_cell::BookingService;
use consultation_cell::{AiAssistant, ConsultationService, PrescriptionService};
use doctor_cell::{DoctorService, SlotDuration};
use patient_cell::{PatientService, SessionService};

/// Every service the router hands out, wired to share one doctor registry.
#[derive(Clone)]
pub struct ClinicState {
    pub doctors: Arc<DoctorService>,
    pub booking: Arc<BookingService>,
    pub patients: Arc<PatientService>,
    pub sessions: Arc<SessionService>,
    pub consultations: Arc<ConsultationService>,
    pub prescriptions: Arc<PrescriptionService>,
    pub assistant: Arc<AiAssistant>,
}

impl ClinicState {
    pub fn new(
        doctors: Arc<DoctorService>,
        patients: Arc<PatientService>,
        prescriptions: Arc<PrescriptionService>,
        consultations: Arc<ConsultationService>,
        slot_duration: SlotDuration,
        assistant: Arc<AiAssistant>,
    ) -> Self {
        Self {
            booking: Arc::new(BookingService::new(doctors.clone(), slot_duration)),
            sessions: Arc::new(SessionService::new(patients.clone(), doctors.clone())),
            doctors,
            patients,
            consultations,
            prescriptions,
            assistant,
        }
    }

    /// Demo doctors and patients, with Ramesh's consultation pending and
    /// Sunita's already reviewed and prescribed for by Dr. Sharma.
    pub async fn with_demo_data(slot_duration: SlotDuration, assistant: Arc<AiAssistant>) -> Self {
        let doctors = Arc::new(DoctorService::with_demo_data());
        let patients = Arc::new(PatientService::with_demo_data());

        let pending_patient = patients.find_by_name("Ramesh Kumar").await;
        let reviewed_patient = patients.find_by_name("Sunita Devi").await;
        let consultations = Arc::new(match (pending_patient, reviewed_patient) {
            (Some(pending), Some(reviewed)) => ConsultationService::with_demo_data(pending.id, reviewed.id),
            _ => ConsultationService::new(),
        });

        let prescriptions = match doctors.find_by_name("Anjali Sharma").await {
            Some(doctor) => PrescriptionService::with_demo_data(consultations.clone(), doctor.id).await,
            None => PrescriptionService::new(consultations.clone()),
        };

        Self::new(doctors, patients, Arc::new(prescriptions), consultations, slot_duration, assistant)
    }
}
