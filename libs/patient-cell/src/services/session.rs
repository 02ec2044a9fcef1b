use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use doctor_cell::{CreateDoctorRequest, DoctorService};
use shared_models::error::AppError;
use shared_models::user::{AppUser, UserRole};

use crate::models::{CreatePatientRequest, SignInRequest};
use crate::services::patient::{PatientService, UNKNOWN_PHONE};

pub const DEFAULT_SPECIALTY: &str = "General";

/// Demo sign-in: finds a user by name and role, registering one if absent.
/// There is no authentication.
pub struct SessionService {
    patients: Arc<PatientService>,
    doctors: Arc<DoctorService>,
    admin_id: Uuid,
}

impl SessionService {
    pub fn new(patients: Arc<PatientService>, doctors: Arc<DoctorService>) -> Self {
        Self {
            patients,
            doctors,
            admin_id: Uuid::new_v4(),
        }
    }

    pub async fn sign_in(&self, request: SignInRequest) -> Result<AppUser, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }

        let user = match request.role {
            UserRole::Patient => match self.patients.find_by_name(name).await {
                Some(patient) => patient.into(),
                None => {
                    info!("Registering new patient on first sign-in");
                    self.patients
                        .add_patient(CreatePatientRequest {
                            name: name.to_string(),
                            phone: UNKNOWN_PHONE.to_string(),
                        })
                        .await?
                        .into()
                }
            },
            UserRole::Doctor => {
                let doctor = match self.doctors.find_by_name(name).await {
                    Some(doctor) => doctor,
                    None => {
                        info!("Registering new doctor on first sign-in");
                        self.doctors
                            .create_doctor(CreateDoctorRequest {
                                name: name.to_string(),
                                specialty: DEFAULT_SPECIALTY.to_string(),
                            })
                            .await?
                    }
                };
                AppUser::Doctor {
                    id: doctor.id,
                    name: doctor.name,
                    specialty: doctor.specialty,
                }
            }
            UserRole::Admin => AppUser::Admin {
                id: self.admin_id,
                name: name.to_string(),
            },
        };

        info!("{} {} signed in", user.role(), user.id());
        Ok(user)
    }
}
