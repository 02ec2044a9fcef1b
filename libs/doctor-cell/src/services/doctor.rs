use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::time::ClockTime;

use crate::models::{
    AvailabilityOverride, CreateDoctorRequest, CreateOverrideRequest, DayAvailability, Doctor,
    DoctorError, SlotDuration, WeeklySchedule,
};
use crate::services::availability::{compute_available_slots, BookedSlot};

/// In-memory doctor registry. Schedules are replaced wholesale, never patched.
#[derive(Debug, Default)]
pub struct DoctorService {
    doctors: RwLock<HashMap<Uuid, Doctor>>,
}

impl DoctorService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the clinic's two demo doctors.
    pub fn with_demo_data() -> Self {
        let general = Doctor::new("Anjali Sharma", "General Physician");

        let mut cardiologist = Doctor::new("Vikram Singh", "Cardiologist");
        let wednesday = cardiologist.schedule.wednesday;
        cardiologist.schedule = cardiologist.schedule.with_day(
            Weekday::Wed,
            DayAvailability::closed(wednesday.start_time, demo_closing_time()),
        );

        let doctors = [general, cardiologist]
            .into_iter()
            .map(|doctor| (doctor.id, doctor))
            .collect();

        Self {
            doctors: RwLock::new(doctors),
        }
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        let name = request.name.trim();
        let specialty = request.specialty.trim();

        if name.is_empty() {
            return Err(DoctorError::ValidationError("Doctor name is required".to_string()));
        }
        if specialty.is_empty() {
            return Err(DoctorError::ValidationError("Specialty is required".to_string()));
        }

        let doctor = Doctor::new(name, specialty);
        info!("Registering doctor {} ({})", doctor.id, doctor.specialty);

        self.doctors.write().await.insert(doctor.id, doctor.clone());
        Ok(doctor)
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError> {
        self.doctors
            .read()
            .await
            .get(&doctor_id)
            .cloned()
            .ok_or(DoctorError::NotFound(doctor_id))
    }

    /// Case-insensitive exact match on the doctor's name.
    pub async fn find_by_name(&self, name: &str) -> Option<Doctor> {
        let wanted = name.trim().to_lowercase();
        self.doctors
            .read()
            .await
            .values()
            .find(|doctor| doctor.name.to_lowercase() == wanted)
            .cloned()
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        let mut doctors: Vec<Doctor> = self.doctors.read().await.values().cloned().collect();
        doctors.sort_by(|a, b| a.name.cmp(&b.name));
        doctors
    }

    /// Matches the term against name, specialty or id.
    pub async fn search_doctors(&self, term: &str) -> Vec<Doctor> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.list_doctors().await;
        }

        self.list_doctors()
            .await
            .into_iter()
            .filter(|doctor| {
                doctor.name.to_lowercase().contains(&term)
                    || doctor.specialty.to_lowercase().contains(&term)
                    || doctor.id.to_string().contains(&term)
            })
            .collect()
    }

    pub async fn update_schedule(
        &self,
        doctor_id: Uuid,
        schedule: WeeklySchedule,
    ) -> Result<Doctor, DoctorError> {
        schedule.validate()?;

        let mut doctors = self.doctors.write().await;
        let doctor = doctors.get_mut(&doctor_id).ok_or(DoctorError::NotFound(doctor_id))?;
        doctor.schedule = schedule;

        info!("Replaced weekly schedule for doctor {}", doctor_id);
        Ok(doctor.clone())
    }

    pub async fn add_override(
        &self,
        doctor_id: Uuid,
        request: CreateOverrideRequest,
    ) -> Result<AvailabilityOverride, DoctorError> {
        let mut doctors = self.doctors.write().await;
        let doctor = doctors.get_mut(&doctor_id).ok_or(DoctorError::NotFound(doctor_id))?;

        if doctor.override_for(request.date).is_some() {
            warn!("Override already exists for doctor {} on {}", doctor_id, request.date);
            return Err(DoctorError::OverrideExists(request.date));
        }

        let entry = AvailabilityOverride {
            date: request.date,
            reason: request.reason,
        };
        doctor.overrides.push(entry.clone());
        doctor.overrides.sort_by_key(|o| o.date);

        info!("Doctor {} marked unavailable on {}", doctor_id, entry.date);
        Ok(entry)
    }

    /// Free slots for one doctor on one date. An override on that date closes
    /// the whole day.
    pub async fn available_slots<'a, B, I>(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        existing: I,
        duration: SlotDuration,
    ) -> Result<Vec<ClockTime>, DoctorError>
    where
        B: BookedSlot + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        let doctors = self.doctors.read().await;
        let doctor = doctors.get(&doctor_id).ok_or(DoctorError::NotFound(doctor_id))?;

        if let Some(entry) = doctor.override_for(date) {
            debug!("Doctor {} has an override on {}: {:?}", doctor_id, date, entry.reason);
            return Ok(Vec::new());
        }

        Ok(compute_available_slots(&doctor.schedule, date, existing, duration))
    }
}

fn demo_closing_time() -> ClockTime {
    ClockTime::from_hm(17, 0).unwrap_or_default()
}
