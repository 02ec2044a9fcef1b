use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::{DoctorService, SlotDuration};
use shared_models::time::ClockTime;

use crate::models::{Appointment, AppointmentError, AppointmentStatus, BookAppointmentRequest};
use crate::services::store::AppointmentStore;

/// Availability queries and bookings against the authoritative store.
pub struct BookingService {
    doctors: Arc<DoctorService>,
    store: RwLock<AppointmentStore>,
    slot_duration: SlotDuration,
}

impl BookingService {
    pub fn new(doctors: Arc<DoctorService>, slot_duration: SlotDuration) -> Self {
        Self {
            doctors,
            store: RwLock::new(AppointmentStore::new()),
            slot_duration,
        }
    }

    pub fn slot_duration(&self) -> SlotDuration {
        self.slot_duration
    }

    /// Start times the doctor can still offer on `date`, earliest first.
    pub async fn available_slots(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ClockTime>, AppointmentError> {
        let store = self.store.read().await;
        let slots = self
            .doctors
            .available_slots(doctor_id, date, store.for_doctor(doctor_id), self.slot_duration)
            .await?;
        Ok(slots)
    }

    /// Books `start_time` for the patient, or fails if the slot is not on
    /// offer at commit time.
    ///
    /// Availability is recomputed while the store's write lock is held, so two
    /// requests for the same slot cannot both succeed.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let BookAppointmentRequest { patient_id, doctor_id, date, start_time } = request;
        debug!("Booking {} {} with doctor {} for patient {}", date, start_time, doctor_id, patient_id);

        let end_time = start_time
            .checked_add_minutes(self.slot_duration.minutes())
            .ok_or(AppointmentError::SlotCrossesMidnight(start_time))?;

        let mut store = self.store.write().await;

        let offered = self
            .doctors
            .available_slots(doctor_id, date, store.for_doctor(doctor_id), self.slot_duration)
            .await?;

        if !offered.contains(&start_time) {
            warn!("Rejected booking: {} {} is not free for doctor {}", date, start_time, doctor_id);
            return Err(AppointmentError::SlotUnavailable { doctor_id, date, start_time });
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            date,
            start_time,
            end_time,
            status: AppointmentStatus::Booked,
        };
        store.insert(appointment.clone());

        info!("Appointment {} booked: doctor {} on {} at {}", appointment.id, doctor_id, date, start_time);
        Ok(appointment)
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.store.read().await.get(id).cloned().ok_or(AppointmentError::NotFound(id))
    }

    pub async fn list_appointments(&self) -> Vec<Appointment> {
        self.store.read().await.iter().cloned().collect()
    }

    pub async fn doctor_appointments(&self, doctor_id: Uuid) -> Vec<Appointment> {
        self.store.read().await.for_doctor(doctor_id).cloned().collect()
    }

    pub async fn patient_appointments(&self, patient_id: Uuid) -> Vec<Appointment> {
        self.store.read().await.for_patient(patient_id).cloned().collect()
    }

    /// The doctor's appointments starting at or after `now`.
    pub async fn upcoming_for_doctor(&self, doctor_id: Uuid, now: NaiveDateTime) -> Vec<Appointment> {
        self.store
            .read()
            .await
            .for_doctor(doctor_id)
            .filter(|appointment| appointment.starts_at() >= now)
            .cloned()
            .collect()
    }

    pub async fn complete(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.transition(id, AppointmentStatus::Completed).await
    }

    pub async fn cancel(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.transition(id, AppointmentStatus::Cancelled).await
    }

    async fn transition(&self, id: Uuid, status: AppointmentStatus) -> Result<Appointment, AppointmentError> {
        let mut store = self.store.write().await;
        let appointment = store.set_status(id, status)?.clone();
        info!("Appointment {} is now {}", id, status);
        Ok(appointment)
    }
}
