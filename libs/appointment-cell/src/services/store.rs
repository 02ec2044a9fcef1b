use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentError, AppointmentStatus};
use crate::services::lifecycle::validate_status_transition;

type TimelineKey = (NaiveDateTime, Uuid);

/// The one authoritative collection of appointments.
///
/// Records live in `by_id`; the clinic-wide timeline and each doctor's
/// timeline are indexes over the same records, so every view is derived from
/// a single copy and all of them change together on insert.
#[derive(Debug, Default)]
pub struct AppointmentStore {
    by_id: HashMap<Uuid, Appointment>,
    timeline: BTreeSet<TimelineKey>,
    by_doctor: HashMap<Uuid, BTreeSet<TimelineKey>>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn insert(&mut self, appointment: Appointment) {
        let key = (appointment.starts_at(), appointment.id);

        if let Some(previous) = self.by_id.remove(&appointment.id) {
            let old_key = (previous.starts_at(), previous.id);
            self.timeline.remove(&old_key);
            if let Some(index) = self.by_doctor.get_mut(&previous.doctor_id) {
                index.remove(&old_key);
            }
        }

        self.timeline.insert(key);
        self.by_doctor.entry(appointment.doctor_id).or_default().insert(key);
        self.by_id.insert(appointment.id, appointment);
    }

    pub fn get(&self, id: Uuid) -> Option<&Appointment> {
        self.by_id.get(&id)
    }

    /// Every appointment, ascending by (date, start time).
    pub fn iter(&self) -> impl Iterator<Item = &Appointment> + '_ {
        self.timeline.iter().filter_map(move |(_, id)| self.by_id.get(id))
    }

    /// One doctor's appointments, ascending by (date, start time).
    pub fn for_doctor(&self, doctor_id: Uuid) -> impl Iterator<Item = &Appointment> + '_ {
        self.by_doctor
            .get(&doctor_id)
            .into_iter()
            .flatten()
            .filter_map(move |(_, id)| self.by_id.get(id))
    }

    pub fn for_patient(&self, patient_id: Uuid) -> impl Iterator<Item = &Appointment> + '_ {
        self.iter().filter(move |appointment| appointment.patient_id == patient_id)
    }

    pub fn set_status(
        &mut self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<&Appointment, AppointmentError> {
        let appointment = self.by_id.get_mut(&id).ok_or(AppointmentError::NotFound(id))?;
        validate_status_transition(appointment.status, status)?;
        appointment.status = status;
        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use shared_models::time::ClockTime;

    fn appointment(doctor_id: Uuid, day: u32, start: &str) -> Appointment {
        let start_time: ClockTime = start.parse().unwrap();
        Appointment {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            start_time,
            end_time: start_time.checked_add_minutes(30).unwrap(),
            status: AppointmentStatus::Booked,
        }
    }

    fn starts(appointments: Vec<&Appointment>) -> Vec<String> {
        appointments
            .into_iter()
            .map(|a| format!("{} {}", a.date, a.start_time))
            .collect()
    }

    #[test]
    fn views_are_sorted_by_date_then_time() {
        let doctor_a = Uuid::new_v4();
        let doctor_b = Uuid::new_v4();
        let mut store = AppointmentStore::new();

        store.insert(appointment(doctor_a, 2, "09:00"));
        store.insert(appointment(doctor_b, 1, "15:00"));
        store.insert(appointment(doctor_a, 1, "10:30"));
        store.insert(appointment(doctor_a, 1, "09:30"));

        assert_eq!(
            starts(store.iter().collect()),
            vec!["2024-01-01 09:30", "2024-01-01 10:30", "2024-01-01 15:00", "2024-01-02 09:00"]
        );
        assert_eq!(
            starts(store.for_doctor(doctor_a).collect()),
            vec!["2024-01-01 09:30", "2024-01-01 10:30", "2024-01-02 09:00"]
        );
        assert_eq!(store.for_doctor(Uuid::new_v4()).count(), 0);
    }

    #[test]
    fn doctor_view_shares_records_with_global_view() {
        let doctor = Uuid::new_v4();
        let mut store = AppointmentStore::new();
        let booked = appointment(doctor, 1, "09:00");
        store.insert(booked.clone());

        store.set_status(booked.id, AppointmentStatus::Completed).unwrap();

        assert_eq!(store.iter().next().unwrap().status, AppointmentStatus::Completed);
        assert_eq!(store.for_doctor(doctor).next().unwrap().status, AppointmentStatus::Completed);
    }

    #[test]
    fn same_slot_twice_keeps_both_records() {
        let doctor = Uuid::new_v4();
        let mut store = AppointmentStore::new();
        store.insert(appointment(doctor, 1, "09:00"));
        store.insert(appointment(doctor, 1, "09:00"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.for_doctor(doctor).count(), 2);
    }

    #[test]
    fn reinserting_an_id_replaces_its_index_entries() {
        let doctor = Uuid::new_v4();
        let mut store = AppointmentStore::new();
        let mut moved = appointment(doctor, 1, "09:00");
        store.insert(moved.clone());

        moved.start_time = "11:00".parse().unwrap();
        store.insert(moved.clone());

        assert_eq!(store.len(), 1);
        assert_eq!(starts(store.iter().collect()), vec!["2024-01-01 11:00"]);
        assert_eq!(starts(store.for_doctor(doctor).collect()), vec!["2024-01-01 11:00"]);
    }

    #[test]
    fn patient_view_filters_global_timeline() {
        let doctor = Uuid::new_v4();
        let mut store = AppointmentStore::new();
        let mine = appointment(doctor, 3, "09:00");
        let patient_id = mine.patient_id;
        store.insert(mine);
        store.insert(appointment(doctor, 1, "09:00"));

        let view: Vec<_> = store.for_patient(patient_id).collect();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].patient_id, patient_id);
    }

    #[test]
    fn status_changes_follow_lifecycle() {
        let mut store = AppointmentStore::new();
        let booked = appointment(Uuid::new_v4(), 1, "09:00");
        store.insert(booked.clone());

        store.set_status(booked.id, AppointmentStatus::Cancelled).unwrap();
        assert_matches!(
            store.set_status(booked.id, AppointmentStatus::Completed),
            Err(AppointmentError::InvalidStatusTransition { .. })
        );
        assert_matches!(
            store.set_status(Uuid::new_v4(), AppointmentStatus::Cancelled),
            Err(AppointmentError::NotFound(_))
        );
    }
}
