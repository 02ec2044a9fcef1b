use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use doctor_cell::{BookedSlot, DoctorError};
use shared_models::error::AppError;
use shared_models::time::ClockTime;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// The instant the appointment starts; appointments are ordered by it.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time.as_naive())
    }
}

impl BookedSlot for Appointment {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn start_time(&self) -> ClockTime {
        self.start_time
    }

    fn blocks_slot(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Booked,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Booked => write!(f, "booked"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: ClockTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailableSlotsQuery {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorAppointmentsQuery {
    pub upcoming: Option<bool>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(Uuid),

    #[error("Slot {start_time} on {date} is not available for doctor {doctor_id}")]
    SlotUnavailable {
        doctor_id: Uuid,
        date: NaiveDate,
        start_time: ClockTime,
    },

    #[error("A slot starting at {0} would run past midnight")]
    SlotCrossesMidnight(ClockTime),

    #[error("Cannot move appointment from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error(transparent)]
    Doctor(#[from] DoctorError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::SlotUnavailable { .. } | AppointmentError::InvalidStatusTransition { .. } => {
                AppError::Conflict(err.to_string())
            }
            AppointmentError::SlotCrossesMidnight(_) => AppError::ValidationError(err.to_string()),
            AppointmentError::Doctor(inner) => inner.into(),
        }
    }
}
