use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::time::ClockTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub schedule: WeeklySchedule,
    #[serde(default)]
    pub overrides: Vec<AvailabilityOverride>,
}

impl Doctor {
    pub fn new(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            specialty: specialty.into(),
            schedule: WeeklySchedule::default(),
            overrides: Vec::new(),
        }
    }

    pub fn override_for(&self, date: NaiveDate) -> Option<&AvailabilityOverride> {
        self.overrides.iter().find(|o| o.date == date)
    }
}

/// Working hours for one weekday. When `is_available` is false the times are
/// kept but ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub is_available: bool,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl DayAvailability {
    pub fn open(start_time: ClockTime, end_time: ClockTime) -> Self {
        Self { is_available: true, start_time, end_time }
    }

    pub fn closed(start_time: ClockTime, end_time: ClockTime) -> Self {
        Self { is_available: false, start_time, end_time }
    }
}

/// A doctor's recurring working-hours template, exactly one entry per weekday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklySchedule {
    pub monday: DayAvailability,
    pub tuesday: DayAvailability,
    pub wednesday: DayAvailability,
    pub thursday: DayAvailability,
    pub friday: DayAvailability,
    pub saturday: DayAvailability,
    pub sunday: DayAvailability,
}

impl WeeklySchedule {
    pub fn day(&self, weekday: Weekday) -> &DayAvailability {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DayAvailability {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Same hours every day, every day closed. Handy as a starting point.
    pub fn closed_all_week(start_time: ClockTime, end_time: ClockTime) -> Self {
        let closed = DayAvailability::closed(start_time, end_time);
        Self {
            monday: closed,
            tuesday: closed,
            wednesday: closed,
            thursday: closed,
            friday: closed,
            saturday: closed,
            sunday: closed,
        }
    }

    pub fn with_day(mut self, weekday: Weekday, availability: DayAvailability) -> Self {
        *self.day_mut(weekday) = availability;
        self
    }

    /// Every available day must open before it closes.
    pub fn validate(&self) -> Result<(), DoctorError> {
        for weekday in WEEK {
            let day = self.day(weekday);
            if day.is_available && day.start_time >= day.end_time {
                return Err(DoctorError::ScheduleConfiguration(format!(
                    "{}: start {} is not before end {}",
                    weekday_name(weekday),
                    day.start_time,
                    day.end_time
                )));
            }
        }
        Ok(())
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        let nine = hm(9, 0);
        let five = hm(17, 0);
        Self {
            monday: DayAvailability::open(nine, five),
            tuesday: DayAvailability::open(nine, five),
            wednesday: DayAvailability::open(nine, hm(13, 0)),
            thursday: DayAvailability::open(nine, five),
            friday: DayAvailability::open(nine, five),
            saturday: DayAvailability::closed(nine, five),
            sunday: DayAvailability::closed(nine, five),
        }
    }
}

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn hm(hour: u32, minute: u32) -> ClockTime {
    ClockTime::from_hm(hour, minute).unwrap_or_default()
}

/// A single date on which the doctor does not see patients (leave, sick day).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityOverride {
    pub date: NaiveDate,
    pub reason: Option<String>,
}

/// Length of one bookable slot in minutes. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotDuration(u32);

impl SlotDuration {
    pub const STANDARD: SlotDuration = SlotDuration(30);

    pub fn from_minutes(minutes: u32) -> Result<Self, DoctorError> {
        if minutes == 0 {
            return Err(DoctorError::ScheduleConfiguration(
                "slot duration must be a positive number of minutes".to_string(),
            ));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl Default for SlotDuration {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOverrideRequest {
    pub date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorSearchQuery {
    pub search: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid schedule: {0}")]
    ScheduleConfiguration(String),

    #[error("Availability override already exists for {0}")]
    OverrideExists(NaiveDate),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::ScheduleConfiguration(_) | DoctorError::ValidationError(_) => {
                AppError::ValidationError(err.to_string())
            }
            DoctorError::OverrideExists(_) => AppError::Conflict(err.to_string()),
        }
    }
}
