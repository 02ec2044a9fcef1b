use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A wall-clock time of day with minute precision, written as `HH:MM`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time '{0}', expected HH:MM")]
pub struct ClockTimeParseError(pub String);

impl ClockTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Adds `minutes` without wrapping. Returns `None` when the result would
    /// reach or pass midnight.
    pub fn checked_add_minutes(&self, minutes: u32) -> Option<Self> {
        let total = self.minutes_since_midnight().checked_add(minutes)?;
        if total >= 24 * 60 {
            return None;
        }
        Self::from_hm(total / 60, total % 60)
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl From<ClockTime> for NaiveTime {
    fn from(value: ClockTime) -> Self {
        value.0
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        // strict HH:MM, chrono alone would accept "9:00"
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(ClockTimeParseError(s.to_string()));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| ClockTimeParseError(s.to_string()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats_hh_mm() {
        assert_eq!(t("09:30").to_string(), "09:30");
        assert_eq!(t("00:00").minutes_since_midnight(), 0);
        assert_eq!(t("23:59").minutes_since_midnight(), 1439);
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["9:00", "09:0", "24:00", "12:60", "0930", "09-30", "", "ab:cd", "09:30:00"] {
            assert!(bad.parse::<ClockTime>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn addition_never_wraps_past_midnight() {
        assert_eq!(t("09:00").checked_add_minutes(30), Some(t("09:30")));
        assert_eq!(t("23:00").checked_add_minutes(59), Some(t("23:59")));
        assert_eq!(t("23:30").checked_add_minutes(30), None);
        assert_eq!(t("23:45").checked_add_minutes(30), None);
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&t("07:05")).unwrap();
        assert_eq!(json, "\"07:05\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("07:05"));
        assert!(serde_json::from_str::<ClockTime>("\"7:05\"").is_err());
    }
}
