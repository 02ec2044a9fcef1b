use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use shared_models::time::ClockTime;

use crate::models::{DayAvailability, SlotDuration, WeeklySchedule};

/// Anything that occupies a doctor's slot on a given date.
///
/// Implemented by appointment records so the engine does not depend on how
/// appointments are stored.
pub trait BookedSlot {
    fn date(&self) -> NaiveDate;

    fn start_time(&self) -> ClockTime;

    /// Whether this booking still holds its slot.
    fn blocks_slot(&self) -> bool {
        true
    }
}

/// Candidate start times for one working window, earliest first.
///
/// Starts at the window's opening time and steps by the slot duration while the
/// candidate is strictly before the closing time. Yields nothing for a closed
/// day or an empty window. A candidate whose slot would end at or past midnight
/// is never yielded, so every offered start can be booked.
#[derive(Debug, Clone)]
pub struct SlotCandidates {
    next: Option<ClockTime>,
    end: ClockTime,
    step: u32,
}

impl SlotCandidates {
    pub fn new(day: &DayAvailability, duration: SlotDuration) -> Self {
        let next = (day.is_available && day.start_time < day.end_time).then_some(day.start_time);
        Self {
            next,
            end: day.end_time,
            step: duration.minutes(),
        }
    }
}

impl Iterator for SlotCandidates {
    type Item = ClockTime;

    fn next(&mut self) -> Option<ClockTime> {
        let current = self.next.filter(|candidate| *candidate < self.end)?;
        let slot_end = current.checked_add_minutes(self.step);
        self.next = slot_end;
        slot_end.map(|_| current)
    }
}

/// Free start times for `date` under `schedule`, minus those already taken.
///
/// A candidate is dropped only when an existing booking on the same date starts
/// at exactly that time; bookings of a different length that merely overlap a
/// candidate are not detected.
pub fn compute_available_slots<'a, B, I>(
    schedule: &WeeklySchedule,
    date: NaiveDate,
    existing: I,
    duration: SlotDuration,
) -> Vec<ClockTime>
where
    B: BookedSlot + 'a,
    I: IntoIterator<Item = &'a B>,
{
    let day = schedule.day(date.weekday());

    let taken: HashSet<ClockTime> = existing
        .into_iter()
        .filter(|booking| booking.date() == date && booking.blocks_slot())
        .map(|booking| booking.start_time())
        .collect();

    let slots: Vec<ClockTime> = SlotCandidates::new(day, duration)
        .filter(|candidate| !taken.contains(candidate))
        .collect();

    debug!("{} free slots on {} ({} taken)", slots.len(), date, taken.len());
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    struct Booking {
        date: NaiveDate,
        start: ClockTime,
        active: bool,
    }

    impl BookedSlot for Booking {
        fn date(&self) -> NaiveDate {
            self.date
        }

        fn start_time(&self) -> ClockTime {
            self.start
        }

        fn blocks_slot(&self) -> bool {
            self.active
        }
    }

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn booked(date: NaiveDate, start: &str) -> Booking {
        Booking { date, start: t(start), active: true }
    }

    // 2024-01-01 was a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    fn monday_only(start: &str, end: &str) -> WeeklySchedule {
        WeeklySchedule::closed_all_week(t("09:00"), t("17:00"))
            .with_day(Weekday::Mon, DayAvailability::open(t(start), t(end)))
    }

    fn slots(schedule: &WeeklySchedule, date: NaiveDate, existing: &[Booking], minutes: u32) -> Vec<String> {
        let duration = SlotDuration::from_minutes(minutes).unwrap();
        compute_available_slots(schedule, date, existing, duration)
            .into_iter()
            .map(|slot| slot.to_string())
            .collect()
    }

    #[test]
    fn closed_day_has_no_slots() {
        let schedule = WeeklySchedule::default()
            .with_day(Weekday::Wed, DayAvailability::closed(t("09:00"), t("17:00")));
        let existing = [booked(wednesday(), "09:00")];

        assert!(slots(&schedule, wednesday(), &[], 30).is_empty());
        assert!(slots(&schedule, wednesday(), &existing, 15).is_empty());
    }

    #[test]
    fn one_hour_window_yields_two_half_hour_slots() {
        let schedule = monday_only("09:00", "10:00");
        assert_eq!(slots(&schedule, monday(), &[], 30), vec!["09:00", "09:30"]);
    }

    #[test]
    fn booked_start_time_is_removed() {
        let schedule = monday_only("09:00", "10:00");
        let existing = [booked(monday(), "09:30")];
        assert_eq!(slots(&schedule, monday(), &existing, 30), vec!["09:00"]);
    }

    #[test]
    fn bookings_on_other_dates_are_ignored() {
        let schedule = monday_only("09:00", "10:00");
        let next_monday = monday() + chrono::Duration::days(7);
        let existing = [booked(next_monday, "09:00")];
        assert_eq!(slots(&schedule, monday(), &existing, 30), vec!["09:00", "09:30"]);
    }

    #[test]
    fn released_bookings_do_not_block() {
        let schedule = monday_only("09:00", "10:00");
        let existing = [Booking { date: monday(), start: t("09:00"), active: false }];
        assert_eq!(slots(&schedule, monday(), &existing, 30), vec!["09:00", "09:30"]);
    }

    #[test]
    fn only_exact_start_matches_conflict() {
        // a 09:15 booking overlaps the 09:00 slot but does not share its start
        let schedule = monday_only("09:00", "10:00");
        let existing = [booked(monday(), "09:15")];
        assert_eq!(slots(&schedule, monday(), &existing, 30), vec!["09:00", "09:30"]);
    }

    #[test]
    fn empty_or_inverted_window_yields_nothing() {
        assert!(slots(&monday_only("10:00", "10:00"), monday(), &[], 30).is_empty());
        assert!(slots(&monday_only("13:00", "09:00"), monday(), &[], 30).is_empty());
    }

    #[test]
    fn uneven_duration_stops_before_end() {
        let schedule = monday_only("09:00", "10:00");
        assert_eq!(slots(&schedule, monday(), &[], 25), vec!["09:00", "09:25", "09:50"]);
        assert_eq!(slots(&schedule, monday(), &[], 45), vec!["09:00", "09:45"]);
        assert_eq!(slots(&schedule, monday(), &[], 90), vec!["09:00"]);
    }

    #[test]
    fn window_ending_at_day_end_does_not_wrap() {
        let schedule = monday_only("23:00", "23:59");
        assert_eq!(slots(&schedule, monday(), &[], 30), vec!["23:00"]);

        let late = monday_only("22:00", "23:59");
        assert_eq!(slots(&late, monday(), &[], 60), vec!["22:00"]);
        assert_eq!(slots(&late, monday(), &[], 29), vec!["22:00", "22:29", "22:58", "23:27"]);
    }

    #[test]
    fn every_slot_is_a_whole_number_of_steps_inside_the_window() {
        let schedule = WeeklySchedule::default();
        let existing = [booked(monday(), "10:00"), booked(monday(), "16:30")];

        for minutes in [10, 15, 20, 30, 45, 50, 60, 120] {
            let duration = SlotDuration::from_minutes(minutes).unwrap();
            let result = compute_available_slots(&schedule, monday(), &existing, duration);
            let start = schedule.monday.start_time.minutes_since_midnight();

            for slot in &result {
                assert!(*slot >= schedule.monday.start_time && *slot < schedule.monday.end_time);
                assert_eq!((slot.minutes_since_midnight() - start) % minutes, 0);
                assert!(existing.iter().all(|b| b.start != *slot));
            }
            assert!(result.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn repeated_queries_return_identical_results() {
        let schedule = WeeklySchedule::default();
        let existing = [booked(monday(), "11:00")];
        let first = compute_available_slots(&schedule, monday(), &existing, SlotDuration::STANDARD);
        let second = compute_available_slots(&schedule, monday(), &existing, SlotDuration::STANDARD);
        assert_eq!(first, second);
        assert_eq!(first.len(), 15);
    }

    #[test]
    fn default_wednesday_closes_at_one() {
        let result = slots(&WeeklySchedule::default(), wednesday(), &[], 30);
        assert_eq!(result.first().map(String::as_str), Some("09:00"));
        assert_eq!(result.last().map(String::as_str), Some("12:30"));
        assert_eq!(result.len(), 8);
    }
}
