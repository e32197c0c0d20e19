//! Local-day calendar helpers
//!
//! All day-boundary logic works on the local calendar date of an instant.
//! The [`Clock`] trait lets the engine run against a fixed time in tests.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate};

/// Clock abstracts access to the current time so the engine stays deterministic in tests.
pub trait Clock {
    /// Current instant in the user's local offset
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current local calendar date
    fn today(&self) -> NaiveDate {
        local_day(&self.now())
    }
}

/// Real-time clock backed by the system's local time zone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Settable clock; clones share the same instant
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<FixedOffset>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Clock at noon of `date` in UTC+0
    pub fn at_noon(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .unwrap_or_default()
            .and_utc()
            .fixed_offset();
        Self::new(noon)
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    /// Move the clock forward by whole days
    pub fn advance_days(&self, days: i64) {
        self.now.set(self.now.get() + Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

/// Local calendar date of an instant
pub fn local_day(instant: &DateTime<FixedOffset>) -> NaiveDate {
    instant.date_naive()
}

/// Whether two instants fall on the same local day
pub fn is_same_local_day(lhs: &DateTime<FixedOffset>, rhs: &DateTime<FixedOffset>) -> bool {
    local_day(lhs) == local_day(rhs)
}

/// Whole days from `start` to `end` (negative when `end` is earlier)
pub fn day_distance(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// `date` shifted by `days`, or `date` unchanged when out of range
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_day_uses_offset() {
        // 23:30 UTC on March 1st is already March 2nd in UTC+2
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let instant = offset.with_ymd_and_hms(2024, 3, 2, 1, 30, 0).unwrap();
        assert_eq!(local_day(&instant), date(2024, 3, 2));
        assert_eq!(instant.naive_utc().date(), date(2024, 3, 1));
    }

    #[test]
    fn test_same_local_day() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let morning = offset.with_ymd_and_hms(2024, 3, 1, 0, 0, 1).unwrap();
        let night = offset.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap();
        let next = offset.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        assert!(is_same_local_day(&morning, &night));
        assert!(!is_same_local_day(&night, &next));
    }

    #[test]
    fn test_day_distance_and_add() {
        assert_eq!(day_distance(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(day_distance(date(2024, 3, 1), date(2024, 2, 28)), -2);
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(add_days(date(2023, 12, 31), 1), date(2024, 1, 1));
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::at_noon(date(2024, 3, 1));
        let handle = clock.clone();
        handle.advance_days(2);
        assert_eq!(clock.today(), date(2024, 3, 3));
    }
}
