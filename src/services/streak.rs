//! Streak rules
//!
//! A streak grows by one on the first fill of a day and resets once the two
//! most recent days are both missed.

use crate::models::DayEntry;

/// Next streak value after a save
pub fn next_streak(current: u32, filled_today: bool) -> u32 {
    if filled_today {
        current.saturating_add(1)
    } else {
        current
    }
}

/// True when the two latest days (by `day_index`) are both missed
///
/// Only the trailing pair is examined, however many days were just created.
pub fn should_reset(days: &[DayEntry]) -> bool {
    let mut latest: Vec<&DayEntry> = days.iter().collect();
    latest.sort_by_key(|d| d.day_index);

    match latest.as_slice() {
        [.., previous, last] => previous.is_missed() && last.is_missed(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayStatus, Money};
    use chrono::NaiveDate;

    fn days(statuses: &[DayStatus]) -> Vec<DayEntry> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                DayEntry::new(
                    i as u32 + 1,
                    start + chrono::Duration::days(i as i64),
                    "USD",
                    Money::from_minor(1000),
                    *status,
                )
            })
            .collect()
    }

    #[test]
    fn test_next_streak() {
        assert_eq!(next_streak(4, true), 5);
        assert_eq!(next_streak(4, false), 4);
        assert_eq!(next_streak(u32::MAX, true), u32::MAX);
    }

    #[test]
    fn test_reset_after_two_missed() {
        use DayStatus::*;
        assert!(should_reset(&days(&[Filled, Missed, Missed])));
        assert!(!should_reset(&days(&[Missed, Missed, Filled])));
        assert!(!should_reset(&days(&[Missed, Open])));
        assert!(!should_reset(&days(&[Missed])));
        assert!(!should_reset(&[]));
    }

    #[test]
    fn test_reset_uses_day_index_order() {
        use DayStatus::*;
        let mut list = days(&[Missed, Missed, Filled]);
        // Stored out of order: the trailing pair by index is (Missed, Filled)
        list.reverse();
        assert!(!should_reset(&list));
    }
}
