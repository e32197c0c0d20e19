//! Day entry model
//!
//! One entry per local calendar day, numbered from 1 without gaps.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::DayId;
use super::money::Money;
use super::spend_item::{total_of, SpendItem};

/// Lifecycle status of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// Today, not yet saved
    #[default]
    Open,
    /// Spending was saved
    Filled,
    /// The day passed without a save
    Missed,
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Filled => write!(f, "Filled"),
            Self::Missed => write!(f, "Missed"),
        }
    }
}

/// A single day of the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Unique identifier
    pub id: DayId,

    /// 1-based, gapless position in the game
    pub day_index: u32,

    /// Local calendar date
    pub date: NaiveDate,

    /// Currency of the allowance
    pub currency: String,

    /// Allowance for the day in minor units
    pub daily_limit: Money,

    /// Lifecycle status
    #[serde(default)]
    pub status: DayStatus,

    /// Rate applied when the allowance was carried over a currency switch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<Decimal>,

    /// Saved spending
    #[serde(default)]
    pub items: Vec<SpendItem>,
}

impl DayEntry {
    /// Create a new day with no items
    pub fn new(
        day_index: u32,
        date: NaiveDate,
        currency: impl Into<String>,
        daily_limit: Money,
        status: DayStatus,
    ) -> Self {
        Self {
            id: DayId::new(),
            day_index,
            date,
            currency: currency.into(),
            daily_limit: daily_limit.at_least(0),
            status,
            conversion_rate: None,
            items: Vec::new(),
        }
    }

    /// Total of the saved items
    pub fn total_spent(&self) -> Money {
        total_of(&self.items)
    }

    /// Allowance left after the saved items (negative when over)
    pub fn remaining(&self) -> Money {
        self.daily_limit - self.total_spent()
    }

    /// Filled with exactly the allowance spent
    pub fn is_perfect_fill(&self) -> bool {
        self.status == DayStatus::Filled && self.remaining().is_zero()
    }

    pub fn is_open(&self) -> bool {
        self.status == DayStatus::Open
    }

    pub fn is_missed(&self) -> bool {
        self.status == DayStatus::Missed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_new_clamps_limit() {
        let day = DayEntry::new(1, date(1), "USD", Money::from_minor(-10), DayStatus::Open);
        assert_eq!(day.daily_limit.minor(), 0);
        assert!(day.is_open());
    }

    #[test]
    fn test_remaining_and_perfect_fill() {
        let mut day = DayEntry::new(1, date(1), "USD", Money::from_minor(500), DayStatus::Open);
        day.items.push(SpendItem::new("Lunch", Money::from_minor(300), None));
        day.items.push(SpendItem::new("Snack", Money::from_minor(200), None));
        assert_eq!(day.remaining().minor(), 0);
        assert!(!day.is_perfect_fill());

        day.status = DayStatus::Filled;
        assert!(day.is_perfect_fill());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&DayStatus::Missed).unwrap(), r#""missed""#);
    }
}
