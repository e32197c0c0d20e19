//! Core data models for DreamSpend
//!
//! This module contains the data structures of the game: days, spend items,
//! achievements, settings, and the money/language helpers they rely on.

pub mod achievement;
pub mod day;
pub mod ids;
pub mod language;
pub mod money;
pub mod settings;
pub mod spend_item;

pub use achievement::{Achievement, AchievementKind};
pub use day::{DayEntry, DayStatus};
pub use ids::{DayId, SpendItemId};
pub use language::Language;
pub use money::Money;
pub use settings::{FxTable, MaxBehavior, Settings};
pub use spend_item::SpendItem;
