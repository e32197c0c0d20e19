//! Display formatting for terminal output
//!
//! Plain-text renderings of days, achievements and settings. Amounts are
//! formatted with the active language's separators.

pub mod achievement;
pub mod day;
pub mod settings;

pub use achievement::format_achievement_list;
pub use day::{format_day_details, format_history, format_today};
pub use settings::format_settings;
