//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the progression engine.

pub mod category;
pub mod day;
pub mod game;
pub mod settings;

pub use category::{handle_category_command, CategoryCommands};
pub use day::{
    handle_draft_command, handle_history, handle_save_day, handle_spend, handle_today,
    DraftCommands,
};
pub use game::{handle_achievements, handle_dismiss, handle_log, handle_restart};
pub use settings::{handle_settings_command, SettingsCommands};
