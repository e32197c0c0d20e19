//! Engine events
//!
//! Emitted after an operation has been committed and handed to persistence.
//! Listeners (journal, reminder scheduler, UI refresh) subscribe on the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AchievementKind, Language, MaxBehavior, Money};

/// Something that changed in the game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    DayCreated {
        day_index: u32,
        missed: bool,
        allowance: Money,
        currency: String,
    },
    DayMissed {
        day_index: u32,
    },
    DayFilled {
        day_index: u32,
        total: Money,
    },
    StreakReset,
    AchievementEarned {
        kind: AchievementKind,
    },
    ReachedMaximum {
        day_index: u32,
    },
    LanguageSwitched {
        from: Language,
        to: Language,
        pending_allowance: Money,
        rate_used: Decimal,
    },
    AmountsChanged {
        language: Language,
    },
    MaxBehaviorChanged {
        behavior: MaxBehavior,
    },
    ReminderChanged {
        hour: u8,
        minute: u8,
        enabled: bool,
    },
    FxRateUpdated {
        source: String,
        target: String,
        rate: Decimal,
    },
    CategoriesChanged,
    DraftChanged {
        day_index: u32,
    },
    CelebrationDismissed,
    GameRestarted,
}

impl EngineEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::DayCreated { .. } => "day_created",
            Self::DayMissed { .. } => "day_missed",
            Self::DayFilled { .. } => "day_filled",
            Self::StreakReset => "streak_reset",
            Self::AchievementEarned { .. } => "achievement_earned",
            Self::ReachedMaximum { .. } => "reached_maximum",
            Self::LanguageSwitched { .. } => "language_switched",
            Self::AmountsChanged { .. } => "amounts_changed",
            Self::MaxBehaviorChanged { .. } => "max_behavior_changed",
            Self::ReminderChanged { .. } => "reminder_changed",
            Self::FxRateUpdated { .. } => "fx_rate_updated",
            Self::CategoriesChanged => "categories_changed",
            Self::DraftChanged { .. } => "draft_changed",
            Self::CelebrationDismissed => "celebration_dismissed",
            Self::GameRestarted => "game_restarted",
        }
    }
}

/// Callback receiving committed events
pub type EventListener = Box<dyn FnMut(&EngineEvent)>;
