//! Journal entry data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::EngineEvent;

/// A single journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event was committed (UTC)
    pub timestamp: DateTime<Utc>,

    /// What changed
    pub change: EngineEvent,
}

impl AuditEntry {
    /// Entry stamped with the current time
    pub fn new(change: EngineEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            change,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.change.name().to_uppercase()
        );

        let details = match &self.change {
            EngineEvent::DayCreated {
                day_index,
                missed,
                allowance,
                currency,
            } => format!(
                "day {} {} {}{}",
                day_index,
                allowance,
                currency,
                if *missed { " (missed)" } else { "" }
            ),
            EngineEvent::DayMissed { day_index } | EngineEvent::DraftChanged { day_index } => {
                format!("day {}", day_index)
            }
            EngineEvent::DayFilled { day_index, total } => {
                format!("day {} total {}", day_index, total)
            }
            EngineEvent::ReachedMaximum { day_index } => format!("day {}", day_index),
            EngineEvent::AchievementEarned { kind } => kind.to_string(),
            EngineEvent::LanguageSwitched {
                from,
                to,
                pending_allowance,
                rate_used,
            } => format!(
                "{} -> {}, next allowance {} at rate {}",
                from, to, pending_allowance, rate_used
            ),
            EngineEvent::AmountsChanged { language } => language.to_string(),
            EngineEvent::MaxBehaviorChanged { behavior } => behavior.to_string(),
            EngineEvent::ReminderChanged {
                hour,
                minute,
                enabled,
            } => format!(
                "{:02}:{:02} {}",
                hour,
                minute,
                if *enabled { "on" } else { "off" }
            ),
            EngineEvent::FxRateUpdated {
                source,
                target,
                rate,
            } => format!("{}->{} {}", source, target, rate),
            EngineEvent::StreakReset
            | EngineEvent::CategoriesChanged
            | EngineEvent::CelebrationDismissed
            | EngineEvent::GameRestarted => String::new(),
        };

        if !details.is_empty() {
            output.push(' ');
            output.push_str(&details);
        }
        output
    }
}
