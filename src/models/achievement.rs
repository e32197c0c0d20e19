//! Achievement model
//!
//! One achievement per catalog kind. Once `earned_at` is set it never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog of achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementKind {
    Streak3,
    Streak7,
    Streak14,
    Streak30,
    PerfectFill,
    ReachedMaximum,
}

impl AchievementKind {
    /// Every kind, in catalog order
    pub const ALL: [AchievementKind; 6] = [
        Self::Streak3,
        Self::Streak7,
        Self::Streak14,
        Self::Streak30,
        Self::PerfectFill,
        Self::ReachedMaximum,
    ];

    /// Streak needed to earn the kind, if it is a streak achievement
    pub fn required_streak(&self) -> Option<u32> {
        match self {
            Self::Streak3 => Some(3),
            Self::Streak7 => Some(7),
            Self::Streak14 => Some(14),
            Self::Streak30 => Some(30),
            Self::PerfectFill | Self::ReachedMaximum => None,
        }
    }
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Streak3 => write!(f, "3-day streak"),
            Self::Streak7 => write!(f, "7-day streak"),
            Self::Streak14 => write!(f, "14-day streak"),
            Self::Streak30 => write!(f, "30-day streak"),
            Self::PerfectFill => write!(f, "Perfect fill"),
            Self::ReachedMaximum => write!(f, "Reached maximum"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub kind: AchievementKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// An unearned achievement of the given kind
    pub fn new(kind: AchievementKind) -> Self {
        Self {
            kind,
            earned_at: None,
        }
    }

    pub fn is_earned(&self) -> bool {
        self.earned_at.is_some()
    }
}
