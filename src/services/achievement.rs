//! Achievement rules
//!
//! Evaluation is one-way: an earned achievement is never revisited.

use chrono::{DateTime, Utc};

use crate::models::{Achievement, AchievementKind, DayEntry};

/// Fresh catalog with nothing earned
pub fn bootstrap() -> Vec<Achievement> {
    AchievementKind::ALL.iter().map(|k| Achievement::new(*k)).collect()
}

/// Award every unearned kind whose condition now holds
///
/// The list is rebuilt in catalog order; kinds missing from the input are
/// added unearned. Returns the kinds earned by this call.
pub fn evaluate(
    achievements: &mut Vec<Achievement>,
    streak: u32,
    day: &DayEntry,
    reached_maximum: bool,
    now: DateTime<Utc>,
) -> Vec<AchievementKind> {
    let mut newly_earned = Vec::new();

    let mut catalog: Vec<Achievement> = AchievementKind::ALL
        .iter()
        .map(|kind| {
            achievements
                .iter()
                .find(|a| a.kind == *kind)
                .cloned()
                .unwrap_or_else(|| Achievement::new(*kind))
        })
        .collect();

    for achievement in catalog.iter_mut().filter(|a| !a.is_earned()) {
        let earned = match achievement.kind.required_streak() {
            Some(required) => streak >= required,
            None => match achievement.kind {
                AchievementKind::PerfectFill => day.is_perfect_fill(),
                AchievementKind::ReachedMaximum => reached_maximum,
                _ => false,
            },
        };

        if earned {
            achievement.earned_at = Some(now);
            newly_earned.push(achievement.kind);
        }
    }

    *achievements = catalog;
    newly_earned
}
