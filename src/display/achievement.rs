//! Achievement display formatting

use crate::models::Achievement;

/// Catalog with earned dates and progress toward streak goals
pub fn format_achievement_list(achievements: &[Achievement], streak: u32) -> String {
    if achievements.is_empty() {
        return "No achievements.".to_string();
    }

    let title_width = achievements
        .iter()
        .map(|a| a.kind.to_string().chars().count())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<title_width$}  {}\n",
        "Achievement",
        "Status",
        title_width = title_width
    ));
    output.push_str(&format!(
        "{:-<title_width$}  {:-<20}\n",
        "",
        "",
        title_width = title_width
    ));

    for achievement in achievements {
        let status = match (achievement.earned_at, achievement.kind.required_streak()) {
            (Some(at), _) => format!("earned {}", at.format("%Y-%m-%d")),
            (None, Some(required)) => format!("{}/{}", streak.min(required), required),
            (None, None) => "locked".to_string(),
        };
        output.push_str(&format!(
            "{:<title_width$}  {}\n",
            achievement.kind.to_string(),
            status,
            title_width = title_width
        ));
    }

    let earned = achievements.iter().filter(|a| a.is_earned()).count();
    output.push_str(&format!("\n{} of {} earned\n", earned, achievements.len()));
    output
}
