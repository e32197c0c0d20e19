//! Day display formatting
//!
//! Formats days for terminal output in table and detail views.

use crate::models::{DayEntry, DayStatus, Language, SpendItem};
use crate::services::allowed_total;

const PROGRESS_WIDTH: usize = 20;

/// Today's card: allowance, spending, streak and progress to the maximum
pub fn format_today(
    day: &DayEntry,
    language: Language,
    streak: u32,
    progress_to_max: f64,
    draft: &[SpendItem],
) -> String {
    let currency = day.currency.as_str();
    let mut output = format_day_details(day, language);

    output.push_str(&format!(
        "Allowed:    {} (+5%)\n",
        allowed_total(day.daily_limit).format(currency, language)
    ));
    output.push_str(&format!("Streak:     {}\n", streak));
    output.push_str(&format!(
        "Maximum:    {} {:.1}%\n",
        progress_bar(progress_to_max),
        progress_to_max * 100.0
    ));

    if !draft.is_empty() {
        output.push_str("\nDraft (not saved):\n");
        output.push_str(&format_items(draft, currency, language));
    }

    output
}

/// Single day with its items
pub fn format_day_details(day: &DayEntry, language: Language) -> String {
    let currency = day.currency.as_str();
    let mut output = String::new();

    output.push_str(&format!("Day {} - {} ({})\n", day.day_index, day.date, day.status));
    output.push_str(&format!(
        "Allowance:  {}\n",
        day.daily_limit.format(currency, language)
    ));
    if let Some(rate) = day.conversion_rate {
        output.push_str(&format!("Converted at rate {}\n", rate));
    }
    output.push_str(&format!(
        "Spent:      {}\n",
        day.total_spent().format(currency, language)
    ));
    output.push_str(&format!(
        "Remaining:  {}\n",
        day.remaining().format(currency, language)
    ));

    if !day.items.is_empty() {
        output.push('\n');
        output.push_str(&format_items(&day.items, currency, language));
        output.push('\n');
    }

    output
}

/// Item lines: title, category, amount
pub fn format_items(items: &[SpendItem], currency: &str, language: Language) -> String {
    let title_width = items
        .iter()
        .map(|i| i.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    for item in items {
        let category = item
            .category
            .as_deref()
            .map(|c| format!("  [{}]", c))
            .unwrap_or_default();
        output.push_str(&format!(
            "  {:<title_width$}  {:>14}{}\n",
            item.title,
            item.amount.format(currency, language),
            category,
            title_width = title_width,
        ));
    }
    output
}

/// Days as a table, in the order given
pub fn format_history(days: &[&DayEntry], language: Language) -> String {
    if days.is_empty() {
        return "No days yet.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<10}  {:<6}  {:>16}  {:>16}  {:>5}\n",
        "Day", "Date", "Status", "Allowance", "Spent", "Items"
    ));
    output.push_str(&format!(
        "{:->5}  {:-<10}  {:-<6}  {:->16}  {:->16}  {:->5}\n",
        "", "", "", "", "", ""
    ));

    for day in days {
        let currency = day.currency.as_str();
        let spent = match day.status {
            DayStatus::Missed if day.items.is_empty() => "-".to_string(),
            _ => day.total_spent().format(currency, language),
        };
        output.push_str(&format!(
            "{:>5}  {:<10}  {:<6}  {:>16}  {:>16}  {:>5}\n",
            day.day_index,
            day.date.to_string(),
            day.status.to_string(),
            day.daily_limit.format(currency, language),
            spent,
            day.items.len(),
        ));
    }

    output
}

fn progress_bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * PROGRESS_WIDTH as f64).round()) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}
