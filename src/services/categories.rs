//! Category list helpers
//!
//! Categories are compared case-insensitively; the first spelling seen wins.

use crate::models::SpendItem;

/// Trim a user-entered category
pub fn normalize(category: &str) -> String {
    category.trim().to_string()
}

/// De-duplicate case-insensitively, keeping order and the first casing
pub fn unique<I, S>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();

    for category in categories {
        let trimmed = category.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            result.push(trimmed.to_string());
        }
    }

    result
}

/// Append the categories used by `items` to `existing`
pub fn merge_from_items(existing: &[String], items: &[SpendItem]) -> Vec<String> {
    unique(
        existing
            .iter()
            .map(String::as_str)
            .chain(items.iter().filter_map(|i| i.category.as_deref())),
    )
}

/// Remove a category regardless of case
pub fn remove(existing: &mut Vec<String>, category: &str) -> bool {
    let before = existing.len();
    let target = category.trim().to_lowercase();
    existing.retain(|c| c.to_lowercase() != target);
    existing.len() != before
}
