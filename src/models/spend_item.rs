//! Spend item model
//!
//! One line of spending recorded against a day.

use serde::{Deserialize, Serialize};

use super::ids::SpendItemId;
use super::money::Money;

/// A single spending entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendItem {
    /// Unique identifier
    pub id: SpendItemId,

    /// What the money was spent on (trimmed)
    pub title: String,

    /// Amount in minor units of the day's currency (never negative)
    pub amount: Money,

    /// Optional category (trimmed, empty becomes None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SpendItem {
    /// Create a new spend item, normalizing its fields
    pub fn new(title: impl Into<String>, amount: Money, category: Option<&str>) -> Self {
        Self {
            id: SpendItemId::new(),
            title: title.into().trim().to_string(),
            amount: amount.at_least(0),
            category: normalize_category(category),
        }
    }

    /// Check that the item can be saved
    pub fn validate(&self) -> Result<(), SpendItemValidationError> {
        if self.title.trim().is_empty() {
            return Err(SpendItemValidationError::EmptyTitle);
        }
        if self.amount.is_negative() {
            return Err(SpendItemValidationError::NegativeAmount);
        }
        Ok(())
    }

    /// Re-apply trimming rules (used on items coming from outside the engine)
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.amount = self.amount.at_least(0);
        self.category = normalize_category(self.category.as_deref());
        self
    }
}

/// Trim a category, mapping empty to None
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Sum of item amounts
pub fn total_of(items: &[SpendItem]) -> Money {
    items.iter().map(|i| i.amount).sum()
}

/// Validation errors for spend items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpendItemValidationError {
    EmptyTitle,
    NegativeAmount,
}

impl std::fmt::Display for SpendItemValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Spend item title cannot be empty"),
            Self::NegativeAmount => write!(f, "Spend item amount cannot be negative"),
        }
    }
}

impl std::error::Error for SpendItemValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_clamps() {
        let item = SpendItem::new("  Coffee ", Money::from_minor(-50), Some("   "));
        assert_eq!(item.title, "Coffee");
        assert_eq!(item.amount.minor(), 0);
        assert_eq!(item.category, None);

        let item = SpendItem::new("Bus", Money::from_minor(250), Some(" Transport "));
        assert_eq!(item.category.as_deref(), Some("Transport"));
    }

    #[test]
    fn test_validate() {
        let item = SpendItem::new("  ", Money::from_minor(100), None);
        assert_eq!(item.validate(), Err(SpendItemValidationError::EmptyTitle));
        assert!(SpendItem::new("Tea", Money::from_minor(100), None)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_total() {
        let items = vec![
            SpendItem::new("A", Money::from_minor(100), None),
            SpendItem::new("B", Money::from_minor(250), None),
        ];
        assert_eq!(total_of(&items).minor(), 350);
    }

    #[test]
    fn test_category_omitted_when_absent() {
        let item = SpendItem::new("Tea", Money::from_minor(100), None);
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("category"));
    }
}
