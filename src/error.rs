//! Custom error types for DreamSpend
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. None of these are fatal to the engine:
//! validation errors are returned to the caller and the state is left untouched.

use thiserror::Error;

/// The main error type for DreamSpend operations
#[derive(Error, Debug)]
pub enum DreamSpendError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Items for a day exceed the 5% tolerance over the allowance
    #[error("Spending {total} exceeds the allowed total of {allowed}")]
    Overspend { total: i64, allowed: i64 },

    /// Today's list was saved without any items
    #[error("Cannot save an empty spending list")]
    EmptySave,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The day exists but no longer accepts drafts
    #[error("Day {0} is not open")]
    DayNotOpen(u32),

    /// Live exchange rate could not be fetched or parsed
    #[error("Rate fetch failed: {0}")]
    RateFetch(String),
}

impl DreamSpendError {
    /// Create a "not found" error for days
    pub fn day_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Day",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a rejected input (no state was changed)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Overspend { .. } | Self::EmptySave | Self::DayNotOpen(_)
        )
    }
}

impl From<std::io::Error> for DreamSpendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DreamSpendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for DreamSpend operations
pub type DreamSpendResult<T> = Result<T, DreamSpendError>;
