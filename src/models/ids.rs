//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }
    };
}

define_id!(DayId, "day-");
define_id!(SpendItemId, "itm-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_id_creation() {
        let id = DayId::new();
        assert_ne!(id, DayId::new());
    }

    #[test]
    fn test_id_display() {
        let id = SpendItemId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("itm-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_serialization() {
        let id = DayId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: DayId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
