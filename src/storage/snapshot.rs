//! Persisted snapshot of the whole game
//!
//! The snapshot is the only unit ever written or read. Fields added after the
//! first release default to empty so older files still load.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Achievement, DayEntry, Money, Settings, SpendItem};
use crate::services::achievement;

/// Current snapshot schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Uncommitted items for an open day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftBucket {
    pub day_index: u32,
    pub items: Vec<SpendItem>,
}

/// Full serializable game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub settings: Settings,

    #[serde(default)]
    pub days: Vec<DayEntry>,

    #[serde(default)]
    pub achievements: Vec<Achievement>,

    #[serde(default)]
    pub streak: u32,

    /// Allowance of the next day to be created
    pub pending_allowance: Money,

    /// Currency of the pending allowance
    pub pending_currency: String,

    /// Rate to record on the next day, set by a language switch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_rate: Option<Decimal>,

    /// Day creation is frozen until a restart
    #[serde(default)]
    pub paused: bool,

    /// A day at the maximum was saved and not yet acknowledged
    #[serde(default)]
    pub celebration_pending: bool,

    #[serde(default)]
    pub draft_buckets: Vec<DraftBucket>,

    #[serde(default)]
    pub custom_categories: Vec<String>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Snapshot {
    /// Fresh state for the given settings, before any day exists
    pub fn bootstrap(settings: Settings) -> Self {
        let language = settings.language;
        Self {
            schema_version: SCHEMA_VERSION,
            pending_allowance: settings.start_amount_for(language),
            pending_currency: settings.currency_for(language).to_string(),
            settings,
            days: Vec::new(),
            achievements: achievement::bootstrap(),
            streak: 0,
            pending_rate: None,
            paused: false,
            celebration_pending: false,
            draft_buckets: Vec::new(),
            custom_categories: Vec::new(),
        }
    }

    /// Decode a snapshot, returning `None` for anything undecodable
    pub fn decode(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable snapshot");
                None
            }
        }
    }

    /// Encode as pretty JSON
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
