//! Service layer for DreamSpend
//!
//! The [`ProgressionEngine`] owns the game state. The other modules are pure
//! rule helpers it calls on every operation, plus the rate refresh that sits
//! outside the engine and feeds it new FX rates.

pub mod achievement;
pub mod calendar;
pub mod categories;
pub mod engine;
pub mod events;
pub mod fx;
pub mod language_switch;
pub mod rates;
pub mod streak;

pub use calendar::{Clock, ManualClock, SystemClock};
pub use engine::{allowed_total, ProgressionEngine, SaveOutcome};
pub use events::{EngineEvent, EventListener};
pub use rates::{refresh_rates, FxRefreshStatus, RateSource};
