//! DreamSpend - daily spending-allowance game
//!
//! Each day grants an allowance that doubles when the previous day's
//! allowance was reached, up to a configurable maximum. Filling days builds a
//! streak and earns achievements; switching language converts the upcoming
//! allowance into the new currency with an approximate rate.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and tracing setup
//! - `error`: Custom error types
//! - `models`: Money, days, spend items, achievements and settings
//! - `storage`: Snapshot schema and persistence gateways
//! - `services`: The progression engine and the rules it applies
//! - `audit`: Event journal
//! - `cli`, `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use dreamspend::models::{Money, SpendItem};
//! use dreamspend::services::{ProgressionEngine, SystemClock};
//! use dreamspend::storage::JsonFileStore;
//!
//! let mut engine = ProgressionEngine::load(JsonFileStore::new(path), SystemClock);
//! engine.save_today(vec![SpendItem::new("Lunch", Money::from_minor(450), Some("Food"))])?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{DreamSpendError, DreamSpendResult};
