//! Configuration module for DreamSpend
//!
//! - Data directory resolution
//! - Tracing setup
//!
//! Game settings (language, amounts, reminder, FX table) live in the snapshot
//! and are changed through the engine, see [`crate::models::Settings`].

pub mod logging;
pub mod paths;

pub use logging::init_tracing;
pub use paths::DreamSpendPaths;
