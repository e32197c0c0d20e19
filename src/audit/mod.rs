//! Event journal for DreamSpend
//!
//! Every committed engine event is appended to an append-only journal so the
//! history of a game (days created, fills, resets, settings changes) can be
//! reviewed later.
//!
//! # Architecture
//!
//! - `AuditEntry`: one journal line, a UTC timestamp plus the engine event.
//! - `AuditLogger`: appends entries to the journal file using line-delimited
//!   JSON (JSONL) and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use dreamspend::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.journal_file());
//! engine.subscribe(move |event| {
//!     let _ = logger.log(&AuditEntry::new(event.clone()));
//! });
//! ```

mod entry;
mod logger;

pub use entry::AuditEntry;
pub use logger::AuditLogger;
