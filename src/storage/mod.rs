//! Storage layer for DreamSpend
//!
//! The engine persists through the [`PersistenceGateway`] capability. Both
//! operations are best-effort: a failed load yields a fresh game and a
//! failed save is logged and ignored.

pub mod file_io;
pub mod json_store;
pub mod memory;
pub mod snapshot;

pub use file_io::{read_json_optional, write_json_atomic};
pub use json_store::JsonFileStore;
pub use memory::InMemoryStore;
pub use snapshot::{DraftBucket, Snapshot};

/// Load/save capability injected into the engine
pub trait PersistenceGateway {
    /// Previously saved snapshot, or `None` when absent or undecodable
    fn load(&self) -> Option<Snapshot>;

    /// Persist the snapshot; failures are not reported
    fn save(&self, snapshot: &Snapshot);
}

impl<T: PersistenceGateway + ?Sized> PersistenceGateway for Box<T> {
    fn load(&self) -> Option<Snapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) {
        (**self).save(snapshot)
    }
}
