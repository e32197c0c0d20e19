//! In-memory persistence gateway
//!
//! Clones share the same slot, so a test can keep a handle and inspect what
//! the engine saved.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::snapshot::Snapshot;
use super::PersistenceGateway;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    slot: Rc<RefCell<Option<Snapshot>>>,
    saves: Rc<Cell<usize>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        store.slot.replace(Some(snapshot));
        store
    }

    /// Last saved snapshot
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.slot.borrow().clone()
    }

    /// Number of saves performed
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl PersistenceGateway for InMemoryStore {
    fn load(&self) -> Option<Snapshot> {
        self.snapshot()
    }

    fn save(&self, snapshot: &Snapshot) {
        self.slot.replace(Some(snapshot.clone()));
        self.saves.set(self.saves.get() + 1);
    }
}
