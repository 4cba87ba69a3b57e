//! Shared handle to the inventory state.
//!
//! Every mutation goes through [`InventoryStore::dispatch`], which runs the
//! reducer under the lock and bumps a revision counter observers can watch.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::inventory::{InventoryIntent, InventoryReducer, InventoryState};
use super::mvi::Reducer;

#[derive(Clone)]
pub struct InventoryStore {
    state: Arc<Mutex<InventoryState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new(InventoryState::default())
    }
}

impl InventoryStore {
    pub fn new(state: InventoryState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(state)),
            revision: Arc::new(revision),
        }
    }

    /// Runs the reducer. Returns whether the state changed.
    pub fn dispatch(&self, intent: InventoryIntent) -> bool {
        let changed = {
            let mut guard = self.state.lock();
            // The lock does not poison; the stored state is replaced only
            // once the reducer has returned.
            let after = InventoryReducer::reduce(guard.clone(), intent);
            let changed = after != *guard;
            *guard = after;
            changed
        };
        if changed {
            self.revision.send_modify(|revision| *revision += 1);
        }
        changed
    }

    /// Clone of the current state.
    pub fn state(&self) -> InventoryState {
        self.state.lock().clone()
    }

    /// Borrow the state for a quick read without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&InventoryState) -> R) -> R {
        f(&self.state.lock())
    }

    pub fn is_busy(&self) -> bool {
        self.read(InventoryState::is_busy)
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
