//! Stateful stores owning the scene and memo collections.
//!
//! # Responsibility
//! - Own one ordered collection each and expose only collection-engine edits.
//! - Snapshot the collection into its storage slot after every change.
//! - Notify subscribed observers with the new snapshot.
//!
//! # Invariants
//! - A mutation that leaves the sequence unchanged neither saves nor notifies.
//! - Storage failures never fail a mutation; memory stays authoritative.
//! - Stores are single-threaded; every edit takes `&mut self`.
//! - Ids are unique once a store is open, even if the slot held repeats.
//!
//! # See also
//! - `crate::collection` for the pure edit functions.
//! - `crate::persist` for slot load/save semantics.

pub mod memo_store;
pub mod observer;
pub mod scene_store;

pub use memo_store::MemoStore;
pub use observer::{Observers, SubscriptionId};
pub use scene_store::{ImportTicket, SceneStore};

use crate::collection::{self, Entity};
use crate::persist::{self, SaveOutcome};
use crate::storage::KeyValueStore;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Collection bound to one storage slot plus its observers.
pub(crate) struct SlotCollection<T, S> {
    storage: S,
    slot: &'static str,
    items: Vec<T>,
    observers: Observers<T>,
    last_save: SaveOutcome,
}

impl<T, S> SlotCollection<T, S>
where
    T: Entity + PartialEq + Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Loads `slot`, falling back to `default`, and writes the result back.
    ///
    /// Repeated ids in the loaded slot are reassigned before the write-back.
    pub(crate) fn open<F>(mut storage: S, slot: &'static str, default: F) -> Self
    where
        F: FnOnce() -> Vec<T>,
    {
        let loaded: Vec<T> = persist::load(&storage, slot, default);
        let (items, reassigned) = collection::dedupe_ids(loaded);
        if reassigned > 0 {
            warn!(
                "event=slot_load module=store status=repaired slot={} id_conflicts={}",
                slot, reassigned
            );
        }
        let last_save = persist::save(&mut storage, slot, &items);
        Self {
            storage,
            slot,
            items,
            observers: Observers::new(),
            last_save,
        }
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    /// Installs `next` if it differs from the current sequence.
    ///
    /// Returns whether the sequence changed.
    pub(crate) fn commit(&mut self, op: &'static str, next: Vec<T>) -> bool {
        if next == self.items {
            debug!(
                "event=store_commit module=store status=noop slot={} op={}",
                self.slot, op
            );
            return false;
        }

        self.items = next;
        self.last_save = persist::save(&mut self.storage, self.slot, &self.items);
        debug!(
            "event=store_commit module=store status=ok slot={} op={} len={} saved={}",
            self.slot,
            op,
            self.items.len(),
            self.last_save == SaveOutcome::Saved
        );
        self.observers.notify(&self.items);
        true
    }

    pub(crate) fn observers_mut(&mut self) -> &mut Observers<T> {
        &mut self.observers
    }

    pub(crate) fn last_save(&self) -> SaveOutcome {
        self.last_save
    }

    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn into_storage(self) -> S {
        self.storage
    }
}
