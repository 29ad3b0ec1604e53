//! Memo store: the free-form sticky note board.

use super::{SlotCollection, SubscriptionId};
use crate::collection;
use crate::model::defaults::default_memos;
use crate::model::id::EntityId;
use crate::model::memo::{Memo, MemoPatch};
use crate::persist::{SaveOutcome, MEMOS_SLOT};
use crate::storage::KeyValueStore;

/// Owner of the memo collection.
pub struct MemoStore<S: KeyValueStore> {
    inner: SlotCollection<Memo, S>,
}

impl<S: KeyValueStore> MemoStore<S> {
    pub fn open(storage: S) -> Self {
        Self {
            inner: SlotCollection::open(storage, MEMOS_SLOT, default_memos),
        }
    }

    pub fn memos(&self) -> &[Memo] {
        self.inner.items()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Memo> {
        self.memos().iter().find(|memo| &memo.id == id)
    }

    /// Creates an expanded blank memo at the front and returns its id.
    pub fn add_memo(&mut self) -> EntityId {
        let memo = Memo::new();
        let id = memo.id.clone();
        self.add(memo);
        id
    }

    /// Prepends `memo`. Returns `false` when its id is already taken.
    pub fn add(&mut self, memo: Memo) -> bool {
        if self.get(&memo.id).is_some() {
            return false;
        }
        let next = collection::add(self.memos(), memo);
        self.inner.commit("memo_add", next)
    }

    pub fn replace(&mut self, memo: Memo) -> bool {
        let next = collection::replace(self.memos(), memo);
        self.inner.commit("memo_replace", next)
    }

    pub fn remove(&mut self, id: &EntityId) -> bool {
        let next = collection::remove(self.memos(), id);
        self.inner.commit("memo_remove", next)
    }

    pub fn duplicate(&mut self, id: &EntityId) -> Option<EntityId> {
        let copy_id = EntityId::generate();
        let next = collection::duplicate(self.memos(), id, copy_id.clone());
        self.inner.commit("memo_duplicate", next).then_some(copy_id)
    }

    pub fn set_partial(&mut self, id: &EntityId, patch: &MemoPatch) -> bool {
        let next = collection::set_partial(self.memos(), id, patch);
        self.inner.commit("memo_set_partial", next)
    }

    /// Flips the expanded state of memo `id`.
    pub fn toggle_open(&mut self, id: &EntityId) -> bool {
        let next = collection::update(self.memos(), id, |memo| memo.open = !memo.open);
        self.inner.commit("memo_toggle", next)
    }

    /// Drag reorder on the board.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let next = collection::move_item(self.memos(), from, to);
        self.inner.commit("memo_move", next)
    }

    pub fn clear(&mut self) -> bool {
        self.inner.commit("memo_clear", Vec::new())
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Memo]) + 'static,
    {
        self.inner.observers_mut().subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.inner.observers_mut().unsubscribe(id)
    }

    pub fn last_save(&self) -> SaveOutcome {
        self.inner.last_save()
    }

    pub fn storage(&self) -> &S {
        self.inner.storage()
    }

    pub fn into_storage(self) -> S {
        self.inner.into_storage()
    }
}
