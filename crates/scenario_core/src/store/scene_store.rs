//! Scene store: the act-partitioned scene sequence behind the board views.

use super::{SlotCollection, SubscriptionId};
use crate::collection;
use crate::exchange::{self, ImportError};
use crate::model::defaults::default_scenes;
use crate::model::id::EntityId;
use crate::model::scene::{Act, Scene, ScenePatch};
use crate::persist::{SaveOutcome, SCENES_SLOT};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use log::{info, warn};

/// Handle for one in-flight import, issued by [`SceneStore::begin_import`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTicket(u64);

impl ImportTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Owner of the scene collection.
pub struct SceneStore<S: KeyValueStore> {
    inner: SlotCollection<Scene, S>,
    latest_import: u64,
}

impl<S: KeyValueStore> SceneStore<S> {
    /// Opens the scene slot of `storage`; absent or corrupt data yields the
    /// sample scenes.
    pub fn open(storage: S) -> Self {
        Self {
            inner: SlotCollection::open(storage, SCENES_SLOT, default_scenes),
            latest_import: 0,
        }
    }

    /// Current sequence snapshot.
    pub fn scenes(&self) -> &[Scene] {
        self.inner.items()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Scene> {
        self.scenes().iter().find(|scene| &scene.id == id)
    }

    /// Creates a blank scene at the front and returns its id.
    pub fn add_scene(&mut self) -> EntityId {
        let scene = Scene::new();
        let id = scene.id.clone();
        self.add(scene);
        id
    }

    /// Prepends `scene`. Returns `false` when its id is already taken.
    ///
    /// Negative or non-finite durations are stored as 0.
    pub fn add(&mut self, scene: Scene) -> bool {
        let scene = scene.normalized();
        if self.get(&scene.id).is_some() {
            warn!(
                "event=scene_add module=store status=rejected error_code=duplicate_id id={}",
                scene.id
            );
            return false;
        }
        let next = collection::add(self.scenes(), scene);
        self.inner.commit("scene_add", next)
    }

    /// Swaps in `scene` for the stored scene with the same id.
    pub fn replace(&mut self, scene: Scene) -> bool {
        let next = collection::replace(self.scenes(), scene.normalized());
        self.inner.commit("scene_replace", next)
    }

    pub fn remove(&mut self, id: &EntityId) -> bool {
        let next = collection::remove(self.scenes(), id);
        self.inner.commit("scene_remove", next)
    }

    /// Copies scene `id` right after itself. Returns the copy's id.
    pub fn duplicate(&mut self, id: &EntityId) -> Option<EntityId> {
        let copy_id = EntityId::generate();
        let next = collection::duplicate(self.scenes(), id, copy_id.clone());
        self.inner
            .commit("scene_duplicate", next)
            .then_some(copy_id)
    }

    pub fn set_partial(&mut self, id: &EntityId, patch: &ScenePatch) -> bool {
        let next = collection::set_partial(self.scenes(), id, patch);
        self.inner.commit("scene_set_partial", next)
    }

    /// Reorders the `act` column: the `from`-th scene moves to index `to`.
    pub fn move_within_act(&mut self, act: Act, from: usize, to: usize) -> bool {
        let next = collection::move_within_partition(self.scenes(), act, from, to);
        self.inner.commit("scene_move", next)
    }

    pub fn change_act(&mut self, id: &EntityId, act: Act) -> bool {
        let next = collection::change_act(self.scenes(), id, act);
        self.inner.commit("scene_change_act", next)
    }

    /// Deletes every scene.
    pub fn clear(&mut self) -> bool {
        self.inner.commit("scene_clear", Vec::new())
    }

    /// Starts an import; any import begun earlier becomes stale.
    pub fn begin_import(&mut self) -> ImportTicket {
        self.latest_import += 1;
        ImportTicket(self.latest_import)
    }

    /// Replaces the whole collection with the scenes decoded from `text`.
    ///
    /// Returns the number of imported scenes. On error the collection is left
    /// untouched.
    pub fn finish_import(&mut self, ticket: ImportTicket, text: &str) -> Result<usize, ImportError> {
        if ticket.0 != self.latest_import {
            warn!(
                "event=scene_import module=store status=rejected error_code=superseded ticket={} latest={}",
                ticket.0, self.latest_import
            );
            return Err(ImportError::Superseded {
                ticket: ticket.0,
                latest: self.latest_import,
            });
        }

        let scenes = exchange::import_scenes(text).map_err(|err| {
            warn!(
                "event=scene_import module=store status=error ticket={} error={}",
                ticket.0, err
            );
            err
        })?;
        let count = scenes.len();
        self.inner.commit("scene_import", scenes);
        info!(
            "event=scene_import module=store status=ok ticket={} scenes={}",
            ticket.0, count
        );
        Ok(count)
    }

    /// Single-step import for callers without overlapping reads.
    pub fn import(&mut self, text: &str) -> Result<usize, ImportError> {
        let ticket = self.begin_import();
        self.finish_import(ticket, text)
    }

    /// Serializes the collection into the export envelope.
    pub fn export(&self, updated_at: DateTime<Utc>) -> serde_json::Result<String> {
        exchange::export_scenes(self.scenes(), updated_at)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Scene]) + 'static,
    {
        self.inner.observers_mut().subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.inner.observers_mut().unsubscribe(id)
    }

    /// Outcome of the most recent slot write.
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

#[cfg(test)]
mod tests {
    use super::SceneStore;
    use crate::exchange::ImportError;
    use crate::model::scene::{Act, ScenePatch};
    use crate::persist::SaveOutcome;
    use crate::storage::MemoryKeyValueStore;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn opens_with_sample_scenes_when_slot_is_empty() {
        let store = SceneStore::open(MemoryKeyValueStore::new());
        assert_eq!(store.scenes().len(), 5);
        assert_eq!(store.last_save(), SaveOutcome::Saved);
    }

    #[test]
    fn no_op_edits_do_not_notify() {
        let mut store = SceneStore::open(MemoryKeyValueStore::new());
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        let first = store.scenes()[0].id.clone();
        let act = store.scenes()[0].act;
        assert!(!store.change_act(&first, act));
        assert!(!store.move_within_act(Act::Act3, 4, 0));
        assert_eq!(hits.get(), 0);

        assert!(store.set_partial(&first, &ScenePatch::act(Act::Act3)));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn stale_import_ticket_is_rejected() {
        let mut store = SceneStore::open(MemoryKeyValueStore::new());
        let older = store.begin_import();
        let newer = store.begin_import();

        let result = store.finish_import(older, "[]");
        assert!(matches!(result, Err(ImportError::Superseded { .. })));
        assert_eq!(store.scenes().len(), 5);

        assert_eq!(store.finish_import(newer, r#"[{"title":"X"}]"#).unwrap(), 1);
        assert_eq!(store.scenes()[0].title, "X");
    }

    #[test]
    fn storage_failures_keep_memory_authoritative() {
        let mut store = SceneStore::open(MemoryKeyValueStore::unavailable());
        assert_eq!(store.last_save(), SaveOutcome::Failed);
        let id = store.add_scene();
        assert_eq!(store.scenes()[0].id, id);
        assert_eq!(store.last_save(), SaveOutcome::Failed);
    }

    #[test]
    fn replace_stores_invalid_durations_as_zero() {
        let mut store = SceneStore::open(MemoryKeyValueStore::new());
        let mut scene = store.scenes()[0].clone();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        scene.duration = -7.0;
        assert!(store.replace(scene.clone()));
        assert_eq!(store.scenes()[0].duration, 0.0);

        scene.duration = f64::NAN;
        assert!(!store.replace(scene.clone()));
        assert!(!store.replace(scene));
        assert_eq!(store.scenes()[0].duration, 0.0);
        assert_eq!(hits.get(), 1);
    }
}
