//! Pure collection engine over id-keyed ordered sequences.
//!
//! # Responsibility
//! - Provide add/replace/remove/duplicate/reorder as pure functions.
//! - Provide act-scoped reorder and act change for scene sequences.
//!
//! # Invariants
//! - Inputs are never mutated; every operation returns a new sequence.
//! - Operations addressing an absent id return the input unchanged.
//! - Ids stay unique: only `duplicate` introduces a record, with a fresh id.

pub mod partition;
pub mod sequence;

use crate::model::id::EntityId;
use crate::model::memo::{Memo, MemoPatch};
use crate::model::scene::{Scene, ScenePatch};

pub use partition::{change_act, move_within_partition, partition_index, partition_of};
pub use sequence::{
    add, dedupe_ids, duplicate, move_item, position_of, remove, replace, set_partial, update,
};

/// Suffix appended to a duplicated record's title.
pub const COPY_SUFFIX: &str = " コピー";

/// Record addressable by a stable id inside an ordered sequence.
pub trait Entity: Clone {
    fn id(&self) -> &EntityId;

    /// Builds the copy inserted by [`duplicate`]: new id, copy-marked title,
    /// every other field unchanged.
    fn duplicated(&self, id: EntityId) -> Self;

    /// Replaces the id. Only used to repair id collisions in loaded data.
    fn reassign_id(&mut self, id: EntityId);
}

/// Partial update merged into an existing record by [`set_partial`].
pub trait Patch<T> {
    fn merge_into(&self, target: &mut T);
}

impl Patch<Scene> for ScenePatch {
    fn merge_into(&self, target: &mut Scene) {
        self.apply_to(target);
    }
}

impl Patch<Memo> for MemoPatch {
    fn merge_into(&self, target: &mut Memo) {
        self.apply_to(target);
    }
}

impl Entity for Scene {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn duplicated(&self, id: EntityId) -> Self {
        Self {
            id,
            title: format!("{}{COPY_SUFFIX}", self.title),
            ..self.clone()
        }
    }

    fn reassign_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl Entity for Memo {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn duplicated(&self, id: EntityId) -> Self {
        Self {
            id,
            title: format!("{}{COPY_SUFFIX}", self.title),
            ..self.clone()
        }
    }

    fn reassign_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
