//! Read-only views derived from the scene sequence.
//!
//! # Responsibility
//! - Derive Kanban columns, the flat list, timeline bars, the tag universe
//!   and sidebar entries from one snapshot.
//!
//! # Invariants
//! - Projections never mutate or reorder the base sequence.
//! - Everything is recomputed per call; nothing is cached.

pub mod kanban;
pub mod timeline;

use crate::model::id::EntityId;
use crate::model::scene::{Act, Scene};
use crate::search::filter::SceneFilter;
use std::collections::HashSet;

pub use kanban::{kanban_columns, KanbanColumn};
pub use timeline::{timeline, Timeline, TimelineBar};

/// Passing scenes in sequence order (list view).
pub fn list_view<'a>(scenes: &'a [Scene], filter: &SceneFilter) -> Vec<&'a Scene> {
    filter.apply(scenes)
}

/// Distinct non-empty tags over the unfiltered collection, first-seen order.
///
/// Distinctness is case-sensitive: `Drama` and `drama` are separate entries
/// even though the tag filter treats them alike.
pub fn tag_universe(scenes: &[Scene]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for tag in scenes.iter().flat_map(|scene| scene.tags.iter()) {
        if !tag.is_empty() && seen.insert(tag.as_str()) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Sum of all scene durations in minutes.
pub fn total_minutes(scenes: &[Scene]) -> f64 {
    scenes.iter().map(Scene::minutes).sum()
}

/// One row of the scene sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarEntry {
    pub id: EntityId,
    pub title: String,
    pub act: Act,
    pub minutes: f64,
    pub picked: bool,
}

/// Sidebar rows for every scene, flagging the picked one.
pub fn sidebar_entries(scenes: &[Scene], picked: Option<&EntityId>) -> Vec<SidebarEntry> {
    scenes
        .iter()
        .map(|scene| SidebarEntry {
            id: scene.id.clone(),
            title: scene.title.clone(),
            act: scene.act,
            minutes: scene.minutes(),
            picked: picked == Some(&scene.id),
        })
        .collect()
}
