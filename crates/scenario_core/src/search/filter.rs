//! Free-text, tag and selection filtering over scenes.
//!
//! # Invariants
//! - Matching is case-folded substring matching; no ranking.
//! - All query terms must match (AND semantics), as must the tag and pick.
//! - Filtering never reorders; survivors keep sequence order.

use crate::model::id::EntityId;
use crate::model::scene::Scene;

/// Filter state driven by the search box, tag selector and sidebar pick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneFilter {
    /// Whitespace-separated terms; blank means "match everything".
    pub query: String,
    /// Exact tag match, compared case-insensitively. `None` disables it.
    pub tag: Option<String>,
    /// Restricts the result to one picked scene. `None` disables it.
    pub picked: Option<EntityId>,
}

impl SceneFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = if tag.trim().is_empty() { None } else { Some(tag) };
        self
    }

    pub fn with_picked(mut self, id: EntityId) -> Self {
        self.picked = Some(id);
        self
    }

    /// Returns whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.tag.is_none() && self.picked.is_none()
    }

    /// Compiles the filter once for repeated matching.
    pub fn compile(&self) -> CompiledFilter<'_> {
        CompiledFilter {
            terms: query_terms(&self.query),
            tag: self.tag.as_deref().map(str::to_lowercase),
            picked: self.picked.as_ref(),
        }
    }

    /// Returns the passing scenes in sequence order.
    pub fn apply<'a>(&self, scenes: &'a [Scene]) -> Vec<&'a Scene> {
        let compiled = self.compile();
        scenes.iter().filter(|scene| compiled.matches(scene)).collect()
    }
}

/// Pre-folded form of a [`SceneFilter`].
#[derive(Debug, Clone)]
pub struct CompiledFilter<'f> {
    terms: Vec<String>,
    tag: Option<String>,
    picked: Option<&'f EntityId>,
}

impl CompiledFilter<'_> {
    pub fn matches(&self, scene: &Scene) -> bool {
        self.matches_pick(scene) && self.matches_tag(scene) && self.matches_terms(scene)
    }

    fn matches_pick(&self, scene: &Scene) -> bool {
        self.picked.map_or(true, |id| &scene.id == id)
    }

    fn matches_tag(&self, scene: &Scene) -> bool {
        match &self.tag {
            None => true,
            Some(wanted) => scene.tags.iter().any(|tag| tag.to_lowercase() == *wanted),
        }
    }

    fn matches_terms(&self, scene: &Scene) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let haystack = haystack(scene);
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

/// Splits a query into lower-cased, non-empty terms.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Lower-cased searchable text of one scene.
///
/// Covers title, summary, tags, characters and notes.
fn haystack(scene: &Scene) -> String {
    let mut text = String::with_capacity(
        scene.title.len() + scene.summary.len() + scene.notes.len() + 32,
    );
    text.push_str(&scene.title);
    text.push(' ');
    text.push_str(&scene.summary);
    text.push(' ');
    text.push_str(&scene.tags.join(" "));
    text.push(' ');
    text.push_str(&scene.characters.join(" "));
    text.push(' ');
    text.push_str(&scene.notes);
    text.to_lowercase()
}
