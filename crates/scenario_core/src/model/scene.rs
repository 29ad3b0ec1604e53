//! Scene domain model.
//!
//! # Responsibility
//! - Define the scene record and the fixed three-act enumeration.
//! - Decode loosely-typed scene records from storage and import files.
//!
//! # Invariants
//! - `act` is always one of `ACT1|ACT2|ACT3`; anything else decodes as `ACT1`.
//! - `duration` is finite and non-negative.
//! - Unknown record fields survive a decode/encode cycle unchanged.

use crate::model::coerce::{
    coerce_minutes, coerce_string, coerce_string_list, sanitize_minutes, serialize_minutes,
};
use crate::model::id::EntityId;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Swatch palette offered for scene cards. Free-form colors are tolerated.
pub const COLOR_SWATCHES: [&str; 8] = [
    "#eef2ff", "#ecfeff", "#f0fdf4", "#fefce8", "#fee2e2", "#f5f3ff", "#fff7ed", "#f4f4f5",
];

/// Title given to freshly created scenes.
pub const NEW_SCENE_TITLE: &str = "新しいシーン";

/// Duration in minutes given to freshly created scenes.
pub const NEW_SCENE_MINUTES: f64 = 3.0;

/// Top-level grouping of scenes. Declaration order is the canonical ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Act {
    #[default]
    Act1,
    Act2,
    Act3,
}

impl Act {
    /// All acts in ranking order (Kanban column order, timeline order).
    pub const ALL: [Act; 3] = [Act::Act1, Act::Act2, Act::Act3];

    pub fn as_str(self) -> &'static str {
        match self {
            Act::Act1 => "ACT1",
            Act::Act2 => "ACT2",
            Act::Act3 => "ACT3",
        }
    }

    /// Parses the wire name. Matching is exact, as stored by the editor.
    pub fn parse(value: &str) -> Option<Act> {
        match value {
            "ACT1" => Some(Act::Act1),
            "ACT2" => Some(Act::Act2),
            "ACT3" => Some(Act::Act3),
            _ => None,
        }
    }

    /// Zero-based rank in [`Act::ALL`].
    pub fn rank(self) -> usize {
        match self {
            Act::Act1 => 0,
            Act::Act2 => 1,
            Act::Act3 => 2,
        }
    }
}

impl Display for Act {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrative unit shown on the Kanban board, list and timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: EntityId,
    pub title: String,
    /// Markdown source.
    pub summary: String,
    /// May contain duplicates; only the tag universe deduplicates.
    pub tags: Vec<String>,
    pub characters: Vec<String>,
    pub color: String,
    /// Minutes. Finite and `>= 0`.
    pub duration: f64,
    /// Markdown source.
    pub notes: String,
    pub act: Act,
    /// Fields this build does not know about, carried through untouched.
    ///
    /// Keys naming a known field are dropped on encode; the typed field wins.
    pub extra: Map<String, Value>,
}

/// Encoded field names, in encode order.
const FIELD_NAMES: [&str; 9] = [
    "id",
    "title",
    "summary",
    "tags",
    "characters",
    "color",
    "duration",
    "notes",
    "act",
];

impl Scene {
    /// Creates a blank scene with editor defaults and a generated id.
    pub fn new() -> Self {
        Self::with_id(EntityId::generate())
    }

    /// Creates a blank scene with a caller-provided id.
    pub fn with_id(id: EntityId) -> Self {
        Self {
            id,
            title: NEW_SCENE_TITLE.to_string(),
            summary: String::new(),
            tags: Vec::new(),
            characters: Vec::new(),
            color: COLOR_SWATCHES[0].to_string(),
            duration: NEW_SCENE_MINUTES,
            notes: String::new(),
            act: Act::Act1,
            extra: Map::new(),
        }
    }

    /// Decodes a scene-like JSON value without failing.
    ///
    /// Non-object input decodes as an empty record. A missing or blank id is
    /// replaced with a generated one so the record stays addressable.
    pub fn from_json(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        let id = match fields.remove("id") {
            Some(Value::String(text)) => EntityId::parse(text),
            Some(Value::Number(number)) => EntityId::parse(number.to_string()),
            _ => None,
        }
        .unwrap_or_else(EntityId::generate);

        let act = match fields.remove("act") {
            Some(Value::String(text)) => Act::parse(text.as_str()).unwrap_or_default(),
            _ => Act::Act1,
        };

        Self {
            id,
            title: coerce_string(fields.remove("title")),
            summary: coerce_string(fields.remove("summary")),
            tags: coerce_string_list(fields.remove("tags")),
            characters: coerce_string_list(fields.remove("characters")),
            color: coerce_string(fields.remove("color")),
            duration: coerce_minutes(fields.remove("duration")),
            notes: coerce_string(fields.remove("notes")),
            act,
            extra: fields,
        }
    }

    /// Duration clamped to the canonical range, for aggregate math.
    pub fn minutes(&self) -> f64 {
        sanitize_minutes(self.duration)
    }

    /// Returns the scene with its duration clamped to the canonical range.
    pub fn normalized(mut self) -> Self {
        self.duration = sanitize_minutes(self.duration);
        self
    }
}

struct Minutes(f64);

impl Serialize for Minutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_minutes(&self.0, serializer)
    }
}

impl Serialize for Scene {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = self
            .extra
            .iter()
            .filter(|(key, _)| !FIELD_NAMES.contains(&key.as_str()))
            .collect::<Vec<_>>();

        let mut map = serializer.serialize_map(Some(FIELD_NAMES.len() + extra.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("summary", &self.summary)?;
        map.serialize_entry("tags", &self.tags)?;
        map.serialize_entry("characters", &self.characters)?;
        map.serialize_entry("color", &self.color)?;
        map.serialize_entry("duration", &Minutes(self.minutes()))?;
        map.serialize_entry("notes", &self.notes)?;
        map.serialize_entry("act", &self.act)?;
        for (key, value) in extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for Scene {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(value))
    }
}

/// Partial scene update. `None` fields keep the existing value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenePatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub characters: Option<Vec<String>>,
    pub color: Option<String>,
    pub duration: Option<f64>,
    pub notes: Option<String>,
    pub act: Option<Act>,
}

impl ScenePatch {
    /// Patch that only moves a scene to another act.
    pub fn act(act: Act) -> Self {
        Self {
            act: Some(act),
            ..Self::default()
        }
    }

    /// Merges this patch into `scene`. The id is never touched.
    pub fn apply_to(&self, scene: &mut Scene) {
        if let Some(title) = &self.title {
            scene.title = title.clone();
        }
        if let Some(summary) = &self.summary {
            scene.summary = summary.clone();
        }
        if let Some(tags) = &self.tags {
            scene.tags = tags.clone();
        }
        if let Some(characters) = &self.characters {
            scene.characters = characters.clone();
        }
        if let Some(color) = &self.color {
            scene.color = color.clone();
        }
        if let Some(duration) = self.duration {
            scene.duration = sanitize_minutes(duration);
        }
        if let Some(notes) = &self.notes {
            scene.notes = notes.clone();
        }
        if let Some(act) = self.act {
            scene.act = act;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Act, Scene, ScenePatch, COLOR_SWATCHES};
    use crate::model::id::EntityId;
    use serde_json::json;

    #[test]
    fn act_order_is_canonical() {
        assert!(Act::Act1 < Act::Act2 && Act::Act2 < Act::Act3);
        assert_eq!(Act::ALL.map(Act::rank), [0, 1, 2]);
        assert_eq!(serde_json::to_value(Act::Act2).unwrap(), json!("ACT2"));
    }

    #[test]
    fn from_json_defaults_invalid_act_and_keeps_unknown_fields() {
        let scene = Scene::from_json(json!({
            "id": "abc",
            "title": "X",
            "act": "ACT9",
            "duration": "7",
            "mood": "rainy"
        }));
        assert_eq!(scene.id.as_str(), "abc");
        assert_eq!(scene.act, Act::Act1);
        assert_eq!(scene.duration, 7.0);
        assert_eq!(scene.extra.get("mood"), Some(&json!("rainy")));

        let encoded = serde_json::to_value(&scene).unwrap();
        assert_eq!(encoded["mood"], "rainy");
        assert_eq!(encoded["duration"], 7);
    }

    #[test]
    fn extra_keys_never_shadow_known_fields() {
        let mut scene = Scene::with_id(EntityId::from("s1"));
        scene.title = "本物".to_string();
        scene.extra.insert("title".to_string(), json!("偽物"));
        scene.extra.insert("mood".to_string(), json!("dark"));

        let encoded = serde_json::to_string(&scene).unwrap();
        assert_eq!(encoded.matches("\"title\"").count(), 1);
        let decoded: Scene = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.title, "本物");
        assert_eq!(decoded.extra.get("mood"), Some(&json!("dark")));
    }

    #[test]
    fn normalized_clamps_invalid_durations() {
        for raw in [-7.0, f64::NAN, f64::INFINITY] {
            let mut scene = Scene::new();
            scene.duration = raw;
            assert_eq!(scene.normalized().duration, 0.0);
        }
        let mut scene = Scene::new();
        scene.duration = 1e300;
        assert_eq!(scene.normalized().duration, 1e300);
    }

    #[test]
    fn from_json_tolerates_non_object_records() {
        let scene = Scene::from_json(json!(42));
        assert!(!scene.id.as_str().is_empty());
        assert_eq!(scene.title, "");
        assert_eq!(scene.act, Act::Act1);
    }

    #[test]
    fn new_scene_uses_editor_defaults() {
        let scene = Scene::new();
        assert_eq!(scene.color, COLOR_SWATCHES[0]);
        assert_eq!(scene.duration, 3.0);
        assert!(scene.tags.is_empty());
    }

    #[test]
    fn patch_merges_only_present_fields_and_clamps_duration() {
        let mut scene = Scene::new();
        let original_title = scene.title.clone();
        ScenePatch {
            duration: Some(-3.0),
            act: Some(Act::Act3),
            ..ScenePatch::default()
        }
        .apply_to(&mut scene);
        assert_eq!(scene.title, original_title);
        assert_eq!(scene.duration, 0.0);
        assert_eq!(scene.act, Act::Act3);
    }
}
