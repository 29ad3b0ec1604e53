//! Scene import/export through a versioned JSON envelope.
//!
//! # Responsibility
//! - Encode the scene collection as `{version, updatedAt, scenes}`.
//! - Decode either that envelope or a bare scene array, upgrading records.
//!
//! # Invariants
//! - Decoding never partially applies; callers get all scenes or an error.
//! - Upgraded records always carry a valid act and a unique id.
//! - Unknown record fields pass through unchanged.

use crate::collection;
use crate::model::scene::Scene;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use log::warn;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Envelope version written by exports.
pub const EXPORT_VERSION: u32 = 7;

/// Import failure. The current collection is left untouched in every case.
#[derive(Debug)]
pub enum ImportError {
    /// Input text is not JSON.
    InvalidJson(serde_json::Error),
    /// JSON is neither an array nor an object with a `scenes` array.
    WrongShape(&'static str),
    /// A newer import was started before this one finished.
    Superseded { ticket: u64, latest: u64 },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "import file is not valid JSON: {err}"),
            Self::WrongShape(found) => write!(
                f,
                "import file must be a scene array or an object with a `scenes` array, found {found}"
            ),
            Self::Superseded { ticket, latest } => write!(
                f,
                "import #{ticket} was superseded by import #{latest}"
            ),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            Self::WrongShape(_) => None,
            Self::Superseded { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// Export envelope as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope<'a> {
    pub version: u32,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    pub scenes: &'a [Scene],
}

impl<'a> ExportEnvelope<'a> {
    pub fn new(scenes: &'a [Scene], updated_at: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION,
            updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            scenes,
        }
    }
}

/// Encodes `scenes` as a pretty-printed export document.
pub fn export_scenes(scenes: &[Scene], updated_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportEnvelope::new(scenes, updated_at))
}

/// Suggested file name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("scenario-{}.json", date.format("%Y-%m-%d"))
}

/// Decodes an import document into a full replacement scene collection.
pub fn import_scenes(text: &str) -> Result<Vec<Scene>, ImportError> {
    let document: Value = serde_json::from_str(text)?;
    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut fields) => match fields.remove("scenes") {
            Some(Value::Array(records)) => records,
            Some(_) => return Err(ImportError::WrongShape("`scenes` that is not an array")),
            None => return Err(ImportError::WrongShape("object without `scenes`")),
        },
        Value::Null => return Err(ImportError::WrongShape("null")),
        Value::Bool(_) => return Err(ImportError::WrongShape("boolean")),
        Value::Number(_) => return Err(ImportError::WrongShape("number")),
        Value::String(_) => return Err(ImportError::WrongShape("string")),
    };
    Ok(upgrade_records(records))
}

/// Upgrades raw scene records into canonical scenes.
///
/// Missing or falsy acts become `ACT1`; repeated ids get a fresh id so the
/// collection stays addressable.
pub fn upgrade_records(records: Vec<Value>) -> Vec<Scene> {
    let scenes = records.into_iter().map(Scene::from_json).collect();
    let (scenes, reassigned) = collection::dedupe_ids(scenes);
    if reassigned > 0 {
        warn!(
            "event=scene_import module=exchange status=ok id_conflicts={} scenes={}",
            reassigned,
            scenes.len()
        );
    }
    scenes
}
