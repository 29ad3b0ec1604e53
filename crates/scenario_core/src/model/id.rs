//! Opaque entity identifiers.
//!
//! # Responsibility
//! - Generate collision-resistant identifiers for new scenes and memos.
//! - Carry identifiers loaded from storage or import files verbatim.
//!
//! # Invariants
//! - Generated ids combine a millisecond clock with random entropy (UUIDv7).
//! - Ids are never rewritten once assigned; foreign ids keep their text.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier shared by scenes and memos.
///
/// Kept as an opaque string because older exports carry ids that are not
/// UUIDs (base36 random + timestamp strings).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing identifier text.
    ///
    /// Returns `None` for blank input; a blank id cannot be addressed.
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
