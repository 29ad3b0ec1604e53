//! Memo board domain model.

use crate::model::id::EntityId;
use serde::{Deserialize, Serialize};

/// Title given to freshly created memos.
pub const NEW_MEMO_TITLE: &str = "新規メモ";

/// Display fallback for memos whose title is blank.
pub const UNTITLED_MEMO_TITLE: &str = "無題メモ";

/// Free-form sticky note, independent of scenes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    /// Markdown source.
    #[serde(default)]
    pub body: String,
    /// Expanded/collapsed display state. Persisted with the memo.
    #[serde(default)]
    pub open: bool,
}

impl Memo {
    /// Creates an empty, expanded memo with a generated id.
    pub fn new() -> Self {
        Self {
            id: EntityId::generate(),
            title: NEW_MEMO_TITLE.to_string(),
            body: String::new(),
            open: true,
        }
    }

    /// Title to show on the board.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_MEMO_TITLE
        } else {
            self.title.as_str()
        }
    }
}

impl Default for Memo {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial memo update. `None` fields keep the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub open: Option<bool>,
}

impl MemoPatch {
    pub fn apply_to(&self, memo: &mut Memo) {
        if let Some(title) = &self.title {
            memo.title = title.clone();
        }
        if let Some(body) = &self.body {
            memo.body = body.clone();
        }
        if let Some(open) = self.open {
            memo.open = open;
        }
    }
}
