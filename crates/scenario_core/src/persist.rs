//! Best-effort persistence of whole collections into storage slots.
//!
//! # Responsibility
//! - Load a collection from one slot, falling back to a caller default.
//! - Snapshot a collection into one slot after every mutation.
//!
//! # Invariants
//! - `load` never returns an error; absent, unreadable or corrupt slots all
//!   yield the default.
//! - `save` never returns an error; in-memory state stays authoritative.
//! - Slot contents are never logged, only keys, sizes and error classes.

use crate::storage::KeyValueStore;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Slot holding the scene collection (JSON array of scenes).
pub const SCENES_SLOT: &str = "scenario-editor-v7";

/// Slot holding the memo collection (JSON array of memos).
pub const MEMOS_SLOT: &str = "scenario-memos-v1";

/// Outcome of a [`save`] call, for callers that want to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed,
}

/// Loads the value stored under `key`, or `default()` when that fails.
pub fn load<S, T, F>(store: &S, key: &str, default: F) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=slot_load module=persist status=absent key={key}");
            return default();
        }
        Err(err) => {
            warn!(
                "event=slot_load module=persist status=error key={} error_code=storage_read_failed error={}",
                key, err
            );
            return default();
        }
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => {
            debug!(
                "event=slot_load module=persist status=ok key={} bytes={}",
                key,
                raw.len()
            );
            value
        }
        Err(err) => {
            warn!(
                "event=slot_load module=persist status=error key={} bytes={} error_code=slot_corrupt line={} column={}",
                key,
                raw.len(),
                err.line(),
                err.column()
            );
            default()
        }
    }
}

/// Serializes `value` as JSON under `key`. Failures are logged and swallowed.
pub fn save<S, T>(store: &mut S, key: &str, value: &T) -> SaveOutcome
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                "event=slot_save module=persist status=error key={} error_code=encode_failed error={}",
                key, err
            );
            return SaveOutcome::Failed;
        }
    };

    match store.set(key, &raw) {
        Ok(()) => {
            debug!(
                "event=slot_save module=persist status=ok key={} bytes={}",
                key,
                raw.len()
            );
            SaveOutcome::Saved
        }
        Err(err) => {
            warn!(
                "event=slot_save module=persist status=error key={} bytes={} error_code=storage_write_failed error={}",
                key,
                raw.len(),
                err
            );
            SaveOutcome::Failed
        }
    }
}
