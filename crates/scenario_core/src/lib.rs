//! Core domain logic for the scenario planning board.
//! This crate owns the scene and memo collections and every rule about them;
//! front ends only call stores and read projections.

pub mod collection;
pub mod config;
pub mod db;
pub mod exchange;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod persist;
pub mod projection;
pub mod search;
pub mod storage;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use exchange::{export_file_name, export_scenes, import_scenes, ImportError, EXPORT_VERSION};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use markdown::{markdown_preview, render_markdown};
pub use model::coerce::split_list;
pub use model::id::EntityId;
pub use model::memo::{Memo, MemoPatch};
pub use model::scene::{Act, Scene, ScenePatch};
pub use projection::{
    kanban_columns, list_view, sidebar_entries, tag_universe, timeline, total_minutes,
    KanbanColumn, SidebarEntry, Timeline, TimelineBar,
};
pub use search::filter::SceneFilter;
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use store::{ImportTicket, MemoStore, SceneStore, SubscriptionId};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
