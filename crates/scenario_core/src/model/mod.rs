//! Domain model for the scene board and the memo board.
//!
//! # Responsibility
//! - Define canonical scene/memo records and the act enumeration.
//! - Own boundary coercion for loosely-typed stored or imported records.
//! - Provide first-run sample collections.
//!
//! # Invariants
//! - Every record is identified by a stable `EntityId`.
//! - Deletion is a hard removal from the owning sequence; there is no history.

pub mod coerce;
pub mod defaults;
pub mod id;
pub mod memo;
pub mod scene;
