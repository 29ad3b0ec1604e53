//! Scene search entry points.
//!
//! # Responsibility
//! - Match scenes against query text, tag and sidebar selection.
//! - Keep filter semantics in one place for every board view.

pub mod filter;
