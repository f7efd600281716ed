//! Domain model for mind maps, the map catalog and sticky notes.
//!
//! # Responsibility
//! - Define canonical data structures shared by graph, persistence and
//!   service layers.
//! - Own the JSON wire naming (camelCase, `type` tags) of every record.
//!
//! # Invariants
//! - Every map has exactly one root node with id `root-node`.
//! - Generated ids are never reused within a session.

pub mod catalog;
pub mod document;
pub mod edge;
pub mod node;
pub mod note;
