//! Mind-map graph editing.
//!
//! # Responsibility
//! - Own the node/edge collections of the open map (`store`).
//! - Apply node content editing rules (`content`).
//! - Track selection and connection-drawing mode (`interaction`).
//! - Combine both behind one editor facade (`editor`).
//!
//! # Invariants
//! - Only `GraphStore` methods mutate node/edge collections.
//! - Every operation reports invalid input as a `GraphError` instead of
//!   panicking.

pub mod content;
pub mod editor;
pub mod interaction;
pub mod store;
