//! Persistence bridge for map documents.
//!
//! # Responsibility
//! - Export/import the graph as a `{nodes, edges}` JSON document.
//! - Offer a storage-agnostic `DocumentStore` contract for explicit
//!   save/load.
//!
//! # Invariants
//! - Documents are written only on explicit save; there is no autosave.

pub mod document_store;
pub mod json_bridge;
