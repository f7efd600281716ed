//! Repository layer: local key-value storage.
//!
//! # Responsibility
//! - Define the storage contract used by persisted dashboard state.
//! - Isolate SQLite query details from services.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidKey`,
//!   `MissingTable`) in addition to DB transport errors.

pub mod kv_repo;
