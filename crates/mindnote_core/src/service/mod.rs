//! Core use-case services.
//!
//! # Responsibility
//! - Notes and categories (`notes_service`).
//! - Recent/favorite map catalog (`catalog_service`).
//! - Persisted application state over a key-value store (`app_state`).

pub mod app_state;
pub mod catalog_service;
pub mod notes_service;
