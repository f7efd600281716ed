//! Core domain logic for MindNote.
//! This crate is the single source of truth for mind-map and notes invariants.

pub mod clock;
pub mod config;
pub mod content;
pub mod db;
pub mod graph;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod repo;
pub mod service;

pub use config::{ConfigError, EditorConfig};
pub use graph::editor::{ActionOutcome, MapEditor, ToolbarAction};
pub use graph::interaction::{ClickOutcome, InteractionState};
pub use graph::store::{DeletedNode, GraphError, GraphResult, GraphStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::{find_template, MapCatalogEntry, MapTemplate, MAP_TEMPLATES};
pub use model::document::MapDocument;
pub use model::edge::{Edge, EdgeId};
pub use model::node::{
    Node, NodeComment, NodeData, NodeId, NodeLink, NodePatch, NodeStyle, Position, TextStyle,
    ROOT_NODE_ID,
};
pub use model::note::{Category, CategoryDraft, CategoryPatch, Note, NoteDraft, NotePatch};
pub use persistence::document_store::{
    DocumentStore, DocumentStoreError, JsonFileDocumentStore, KvDocumentStore,
};
pub use persistence::json_bridge::{export_document, parse_document, read_import, ImportError};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use service::app_state::{AppState, AppStateError, AppStateResult};
pub use service::catalog_service::{CatalogError, CatalogFilter, MapCatalog};
pub use service::notes_service::{NotesBook, NotesError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
