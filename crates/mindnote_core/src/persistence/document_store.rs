//! Pluggable storage for map documents.
//!
//! # Responsibility
//! - Decouple the in-memory graph from the storage mechanism.
//! - Provide file-backed and key-value-backed implementations.
//!
//! # Invariants
//! - `load` returns `Ok(None)` when nothing was saved yet.
//! - A stored value that fails to decode is an error, never a silent
//!   default; callers decide the fallback.

use crate::model::document::MapDocument;
use crate::persistence::json_bridge::{export_document, parse_document, ImportError};
use crate::repo::kv_repo::{KeyValueStore, KvError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Key prefix of map documents inside a key-value store.
pub const MAP_DOCUMENT_KEY_PREFIX: &str = "mindmap:";

/// Returns the storage key of one map's document.
pub fn map_document_key(map_id: &str) -> String {
    format!("{MAP_DOCUMENT_KEY_PREFIX}{map_id}")
}

/// Errors from document storage backends.
#[derive(Debug)]
pub enum DocumentStoreError {
    Decode(ImportError),
    Kv(KvError),
    Io(std::io::Error),
}

impl Display for DocumentStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "{err}"),
            Self::Kv(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "document file error: {err}"),
        }
    }
}

impl Error for DocumentStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Kv(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ImportError> for DocumentStoreError {
    fn from(value: ImportError) -> Self {
        match value {
            ImportError::Io(err) => Self::Io(err),
            other => Self::Decode(other),
        }
    }
}

impl From<KvError> for DocumentStoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

impl From<std::io::Error> for DocumentStoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Load/save contract for one map document.
pub trait DocumentStore {
    fn load(&self) -> Result<Option<MapDocument>, DocumentStoreError>;
    fn save(&mut self, document: &MapDocument) -> Result<(), DocumentStoreError>;
}

/// Stores one document as a pretty JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileDocumentStore {
    path: PathBuf,
}

impl JsonFileDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileDocumentStore {
    fn load(&self) -> Result<Option<MapDocument>, DocumentStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(Some(parse_document(&raw)?))
    }

    fn save(&mut self, document: &MapDocument) -> Result<(), DocumentStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, export_document(document))?;
        debug!(
            "event=document_save module=persistence status=ok backend=file nodes={}",
            document.nodes.len()
        );
        Ok(())
    }
}

/// Stores one map's document under `mindmap:<id>` in a key-value store.
pub struct KvDocumentStore<S: KeyValueStore> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> KvDocumentStore<S> {
    pub fn new(kv: S, map_id: &str) -> Self {
        Self {
            kv,
            key: map_document_key(map_id),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_inner(self) -> S {
        self.kv
    }
}

impl<S: KeyValueStore> DocumentStore for KvDocumentStore<S> {
    fn load(&self) -> Result<Option<MapDocument>, DocumentStoreError> {
        match self.kv.get(&self.key)? {
            Some(raw) => Ok(Some(parse_document(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, document: &MapDocument) -> Result<(), DocumentStoreError> {
        self.kv.set(&self.key, &export_document(document))?;
        debug!(
            "event=document_save module=persistence status=ok backend=kv nodes={}",
            document.nodes.len()
        );
        Ok(())
    }
}
