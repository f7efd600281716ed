//! One-shot JSON export/import of a map document.
//!
//! # Responsibility
//! - Encode the graph as pretty-printed `{nodes, edges}` JSON.
//! - Decode user-selected files, rejecting anything without both keys.
//!
//! # Invariants
//! - Import never partially applies: callers get a full document or an
//!   error.
//! - Unknown top-level and per-record keys are ignored.
//! - The transient `isGenerating` flag never survives a decode.

use crate::model::document::MapDocument;
use log::{error, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name used for map exports.
pub const EXPORT_FILE_NAME: &str = "mindmap.json";

/// Errors from decoding or reading an import file.
#[derive(Debug)]
pub enum ImportError {
    /// Input is not valid JSON.
    Json(serde_json::Error),
    /// Top-level value lacks `nodes` or `edges`.
    MissingField(&'static str),
    /// `nodes`/`edges` are present but do not match the record shape.
    Shape(serde_json::Error),
    /// Import file could not be read.
    Io(std::io::Error),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "map file is not valid JSON: {err}"),
            Self::MissingField(field) => write!(f, "map file has no `{field}` field"),
            Self::Shape(err) => write!(f, "map file has an unexpected shape: {err}"),
            Self::Io(err) => write!(f, "map file could not be read: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) | Self::Shape(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::MissingField(_) => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Encodes `document` as pretty-printed JSON.
pub fn export_document(document: &MapDocument) -> String {
    match serde_json::to_string_pretty(document) {
        Ok(json) => json,
        Err(err) => {
            // Only non-string map keys can fail here, and the model has none.
            error!("event=map_export module=persistence status=error error={err}");
            String::from("{\n  \"nodes\": [],\n  \"edges\": []\n}")
        }
    }
}

/// Decodes a map document, requiring both `nodes` and `edges` keys.
pub fn parse_document(raw: &str) -> Result<MapDocument, ImportError> {
    let value: Value = serde_json::from_str(raw).map_err(ImportError::Json)?;
    for field in ["nodes", "edges"] {
        match value.get(field) {
            Some(Value::Null) | None => return Err(ImportError::MissingField(field)),
            Some(_) => {}
        }
    }
    let mut document: MapDocument = serde_json::from_value(value).map_err(ImportError::Shape)?;
    for node in &mut document.nodes {
        node.data.drop_transient_keys();
    }
    Ok(document)
}

/// Writes `mindmap.json` into `dir` and returns its path.
pub fn write_export(document: &MapDocument, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    std::fs::write(&path, export_document(document))?;
    info!(
        "event=map_export module=persistence status=ok nodes={} edges={}",
        document.nodes.len(),
        document.edges.len()
    );
    Ok(path)
}

/// Reads and decodes one import file.
pub fn read_import(path: impl AsRef<Path>) -> Result<MapDocument, ImportError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    parse_document(&raw)
}
