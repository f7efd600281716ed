//! Application state over the local key-value store.
//!
//! # Responsibility
//! - Own notes, categories and the map catalog as one explicit state object.
//! - Read persisted lists once at construction and write the affected list
//!   after every mutation.
//! - Create, open and save per-map documents keyed by catalog id.
//!
//! # Invariants
//! - A missing or malformed persisted list falls back to its default and is
//!   logged; it never fails construction.
//! - Every catalog entry created here has a stored map document.
//! - Deleting a catalog entry leaves its map document in storage.

use crate::config::EditorConfig;
use crate::graph::store::GraphStore;
use crate::model::catalog::{MapCatalogEntry, MapTemplate};
use crate::model::document::MapDocument;
use crate::model::note::{
    default_categories, Category, CategoryDraft, CategoryPatch, Note, NoteDraft, NotePatch,
};
use crate::persistence::document_store::{DocumentStore, DocumentStoreError, KvDocumentStore};
use crate::repo::kv_repo::{KeyValueStore, KvError};
use crate::service::catalog_service::{CatalogError, MapCatalog};
use crate::service::notes_service::{NotesBook, NotesError};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the notes list.
pub const NOTES_KEY: &str = "notes";
/// Storage key of the categories list.
pub const CATEGORIES_KEY: &str = "categories";
/// Storage key of the recent-maps list.
pub const RECENT_MAPS_KEY: &str = "recentMaps";
/// Storage key of the favorite-maps list.
pub const FAVORITE_MAPS_KEY: &str = "favoriteMaps";

/// Errors from application-state use-cases.
#[derive(Debug)]
pub enum AppStateError {
    Notes(NotesError),
    Catalog(CatalogError),
    Storage(KvError),
    Document(DocumentStoreError),
    Encode(serde_json::Error),
}

impl Display for AppStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notes(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Document(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode persisted list: {err}"),
        }
    }
}

impl Error for AppStateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Notes(err) => Some(err),
            Self::Catalog(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Document(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<NotesError> for AppStateError {
    fn from(value: NotesError) -> Self {
        Self::Notes(value)
    }
}

impl From<CatalogError> for AppStateError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<KvError> for AppStateError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

impl From<DocumentStoreError> for AppStateError {
    fn from(value: DocumentStoreError) -> Self {
        Self::Document(value)
    }
}

impl From<serde_json::Error> for AppStateError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

pub type AppStateResult<T> = Result<T, AppStateError>;

/// Dashboard state: notes book, map catalog and their backing store.
pub struct AppState<S: KeyValueStore> {
    kv: S,
    notes: NotesBook,
    catalog: MapCatalog,
    config: EditorConfig,
}

impl<S: KeyValueStore> AppState<S> {
    /// Loads every persisted list from `kv` with default config.
    pub fn load(kv: S) -> Self {
        Self::load_with_config(kv, EditorConfig::default())
    }

    pub fn load_with_config(kv: S, config: EditorConfig) -> Self {
        let notes: Vec<Note> = read_list(&kv, NOTES_KEY).unwrap_or_default();
        let categories: Vec<Category> =
            read_list(&kv, CATEGORIES_KEY).unwrap_or_else(default_categories);
        let recent: Vec<MapCatalogEntry> = read_list(&kv, RECENT_MAPS_KEY).unwrap_or_default();
        let favorites: Vec<MapCatalogEntry> =
            read_list(&kv, FAVORITE_MAPS_KEY).unwrap_or_default();

        info!(
            "event=app_state_load module=service status=ok notes={} categories={} recent_maps={} favorite_maps={}",
            notes.len(),
            categories.len(),
            recent.len(),
            favorites.len()
        );

        Self {
            kv,
            notes: NotesBook::new(notes, categories),
            catalog: MapCatalog::new(recent, favorites, config.recent_maps_limit),
            config,
        }
    }

    pub fn notes(&self) -> &NotesBook {
        &self.notes
    }

    pub fn catalog(&self) -> &MapCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.kv
    }

    pub fn into_store(self) -> S {
        self.kv
    }

    pub fn add_note(&mut self, draft: NoteDraft) -> AppStateResult<Note> {
        let note = self.notes.add_note(draft);
        self.persist_notes()?;
        Ok(note)
    }

    pub fn update_note(&mut self, note_id: &str, patch: NotePatch) -> AppStateResult<Note> {
        let note = self.notes.update_note(note_id, patch)?;
        self.persist_notes()?;
        Ok(note)
    }

    pub fn toggle_pin(&mut self, note_id: &str) -> AppStateResult<Note> {
        let note = self.notes.toggle_pin(note_id)?;
        self.persist_notes()?;
        Ok(note)
    }

    pub fn delete_note(&mut self, note_id: &str) -> AppStateResult<Note> {
        let note = self.notes.delete_note(note_id)?;
        self.persist_notes()?;
        Ok(note)
    }

    pub fn add_category(&mut self, draft: CategoryDraft) -> AppStateResult<Category> {
        let category = self.notes.add_category(draft)?;
        self.persist_categories()?;
        Ok(category)
    }

    pub fn update_category(
        &mut self,
        category_id: &str,
        patch: CategoryPatch,
    ) -> AppStateResult<Category> {
        let category = self.notes.update_category(category_id, patch)?;
        self.persist_categories()?;
        Ok(category)
    }

    /// Deletes a category; reassigned notes are persisted too.
    pub fn delete_category(&mut self, category_id: &str) -> AppStateResult<usize> {
        let moved = self.notes.delete_category(category_id)?;
        self.persist_notes()?;
        self.persist_categories()?;
        Ok(moved)
    }

    /// Creates a catalog entry and stores a fresh root-only document for it.
    pub fn create_map(&mut self, template: &MapTemplate) -> AppStateResult<MapCatalogEntry> {
        let entry = self.catalog.create_from_template(template);
        self.persist_catalog()?;
        self.documents(&entry.id)
            .save(&MapDocument::with_root())?;
        info!("event=map_create module=service status=ok template={}", template.id);
        Ok(entry)
    }

    /// Duplicates a catalog entry together with its stored document.
    pub fn duplicate_map(&mut self, map_id: &str) -> AppStateResult<MapCatalogEntry> {
        let copy = self.catalog.duplicate_map(map_id)?;
        self.persist_catalog()?;
        let document = self
            .documents(map_id)
            .load()?
            .unwrap_or_else(MapDocument::with_root);
        self.documents(&copy.id).save(&document)?;
        Ok(copy)
    }

    pub fn toggle_favorite(&mut self, map_id: &str) -> AppStateResult<MapCatalogEntry> {
        let entry = self.catalog.toggle_favorite(map_id)?;
        self.persist_catalog()?;
        Ok(entry)
    }

    /// Removes a map from the catalog; its document is kept.
    pub fn delete_map(&mut self, map_id: &str) -> AppStateResult<bool> {
        let removed = self.catalog.delete_map(map_id);
        if removed {
            self.persist_catalog()?;
        }
        Ok(removed)
    }

    /// Opens a map's graph; a missing document yields a root-only map.
    pub fn open_map(&mut self, map_id: &str) -> AppStateResult<GraphStore> {
        let document = match self.documents(map_id).load() {
            Ok(Some(document)) => document,
            Ok(None) => MapDocument::with_root(),
            Err(DocumentStoreError::Decode(err)) => {
                warn!("event=map_open module=service status=fallback reason=decode error={err}");
                MapDocument::with_root()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(GraphStore::from_document_with_config(
            document,
            self.config.clone(),
        ))
    }

    /// Explicitly saves a map's graph under its catalog id.
    pub fn save_map(&mut self, map_id: &str, store: &GraphStore) -> AppStateResult<()> {
        self.documents(map_id).save(&store.document())?;
        Ok(())
    }

    fn documents(&mut self, map_id: &str) -> KvDocumentStore<&mut S> {
        KvDocumentStore::new(&mut self.kv, map_id)
    }

    fn persist_notes(&mut self) -> AppStateResult<()> {
        write_list(&mut self.kv, NOTES_KEY, self.notes.notes())?;
        // note counts live on categories
        write_list(&mut self.kv, CATEGORIES_KEY, self.notes.categories())
    }

    fn persist_categories(&mut self) -> AppStateResult<()> {
        write_list(&mut self.kv, CATEGORIES_KEY, self.notes.categories())
    }

    fn persist_catalog(&mut self) -> AppStateResult<()> {
        write_list(&mut self.kv, RECENT_MAPS_KEY, self.catalog.recent())?;
        write_list(&mut self.kv, FAVORITE_MAPS_KEY, self.catalog.favorites())
    }
}

fn read_list<S, T>(kv: &S, key: &str) -> Option<Vec<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!("event=state_read module=service status=error key={key} error={err}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(err) => {
            warn!("event=state_read module=service status=fallback key={key} error={err}");
            None
        }
    }
}

fn write_list<S, T>(kv: &mut S, key: &str, items: &[T]) -> AppStateResult<()>
where
    S: KeyValueStore,
    T: Serialize,
{
    let raw = serde_json::to_string(items)?;
    kv.set(key, &raw)?;
    Ok(())
}
