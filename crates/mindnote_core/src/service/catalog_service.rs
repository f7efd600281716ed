//! Recent/favorite map catalog.
//!
//! # Responsibility
//! - Maintain the recent-maps list (newest first, capped) and the
//!   favorite-maps list.
//! - Provide the dashboard browsing filter.
//!
//! # Invariants
//! - The recent list never exceeds the configured limit; the oldest entry is
//!   evicted first regardless of favorite status.
//! - Favorites are only toggled for maps present in the recent list.
//! - Catalog mutations never touch map documents.

use crate::clock::now_epoch_ms;
use crate::model::catalog::{MapCatalogEntry, MapTemplate};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for catalog use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    MapNotFound(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MapNotFound(id) => write!(f, "map not found in catalog: {id}"),
        }
    }
}

impl Error for CatalogError {}

/// Which list the dashboard is browsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogFilter {
    #[default]
    All,
    Recent,
    Favorites,
}

/// Recent and favorite map metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCatalog {
    recent: Vec<MapCatalogEntry>,
    favorites: Vec<MapCatalogEntry>,
    recent_limit: usize,
}

impl MapCatalog {
    /// Builds a catalog from persisted lists, trimming an oversized recent
    /// list.
    pub fn new(
        mut recent: Vec<MapCatalogEntry>,
        favorites: Vec<MapCatalogEntry>,
        recent_limit: usize,
    ) -> Self {
        recent.truncate(recent_limit);
        Self {
            recent,
            favorites,
            recent_limit,
        }
    }

    pub fn empty(recent_limit: usize) -> Self {
        Self::new(Vec::new(), Vec::new(), recent_limit)
    }

    pub fn recent(&self) -> &[MapCatalogEntry] {
        &self.recent
    }

    pub fn favorites(&self) -> &[MapCatalogEntry] {
        &self.favorites
    }

    pub fn entry(&self, map_id: &str) -> Option<&MapCatalogEntry> {
        self.recent.iter().find(|entry| entry.id == map_id)
    }

    /// Creates a catalog entry for a new map from `template`.
    pub fn create_from_template(&mut self, template: &MapTemplate) -> MapCatalogEntry {
        let entry = MapCatalogEntry {
            id: Uuid::new_v4().to_string(),
            name: template.name.to_string(),
            kind: template.kind.to_string(),
            template_id: Some(template.id.to_string()),
            timestamp: now_epoch_ms(),
            is_favorite: false,
        };
        self.push_recent(entry.clone());
        entry
    }

    /// Prepends an entry, dropping any older entry with the same id and
    /// evicting past the limit.
    pub fn push_recent(&mut self, entry: MapCatalogEntry) {
        self.recent.retain(|existing| existing.id != entry.id);
        self.recent.insert(0, entry);
        if self.recent.len() > self.recent_limit {
            let evicted = self.recent.len() - self.recent_limit;
            self.recent.truncate(self.recent_limit);
            debug!("event=catalog_evict module=catalog status=ok evicted={evicted}");
        }
    }

    /// Flips the favorite flag and mirrors it into the favorites list.
    pub fn toggle_favorite(&mut self, map_id: &str) -> Result<MapCatalogEntry, CatalogError> {
        let entry = self
            .recent
            .iter_mut()
            .find(|entry| entry.id == map_id)
            .ok_or_else(|| CatalogError::MapNotFound(map_id.to_string()))?;
        entry.is_favorite = !entry.is_favorite;
        let updated = entry.clone();

        self.favorites.retain(|favorite| favorite.id != map_id);
        if updated.is_favorite {
            self.favorites.push(updated.clone());
        }
        Ok(updated)
    }

    /// Removes a map from both lists. Returns whether anything was removed.
    pub fn delete_map(&mut self, map_id: &str) -> bool {
        let before = self.recent.len() + self.favorites.len();
        self.recent.retain(|entry| entry.id != map_id);
        self.favorites.retain(|entry| entry.id != map_id);
        before != self.recent.len() + self.favorites.len()
    }

    /// Adds a non-favorite copy of a recent map under a new id.
    pub fn duplicate_map(&mut self, map_id: &str) -> Result<MapCatalogEntry, CatalogError> {
        let source = self
            .entry(map_id)
            .cloned()
            .ok_or_else(|| CatalogError::MapNotFound(map_id.to_string()))?;
        let copy = MapCatalogEntry {
            id: Uuid::new_v4().to_string(),
            name: format!("{} (Copy)", source.name),
            timestamp: now_epoch_ms(),
            is_favorite: false,
            ..source
        };
        self.push_recent(copy.clone());
        Ok(copy)
    }

    /// Lists entries for `filter`, keeping names containing `query`
    /// (case-insensitive).
    pub fn browse(&self, filter: CatalogFilter, query: &str) -> Vec<&MapCatalogEntry> {
        let source = match filter {
            CatalogFilter::All | CatalogFilter::Recent => &self.recent,
            CatalogFilter::Favorites => &self.favorites,
        };
        let query = query.trim().to_lowercase();
        source
            .iter()
            .filter(|entry| query.is_empty() || entry.name.to_lowercase().contains(&query))
            .collect()
    }
}
