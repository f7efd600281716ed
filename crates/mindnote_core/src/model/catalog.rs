//! Map catalog metadata.
//!
//! Catalog entries describe maps for browsing; they are stored separately
//! from the map documents they name.

use serde::{Deserialize, Serialize};

/// Lightweight record listed in the recent/favorite map views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Unix epoch milliseconds of the last catalog touch.
    pub timestamp: i64,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Starting point offered when creating a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
}

/// Templates offered by the dashboard.
pub const MAP_TEMPLATES: &[MapTemplate] = &[MapTemplate {
    id: "blank",
    name: "Blank Canvas",
    description: "Start with a clean slate",
    kind: "mindmap",
}];

/// Looks up a built-in template by id.
pub fn find_template(id: &str) -> Option<&'static MapTemplate> {
    MAP_TEMPLATES.iter().find(|template| template.id == id)
}
