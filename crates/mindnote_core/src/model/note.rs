//! Sticky-note and category model.
//!
//! # Invariants
//! - `created_at <= updated_at` for notes created through `NotesBook`.
//! - `Category::note_count` is derived data, recomputed by the notes book.

use serde::{Deserialize, Serialize};

/// Category that receives notes from a deleted category.
pub const FALLBACK_CATEGORY_ID: &str = "personal";

/// One sticky note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "fallback_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

fn fallback_category() -> String {
    FALLBACK_CATEGORY_ID.to_string()
}

/// Caller-supplied fields of a new note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_pinned: bool,
    pub color: Option<String>,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            category: fallback_category(),
            tags: Vec::new(),
            is_pinned: false,
            color: None,
        }
    }
}

/// Partial update for a note; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_pinned: Option<bool>,
    pub color: Option<Option<String>>,
}

impl Note {
    pub(crate) fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(is_pinned) = patch.is_pinned {
            self.is_pinned = is_pinned;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Note category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub note_count: usize,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            note_count: 0,
        }
    }
}

/// Caller-supplied fields of a new category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Categories present before the user creates any.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(FALLBACK_CATEGORY_ID, "Personal", "bg-blue-500"),
        Category::new("work", "Work", "bg-green-500"),
        Category::new("ideas", "Ideas", "bg-purple-500"),
        Category::new("todo", "To-Do", "bg-orange-500"),
    ]
}
