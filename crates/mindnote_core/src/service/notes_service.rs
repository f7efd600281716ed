//! Sticky-notes use-case service.
//!
//! # Responsibility
//! - Provide note and category create/update/delete APIs.
//! - Provide search, category filtering, pinned-first ordering and the
//!   per-day calendar projection.
//!
//! # Invariants
//! - New notes are prepended; `updated_at` is bumped on every update.
//! - Deleting a category moves its notes to `personal`, which itself cannot
//!   be deleted.
//! - `note_count` on returned categories always reflects current notes.

use crate::clock::{epoch_ms_to_day, new_id, now_epoch_ms};
use crate::model::note::{
    default_categories, Category, CategoryDraft, CategoryPatch, Note, NoteDraft, NotePatch,
    FALLBACK_CATEGORY_ID,
};
use chrono::NaiveDate;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note and category use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesError {
    NoteNotFound(String),
    CategoryNotFound(String),
    /// The fallback category cannot be deleted.
    CategoryProtected(String),
    /// Category name was blank after trimming.
    InvalidCategoryName,
}

impl Display for NotesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::CategoryProtected(id) => write!(f, "category cannot be deleted: {id}"),
            Self::InvalidCategoryName => write!(f, "category name must not be blank"),
        }
    }
}

impl Error for NotesError {}

/// Notes plus categories, kept in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesBook {
    notes: Vec<Note>,
    categories: Vec<Category>,
}

impl Default for NotesBook {
    fn default() -> Self {
        Self::new(Vec::new(), default_categories())
    }
}

impl NotesBook {
    pub fn new(notes: Vec<Note>, categories: Vec<Category>) -> Self {
        let mut book = Self { notes, categories };
        book.refresh_counts();
        book
    }

    /// Notes in insertion order (newest first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    /// Creates a note and prepends it.
    pub fn add_note(&mut self, draft: NoteDraft) -> Note {
        let now = now_epoch_ms();
        let note = Note {
            id: new_id("note"),
            title: draft.title,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            is_pinned: draft.is_pinned,
            color: draft.color,
            created_at: now,
            updated_at: now,
        };
        self.notes.insert(0, note.clone());
        self.refresh_counts();
        debug!(
            "event=note_add module=notes status=ok notes={}",
            self.notes.len()
        );
        note
    }

    /// Merges `patch` into a note and bumps `updated_at`.
    pub fn update_note(&mut self, note_id: &str, patch: NotePatch) -> Result<Note, NotesError> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == note_id)
            .ok_or_else(|| NotesError::NoteNotFound(note_id.to_string()))?;
        note.apply(patch);
        note.updated_at = now_epoch_ms().max(note.created_at);
        let updated = note.clone();
        self.refresh_counts();
        Ok(updated)
    }

    /// Flips the pinned flag.
    pub fn toggle_pin(&mut self, note_id: &str) -> Result<Note, NotesError> {
        let pinned = self
            .note(note_id)
            .map(|note| note.is_pinned)
            .ok_or_else(|| NotesError::NoteNotFound(note_id.to_string()))?;
        self.update_note(
            note_id,
            NotePatch {
                is_pinned: Some(!pinned),
                ..NotePatch::default()
            },
        )
    }

    pub fn delete_note(&mut self, note_id: &str) -> Result<Note, NotesError> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == note_id)
            .ok_or_else(|| NotesError::NoteNotFound(note_id.to_string()))?;
        let removed = self.notes.remove(index);
        self.refresh_counts();
        Ok(removed)
    }

    /// Appends a user category.
    pub fn add_category(&mut self, draft: CategoryDraft) -> Result<Category, NotesError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(NotesError::InvalidCategoryName);
        }
        let category = Category::new(new_id("category"), name, draft.color);
        self.categories.push(category.clone());
        Ok(category)
    }

    pub fn update_category(
        &mut self,
        category_id: &str,
        patch: CategoryPatch,
    ) -> Result<Category, NotesError> {
        if let Some(name) = patch.name.as_deref() {
            if name.trim().is_empty() {
                return Err(NotesError::InvalidCategoryName);
            }
        }
        let category = self
            .categories
            .iter_mut()
            .find(|category| category.id == category_id)
            .ok_or_else(|| NotesError::CategoryNotFound(category_id.to_string()))?;
        if let Some(name) = patch.name {
            category.name = name.trim().to_string();
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        Ok(category.clone())
    }

    /// Deletes a category and moves its notes to `personal`.
    ///
    /// Returns the number of reassigned notes.
    pub fn delete_category(&mut self, category_id: &str) -> Result<usize, NotesError> {
        if category_id == FALLBACK_CATEGORY_ID {
            return Err(NotesError::CategoryProtected(category_id.to_string()));
        }
        let index = self
            .categories
            .iter()
            .position(|category| category.id == category_id)
            .ok_or_else(|| NotesError::CategoryNotFound(category_id.to_string()))?;
        self.categories.remove(index);

        let mut moved = 0;
        for note in self
            .notes
            .iter_mut()
            .filter(|note| note.category == category_id)
        {
            note.category = FALLBACK_CATEGORY_ID.to_string();
            moved += 1;
        }
        self.refresh_counts();
        debug!("event=category_delete module=notes status=ok moved_notes={moved}");
        Ok(moved)
    }

    /// Case-insensitive match on title, content or any tag. Blank → all.
    pub fn search_notes(&self, query: &str) -> Vec<&Note> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.notes.iter().collect();
        }
        self.notes
            .iter()
            .filter(|note| {
                note.title.to_lowercase().contains(&query)
                    || note.content.to_lowercase().contains(&query)
                    || note
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn filter_by_category(&self, category_id: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| note.category == category_id)
            .collect()
    }

    /// Board listing: optional search and category filter, pinned first,
    /// then most recently updated.
    pub fn sorted_notes(&self, query: &str, category_id: Option<&str>) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self
            .search_notes(query)
            .into_iter()
            .filter(|note| category_id.map_or(true, |id| note.category == id))
            .collect();
        notes.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        notes
    }

    /// Notes created on `day` (UTC), newest first.
    pub fn notes_on_day(&self, day: NaiveDate) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self
            .notes
            .iter()
            .filter(|note| epoch_ms_to_day(note.created_at) == Some(day))
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes
    }

    fn refresh_counts(&mut self) {
        for category in &mut self.categories {
            category.note_count = self
                .notes
                .iter()
                .filter(|note| note.category == category.id)
                .count();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NotesBook, NotesError};
    use crate::model::note::{CategoryDraft, NoteDraft, NotePatch};

    fn draft(title: &str, category: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            category: category.to_string(),
            ..NoteDraft::default()
        }
    }

    #[test]
    fn new_notes_are_prepended_and_counted() {
        let mut book = NotesBook::default();
        book.add_note(draft("first", "work"));
        let second = book.add_note(draft("second", "work"));

        assert_eq!(book.notes()[0].id, second.id);
        let work = book.categories().iter().find(|c| c.id == "work").unwrap();
        assert_eq!(work.note_count, 2);
    }

    #[test]
    fn update_unknown_note_is_reported() {
        let mut book = NotesBook::default();
        let err = book
            .update_note("missing", NotePatch::default())
            .unwrap_err();
        assert_eq!(err, NotesError::NoteNotFound("missing".to_string()));
    }

    #[test]
    fn personal_category_is_protected_and_blank_names_rejected() {
        let mut book = NotesBook::default();
        assert!(matches!(
            book.delete_category("personal"),
            Err(NotesError::CategoryProtected(_))
        ));
        assert_eq!(
            book.add_category(CategoryDraft {
                name: "  ".to_string(),
                color: "bg-red-500".to_string(),
            }),
            Err(NotesError::InvalidCategoryName)
        );
    }
}
