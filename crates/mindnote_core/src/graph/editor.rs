//! Mind-map editor facade.
//!
//! # Responsibility
//! - Route canvas clicks and toolbar actions to the graph store.
//! - Keep selection consistent with store mutations.
//! - Run explicit save/load; there is no autosave.
//!
//! # Invariants
//! - Newly created nodes (add, paste, duplicate) become selected.
//! - Deleting the selected node returns the interaction state to `Idle`.
//! - A failed import leaves both store and selection untouched.

use crate::graph::interaction::{ClickOutcome, InteractionState};
use crate::graph::store::{GraphError, GraphResult, GraphStore};
use crate::model::document::MapDocument;
use crate::model::node::{NodeId, NodePatch, NodeStyle, Position, TextStyle};
use crate::persistence::json_bridge::{read_import, write_export, ImportError};
use log::warn;
use std::path::{Path, PathBuf};

/// Action requested from a node toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    AddChild { position: Option<Position> },
    AddConnection,
    Delete,
    Copy,
    Paste,
    Duplicate,
    Style(NodeStyle),
    TextStyle(TextStyle),
    Emoji(String),
    Media(String),
    Link(String),
    Comment(String),
    Label(String),
}

/// What a toolbar action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A node was created and selected.
    NodeCreated(NodeId),
    /// The node was removed.
    NodeDeleted(NodeId),
    /// Connecting mode started from this node.
    Connecting(NodeId),
    /// The node snapshot is on the clipboard.
    Copied,
    /// Node content changed in place.
    Updated,
}

/// Graph store plus the interaction state of one open map.
#[derive(Debug, Clone, Default)]
pub struct MapEditor {
    store: GraphStore,
    interaction: InteractionState,
}

impl MapEditor {
    pub fn new(store: GraphStore) -> Self {
        Self {
            store,
            interaction: InteractionState::Idle,
        }
    }

    pub fn from_document(document: MapDocument) -> Self {
        Self::new(GraphStore::from_document(document))
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn selected(&self) -> Option<&str> {
        self.interaction.selected()
    }

    pub fn has_clipboard(&self) -> bool {
        self.store.clipboard().is_some()
    }

    /// Handles a click on a node; may create an edge in connecting mode.
    pub fn click_node(&mut self, node_id: &str) -> GraphResult<ClickOutcome> {
        if !self.store.contains_node(node_id) {
            return Err(GraphError::NodeNotFound(node_id.to_string()));
        }
        let outcome = self.interaction.click_node(node_id);
        if let ClickOutcome::Connect { source, target } = &outcome {
            self.store.connect(source, target)?;
        }
        Ok(outcome)
    }

    pub fn click_pane(&mut self) {
        self.interaction.click_pane();
    }

    /// Starts connecting mode from the current selection.
    pub fn begin_connection(&mut self) -> bool {
        self.interaction.begin_connection()
    }

    /// Applies a toolbar action to `node_id`.
    pub fn apply(&mut self, node_id: &str, action: ToolbarAction) -> GraphResult<ActionOutcome> {
        let outcome = match action {
            ToolbarAction::AddChild { position } => {
                let created = self.store.add_node(node_id, position)?;
                self.interaction.select(&created);
                ActionOutcome::NodeCreated(created)
            }
            ToolbarAction::AddConnection => {
                if !self.store.contains_node(node_id) {
                    return Err(GraphError::NodeNotFound(node_id.to_string()));
                }
                self.interaction.begin_connection_from(node_id);
                ActionOutcome::Connecting(node_id.to_string())
            }
            ToolbarAction::Delete => {
                let deleted = self.store.delete_node(node_id)?;
                self.interaction.node_deleted(&deleted.node.id);
                ActionOutcome::NodeDeleted(deleted.node.id)
            }
            ToolbarAction::Copy => {
                self.store.copy_node(node_id)?;
                ActionOutcome::Copied
            }
            ToolbarAction::Paste => {
                let created = self.store.paste_node()?;
                self.interaction.select(&created);
                ActionOutcome::NodeCreated(created)
            }
            ToolbarAction::Duplicate => {
                let created = self.store.duplicate_node(node_id)?;
                self.interaction.select(&created);
                ActionOutcome::NodeCreated(created)
            }
            ToolbarAction::Style(style) => {
                self.store.set_style(node_id, style)?;
                ActionOutcome::Updated
            }
            ToolbarAction::TextStyle(text_style) => {
                self.store.set_text_style(node_id, text_style)?;
                ActionOutcome::Updated
            }
            ToolbarAction::Emoji(emoji) => {
                self.store.set_emoji(node_id, emoji)?;
                ActionOutcome::Updated
            }
            ToolbarAction::Media(reference) => {
                self.store.set_media(node_id, reference)?;
                ActionOutcome::Updated
            }
            ToolbarAction::Link(url) => {
                self.store.add_link(node_id, &url)?;
                ActionOutcome::Updated
            }
            ToolbarAction::Comment(text) => {
                self.store.add_comment(node_id, &text)?;
                ActionOutcome::Updated
            }
            ToolbarAction::Label(label) => {
                self.store.set_label(node_id, &label)?;
                ActionOutcome::Updated
            }
        };
        Ok(outcome)
    }

    /// Raw partial update, bypassing the content rules.
    pub fn update_node_data(&mut self, node_id: &str, patch: NodePatch) -> GraphResult<()> {
        self.store.update_node_data(node_id, patch)
    }

    pub fn move_node(&mut self, node_id: &str, position: Position) -> GraphResult<()> {
        self.store.move_node(node_id, position)
    }

    /// Mutable access for content operations not routed through the toolbar.
    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    /// Pretty JSON of the current map.
    pub fn export_json(&self) -> String {
        self.store.save()
    }

    /// Loads a JSON map, resetting selection on success.
    pub fn import_json(&mut self, raw: &str) -> Result<(), ImportError> {
        self.store.load(raw)?;
        self.interaction = InteractionState::Idle;
        Ok(())
    }

    /// Writes `mindmap.json` into `dir`.
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        write_export(&self.store.document(), dir)
    }

    /// Reads a user-selected file and replaces the map with it.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<(), ImportError> {
        match read_import(path) {
            Ok(document) => {
                self.store.replace_document(document);
                self.interaction = InteractionState::Idle;
                Ok(())
            }
            Err(err) => {
                warn!("event=map_import module=graph status=error error={err}");
                Err(err)
            }
        }
    }
}
