//! Selection and connection-drawing state machine.
//!
//! # Invariants
//! - At most one node is selected; connecting mode remembers its origin.
//! - Clicking the connection origin again never yields a self-loop.
//! - Clicking the canvas background always returns to `Idle`.

use crate::model::node::NodeId;

/// Ephemeral state deciding how the next click is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    NodeSelected(NodeId),
    Connecting(NodeId),
}

/// What a node click asks the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The clicked node is now selected.
    Selected(NodeId),
    /// Connection mode ended on a different node; an edge should be added.
    Connect { source: NodeId, target: NodeId },
    /// Click on the connection origin; nothing changes.
    Ignored,
}

impl InteractionState {
    /// Selected node id, if any. The origin counts while connecting.
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::NodeSelected(id) | Self::Connecting(id) => Some(id.as_str()),
            Self::Idle => None,
        }
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting(_))
    }

    /// Handles a click on a node.
    pub fn click_node(&mut self, node_id: &str) -> ClickOutcome {
        match self {
            Self::Connecting(from) if from.as_str() == node_id => ClickOutcome::Ignored,
            Self::Connecting(from) => {
                let outcome = ClickOutcome::Connect {
                    source: from.clone(),
                    target: node_id.to_string(),
                };
                *self = Self::Idle;
                outcome
            }
            Self::Idle | Self::NodeSelected(_) => {
                *self = Self::NodeSelected(node_id.to_string());
                ClickOutcome::Selected(node_id.to_string())
            }
        }
    }

    /// Enters connecting mode from the selected node.
    ///
    /// Returns `false` when no node is selected.
    pub fn begin_connection(&mut self) -> bool {
        match self {
            Self::NodeSelected(id) => {
                *self = Self::Connecting(id.clone());
                true
            }
            Self::Connecting(_) => true,
            Self::Idle => false,
        }
    }

    /// Enters connecting mode from an explicit node (node toolbar path).
    pub fn begin_connection_from(&mut self, node_id: &str) {
        *self = Self::Connecting(node_id.to_string());
    }

    /// Selects a node programmatically, leaving connecting mode.
    pub fn select(&mut self, node_id: &str) {
        *self = Self::NodeSelected(node_id.to_string());
    }

    /// Handles a click on the empty canvas.
    pub fn click_pane(&mut self) {
        *self = Self::Idle;
    }

    /// Drops any reference to a deleted node.
    pub fn node_deleted(&mut self, node_id: &str) {
        if self.selected() == Some(node_id) {
            *self = Self::Idle;
        }
    }
}
