//! Persisted unit of one mind map.

use crate::model::edge::Edge;
use crate::model::node::Node;
use serde::{Deserialize, Serialize};

/// `{nodes, edges}` pair representing one map's full state.
///
/// There is no version or schema tag; extra top-level keys are ignored on
/// decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl MapDocument {
    /// Returns the document of a fresh map: one root node, no edges.
    pub fn with_root() -> Self {
        Self {
            nodes: vec![Node::root()],
            edges: Vec::new(),
        }
    }

    pub fn has_root(&self) -> bool {
        self.nodes.iter().any(Node::is_root)
    }
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::with_root()
    }
}
