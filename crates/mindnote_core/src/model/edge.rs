//! Mind-map edge model.
//!
//! # Invariants
//! - `source`/`target` reference node ids; the store never checks for
//!   self-loops, cycles or duplicate pairs.
//! - Visual styling is global, not per-edge data.

use crate::model::node::NodeId;
use serde::{Deserialize, Serialize};

/// Opaque edge identifier.
pub type EdgeId = String;

/// Stroke color shared by every edge.
pub const EDGE_STROKE_COLOR: &str = "#3b82f6";
/// Stroke width shared by every edge.
pub const EDGE_STROKE_WIDTH: f64 = 2.0;

/// Directed relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns whether this edge has `node_id` at either end.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
