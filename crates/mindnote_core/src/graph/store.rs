//! In-memory node/edge store for one mind map.
//!
//! # Responsibility
//! - Own the canonical node and edge collections of the active map.
//! - Expose structural mutations that keep the graph invariants.
//!
//! # Invariants
//! - The root node (`root-node`) always exists and is never deleted.
//! - Deleting a node removes every edge with that node as source or target.
//! - A failed operation returns an error and leaves the store untouched.
//! - Edges are not deduplicated; self-loops are accepted here and only
//!   prevented by the interaction layer.

use crate::clock::new_id;
use crate::config::EditorConfig;
use crate::model::document::MapDocument;
use crate::model::edge::{Edge, EdgeId};
use crate::model::node::{
    Node, NodeData, NodeId, NodePatch, Position, DEFAULT_NODE_LABEL, ROOT_NODE_ID,
};
use crate::persistence::json_bridge::{export_document, parse_document, ImportError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GraphResult<T> = Result<T, GraphError>;

/// Reasons a graph operation did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Referenced node does not exist.
    NodeNotFound(NodeId),
    /// The root node cannot be deleted.
    RootProtected,
    /// Paste was requested with an empty clipboard.
    NothingCopied,
    /// Node has its busy flag set and refuses content edits.
    NodeBusy(NodeId),
    /// A source or target id was empty.
    EmptyId,
    /// Comment text was blank after trimming.
    EmptyComment,
    /// Link input was blank after trimming.
    EmptyLink,
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
            Self::RootProtected => write!(f, "root node cannot be deleted"),
            Self::NothingCopied => write!(f, "clipboard is empty"),
            Self::NodeBusy(id) => write!(f, "node is busy: {id}"),
            Self::EmptyId => write!(f, "edge endpoints must not be empty"),
            Self::EmptyComment => write!(f, "comment text must not be blank"),
            Self::EmptyLink => write!(f, "link url must not be blank"),
        }
    }
}

impl Error for GraphError {}

/// Result of a successful `delete_node`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedNode {
    pub node: Node,
    pub removed_edges: usize,
}

/// Node/edge collections plus the copy buffer of one map.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    clipboard: Option<Node>,
    config: EditorConfig,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Creates a store holding only the root node.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::from_document_with_config(MapDocument::with_root(), config)
    }

    /// Creates a store from an existing document.
    ///
    /// A document without a root node gets one prepended.
    pub fn from_document(document: MapDocument) -> Self {
        Self::from_document_with_config(document, EditorConfig::default())
    }

    pub fn from_document_with_config(document: MapDocument, config: EditorConfig) -> Self {
        let mut store = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            clipboard: None,
            config,
        };
        store.install(document);
        store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.node(ROOT_NODE_ID)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }

    /// Returns the copied node snapshot, if any.
    pub fn clipboard(&self) -> Option<&Node> {
        self.clipboard.as_ref()
    }

    /// Number of existing nodes reached by an edge from `parent_id`.
    pub fn child_count(&self, parent_id: &str) -> usize {
        self.nodes
            .iter()
            .filter(|node| {
                self.edges
                    .iter()
                    .any(|edge| edge.source == parent_id && edge.target == node.id)
            })
            .count()
    }

    /// Position the next child of `parent` would get without an explicit one.
    ///
    /// Children alternate right/left of the parent and stack downwards one
    /// row per pair.
    pub fn default_child_position(&self, parent: &Node) -> Position {
        let index = self.child_count(parent.id.as_str());
        let dx = if index % 2 == 0 {
            self.config.child_offset_x
        } else {
            -self.config.child_offset_x
        };
        let row = (index / 2) as f64;
        parent.position.offset(
            dx,
            self.config.child_offset_y + row * self.config.child_row_step,
        )
    }

    /// Adds a child under `parent_id` and links it with one edge.
    pub fn add_node(&mut self, parent_id: &str, position: Option<Position>) -> GraphResult<NodeId> {
        let parent = self.node(parent_id).ok_or_else(|| {
            debug!("event=node_add module=graph status=rejected reason=parent_not_found");
            GraphError::NodeNotFound(parent_id.to_string())
        })?;
        let position = position.unwrap_or_else(|| self.default_child_position(parent));

        let node_id = new_id("node");
        self.nodes.push(Node::new(
            node_id.clone(),
            position,
            NodeData::with_label(DEFAULT_NODE_LABEL),
        ));
        self.edges
            .push(Edge::new(new_id("edge"), parent_id, node_id.clone()));

        debug!(
            "event=node_add module=graph status=ok nodes={} edges={}",
            self.nodes.len(),
            self.edges.len()
        );
        Ok(node_id)
    }

    /// Appends one edge. Duplicates, self-loops and unknown ids are accepted.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> GraphResult<EdgeId> {
        if source_id.trim().is_empty() || target_id.trim().is_empty() {
            debug!("event=edge_add module=graph status=rejected reason=empty_id");
            return Err(GraphError::EmptyId);
        }

        let edge_id = new_id("edge");
        self.edges
            .push(Edge::new(edge_id.clone(), source_id, target_id));
        debug!(
            "event=edge_add module=graph status=ok edges={}",
            self.edges.len()
        );
        Ok(edge_id)
    }

    /// Removes a non-root node and every edge touching it.
    pub fn delete_node(&mut self, node_id: &str) -> GraphResult<DeletedNode> {
        if node_id == ROOT_NODE_ID {
            debug!("event=node_delete module=graph status=rejected reason=root");
            return Err(GraphError::RootProtected);
        }
        let index = self
            .nodes
            .iter()
            .position(|node| node.id == node_id)
            .ok_or_else(|| {
                debug!("event=node_delete module=graph status=rejected reason=not_found");
                GraphError::NodeNotFound(node_id.to_string())
            })?;

        let node = self.nodes.remove(index);
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(node_id));
        let removed_edges = before - self.edges.len();

        debug!(
            "event=node_delete module=graph status=ok removed_edges={}",
            removed_edges
        );
        Ok(DeletedNode {
            node,
            removed_edges,
        })
    }

    /// Shallow-merges `patch` into the node's data.
    pub fn update_node_data(&mut self, node_id: &str, patch: NodePatch) -> GraphResult<()> {
        let node = self.node_mut(node_id)?;
        node.data.apply(patch);
        Ok(())
    }

    /// Moves a node, e.g. at the end of a drag.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> GraphResult<()> {
        let node = self.node_mut(node_id)?;
        node.position = position;
        Ok(())
    }

    /// Captures a snapshot of one node for a later `paste_node`.
    pub fn copy_node(&mut self, node_id: &str) -> GraphResult<()> {
        let snapshot = self
            .node(node_id)
            .cloned()
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        self.clipboard = Some(snapshot);
        debug!("event=node_copy module=graph status=ok");
        Ok(())
    }

    /// Inserts a copy of the clipboard snapshot. Edges are not copied.
    pub fn paste_node(&mut self) -> GraphResult<NodeId> {
        let snapshot = self.clipboard.clone().ok_or_else(|| {
            debug!("event=node_paste module=graph status=rejected reason=empty_clipboard");
            GraphError::NothingCopied
        })?;
        Ok(self.insert_copy_of(&snapshot))
    }

    /// Copies one node in place without touching the clipboard.
    pub fn duplicate_node(&mut self, node_id: &str) -> GraphResult<NodeId> {
        let source = self
            .node(node_id)
            .cloned()
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        Ok(self.insert_copy_of(&source))
    }

    /// Snapshot of the current collections.
    pub fn document(&self) -> MapDocument {
        MapDocument {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Serializes the map to pretty-printed JSON.
    pub fn save(&self) -> String {
        export_document(&self.document())
    }

    /// Replaces the collections with a parsed JSON document.
    ///
    /// On error the store is left untouched.
    pub fn load(&mut self, raw: &str) -> Result<(), ImportError> {
        match parse_document(raw) {
            Ok(document) => {
                self.replace_document(document);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=map_load module=graph status=error error={}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Replaces the collections wholesale. The clipboard is kept.
    pub fn replace_document(&mut self, document: MapDocument) {
        self.install(document);
        info!(
            "event=map_load module=graph status=ok nodes={} edges={}",
            self.nodes.len(),
            self.edges.len()
        );
    }

    pub(crate) fn node_mut(&mut self, node_id: &str) -> GraphResult<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|node| node.id == node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))
    }

    fn insert_copy_of(&mut self, source: &Node) -> NodeId {
        let node_id = new_id("node");
        let mut copy = source.clone();
        copy.id = node_id.clone();
        copy.position = source
            .position
            .offset(self.config.paste_offset, self.config.paste_offset);
        copy.data.label = format!("{}{}", source.data.label, self.config.copy_suffix);
        copy.data.is_generating = false;
        self.nodes.push(copy);
        debug!(
            "event=node_paste module=graph status=ok nodes={}",
            self.nodes.len()
        );
        node_id
    }

    fn install(&mut self, document: MapDocument) {
        let MapDocument { mut nodes, edges } = document;
        if !nodes.iter().any(Node::is_root) {
            warn!("event=map_load module=graph status=repaired reason=missing_root");
            nodes.insert(0, Node::root());
        }
        self.nodes = nodes;
        self.edges = edges;
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphError, GraphStore};
    use crate::model::node::{NodePatch, NodeStyle, Position, ROOT_NODE_ID};

    #[test]
    fn default_child_positions_alternate_and_stack() {
        let mut store = GraphStore::new();
        let mut positions = Vec::new();
        for _ in 0..4 {
            let id = store.add_node(ROOT_NODE_ID, None).unwrap();
            positions.push(store.node(&id).unwrap().position);
        }

        assert_eq!(positions[0], Position::new(250.0, 200.0));
        assert_eq!(positions[1], Position::new(-250.0, 200.0));
        assert_eq!(positions[2], Position::new(250.0, 350.0));
        assert_eq!(positions[3], Position::new(-250.0, 350.0));
    }

    #[test]
    fn explicit_position_wins_over_layout() {
        let mut store = GraphStore::new();
        let id = store
            .add_node(ROOT_NODE_ID, Some(Position::new(7.0, 9.0)))
            .unwrap();
        assert_eq!(store.node(&id).unwrap().position, Position::new(7.0, 9.0));
    }

    #[test]
    fn add_node_with_missing_parent_changes_nothing() {
        let mut store = GraphStore::new();
        let err = store.add_node("ghost", None).unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound("ghost".to_string()));
        assert_eq!(store.nodes().len(), 1);
        assert!(store.edges().is_empty());
    }

    #[test]
    fn connect_accepts_duplicates_and_self_loops() {
        let mut store = GraphStore::new();
        let child = store.add_node(ROOT_NODE_ID, None).unwrap();
        store.connect(ROOT_NODE_ID, &child).unwrap();
        store.connect(&child, &child).unwrap();
        assert_eq!(store.edges().len(), 3);
        assert_eq!(store.connect("", &child), Err(GraphError::EmptyId));
    }

    #[test]
    fn update_on_missing_node_is_reported() {
        let mut store = GraphStore::new();
        let err = store
            .update_node_data("ghost", NodePatch::style(NodeStyle::Danger))
            .unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(_)));
    }

    #[test]
    fn paste_twice_creates_two_distinct_nodes() {
        let mut store = GraphStore::new();
        store.copy_node(ROOT_NODE_ID).unwrap();
        let first = store.paste_node().unwrap();
        let second = store.paste_node().unwrap();
        assert_ne!(first, second);
        assert_eq!(store.nodes().len(), 3);
        assert_eq!(
            store.node(&second).unwrap().position,
            Position::new(50.0, 50.0)
        );
    }
}
