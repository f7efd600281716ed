//! Content editing rules for single nodes.
//!
//! # Invariants
//! - Blank comments and blank links are rejected without mutation.
//! - Comments keep insertion order; ids are fresh per comment.
//! - Links are never deduplicated; a missing `http` scheme becomes
//!   `https://`.
//! - Nodes with `is_generating` set refuse every edit here except
//!   `set_generating` itself.

use crate::clock::{new_id, now_epoch_ms};
use crate::config::truncate_chars;
use crate::content::media::encode_data_uri;
use crate::graph::store::{GraphError, GraphResult, GraphStore};
use crate::model::node::{Node, NodeComment, NodeLink, NodeStyle, TextStyle};
use log::debug;

/// Normalizes user link input; `None` when blank.
pub fn normalize_link_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

impl GraphStore {
    /// Appends a trimmed comment and returns it.
    pub fn add_comment(&mut self, node_id: &str, text: &str) -> GraphResult<NodeComment> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=comment_add module=graph status=rejected reason=blank");
            return Err(GraphError::EmptyComment);
        }
        let max_chars = self.config().comment_max_chars;
        let node = self.editable_node(node_id)?;
        let comment = NodeComment {
            id: new_id("comment"),
            text: truncate_chars(trimmed, max_chars),
            timestamp: now_epoch_ms(),
        };
        node.data.comments.push(comment.clone());
        Ok(comment)
    }

    /// Removes a comment by id. Returns whether one was removed.
    pub fn delete_comment(&mut self, node_id: &str, comment_id: &str) -> GraphResult<bool> {
        let node = self.editable_node(node_id)?;
        let before = node.data.comments.len();
        node.data.comments.retain(|comment| comment.id != comment_id);
        Ok(node.data.comments.len() != before)
    }

    /// Appends a link whose title is the stored url.
    pub fn add_link(&mut self, node_id: &str, url: &str) -> GraphResult<NodeLink> {
        let url = normalize_link_url(url).ok_or(GraphError::EmptyLink)?;
        let node = self.editable_node(node_id)?;
        let link = NodeLink {
            title: url.clone(),
            url,
        };
        node.data.links.push(link.clone());
        Ok(link)
    }

    /// Removes the link at `index`, if present.
    pub fn remove_link(&mut self, node_id: &str, index: usize) -> GraphResult<Option<NodeLink>> {
        let node = self.editable_node(node_id)?;
        if index < node.data.links.len() {
            Ok(Some(node.data.links.remove(index)))
        } else {
            Ok(None)
        }
    }

    /// Stores a media reference as-is.
    pub fn set_media(&mut self, node_id: &str, reference: impl Into<String>) -> GraphResult<()> {
        let node = self.editable_node(node_id)?;
        node.data.media = Some(reference.into());
        Ok(())
    }

    /// Stores uploaded image bytes as an embedded `data:` URI.
    pub fn set_media_bytes(&mut self, node_id: &str, mime: &str, bytes: &[u8]) -> GraphResult<()> {
        self.set_media(node_id, encode_data_uri(mime, bytes))
    }

    pub fn clear_media(&mut self, node_id: &str) -> GraphResult<()> {
        let node = self.editable_node(node_id)?;
        node.data.media = None;
        Ok(())
    }

    pub fn set_emoji(&mut self, node_id: &str, emoji: impl Into<String>) -> GraphResult<()> {
        let node = self.editable_node(node_id)?;
        node.data.emoji = Some(emoji.into());
        Ok(())
    }

    pub fn clear_emoji(&mut self, node_id: &str) -> GraphResult<()> {
        let node = self.editable_node(node_id)?;
        node.data.emoji = None;
        Ok(())
    }

    /// Replaces the label, capped at the configured length.
    pub fn set_label(&mut self, node_id: &str, label: &str) -> GraphResult<()> {
        let label = truncate_chars(label, self.config().label_max_chars);
        let node = self.editable_node(node_id)?;
        node.data.label = label;
        Ok(())
    }

    pub fn set_style(&mut self, node_id: &str, style: NodeStyle) -> GraphResult<()> {
        let node = self.editable_node(node_id)?;
        node.data.style = style;
        Ok(())
    }

    pub fn set_text_style(&mut self, node_id: &str, text_style: TextStyle) -> GraphResult<()> {
        let node = self.editable_node(node_id)?;
        node.data.text_style = text_style;
        Ok(())
    }

    /// Toggles the busy flag that blocks content edits.
    pub fn set_generating(&mut self, node_id: &str, generating: bool) -> GraphResult<()> {
        let node = self.node_mut(node_id)?;
        node.data.is_generating = generating;
        Ok(())
    }

    fn editable_node(&mut self, node_id: &str) -> GraphResult<&mut Node> {
        let node = self.node_mut(node_id)?;
        if node.data.is_generating {
            debug!("event=node_edit module=graph status=rejected reason=busy");
            return Err(GraphError::NodeBusy(node_id.to_string()));
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_link_url;
    use crate::graph::store::{GraphError, GraphStore};
    use crate::model::node::ROOT_NODE_ID;

    #[test]
    fn link_scheme_is_added_only_when_missing() {
        assert_eq!(
            normalize_link_url("example.com").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            normalize_link_url(" http://a.test ").as_deref(),
            Some("http://a.test")
        );
        assert_eq!(normalize_link_url("   "), None);
    }

    #[test]
    fn comments_are_trimmed_capped_and_deletable() {
        let mut store = GraphStore::new();
        let long = "x".repeat(250);
        let comment = store.add_comment(ROOT_NODE_ID, &format!("  {long}  ")).unwrap();
        assert_eq!(comment.text.chars().count(), 200);

        assert!(store.delete_comment(ROOT_NODE_ID, &comment.id).unwrap());
        assert!(!store.delete_comment(ROOT_NODE_ID, &comment.id).unwrap());
    }

    #[test]
    fn busy_nodes_refuse_edits_until_cleared() {
        let mut store = GraphStore::new();
        store.set_generating(ROOT_NODE_ID, true).unwrap();
        assert_eq!(
            store.set_emoji(ROOT_NODE_ID, "🎯"),
            Err(GraphError::NodeBusy(ROOT_NODE_ID.to_string()))
        );

        store.set_generating(ROOT_NODE_ID, false).unwrap();
        store.set_emoji(ROOT_NODE_ID, "🎯").unwrap();
        assert_eq!(
            store.root().unwrap().data.emoji.as_deref(),
            Some("🎯")
        );
    }

    #[test]
    fn labels_are_capped() {
        let mut store = GraphStore::new();
        store.set_label(ROOT_NODE_ID, &"a".repeat(600)).unwrap();
        assert_eq!(store.root().unwrap().data.label.len(), 500);
    }
}
