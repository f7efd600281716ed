//! Mind-map node model.
//!
//! # Responsibility
//! - Define the node record exchanged with the renderer and JSON exports.
//! - Define per-node content attributes (style, text style, media, links,
//!   comments) and the partial-update shape used by the graph store.
//!
//! # Invariants
//! - `id` is stable for the node lifetime and never reused in a session.
//! - Unknown `data` keys survive decode/encode and partial updates.
//! - `is_generating` is transient and never serialized.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Opaque node identifier.
pub type NodeId = String;

/// Id of the single non-deletable node present in every map.
pub const ROOT_NODE_ID: &str = "root-node";
/// Label given to the root of a fresh map.
pub const ROOT_NODE_LABEL: &str = "My Mind Map";
/// Label given to nodes created by `add_node`.
pub const DEFAULT_NODE_LABEL: &str = "New Node";
/// Wire name of the transient busy flag; never kept in `extra`.
const IS_GENERATING_KEY: &str = "isGenerating";
/// Renderer tag used for every node the editor creates.
pub const EDITABLE_NODE_TYPE: &str = "editableNode";

/// Canvas coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Background/border color scheme of a node.
///
/// Unrecognized values decode as `Default`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStyle {
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Highlight,
    Note,
    #[default]
    #[serde(other)]
    Default,
}

impl NodeStyle {
    /// All styles in toolbar order.
    pub const ALL: [NodeStyle; 8] = [
        NodeStyle::Default,
        NodeStyle::Primary,
        NodeStyle::Secondary,
        NodeStyle::Success,
        NodeStyle::Warning,
        NodeStyle::Danger,
        NodeStyle::Highlight,
        NodeStyle::Note,
    ];

    /// Whether this style paints a colored background.
    pub fn is_colored(self) -> bool {
        self != NodeStyle::Default
    }
}

/// Typographic treatment of a node label, independent of `NodeStyle`.
///
/// Unrecognized values decode as `Default`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Heading,
    Subheading,
    #[default]
    #[serde(other)]
    Default,
}

/// Hyperlink attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLink {
    pub url: String,
    pub title: String,
}

/// Comment attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeComment {
    pub id: String,
    pub text: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

/// Editable content of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub style: NodeStyle,
    #[serde(
        default,
        skip_serializing_if = "is_default_text_style",
        deserialize_with = "lenient_or_default"
    )]
    pub text_style: TextStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Image URL or `data:` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<NodeLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<NodeComment>,
    /// UI busy flag; blocks content edits while set.
    #[serde(skip)]
    pub is_generating: bool,
    /// Keys this model does not know about, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: NodeStyle::Default,
            text_style: TextStyle::Default,
            emoji: None,
            media: None,
            links: Vec::new(),
            comments: Vec::new(),
            is_generating: false,
            extra: Map::new(),
        }
    }

    /// Applies every field set in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: NodePatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
        if let Some(text_style) = patch.text_style {
            self.text_style = text_style;
        }
        if let Some(emoji) = patch.emoji {
            self.emoji = emoji;
        }
        if let Some(media) = patch.media {
            self.media = media;
        }
        if let Some(links) = patch.links {
            self.links = links;
        }
        if let Some(comments) = patch.comments {
            self.comments = comments;
        }
        if let Some(is_generating) = patch.is_generating {
            self.is_generating = is_generating;
        }
        self.extra.extend(patch.extra);
        self.drop_transient_keys();
    }

    /// Removes transient flags captured into `extra` by a decode.
    pub(crate) fn drop_transient_keys(&mut self) {
        self.extra.remove(IS_GENERATING_KEY);
    }
}

impl Default for NodeData {
    fn default() -> Self {
        Self::with_label(String::new())
    }
}

fn is_default_text_style(value: &TextStyle) -> bool {
    *value == TextStyle::Default
}

/// Decodes any JSON value, falling back to `T::default()` for null,
/// wrong-typed or unknown values.
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default())
}

/// Shallow partial update for `NodeData`.
///
/// `None` leaves a field unchanged. For optional fields the inner `Option`
/// is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub style: Option<NodeStyle>,
    pub text_style: Option<TextStyle>,
    pub emoji: Option<Option<String>>,
    pub media: Option<Option<String>>,
    pub links: Option<Vec<NodeLink>>,
    pub comments: Option<Vec<NodeComment>>,
    pub is_generating: Option<bool>,
    pub extra: Map<String, Value>,
}

impl NodePatch {
    pub fn label(value: impl Into<String>) -> Self {
        Self {
            label: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn style(value: NodeStyle) -> Self {
        Self {
            style: Some(value),
            ..Self::default()
        }
    }

    pub fn text_style(value: TextStyle) -> Self {
        Self {
            text_style: Some(value),
            ..Self::default()
        }
    }

    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One mind-map node as exchanged with the renderer and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default = "default_node_type")]
    pub kind: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
}

fn default_node_type() -> String {
    EDITABLE_NODE_TYPE.to_string()
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            kind: default_node_type(),
            position,
            data,
        }
    }

    /// Builds the root node of a fresh map.
    pub fn root() -> Self {
        Self::new(
            ROOT_NODE_ID,
            Position::default(),
            NodeData::with_label(ROOT_NODE_LABEL),
        )
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_NODE_ID
    }
}
