//! Presentation resolution for node styles.
//!
//! Every function here is pure and total: unknown styles already decode as
//! `Default`, so there is no error path.

use crate::model::edge::{EDGE_STROKE_COLOR, EDGE_STROKE_WIDTH};
use crate::model::node::{NodeStyle, TextStyle};

const WHITE: &str = "#ffffff";
const GRAY_900: &str = "#111827";

/// Colors of a node box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePalette {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

/// Maps a node style to its background/border/text colors.
pub fn resolve_node_palette(style: NodeStyle) -> NodePalette {
    let (background, border) = match style {
        NodeStyle::Primary => ("#2563eb", "#1d4ed8"),
        NodeStyle::Secondary => ("#9333ea", "#7e22ce"),
        NodeStyle::Success => ("#16a34a", "#15803d"),
        NodeStyle::Warning => ("#f97316", "#ea580c"),
        NodeStyle::Danger => ("#dc2626", "#b91c1c"),
        NodeStyle::Highlight => ("#ec4899", "#db2777"),
        NodeStyle::Note => ("#4f46e5", "#4338ca"),
        NodeStyle::Default => (WHITE, "#d1d5db"),
    };
    NodePalette {
        background,
        border,
        text: label_color(style),
    }
}

/// Label color: white on colored backgrounds, dark otherwise.
pub fn label_color(style: NodeStyle) -> &'static str {
    if style.is_colored() {
        WHITE
    } else {
        GRAY_900
    }
}

/// Color of a node's dot on the minimap.
pub fn minimap_color(style: NodeStyle) -> &'static str {
    match style {
        NodeStyle::Primary => "#3b82f6",
        NodeStyle::Secondary => "#8b5cf6",
        NodeStyle::Success => "#10b981",
        NodeStyle::Warning | NodeStyle::Highlight => "#f59e0b",
        NodeStyle::Danger => "#ef4444",
        NodeStyle::Note => "#6366f1",
        NodeStyle::Default => "#9ca3af",
    }
}

/// Color shared by every edge.
pub fn edge_color() -> &'static str {
    EDGE_STROKE_COLOR
}

pub fn edge_width() -> f64 {
    EDGE_STROKE_WIDTH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoration {
    None,
    Underline,
    LineThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Sans,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Base,
    Large,
}

/// Typographic directives for a node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPresentation {
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub decoration: TextDecoration,
    pub font_family: FontFamily,
    pub font_size: FontSize,
    /// Code labels sit on a translucent chip.
    pub chip_background: bool,
    pub text_color: &'static str,
}

impl TextPresentation {
    fn plain(text_color: &'static str) -> Self {
        Self {
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            decoration: TextDecoration::None,
            font_family: FontFamily::Sans,
            font_size: FontSize::Base,
            chip_background: false,
            text_color,
        }
    }
}

/// Maps a text style, composed with the node style's label color.
pub fn resolve_text_presentation(text_style: TextStyle, style: NodeStyle) -> TextPresentation {
    let plain = TextPresentation::plain(label_color(style));
    match text_style {
        TextStyle::Bold => TextPresentation {
            font_weight: FontWeight::Bold,
            ..plain
        },
        TextStyle::Italic => TextPresentation {
            font_style: FontStyle::Italic,
            ..plain
        },
        TextStyle::Underline => TextPresentation {
            decoration: TextDecoration::Underline,
            ..plain
        },
        TextStyle::Strikethrough => TextPresentation {
            decoration: TextDecoration::LineThrough,
            ..plain
        },
        TextStyle::Code => TextPresentation {
            font_family: FontFamily::Mono,
            font_size: FontSize::Small,
            chip_background: true,
            ..plain
        },
        TextStyle::Heading => TextPresentation {
            font_weight: FontWeight::Bold,
            font_size: FontSize::Large,
            ..plain
        },
        TextStyle::Subheading => TextPresentation {
            font_weight: FontWeight::Medium,
            ..plain
        },
        TextStyle::Default => plain,
    }
}
