//! Node media references.
//!
//! # Invariants
//! - Setting media never validates reachability.
//! - A reference that fails to load, or cannot be classified, renders as
//!   "no image" and is never reported as an error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:(image/[A-Za-z0-9.+-]+)(;[^,]*)?,").expect("valid data uri regex")
});

/// How a media reference can be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSource<'a> {
    /// Fetched over the network.
    Remote(&'a str),
    /// Embedded `data:image/...` URI.
    Embedded { mime: &'a str, uri: &'a str },
    /// Anything else; rendered as no image.
    Unsupported,
}

/// Classifies a stored media reference.
pub fn classify_media(reference: &str) -> MediaSource<'_> {
    let trimmed = reference.trim();
    if let Some(caps) = DATA_URI_RE.captures(trimmed) {
        if let Some(mime) = caps.get(1) {
            return MediaSource::Embedded {
                mime: mime.as_str(),
                uri: trimmed,
            };
        }
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("blob:")
    {
        return MediaSource::Remote(trimmed);
    }
    MediaSource::Unsupported
}

/// Returns the media to draw, or `None` when the node shows no image.
pub fn renderable_media(media: Option<&str>, load_failed: bool) -> Option<MediaSource<'_>> {
    if load_failed {
        return None;
    }
    match classify_media(media?) {
        MediaSource::Unsupported => None,
        source => Some(source),
    }
}

/// Builds a base64 `data:` URI for uploaded image bytes.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime.trim(), STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::{classify_media, encode_data_uri, renderable_media, MediaSource};

    #[test]
    fn classifies_remote_and_embedded_references() {
        assert_eq!(
            classify_media("https://example.com/a.png"),
            MediaSource::Remote("https://example.com/a.png")
        );
        let uri = encode_data_uri("image/png", &[1, 2, 3]);
        assert_eq!(uri, "data:image/png;base64,AQID");
        assert!(matches!(
            classify_media(&uri),
            MediaSource::Embedded {
                mime: "image/png",
                ..
            }
        ));
        assert_eq!(classify_media("C:/photos/cat.png"), MediaSource::Unsupported);
    }

    #[test]
    fn load_failure_falls_back_to_no_image() {
        assert_eq!(renderable_media(Some("https://x.test/a.png"), true), None);
        assert_eq!(renderable_media(None, false), None);
        assert_eq!(renderable_media(Some("not a url"), false), None);
        assert!(renderable_media(Some("https://x.test/a.png"), false).is_some());
    }
}
