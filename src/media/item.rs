//! Media item representation.

use std::fmt;

use url::Url;

/// Type of media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A downloadable media item discovered on a post page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub kind: MediaKind,
    /// Absolute source URL.
    pub url: String,
}

impl MediaItem {
    pub fn new(kind: MediaKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }

    /// Final path segment of the source URL, ignoring query and fragment.
    ///
    /// Returns `None` when the URL has no usable last segment.
    pub fn file_name(&self) -> Option<String> {
        let parsed = Url::parse(&self.url).ok()?;
        let segment = parsed.path_segments()?.next_back()?;
        if segment.is_empty() {
            None
        } else {
            Some(segment.to_string())
        }
    }
}
