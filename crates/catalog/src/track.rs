//! Track — one playable file and its derived display name.

use heapless::String;
use platform::bounded;

/// A single playable file in the catalog.
///
/// Both fields are derived once at catalog build time and never recomputed;
/// the catalog builder guarantees they are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Root-relative path on the card (up to 128 bytes).
    pub path: String<128>,
    /// Human-readable label (up to 256 bytes): tag-derived
    /// `"{title} by {artist}"` or the extension-stripped filename.
    pub display_name: String<256>,
}

impl Track {
    /// Create a track, silently truncating over-long fields at the buffer
    /// capacity.
    pub fn new(path: &str, display_name: &str) -> Self {
        Track {
            path: bounded(path),
            display_name: bounded(display_name),
        }
    }
}
