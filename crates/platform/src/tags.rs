//! ID3-style tag lookup abstraction.

use heapless::String;

/// The tag fields the catalog builder consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TagKind {
    /// Song title.
    Title,
    /// Album title.
    Album,
    /// Artist name.
    Artist,
}

/// Reads metadata tags out of an audio file.
///
/// Implementations wrap whatever tag parser the board ships with; the core
/// only cares about presence and the three [`TagKind`] strings.
pub trait TagReader {
    /// Returns `true` when `path` carries a readable tag block.
    fn has_tags(&mut self, path: &str) -> bool;

    /// Read one tag field, returning an empty string when the field is
    /// missing or unreadable.
    fn read_tag(&mut self, path: &str, kind: TagKind) -> String<128>;
}
