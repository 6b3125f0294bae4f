//! Scanner — extension filtering and display-name derivation.

use core::fmt::Write as _;

use heapless::String;
use platform::{bounded, TagKind, TagReader};

/// Accepted audio extensions, both case variants. (MP3 is best supported.)
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    ".MP3", ".mp3", ".OGG", ".ogg", ".FLA", ".fla", ".WAV", ".wav", ".M4A", ".m4a",
];

/// Returns `true` when `name` carries an accepted audio extension.
///
/// The match is substring containment, not a strict suffix check, so a name
/// like `song.mp3.bak` is also accepted. Kept deliberately for
/// compatibility with cards laid out under the previous firmware.
pub fn is_accepted(name: &str) -> bool {
    ACCEPTED_EXTENSIONS.iter().any(|ext| name.contains(ext))
}

/// Derive the display name for `path`, reading tags when present.
///
/// Tagged files with a non-empty title and artist yield
/// `"{title} by {artist}"`, plus `" in {album}"` when an album tag is set
/// (songs are liable to not have an album set if manually tagged).
/// Untagged files fall back to the filename with its `.xxx` extension
/// removed.
pub fn display_name<T: TagReader>(path: &str, tags: &mut T) -> String<256> {
    if tags.has_tags(path) {
        let title = tags.read_tag(path, TagKind::Title);
        let artist = tags.read_tag(path, TagKind::Artist);
        if !title.is_empty() && !artist.is_empty() {
            let album = tags.read_tag(path, TagKind::Album);
            let mut name: String<256> = String::new();
            // Write never fails fatally on a heapless String; over-long
            // names are truncated at the buffer capacity.
            let _ = write!(name, "{title} by {artist}");
            if !album.is_empty() {
                let _ = write!(name, " in {album}");
            }
            return name;
        }
    }
    stripped_filename(path)
}

/// Filename with the last four bytes (a fixed-length `.xxx` extension)
/// removed. Falls back to the whole name when stripping would leave
/// nothing, so the display name is never empty for a non-empty path.
fn stripped_filename(path: &str) -> String<256> {
    let cut = path.len().saturating_sub(4);
    match path.get(..cut) {
        Some(head) if !head.is_empty() => bounded(head),
        _ => bounded(path),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use platform::mocks::MapTagReader;

    #[test]
    fn test_accepts_all_extension_variants() {
        for name in [
            "a.mp3", "a.MP3", "a.ogg", "a.OGG", "a.fla", "a.FLA", "a.wav", "a.WAV", "a.m4a",
            "a.M4A",
        ] {
            assert!(is_accepted(name), "{name} should be accepted");
        }
    }

    #[test]
    fn test_rejects_other_extensions() {
        assert!(!is_accepted("readme.txt"));
        assert!(!is_accepted("cover.jpg"));
        assert!(!is_accepted(""));
    }

    #[test]
    fn test_containment_match_is_not_suffix_match() {
        // Containment semantics: the extension may appear mid-name.
        assert!(is_accepted("song.mp3.bak"));
        assert!(is_accepted("a.ogg_old"));
    }

    #[test]
    fn test_mixed_case_extension_not_in_set_rejected() {
        assert!(!is_accepted("a.Mp3"));
    }

    #[test]
    fn test_display_name_from_tags() {
        let mut tags = MapTagReader::new();
        tags.insert("a.mp3", "Song", "Artist", "");
        assert_eq!(display_name("a.mp3", &mut tags).as_str(), "Song by Artist");
    }

    #[test]
    fn test_display_name_includes_album_when_set() {
        let mut tags = MapTagReader::new();
        tags.insert("a.mp3", "Song", "Artist", "Album");
        assert_eq!(
            display_name("a.mp3", &mut tags).as_str(),
            "Song by Artist in Album"
        );
    }

    #[test]
    fn test_display_name_falls_back_without_tags() {
        let mut tags = MapTagReader::new();
        assert_eq!(display_name("track01.mp3", &mut tags).as_str(), "track01");
    }

    #[test]
    fn test_display_name_falls_back_on_empty_title() {
        let mut tags = MapTagReader::new();
        tags.insert("track01.mp3", "", "Artist", "");
        assert_eq!(display_name("track01.mp3", &mut tags).as_str(), "track01");
    }

    #[test]
    fn test_stripped_name_never_empty() {
        let mut tags = MapTagReader::new();
        // Stripping ".mp3" would leave nothing; keep the whole name.
        assert_eq!(display_name(".mp3", &mut tags).as_str(), ".mp3");
    }
}
