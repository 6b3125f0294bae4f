//! Builder — full directory scan producing a sorted catalog.
//!
//! Scanning reads tags for every accepted file, which is the slow path on a
//! real card; the [`cache`](crate::cache) module exists so subsequent boots
//! can skip it.

use heapless::{String, Vec};
use platform::{DirEnumerator, TagReader};

use crate::index::SongCatalog;
use crate::scanner;
use crate::track::Track;

/// Fatal scan failures.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuildError<E> {
    /// The scan finished but found nothing playable. There is no recovery
    /// path; the application layer surfaces this as a permanent failure.
    NoSongs,
    /// The root directory could not be enumerated.
    Dir(E),
}

/// A freshly scanned catalog plus the count of entries that had to be
/// skipped (name too long for the record format, or embedded newline that
/// would corrupt the cache). Surfaced to status text, not fatal.
#[derive(Debug)]
pub struct ScanOutcome<const N: usize> {
    /// The sorted catalog.
    pub catalog: SongCatalog<N>,
    /// Entries discarded for violating format assumptions.
    pub skipped: u32,
}

/// Scan the card root and build a sorted catalog.
///
/// Top-level files only; subdirectories are deliberately not descended
/// into. Accepted entries are sorted byte-wise by path, then a display name
/// is derived for each (tag lookup with filename fallback).
///
/// # Errors
///
/// [`BuildError::Dir`] when the root cannot be enumerated;
/// [`BuildError::NoSongs`] when nothing playable was found — a fatal
/// startup condition.
pub fn build_from_scan<const N: usize, D, T>(
    dir: &mut D,
    tags: &mut T,
) -> Result<ScanOutcome<N>, BuildError<D::Error>>
where
    D: DirEnumerator,
    T: TagReader,
{
    let mut names: Vec<String<128>, N> = Vec::new();
    let mut skipped: u32 = 0;

    dir.list_entries(|entry| {
        // Don't recurse - only load top-level files.
        if entry.is_directory || !scanner::is_accepted(entry.name) {
            return;
        }
        // Names that cannot round-trip through the line-oriented cache are
        // skipped rather than stored in a form that would corrupt it.
        if entry.name.len() > 128 || entry.name.contains(['\n', '\r']) {
            skipped = skipped.saturating_add(1);
            return;
        }
        let mut name: String<128> = String::new();
        // Cannot fail: length checked above.
        let _ = name.push_str(entry.name);
        if names.push(name).is_err() {
            // Catalog capacity exhausted; surplus entries are reported, not
            // silently lost.
            skipped = skipped.saturating_add(1);
        }
    })
    .map_err(BuildError::Dir)?;

    // Present songs in lexicographic filename order.
    names.sort_unstable_by(|a, b| a.as_bytes().cmp(b.as_bytes()));

    let mut catalog: SongCatalog<N> = SongCatalog::new();
    for name in &names {
        let display = scanner::display_name(name, tags);
        // Cannot fail: at most N names were collected.
        let _ = catalog.insert(Track::new(name, &display));
    }

    if catalog.is_empty() {
        return Err(BuildError::NoSongs);
    }

    Ok(ScanOutcome { catalog, skipped })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use platform::mocks::{MapTagReader, SliceDir};

    fn scan(dir: &mut SliceDir, tags: &mut MapTagReader) -> ScanOutcome<16> {
        build_from_scan(dir, tags).expect("scan should succeed")
    }

    #[test]
    fn test_scan_sorts_by_path() {
        let mut dir = SliceDir::files(&["b.mp3", "a.mp3", "c.mp3"]);
        let mut tags = MapTagReader::new();
        let outcome = scan(&mut dir, &mut tags);
        let order: Vec<&str, 16> = outcome.catalog.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(order.as_slice(), &["a.mp3", "b.mp3", "c.mp3"]);
    }

    #[test]
    fn test_scan_filters_extensions_and_directories() {
        let mut dir = SliceDir::new(&[
            ("a.mp3", false),
            ("notes.txt", false),
            ("music", true),
            ("b.ogg", false),
        ]);
        let mut tags = MapTagReader::new();
        let outcome = scan(&mut dir, &mut tags);
        assert_eq!(outcome.catalog.len(), 2);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_scan_derives_display_names() {
        let mut dir = SliceDir::files(&["a.mp3", "b.mp3"]);
        let mut tags = MapTagReader::new();
        tags.insert("a.mp3", "Alpha", "Artist", "");
        let outcome = scan(&mut dir, &mut tags);
        assert_eq!(
            outcome.catalog.get(0).unwrap().display_name.as_str(),
            "Alpha by Artist"
        );
        assert_eq!(outcome.catalog.get(1).unwrap().display_name.as_str(), "b");
    }

    #[test]
    fn test_scan_empty_is_fatal() {
        let mut dir = SliceDir::files(&["readme.txt"]);
        let mut tags = MapTagReader::new();
        let err = build_from_scan::<16, _, _>(&mut dir, &mut tags).unwrap_err();
        assert_eq!(err, BuildError::NoSongs);
    }

    #[test]
    fn test_scan_skips_names_with_newlines() {
        let mut dir = SliceDir::files(&["ok.mp3", "bad\nname.mp3"]);
        let mut tags = MapTagReader::new();
        let outcome = scan(&mut dir, &mut tags);
        assert_eq!(outcome.catalog.len(), 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_scan_counts_overflow_as_skipped() {
        let names: std::vec::Vec<std::string::String> =
            (0..5).map(|i| std::format!("t{i}.mp3")).collect();
        let refs: std::vec::Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let mut dir = SliceDir::files(&refs);
        let mut tags = MapTagReader::new();
        let outcome: ScanOutcome<3> = build_from_scan(&mut dir, &mut tags).unwrap();
        assert_eq!(outcome.catalog.len(), 3);
        assert_eq!(outcome.skipped, 2);
    }
}
