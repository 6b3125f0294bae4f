//! SongCatalog — fixed-capacity, ordered catalog of playable tracks.
//!
//! Capacity is a compile-time bound so the whole catalog lives in one static
//! allocation on hardware. Tests use `SmallCatalog` (capacity 16) which fits
//! on the host stack.

use heapless::Vec;

use crate::track::Track;

/// Maximum number of tracks the hardware catalog holds.
///
/// A flat SD root realistically tops out well below this; the bound exists
/// so the catalog has a fixed memory footprint. At roughly 400 bytes per
/// track a full catalog is hundreds of kilobytes: it must live in a
/// static, never on the stack. Host tests use [`SmallCatalog`].
pub const MAX_TRACKS: usize = 1024;

/// Error type for catalog operations.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// The catalog has reached its compile-time capacity.
    Full,
}

/// A fixed-capacity, ordered catalog of [`Track`] entries.
///
/// Order is fixed after [`sort_by_path`](SongCatalog::sort_by_path);
/// navigation never reorders it.
#[derive(Debug, Clone)]
pub struct SongCatalog<const N: usize> {
    tracks: Vec<Track, N>,
}

/// Alias for the hardware catalog. Statically placed on the board; too
/// large for any stack.
pub type FullCatalog = SongCatalog<MAX_TRACKS>;

/// Alias used in tests (stack-safe, capacity 16).
pub type SmallCatalog = SongCatalog<16>;

impl<const N: usize> SongCatalog<N> {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        SongCatalog { tracks: Vec::new() }
    }

    /// Append `track` to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `Err(CatalogError::Full)` when capacity `N` is exhausted.
    pub fn insert(&mut self, track: Track) -> Result<(), CatalogError> {
        self.tracks.push(track).map_err(|_| CatalogError::Full)
    }

    /// Return a reference to the track at zero-based `pos`, or `None`.
    pub fn get(&self, pos: usize) -> Option<&Track> {
        self.tracks.get(pos)
    }

    /// Number of tracks currently stored.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns `true` when no tracks have been inserted.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterate over tracks in catalog order.
    pub fn iter(&self) -> core::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Sort by `path`, byte-wise lexicographic and case-sensitive.
    ///
    /// Songs are presented in this order for the life of the session.
    pub fn sort_by_path(&mut self) {
        self.tracks
            .sort_unstable_by(|a, b| a.path.as_bytes().cmp(b.path.as_bytes()));
    }

    /// Remove all tracks, resetting length to zero.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

impl<const N: usize> Default for SongCatalog<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn make_track(path: &str) -> Track {
        Track::new(path, "name")
    }

    #[test]
    fn test_catalog_starts_empty() {
        let cat = SmallCatalog::new();
        assert_eq!(cat.len(), 0);
        assert!(cat.is_empty());
    }

    #[test]
    fn test_catalog_insert_and_get() {
        let mut cat = SmallCatalog::new();
        cat.insert(make_track("a.mp3")).expect("insert");
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.get(0).expect("entry").path.as_str(), "a.mp3");
    }

    #[test]
    fn test_catalog_get_out_of_bounds() {
        let cat = SmallCatalog::new();
        assert!(cat.get(1000).is_none());
    }

    #[test]
    fn test_catalog_full_returns_err() {
        let mut cat = SongCatalog::<2>::new();
        cat.insert(make_track("a.mp3")).unwrap();
        cat.insert(make_track("b.mp3")).unwrap();
        let err = cat.insert(make_track("c.mp3")).unwrap_err();
        assert_eq!(err, CatalogError::Full);
    }

    #[test]
    fn test_catalog_sort_is_bytewise_case_sensitive() {
        let mut cat = SmallCatalog::new();
        for p in ["b.mp3", "B.mp3", "a.mp3"] {
            cat.insert(make_track(p)).unwrap();
        }
        cat.sort_by_path();
        let order: std::vec::Vec<&str> = cat.iter().map(|t| t.path.as_str()).collect();
        // ASCII uppercase sorts before lowercase.
        assert_eq!(order, vec!["B.mp3", "a.mp3", "b.mp3"]);
    }

    #[test]
    fn test_small_catalog_fits_on_a_test_stack() {
        // The test alias stays a few kilobytes so host tests can pass it
        // by value with default stack sizes.
        assert!(core::mem::size_of::<SmallCatalog>() < 8192);
    }

    #[test]
    fn test_catalog_clear() {
        let mut cat = SmallCatalog::new();
        cat.insert(make_track("a.mp3")).unwrap();
        cat.clear();
        assert!(cat.is_empty());
    }
}
