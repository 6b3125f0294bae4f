//! Song cache — flat-file persistence of a built catalog.
//!
//! Format: plain text, records as consecutive line pairs (`path` then
//! display name), no header, no trailing metadata. The file is written from
//! an already-sorted catalog, so loading never re-sorts.

use platform::{bounded, CacheStore};

use crate::index::SongCatalog;
use crate::track::Track;

/// Where the cache lives on the card.
pub const CACHE_PATH: &str = "/songlist.cache";

/// Load a previously persisted catalog.
///
/// Returns `None` on any cache miss: the resource is absent, unreadable, or
/// yields no complete record. An unterminated trailing pair is dropped
/// rather than treated as corruption. A miss is an expected branch — the
/// caller falls back to a full scan.
pub fn load<const N: usize, S: CacheStore>(store: &mut S) -> Option<SongCatalog<N>> {
    let mut catalog: SongCatalog<N> = SongCatalog::new();
    let mut pending_path: Option<heapless::String<128>> = None;

    let result = store.read_lines(CACHE_PATH, |line| {
        match pending_path.take() {
            None => pending_path = Some(bounded(line)),
            Some(path) => {
                // Blank fields cannot come from a persisted catalog; drop
                // the damaged pair and keep reading.
                if !path.is_empty() && !line.is_empty() {
                    let _ = catalog.insert(Track::new(&path, line));
                }
            }
        }
    });

    match result {
        Ok(()) if !catalog.is_empty() => Some(catalog),
        _ => None,
    }
}

/// Persist `catalog` in file order, overwriting any existing cache.
///
/// # Errors
///
/// Returns the store's error when the destination cannot be written.
/// Non-fatal: the catalog already exists in memory and the player carries
/// on without a cache.
pub fn persist<const N: usize, S: CacheStore>(
    catalog: &SongCatalog<N>,
    store: &mut S,
) -> Result<(), S::Error> {
    let lines = catalog
        .iter()
        .flat_map(|t| [t.path.as_str(), t.display_name.as_str()]);
    store.write_lines(CACHE_PATH, lines)
}

/// Delete the cache. Idempotent.
///
/// Called when the card contents may have changed out-of-band (e.g. after
/// USB mass-storage exposure) to force a rescan on the next startup.
pub fn invalidate<S: CacheStore>(store: &mut S) {
    store.delete(CACHE_PATH);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::index::SmallCatalog;
    use platform::mocks::MemCacheStore;

    fn sample_catalog() -> SmallCatalog {
        let mut cat = SmallCatalog::new();
        cat.insert(Track::new("a.mp3", "Alpha by Artist")).unwrap();
        cat.insert(Track::new("b.mp3", "b")).unwrap();
        cat
    }

    #[test]
    fn test_persist_writes_line_pairs() {
        let mut store = MemCacheStore::new();
        persist(&sample_catalog(), &mut store).unwrap();
        assert_eq!(
            store.contents(CACHE_PATH).unwrap(),
            "a.mp3\nAlpha by Artist\nb.mp3\nb\n"
        );
    }

    #[test]
    fn test_load_roundtrip_preserves_order_and_content() {
        let mut store = MemCacheStore::new();
        let original = sample_catalog();
        persist(&original, &mut store).unwrap();

        let loaded: SmallCatalog = load(&mut store).expect("cache should hit");
        assert_eq!(loaded.len(), original.len());
        for (a, b) in loaded.iter().zip(original.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_load_missing_cache_is_a_miss() {
        let mut store = MemCacheStore::new();
        assert!(load::<16, _>(&mut store).is_none());
    }

    #[test]
    fn test_load_drops_unterminated_trailing_pair() {
        let mut store = MemCacheStore::new();
        store.seed(CACHE_PATH, "a.mp3\nAlpha\nb.mp3\n");
        let loaded: SmallCatalog = load(&mut store).expect("one complete record");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().path.as_str(), "a.mp3");
    }

    #[test]
    fn test_load_empty_file_is_a_miss() {
        let mut store = MemCacheStore::new();
        store.seed(CACHE_PATH, "");
        assert!(load::<16, _>(&mut store).is_none());
    }

    #[test]
    fn test_load_does_not_resort() {
        // The cache is trusted to be pre-sorted; deliberately unsorted
        // input comes back in file order.
        let mut store = MemCacheStore::new();
        store.seed(CACHE_PATH, "b.mp3\nBee\na.mp3\nAy\n");
        let loaded: SmallCatalog = load(&mut store).unwrap();
        assert_eq!(loaded.get(0).unwrap().path.as_str(), "b.mp3");
    }

    #[test]
    fn test_invalidate_is_idempotent() {
        let mut store = MemCacheStore::new();
        persist(&sample_catalog(), &mut store).unwrap();
        invalidate(&mut store);
        invalidate(&mut store);
        assert!(!store.exists(CACHE_PATH));
    }

    #[test]
    fn test_persist_failure_is_reported() {
        let mut store = MemCacheStore::new();
        store.fail_writes(true);
        assert!(persist(&sample_catalog(), &mut store).is_err());
    }
}
