//! End-to-end tests: directory scan → persist → disk → load.
//!
//! Uses the local file-system implementations over tempdirs, the same code
//! path the desktop emulator runs (with LocalDirEnumerator/LocalCacheStore
//! substituting for the SD drivers).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use catalog::{build_from_scan, cache, SongCatalog};
use platform::mocks::MapTagReader;
use platform::storage_local::{LocalCacheStore, LocalDirEnumerator};
use tempfile::TempDir;

fn seed_card(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    for name in files {
        std::fs::write(tmp.path().join(name), b"\xff\xfbaudio").expect("write");
    }
    tmp
}

#[test]
fn scan_persist_load_roundtrip_is_identical() {
    let tmp = seed_card(&["b.mp3", "a.mp3", "c.ogg", "notes.txt"]);
    let mut dir = LocalDirEnumerator::new(tmp.path());
    let mut store = LocalCacheStore::new(tmp.path());
    let mut tags = MapTagReader::new();
    tags.insert("a.mp3", "Ay", "Someone", "Somewhere");

    let outcome = build_from_scan::<16, _, _>(&mut dir, &mut tags).expect("scan");
    assert_eq!(outcome.catalog.len(), 3);

    cache::persist(&outcome.catalog, &mut store).expect("persist");
    let loaded: SongCatalog<16> = cache::load(&mut store).expect("cache hit");

    assert_eq!(loaded.len(), outcome.catalog.len());
    for (a, b) in loaded.iter().zip(outcome.catalog.iter()) {
        assert_eq!(a, b);
    }
    assert_eq!(loaded.get(0).unwrap().path.as_str(), "a.mp3");
    assert_eq!(
        loaded.get(0).unwrap().display_name.as_str(),
        "Ay by Someone in Somewhere"
    );
}

#[test]
fn invalidate_forces_rescan_on_next_startup() {
    let tmp = seed_card(&["a.mp3"]);
    let mut dir = LocalDirEnumerator::new(tmp.path());
    let mut store = LocalCacheStore::new(tmp.path());
    let mut tags = MapTagReader::new();

    let outcome = build_from_scan::<16, _, _>(&mut dir, &mut tags).expect("scan");
    cache::persist(&outcome.catalog, &mut store).expect("persist");
    assert!(cache::load::<16, _>(&mut store).is_some());

    cache::invalidate(&mut store);
    assert!(cache::load::<16, _>(&mut store).is_none());
}

#[test]
fn subdirectories_are_not_descended() {
    let tmp = seed_card(&["a.mp3"]);
    std::fs::create_dir(tmp.path().join("more")).unwrap();
    std::fs::write(tmp.path().join("more").join("hidden.mp3"), b"x").unwrap();

    let mut dir = LocalDirEnumerator::new(tmp.path());
    let mut tags = MapTagReader::new();
    let outcome = build_from_scan::<16, _, _>(&mut dir, &mut tags).expect("scan");
    assert_eq!(outcome.catalog.len(), 1);
}
