//! Local file-system implementations of the storage traits.
//!
//! Used by host-side tests and the desktop emulator, substituting for the
//! SD-card drivers on hardware. Paths are resolved relative to a root
//! directory the way SD paths are resolved relative to the card root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::string::String;
use std::vec::Vec;

use crate::cache_store::{CacheReadError, CacheStore};
use crate::dir::{DirEntry, DirEnumerator};

fn resolve(root: &Path, path: &str) -> PathBuf {
    // SD paths are root-absolute; strip the leading separator so `join`
    // stays inside `root`.
    root.join(path.trim_start_matches('/'))
}

/// [`DirEnumerator`] over a local directory.
pub struct LocalDirEnumerator {
    root: PathBuf,
}

impl LocalDirEnumerator {
    /// Enumerate the top level of `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DirEnumerator for LocalDirEnumerator {
    type Error = io::Error;

    fn list_entries<F>(&mut self, mut visit: F) -> Result<(), Self::Error>
    where
        F: FnMut(DirEntry<'_>),
    {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let is_directory = entry.file_type()?.is_dir();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            visit(DirEntry {
                name: &name,
                is_directory,
            });
        }
        Ok(())
    }
}

/// [`CacheStore`] over local files.
pub struct LocalCacheStore {
    root: PathBuf,
}

impl LocalCacheStore {
    /// Store resources under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CacheStore for LocalCacheStore {
    type Error = io::Error;

    fn read_lines<F>(&mut self, path: &str, mut visit: F) -> Result<(), CacheReadError<io::Error>>
    where
        F: FnMut(&str),
    {
        let contents = match fs::read_to_string(resolve(&self.root, path)) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(CacheReadError::NotFound),
            Err(e) => return Err(CacheReadError::Io(e)),
        };
        for line in contents.lines() {
            visit(line);
        }
        Ok(())
    }

    fn write_lines<'a, I>(&mut self, path: &str, lines: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out = String::new();
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        fs::write(resolve(&self.root, path), out)
    }

    fn delete(&mut self, path: &str) {
        // Idempotent: a missing file is already deleted.
        let _ = fs::remove_file(resolve(&self.root, path));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_enumerates_top_level_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.mp3"), b"x").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("b.mp3"), b"x").unwrap();

        let mut seen: Vec<(String, bool)> = Vec::new();
        let mut dir = LocalDirEnumerator::new(tmp.path());
        dir.list_entries(|e| seen.push((e.name.into(), e.is_directory)))
            .unwrap();

        seen.sort();
        assert_eq!(seen, vec![("a.mp3".into(), false), ("sub".into(), true)]);
    }

    #[test]
    fn test_cache_roundtrip_and_delete() {
        let tmp = TempDir::new().unwrap();
        let mut store = LocalCacheStore::new(tmp.path());

        store.write_lines("/cache.txt", ["one", "two"]).unwrap();
        let mut lines: Vec<String> = Vec::new();
        store
            .read_lines("/cache.txt", |l| lines.push(l.into()))
            .unwrap();
        assert_eq!(lines, vec!["one", "two"]);

        store.delete("/cache.txt");
        store.delete("/cache.txt"); // idempotent
        assert!(matches!(
            store.read_lines("/cache.txt", |_| {}),
            Err(CacheReadError::NotFound)
        ));
    }
}
