//! Directory enumeration abstraction over the SD card root.

/// A single entry reported by a [`DirEnumerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry<'a> {
    /// Entry name relative to the enumeration root (no path separators).
    pub name: &'a str,
    /// `true` for subdirectories; these are never descended into.
    pub is_directory: bool,
}

/// Non-recursive listing of the storage root.
///
/// Enumeration is finite and restartable only by calling
/// [`list_entries`](DirEnumerator::list_entries) again from the top.
/// Subdirectories are reported (so callers can skip them) but never entered;
/// only top-level files are playable.
pub trait DirEnumerator {
    /// I/O error from the underlying storage driver.
    type Error: core::fmt::Debug;

    /// Enumerate every top-level entry, invoking `visit` once per entry.
    ///
    /// # Errors
    ///
    /// Returns the storage driver's error when the root cannot be read.
    fn list_entries<F>(&mut self, visit: F) -> Result<(), Self::Error>
    where
        F: FnMut(DirEntry<'_>);
}
