//! Line-oriented persisted storage for the song cache.

/// Error from [`CacheStore::read_lines`].
///
/// A missing resource is a distinct, expected branch (the caller falls back
/// to a full rescan); only `Io` represents a real fault.
#[derive(Debug, PartialEq, Eq)]
pub enum CacheReadError<E> {
    /// The cache resource does not exist.
    NotFound,
    /// The resource exists but could not be read.
    Io(E),
}

/// Plain-text, newline-delimited persistence for the song cache.
///
/// The format is bit-exact across implementations: records are consecutive
/// line pairs (`path` then display name), no header, no trailing metadata.
pub trait CacheStore {
    /// I/O error from the underlying storage driver.
    type Error: core::fmt::Debug;

    /// Read the resource at `path`, invoking `visit` once per line with the
    /// trailing newline stripped.
    ///
    /// # Errors
    ///
    /// [`CacheReadError::NotFound`] when the resource is absent;
    /// [`CacheReadError::Io`] when it exists but cannot be read.
    fn read_lines<F>(&mut self, path: &str, visit: F) -> Result<(), CacheReadError<Self::Error>>
    where
        F: FnMut(&str);

    /// Overwrite the resource at `path` with `lines`, each terminated by a
    /// single `\n`.
    ///
    /// # Errors
    ///
    /// Returns the storage driver's error when the destination cannot be
    /// opened or written.
    fn write_lines<'a, I>(&mut self, path: &str, lines: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = &'a str>;

    /// Delete the resource at `path`. Idempotent: deleting an absent
    /// resource is a no-op.
    fn delete(&mut self, path: &str);
}
