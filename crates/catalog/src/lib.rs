//! Song catalog management — SD scan, display-name derivation, song cache.
//!
//! # Modules
//!
//! - [`track`] — `Track` record (path + derived display name)
//! - [`index`] — `SongCatalog<N>` fixed-capacity ordered catalog
//! - [`scanner`] — extension filtering and display-name derivation
//! - [`builder`] — full directory scan producing a sorted catalog
//! - [`cache`] — flat-file cache so startup can skip the tag-reading scan

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod builder;
pub mod cache;
pub mod index;
pub mod scanner;
pub mod track;

// Top-level re-exports for convenience
pub use builder::{build_from_scan, BuildError, ScanOutcome};
pub use cache::CACHE_PATH;
pub use index::{CatalogError, FullCatalog, SmallCatalog, SongCatalog, MAX_TRACKS};
pub use track::Track;
