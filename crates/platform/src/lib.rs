//! Hardware Abstraction Layer (HAL) for the Feather audio player
//!
//! This crate provides trait-based abstractions for everything the player
//! core touches outside itself, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layers (catalog, playback, ui)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (vendor SD / VS1053 / OLED drivers)
//! ```
//!
//! # Abstractions
//!
//! - [`DirEnumerator`] - non-recursive root-directory listing
//! - [`TagReader`] - ID3-style tag lookup
//! - [`CacheStore`] - line-oriented persisted song cache
//! - [`Decoder`] - VS1053-class hardware audio decoder
//! - [`TextMetrics`] / [`Canvas`] - status display measurement and drawing
//! - [`InputEvent`] - debounced encoder/button events
//!
//! # Features
//!
//! - `std`: Enable standard library support (local file-system
//!   implementations and mocks for host testing)
//! - `defmt`: Enable defmt logging derives (hardware builds)

#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod cache_store;
pub mod canvas;
pub mod decoder;
pub mod dir;
pub mod input;
pub mod mocks;
pub mod oled;
pub mod strings;
pub mod tags;
pub mod text;

#[cfg(any(test, feature = "std"))]
pub mod storage_local;

pub use cache_store::{CacheReadError, CacheStore};
pub use canvas::Canvas;
pub use decoder::{Decoder, ATTENUATION_INAUDIBLE, ATTENUATION_MAX_VOLUME, ATTENUATION_SILENT};
pub use dir::{DirEntry, DirEnumerator};
pub use input::{Button, InputEvent};
pub use strings::bounded;
pub use tags::{TagKind, TagReader};
pub use text::{TextMetrics, TextSize};
