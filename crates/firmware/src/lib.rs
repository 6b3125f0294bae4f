//! Board-agnostic control loop for the Feather audio player.
//!
//! [`App`] ties the feature crates together: the startup policy (cached
//! catalog or full scan), the per-frame sequencing of input, volume,
//! playback housekeeping and display presentation, and the mass-storage
//! handoff. Hardware drivers live behind the `platform` traits; a board
//! binary constructs them and calls [`App::start`] then [`App::frame`]
//! once per frame.

#![cfg_attr(not(test), no_std)]

pub mod app;

pub use app::{App, FullApp};
