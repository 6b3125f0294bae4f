//! Playback control — selection state machine, pause accounting, volume.
//!
//! Pure, `no_std` state machines plus a controller that commands the
//! hardware decoder through the [`platform::Decoder`] trait. No I/O beyond
//! that trait; all timekeeping is passed in as `now_ms` arguments so every
//! path is testable on the host.
//!
//! # Modules
//!
//! - [`clock`] — elapsed-time accounting that excludes paused intervals
//! - [`volume`] — potentiometer → attenuation mapping with flicker filtering
//! - [`status`] — per-frame display status selection
//! - [`controller`] — the playback controller itself

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod clock;
pub mod controller;
pub mod status;
pub mod volume;

pub use clock::ElapsedClock;
pub use controller::PlayerControl;
pub use status::{DisplayStatus, FrameStatus};
pub use volume::{VolumeChange, VolumeFilter, VOLUME_FLASH_MS};
