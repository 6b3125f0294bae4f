//! Display engine for the player's OLED status screen.
//!
//! Two concerns live here: the scroll renderer, which repaints a display
//! region only when its text changed or a scroll step is due, and the
//! status-line formatter, which turns a [`DisplayStatus`] into the fixed
//! one-line readout. Region placement for the 128x64 panel is in
//! [`layout`].
//!
//! [`DisplayStatus`]: playback::DisplayStatus

#![cfg_attr(not(test), no_std)]

pub mod layout;
pub mod scroll;
pub mod status_line;

pub use layout::{status_region, title_region, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use scroll::{RegionGeometry, ScrollRegion, ScrollTiming};
pub use status_line::status_text;
