//! Per-frame display status.

use heapless::String;

/// What the status line should show this frame.
///
/// Priority-ordered selection, not independent displays: a recent volume
/// change overrides everything, then the pause indicator, then a failed
/// start, then the normal elapsed-time readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayStatus {
    /// A volume adjustment is flashing.
    VolumeFlash {
        /// Displayed percentage, 0–100.
        percent: u8,
    },
    /// Playback is paused.
    Paused,
    /// The selected track refused to start.
    StartFailed,
    /// Normal playback readout.
    Playing {
        /// Audible playback time in whole seconds.
        elapsed_secs: u32,
        /// Zero-based selection index.
        index: usize,
        /// Catalog length.
        count: usize,
    },
}

/// Everything the display needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStatus {
    /// Display name of the selected track.
    pub name: String<256>,
    /// Status-line content.
    pub status: DisplayStatus,
}
