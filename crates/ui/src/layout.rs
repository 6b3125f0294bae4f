//! Region placement for the 128x64 OLED panel.
//!
//! The song title gets the top two 20 px lines; the status readout gets a
//! single line flush with the bottom edge.

use platform::oled::LINE_HEIGHT;

use crate::scroll::{RegionGeometry, ScrollRegion, ScrollTiming};

/// Panel width in pixels.
pub const DISPLAY_WIDTH: u32 = 128;
/// Panel height in pixels.
pub const DISPLAY_HEIGHT: u32 = 64;

/// Display lines given to the song title.
pub const TITLE_LINES: u32 = 2;

/// Top edge of the status line.
// SAFETY (lint allow): fixed panel geometry, no overflow possible.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]
pub const STATUS_TOP: i32 = (DISPLAY_HEIGHT - LINE_HEIGHT) as i32;

/// Two-line scrolling region for the song title.
pub const fn title_region() -> ScrollRegion {
    ScrollRegion::new(
        RegionGeometry {
            top: 0,
            width_px: DISPLAY_WIDTH,
            lines: TITLE_LINES,
            line_advance: LINE_HEIGHT,
        },
        ScrollTiming::DEFAULT,
    )
}

/// Single-line region for the status readout.
pub const fn status_region() -> ScrollRegion {
    ScrollRegion::new(
        RegionGeometry {
            top: STATUS_TOP,
            width_px: DISPLAY_WIDTH,
            lines: 1,
            line_advance: LINE_HEIGHT,
        },
        ScrollTiming::DEFAULT,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_tile_the_panel_without_overlap() {
        let title_bottom = TITLE_LINES * LINE_HEIGHT;
        assert!(title_bottom <= STATUS_TOP.unsigned_abs());
        assert_eq!(STATUS_TOP.unsigned_abs() + LINE_HEIGHT, DISPLAY_HEIGHT);
    }
}
