//! Status-line text for the bottom display region.

use core::fmt::Write;

use heapless::String;
use playback::DisplayStatus;

/// Render `status` as the one-line readout.
///
/// Playing shows `m:ss nn/total` with a one-based track number; the
/// volume and pause variants are indented to sit clear of the track
/// readout position.
// SAFETY (lint allow): seconds split and the one-based track number use
// constants and saturating math; the buffer is sized for the widest
// readout so the writes cannot fail.
#[allow(clippy::arithmetic_side_effects)]
pub fn status_text(status: &DisplayStatus) -> String<32> {
    let mut out = String::new();
    match *status {
        DisplayStatus::VolumeFlash { percent } => {
            let _ = write!(out, "    Vol {percent}%");
        }
        DisplayStatus::Paused => {
            let _ = out.push_str("    Paused");
        }
        DisplayStatus::StartFailed => {
            let _ = out.push_str("start failed");
        }
        DisplayStatus::Playing {
            elapsed_secs,
            index,
            count,
        } => {
            let minutes = elapsed_secs / 60;
            let seconds = elapsed_secs % 60;
            let number = index.saturating_add(1);
            let _ = write!(out, "{minutes}:{seconds:02} {number:02}/{count}");
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_playing_pads_seconds_and_track_number() {
        let status = DisplayStatus::Playing {
            elapsed_secs: 65,
            index: 1,
            count: 12,
        };
        assert_eq!(status_text(&status).as_str(), "1:05 02/12");
    }

    #[test]
    fn test_playing_at_zero() {
        let status = DisplayStatus::Playing {
            elapsed_secs: 0,
            index: 0,
            count: 3,
        };
        assert_eq!(status_text(&status).as_str(), "0:00 01/3");
    }

    #[test]
    fn test_long_track_minutes_keep_counting() {
        let status = DisplayStatus::Playing {
            elapsed_secs: 754,
            index: 8,
            count: 140,
        };
        assert_eq!(status_text(&status).as_str(), "12:34 09/140");
    }

    #[test]
    fn test_volume_flash() {
        let status = DisplayStatus::VolumeFlash { percent: 85 };
        assert_eq!(status_text(&status).as_str(), "    Vol 85%");
    }

    #[test]
    fn test_paused() {
        assert_eq!(status_text(&DisplayStatus::Paused).as_str(), "    Paused");
    }

    #[test]
    fn test_start_failed() {
        assert_eq!(
            status_text(&DisplayStatus::StartFailed).as_str(),
            "start failed"
        );
    }
}
