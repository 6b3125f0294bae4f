//! Volume control — potentiometer reading → decoder attenuation.
//!
//! The decoder's volume register is inverted: 0 is loudest and
//! [`ATTENUATION_INAUDIBLE`](platform::ATTENUATION_INAUDIBLE) (160) is
//! effectively silent. The pot is wired in reverse, so a high reading maps
//! to high attenuation.
//!
//! ADC noise makes the displayed percentage flicker by ±1 even with the
//! knob untouched; the filter ignores single-percent changes unless a
//! volume adjustment is already on screen (0% and 100% are exempt because
//! their ends of pot travel have a wider stable range).

use platform::ATTENUATION_INAUDIBLE;

/// How long a volume adjustment stays on the status line, in milliseconds.
pub const VOLUME_FLASH_MS: u64 = 1000;

/// An accepted volume change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VolumeChange {
    /// Attenuation to write to both decoder channels.
    pub attenuation: u8,
    /// User-facing percentage, 0–100.
    pub percent: u8,
}

/// Debounces pot readings into discrete volume changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeFilter {
    previous_percent: Option<u8>,
    last_change_ms: Option<u64>,
}

impl VolumeFilter {
    /// Filter with no reading seen yet (the first reading always applies).
    pub const fn new() -> Self {
        Self {
            previous_percent: None,
            last_change_ms: None,
        }
    }

    /// Feed one pot reading in `0.0..=1.0`.
    ///
    /// Returns the change to apply to the decoder, or `None` when the
    /// reading rounds to the displayed percentage or is flicker-filtered.
    pub fn update(&mut self, reading: f32, now_ms: u64) -> Option<VolumeChange> {
        let change = mapping(reading);

        let Some(previous) = self.previous_percent else {
            self.accept(change.percent, now_ms);
            return Some(change);
        };
        if previous == change.percent {
            return None;
        }

        // Ignore single-percentage changes when not already displaying
        // volume. This means the minimum adjustment to start adjusting is 2.
        // (With the exception of 0% and 100% as those have a wider stable
        // range.)
        let idle = !self.flash_active(now_ms);
        let step = previous.abs_diff(change.percent);
        if idle && step == 1 && change.percent != 0 && change.percent != 100 {
            return None;
        }

        self.accept(change.percent, now_ms);
        Some(change)
    }

    /// `true` while a recent change should own the status line.
    pub fn flash_active(&self, now_ms: u64) -> bool {
        self.last_change_ms
            .is_some_and(|at| now_ms.saturating_sub(at) < VOLUME_FLASH_MS)
    }

    /// Most recently displayed percentage (0 before any reading).
    pub fn percent(&self) -> u8 {
        self.previous_percent.unwrap_or(0)
    }

    fn accept(&mut self, percent: u8, now_ms: u64) {
        self.previous_percent = Some(percent);
        self.last_change_ms = Some(now_ms);
    }
}

/// Map a pot reading to attenuation and display percentage.
///
/// Reverse pot: reading 0.0 is full volume (attenuation 0, 100%), reading
/// 1.0 is inaudible (attenuation 160, 0%).
// SAFETY (lint allow): reading is clamped to [0, 1] so every product and
// cast stays within u8 range; +0.5 truncation is round-to-nearest on
// non-negative values (core has no f32::round).
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn mapping(reading: f32) -> VolumeChange {
    let clamped = reading.clamp(0.0, 1.0);
    let attenuation = (clamped * f32::from(ATTENUATION_INAUDIBLE) + 0.5) as u8;
    // 0 attenuation is 100%; 160 is 0%.
    let percent =
        (100.0 - (100.0 / f32::from(ATTENUATION_INAUDIBLE)) * f32::from(attenuation) + 0.5) as u8;
    VolumeChange {
        attenuation,
        percent,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_endpoints() {
        let loudest = mapping(0.0);
        assert_eq!(loudest.attenuation, 0);
        assert_eq!(loudest.percent, 100);

        let silent = mapping(1.0);
        assert_eq!(silent.attenuation, ATTENUATION_INAUDIBLE);
        assert_eq!(silent.percent, 0);
    }

    #[test]
    fn test_mapping_clamps_out_of_range_reading() {
        assert_eq!(mapping(-0.3).percent, 100);
        assert_eq!(mapping(1.7).percent, 0);
    }

    #[test]
    fn test_first_reading_always_applies() {
        let mut filter = VolumeFilter::new();
        assert!(filter.update(0.5, 0).is_some());
    }

    #[test]
    fn test_unchanged_percent_is_ignored() {
        let mut filter = VolumeFilter::new();
        filter.update(0.5, 0);
        assert!(filter.update(0.5, 10).is_none());
    }

    #[test]
    fn test_single_percent_flicker_ignored_when_idle() {
        let mut filter = VolumeFilter::new();
        filter.update(0.5, 0);
        let percent = filter.percent();
        // Past the flash window, nudge the reading by one percent.
        let nudged = 1.0 - (f32::from(percent) - 1.0) / 100.0;
        let result = filter.update(nudged, VOLUME_FLASH_MS + 500);
        assert!(result.is_none(), "flicker should be filtered: {result:?}");
    }

    #[test]
    fn test_single_percent_accepted_while_flash_active() {
        let mut filter = VolumeFilter::new();
        filter.update(0.5, 0);
        let percent = filter.percent();
        let nudged = 1.0 - (f32::from(percent) - 1.0) / 100.0;
        // Within the window the knob is clearly being turned.
        assert!(filter.update(nudged, 200).is_some());
    }

    #[test]
    fn test_extremes_bypass_flicker_filter() {
        let mut filter = VolumeFilter::new();
        // Settle at 1%.
        filter.update(0.99, 0);
        // 1% -> 0% is a single step but lands on an exempt extreme.
        let result = filter.update(1.0, VOLUME_FLASH_MS + 500);
        assert_eq!(result.map(|c| c.percent), Some(0));
    }

    #[test]
    fn test_flash_window_expires() {
        let mut filter = VolumeFilter::new();
        filter.update(0.5, 0);
        assert!(filter.flash_active(999));
        assert!(!filter.flash_active(1_000));
    }
}
