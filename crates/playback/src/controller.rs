//! Playback controller — selection, navigation, pause and auto-advance.

use catalog::{SongCatalog, Track};
use platform::Decoder;

use crate::clock::ElapsedClock;
use crate::status::{DisplayStatus, FrameStatus};
use crate::volume::VolumeFilter;

/// Owns the catalog, the current selection, and the decoder.
///
/// The catalog and selection are owned exclusively; other components
/// receive copies of strings and indices, never shared references to the
/// mutable state. Construction does not start playback — call
/// [`change_song(0)`](PlayerControl::change_song) to start the first track.
pub struct PlayerControl<D, const N: usize> {
    catalog: SongCatalog<N>,
    decoder: D,
    index: usize,
    paused: bool,
    start_failed: bool,
    armed: bool,
    clock: ElapsedClock,
    volume: VolumeFilter,
}

/// Wrap `index + delta` into `[0, len)` for any delta magnitude or sign.
// SAFETY (lint allow): len is a catalog length (>= 1, <= MAX_TRACKS) and
// index < len, so all values fit i64 and rem_euclid never divides by zero
// at the single call site (guarded by the non-empty catalog precondition).
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn wrap_index(index: usize, delta: i32, len: usize) -> usize {
    (index as i64 + i64::from(delta)).rem_euclid(len as i64) as usize
}

impl<D: Decoder, const N: usize> PlayerControl<D, N> {
    /// Take ownership of a built catalog and the decoder.
    ///
    /// Precondition: `catalog` is non-empty (the catalog builder treats an
    /// empty scan as fatal, so a constructed controller always has songs).
    pub fn new(catalog: SongCatalog<N>, decoder: D) -> Self {
        Self {
            catalog,
            decoder,
            index: 0,
            paused: false,
            start_failed: false,
            armed: false,
            clock: ElapsedClock::new(),
            volume: VolumeFilter::new(),
        }
    }

    /// The catalog in session order.
    pub fn catalog(&self) -> &SongCatalog<N> {
        &self.catalog
    }

    /// Zero-based selection index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The currently selected track.
    pub fn selected(&self) -> Option<&Track> {
        self.catalog.get(self.index)
    }

    /// `true` while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Direct decoder access for the hardware layer (patch loading, test
    /// tones) and for tests.
    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }

    /// Move the selection by `delta` (wrapping in either direction) and
    /// restart playback there.
    ///
    /// The decoder is stopped and soft-reset (clearing its elapsed-time
    /// register so playtime doesn't accumulate between songs) before the
    /// new file starts. On a start failure the selection stays on the new
    /// index — no skip-ahead — and the failure is surfaced on the status
    /// line. Pause state is left untouched either way.
    ///
    /// Returns `true` when the new file started.
    pub fn change_song(&mut self, delta: i32, now_ms: u64) -> bool {
        if self.catalog.is_empty() {
            return false;
        }
        self.index = wrap_index(self.index, delta, self.catalog.len());
        self.armed = true;

        self.decoder.stop();
        self.decoder.soft_reset();

        let Some(track) = self.catalog.get(self.index) else {
            return false;
        };
        match self.decoder.start_playing_file(&track.path) {
            Ok(()) => {
                self.start_failed = false;
                self.clock.start(now_ms);
                true
            }
            Err(_) => {
                self.decoder.stop();
                self.start_failed = true;
                false
            }
        }
    }

    /// Flip pause, commanding the decoder and closing/opening the paused
    /// span in the elapsed clock. Returns the new paused state.
    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        self.paused = !self.paused;
        if self.paused {
            self.clock.pause(now_ms);
        } else {
            self.clock.resume(now_ms);
        }
        self.decoder.pause(self.paused);
        self.paused
    }

    /// Feed a volume pot reading; accepted changes go to both decoder
    /// channels and start the status-line flash window.
    pub fn set_volume_reading(&mut self, reading: f32, now_ms: u64) {
        if let Some(change) = self.volume.update(reading, now_ms) {
            self.decoder.set_volume(change.attenuation, change.attenuation);
        }
    }

    /// Once-per-frame housekeeping and status computation.
    ///
    /// When not paused and the decoder reports the stream finished, the
    /// selection advances forward by exactly one (a failed start instead
    /// retries in place, so an unplayable track never causes a skip-ahead).
    pub fn tick(&mut self, now_ms: u64) -> FrameStatus {
        if self.armed && !self.paused && self.decoder.is_stopped() {
            // Advance to the next song upon completion.
            let delta = if self.start_failed { 0 } else { 1 };
            self.change_song(delta, now_ms);
        }

        let status = if self.volume.flash_active(now_ms) {
            DisplayStatus::VolumeFlash {
                percent: self.volume.percent(),
            }
        } else if self.paused {
            DisplayStatus::Paused
        } else if self.start_failed {
            DisplayStatus::StartFailed
        } else {
            // SAFETY (lint allow): milliseconds / 1000 over u64 then capped
            // into u32 — a session would need 136 years to overflow.
            #[allow(clippy::cast_possible_truncation)]
            let elapsed_secs = (self.clock.elapsed_ms(now_ms) / 1000) as u32;
            DisplayStatus::Playing {
                elapsed_secs,
                index: self.index,
                count: self.catalog.len(),
            }
        };

        let name = self
            .selected()
            .map(|t| t.display_name.clone())
            .unwrap_or_default();
        FrameStatus { name, status }
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
    use catalog::SmallCatalog;
    use platform::mocks::{DecoderCommand, MockDecoder};

    impl<const N: usize> PlayerControl<MockDecoder, N> {
        fn decoder_commands(&self) -> &[DecoderCommand] {
            self.decoder.commands()
        }
    }

    fn three_song_catalog() -> SmallCatalog {
        let mut cat = SmallCatalog::new();
        for p in ["a.mp3", "b.mp3", "c.mp3"] {
            cat.insert(Track::new(p, p.trim_end_matches(".mp3"))).unwrap();
        }
        cat
    }

    fn controller() -> PlayerControl<MockDecoder, 16> {
        PlayerControl::new(three_song_catalog(), MockDecoder::new())
    }

    #[test]
    fn test_new_selects_first_track_without_playing() {
        let ctl = controller();
        assert_eq!(ctl.index(), 0);
        assert_eq!(ctl.selected().unwrap().path.as_str(), "a.mp3");
    }

    #[test]
    fn test_change_song_zero_starts_current() {
        let mut ctl = controller();
        assert!(ctl.change_song(0, 0));
        assert_eq!(ctl.index(), 0);
        assert!(ctl
            .decoder_commands()
            .contains(&DecoderCommand::Start("a.mp3".into())));
    }

    #[test]
    fn test_change_song_wraps_backward() {
        let mut ctl = controller();
        ctl.change_song(-1, 0);
        assert_eq!(ctl.index(), 2);
    }

    #[test]
    fn test_change_song_wraps_large_deltas() {
        let mut ctl = controller();
        for (delta, expected) in [(7, 1), (-7, 0), (3000, 0), (-3002, 1)] {
            ctl.change_song(delta, 0);
            assert_eq!(ctl.index(), expected, "delta {delta}");
        }
    }

    #[test]
    fn test_change_song_stops_and_resets_before_start() {
        let mut ctl = controller();
        ctl.change_song(0, 0);
        let cmds = ctl.decoder_commands();
        let stop = cmds
            .iter()
            .position(|c| *c == DecoderCommand::Stop)
            .unwrap();
        let reset = cmds
            .iter()
            .position(|c| *c == DecoderCommand::SoftReset)
            .unwrap();
        let start = cmds
            .iter()
            .position(|c| matches!(c, DecoderCommand::Start(_)))
            .unwrap();
        assert!(stop < reset && reset < start);
    }

    #[test]
    fn test_start_failure_keeps_selection() {
        let mut ctl = PlayerControl::new(three_song_catalog(), {
            let mut d = MockDecoder::new();
            d.fail_path("b.mp3");
            d
        });
        ctl.change_song(0, 0);
        assert!(!ctl.change_song(1, 0));
        // Selection stays on the failed index; no skip-ahead.
        assert_eq!(ctl.index(), 1);
        assert_eq!(ctl.tick(0).status, DisplayStatus::StartFailed);
    }

    #[test]
    fn test_tick_advances_once_on_natural_completion() {
        let mut ctl = controller();
        ctl.change_song(0, 0);
        ctl.decoder_mut().set_stopped(true);
        ctl.tick(10);
        assert_eq!(ctl.index(), 1);
        // The new song started, so a second tick must not advance again.
        ctl.tick(20);
        assert_eq!(ctl.index(), 1);
    }

    #[test]
    fn test_tick_does_not_advance_while_paused() {
        let mut ctl = controller();
        ctl.change_song(0, 0);
        ctl.toggle_pause(0);
        ctl.decoder_mut().set_stopped(true);
        ctl.tick(10);
        assert_eq!(ctl.index(), 0);
        assert_eq!(ctl.tick(20).status, DisplayStatus::Paused);
    }

    #[test]
    fn test_tick_before_first_start_is_inert() {
        let mut ctl = controller();
        ctl.tick(0);
        assert_eq!(ctl.index(), 0);
        assert!(ctl.decoder_commands().is_empty());
    }

    #[test]
    fn test_failed_start_retries_in_place() {
        let mut ctl = PlayerControl::new(three_song_catalog(), {
            let mut d = MockDecoder::new();
            d.fail_path("a.mp3");
            d
        });
        ctl.change_song(0, 0);
        ctl.tick(10);
        ctl.tick(20);
        // Still parked on the unplayable track.
        assert_eq!(ctl.index(), 0);
    }

    #[test]
    fn test_change_song_does_not_unpause() {
        let mut ctl = controller();
        ctl.change_song(0, 0);
        ctl.toggle_pause(0);
        ctl.change_song(1, 10);
        assert!(ctl.is_paused());
    }

    #[test]
    fn test_elapsed_excludes_paused_time() {
        let mut ctl = controller();
        ctl.change_song(0, 0);
        ctl.toggle_pause(5_000);
        ctl.toggle_pause(9_000);
        match ctl.tick(65_000).status {
            DisplayStatus::Playing { elapsed_secs, .. } => assert_eq!(elapsed_secs, 61),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn test_volume_flash_overrides_pause() {
        let mut ctl = controller();
        ctl.change_song(0, 0);
        ctl.toggle_pause(0);
        ctl.set_volume_reading(0.25, 1_000);
        match ctl.tick(1_200).status {
            DisplayStatus::VolumeFlash { .. } => {}
            other => panic!("expected volume flash, got {other:?}"),
        }
        // Window over: pause indicator returns.
        assert_eq!(ctl.tick(2_500).status, DisplayStatus::Paused);
    }

    #[test]
    fn test_volume_reading_commands_both_channels() {
        let mut ctl = controller();
        ctl.change_song(0, 0);
        ctl.set_volume_reading(1.0, 0);
        assert!(ctl
            .decoder_commands()
            .contains(&DecoderCommand::SetVolume(160, 160)));
    }

    #[test]
    fn test_playing_status_carries_index_and_count() {
        let mut ctl = controller();
        ctl.change_song(1, 0);
        match ctl.tick(0).status {
            DisplayStatus::Playing { index, count, .. } => {
                assert_eq!(index, 1);
                assert_eq!(count, 3);
            }
            other => panic!("unexpected status {other:?}"),
        }
    }
}
