//! Application control loop.

use core::fmt::Write;

use catalog::{build_from_scan, cache, BuildError, MAX_TRACKS};
use platform::{
    Button, CacheStore, Canvas, Decoder, DirEnumerator, InputEvent, TagReader, TextMetrics,
};
use playback::PlayerControl;
use ui::{status_region, status_text, title_region, ScrollRegion};

/// How long the scan's skipped-entry count owns the status line after boot.
const SKIPPED_NOTICE_MS: u64 = 2000;

/// The assembled player: controller plus display regions.
///
/// Owns no hardware; every collaborator arrives through a `platform`
/// trait. One frame of work is one [`frame`](App::frame) call.
///
/// `N` is the catalog capacity. A [`FullApp`] embeds a
/// [`MAX_TRACKS`]-sized catalog (hundreds of kilobytes), so the board
/// build must place it in a static, never on a task stack; host tests
/// instantiate a small capacity instead.
pub struct App<D: Decoder, const N: usize> {
    control: PlayerControl<D, N>,
    title: ScrollRegion,
    status: ScrollRegion,
    skipped: u32,
    notice_until: u64,
}

/// The full-capacity application for the board build.
pub type FullApp<D> = App<D, MAX_TRACKS>;

impl<D: Decoder, const N: usize> App<D, N> {
    /// Build the catalog and start the first track.
    ///
    /// The cache is tried first; a miss (or unreadable/empty cache) falls
    /// back to a full scan, whose result is persisted for the next boot.
    /// A persist failure is not fatal, the player just rescans next time.
    ///
    /// # Errors
    ///
    /// [`BuildError::NoSongs`] when the card holds nothing playable, and
    /// [`BuildError::Dir`] when the root cannot be enumerated. Both are
    /// fatal startup conditions surfaced to the board layer.
    pub fn start<Dir, T, S>(
        dir: &mut Dir,
        tags: &mut T,
        store: &mut S,
        decoder: D,
        now_ms: u64,
    ) -> Result<Self, BuildError<Dir::Error>>
    where
        Dir: DirEnumerator,
        T: TagReader,
        S: CacheStore,
    {
        let (songs, skipped) = match cache::load::<N, S>(store) {
            Some(cached) => (cached, 0),
            None => {
                let outcome = build_from_scan::<N, Dir, T>(dir, tags)?;
                if cache::persist(&outcome.catalog, store).is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("song cache write failed; rescanning next boot");
                }
                (outcome.catalog, outcome.skipped)
            }
        };

        let mut control = PlayerControl::new(songs, decoder);
        control.change_song(0, now_ms);
        let notice_until = if skipped > 0 {
            now_ms.saturating_add(SKIPPED_NOTICE_MS)
        } else {
            0
        };
        Ok(Self {
            control,
            title: title_region(),
            status: status_region(),
            skipped,
            notice_until,
        })
    }

    /// The playback controller.
    pub fn control(&self) -> &PlayerControl<D, N> {
        &self.control
    }

    /// Mutable controller access for the board layer and tests.
    pub fn control_mut(&mut self) -> &mut PlayerControl<D, N> {
        &mut self.control
    }

    /// Directory entries the scan had to skip (zero on a cache hit).
    pub fn skipped_entries(&self) -> u32 {
        self.skipped
    }

    /// Run one frame: input, volume, playback housekeeping, display.
    ///
    /// Input is applied before the status is computed, and the status
    /// before presentation, so the display always reflects this frame's
    /// post-input state. A pause press wins over encoder motion delivered
    /// in the same frame because the encoder position is unstable while
    /// the knob is being pressed. Navigation is ignored while paused.
    ///
    /// The frame buffer is committed at most once, and only when a region
    /// actually repainted.
    ///
    /// # Errors
    ///
    /// Returns the canvas error when the commit transfer fails.
    pub fn frame<M, C>(
        &mut self,
        events: &[InputEvent],
        volume_reading: f32,
        now_ms: u64,
        metrics: &M,
        canvas: &mut C,
    ) -> Result<(), C::Error>
    where
        M: TextMetrics,
        C: Canvas,
    {
        let mut delta: i32 = 0;
        let mut pause_pressed = false;
        for event in events {
            match event {
                InputEvent::EncoderTurn(steps) => delta = delta.saturating_add(*steps),
                InputEvent::ButtonPress(Button::Encoder) => pause_pressed = true,
                // The mass-storage button is the board layer's concern; it
                // calls prepare_mass_storage before handing the card over.
                InputEvent::ButtonPress(Button::MassStorage) => {}
            }
        }
        if pause_pressed {
            self.control.toggle_pause(now_ms);
        } else if delta != 0 && !self.control.is_paused() {
            self.control.change_song(delta, now_ms);
        }

        self.control.set_volume_reading(volume_reading, now_ms);
        let frame = self.control.tick(now_ms);

        let mut repainted = self.title.present(&frame.name, metrics, canvas);
        let line = if now_ms < self.notice_until {
            // Entries the scan had to skip are reported briefly at boot.
            let mut notice = heapless::String::<32>::new();
            let _ = write!(notice, "{} skipped", self.skipped);
            notice
        } else {
            status_text(&frame.status)
        };
        repainted |= self.status.present(&line, metrics, canvas);
        if repainted {
            canvas.commit()?;
        }
        Ok(())
    }

    /// Pause playback and invalidate the cache ahead of exposing the card
    /// over USB mass storage. The host may rewrite the card, so the next
    /// boot must rescan.
    pub fn prepare_mass_storage<S: CacheStore>(&mut self, store: &mut S, now_ms: u64) {
        if !self.control.is_paused() {
            self.control.toggle_pause(now_ms);
        }
        cache::invalidate(store);
    }
}
