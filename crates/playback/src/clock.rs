//! Elapsed-time accounting that excludes paused intervals.

/// Tracks how long the current song has been audibly playing.
///
/// Wall-clock milliseconds are supplied by the caller; the clock itself
/// never reads time. Paused spans are accumulated separately so
/// [`elapsed_ms`](ElapsedClock::elapsed_ms) reports listening time only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElapsedClock {
    started_at: u64,
    paused_total: u64,
    pause_started: Option<u64>,
}

impl ElapsedClock {
    /// Clock with no song started.
    pub const fn new() -> Self {
        Self {
            started_at: 0,
            paused_total: 0,
            pause_started: None,
        }
    }

    /// Restart accounting for a new song.
    ///
    /// The paused accumulator is zeroed. If the player is mid-pause the
    /// pause carries over, restarting from `now_ms` (changing song does not
    /// implicitly unpause).
    pub fn start(&mut self, now_ms: u64) {
        self.started_at = now_ms;
        self.paused_total = 0;
        if self.pause_started.is_some() {
            self.pause_started = Some(now_ms);
        }
    }

    /// Record the start of a paused span. Idempotent while paused.
    pub fn pause(&mut self, now_ms: u64) {
        if self.pause_started.is_none() {
            self.pause_started = Some(now_ms);
        }
    }

    /// Close the current paused span, folding it into the accumulator.
    pub fn resume(&mut self, now_ms: u64) {
        if let Some(since) = self.pause_started.take() {
            self.paused_total = self
                .paused_total
                .saturating_add(now_ms.saturating_sub(since));
        }
    }

    /// Milliseconds of audible playback since [`start`](ElapsedClock::start),
    /// excluding every paused span (including one still open).
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let open_pause = self
            .pause_started
            .map_or(0, |since| now_ms.saturating_sub(since));
        now_ms
            .saturating_sub(self.started_at)
            .saturating_sub(self.paused_total)
            .saturating_sub(open_pause)
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
    fn test_elapsed_counts_playing_time() {
        let mut clock = ElapsedClock::new();
        clock.start(1_000);
        assert_eq!(clock.elapsed_ms(4_500), 3_500);
    }

    #[test]
    fn test_elapsed_excludes_closed_pause() {
        let mut clock = ElapsedClock::new();
        clock.start(0);
        clock.pause(1_000);
        clock.resume(3_000);
        assert_eq!(clock.elapsed_ms(5_000), 3_000);
    }

    #[test]
    fn test_elapsed_excludes_open_pause() {
        let mut clock = ElapsedClock::new();
        clock.start(0);
        clock.pause(2_000);
        // Still paused: elapsed freezes at 2000.
        assert_eq!(clock.elapsed_ms(10_000), 2_000);
    }

    #[test]
    fn test_elapsed_over_many_toggles() {
        let mut clock = ElapsedClock::new();
        clock.start(0);
        let mut now = 0;
        // Alternate 100 ms playing, 50 ms paused, ten times.
        for _ in 0..10 {
            now += 100;
            clock.pause(now);
            now += 50;
            clock.resume(now);
        }
        assert_eq!(clock.elapsed_ms(now), 1_000);
    }

    #[test]
    fn test_start_resets_accumulator() {
        let mut clock = ElapsedClock::new();
        clock.start(0);
        clock.pause(100);
        clock.resume(200);
        clock.start(1_000);
        assert_eq!(clock.elapsed_ms(1_400), 400);
    }

    #[test]
    fn test_start_while_paused_keeps_pause_open() {
        let mut clock = ElapsedClock::new();
        clock.start(0);
        clock.pause(500);
        // Song changes while paused; elapsed stays zero until resume.
        clock.start(1_000);
        assert_eq!(clock.elapsed_ms(2_000), 0);
        clock.resume(2_000);
        assert_eq!(clock.elapsed_ms(2_600), 600);
    }
}
