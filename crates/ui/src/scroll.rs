//! Scrolling-text renderer.
//!
//! Each display region keeps the text it last painted and repaints only
//! when the text changes or a scroll step is due. Most ticks therefore
//! produce no display I/O at all, which is what keeps frame times flat on
//! slow SPI panels.
//!
//! Text wider than the region's pixel budget slides left one pixel per
//! scroll step, holding briefly at both ends before the cycle restarts.
//! The continuation of a long line is shown by tiling: the same string is
//! drawn once per display line, shifted left by one full panel width per
//! line, so the overflow of line 0 appears at the start of line 1.

use heapless::String;
use platform::{bounded, Canvas, TextMetrics};

/// Pixel placement of a region on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegionGeometry {
    /// Top edge in pixels.
    pub top: i32,
    /// Panel width available to the region.
    pub width_px: u32,
    /// Number of display lines the region spans.
    pub lines: u32,
    /// Vertical distance between consecutive lines.
    pub line_advance: u32,
}

impl RegionGeometry {
    /// Total scrollable pixel budget: text wider than this scrolls.
    // SAFETY (lint allow): panel geometry is a few hundred pixels per
    // dimension, so these products stay far below u32 range.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn pixel_budget(&self) -> u32 {
        self.width_px * self.lines
    }

    /// Height of the region in pixels.
    // SAFETY (lint allow): see pixel_budget.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn height(&self) -> u32 {
        self.lines * self.line_advance
    }
}

/// Scroll speed and hold-at-ends behavior, in frame ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollTiming {
    /// Frames per one-pixel scroll step. Throttles scroll speed
    /// independent of the caller's tick rate.
    pub interval: u32,
    /// Scroll steps to hold at the start and again at the end of a cycle.
    pub ends_hold: u32,
}

impl ScrollTiming {
    /// Comfortable reading pace at a ~30 Hz frame rate.
    pub const DEFAULT: Self = Self {
        interval: 3,
        ends_hold: 8,
    };
}

/// One display region with its scroll state.
#[derive(Debug)]
pub struct ScrollRegion {
    geometry: RegionGeometry,
    timing: ScrollTiming,
    last_text: Option<String<256>>,
    counter: u32,
    needs_scrolling: bool,
    overflow: u32,
}

impl ScrollRegion {
    /// Region that has never painted; the first `present` always repaints.
    pub const fn new(geometry: RegionGeometry, timing: ScrollTiming) -> Self {
        Self {
            geometry,
            timing,
            last_text: None,
            counter: 0,
            needs_scrolling: false,
            overflow: 0,
        }
    }

    /// `true` while the current text is wider than the pixel budget.
    pub fn needs_scrolling(&self) -> bool {
        self.needs_scrolling
    }

    /// Show `text` in this region, repainting only when needed.
    ///
    /// Unchanged static text is a no-op. Unchanged scrolling text repaints
    /// only when the frame counter crosses a scroll-step boundary. A text
    /// change resets the scroll cycle, so new text always starts from the
    /// held position with no torn frame mixing old and new offsets.
    ///
    /// Returns `true` when the frame buffer changed; the caller commits it
    /// to the panel at most once per frame.
    pub fn present<M, C>(&mut self, text: &str, metrics: &M, canvas: &mut C) -> bool
    where
        M: TextMetrics,
        C: Canvas,
    {
        let text = bounded(text);
        if self.last_text.as_deref() == Some(text.as_str()) {
            if !self.needs_scrolling {
                return false;
            }
            self.counter = self.counter.saturating_add(1);
            if !self.crossed_step_boundary() {
                return false;
            }
        } else {
            self.counter = 0;
            let width = metrics.measure(&text, false).width;
            let budget = self.geometry.pixel_budget();
            // Exactly at the budget still fits without scrolling.
            self.needs_scrolling = width > budget;
            self.overflow = width.saturating_sub(budget);
            self.last_text = Some(text);
        }

        let offset = self.held_offset();
        self.repaint(offset, canvas);
        true
    }

    // SAFETY (lint allow): interval is forced to at least 1, so the
    // divisions cannot fault.
    #[allow(clippy::arithmetic_side_effects)]
    fn crossed_step_boundary(&self) -> bool {
        let interval = self.timing.interval.max(1);
        self.counter.saturating_sub(1) / interval != self.counter / interval
    }

    /// Pixel offset for this repaint, holding at both ends of the cycle.
    ///
    /// The raw step count pauses for `ends_hold` steps before motion
    /// starts, is clamped to the overflow width at the far end, and after
    /// a further `ends_hold` steps there the counter resets to restart the
    /// cycle from the held start.
    // SAFETY (lint allow): interval is forced to at least 1.
    #[allow(clippy::arithmetic_side_effects)]
    fn held_offset(&mut self) -> u32 {
        let interval = self.timing.interval.max(1);
        let raw = self.counter / interval;
        let hold = self.timing.ends_hold;
        let offset = raw.saturating_sub(hold).min(self.overflow);
        let cycle_end = self.overflow.saturating_add(hold.saturating_mul(2));
        if raw >= cycle_end {
            self.counter = 0;
        }
        offset
    }

    // SAFETY (lint allow): offsets and line spans are bounded by the panel
    // geometry (a few hundred pixels), well inside i32.
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation
    )]
    fn repaint<C: Canvas>(&self, offset: u32, canvas: &mut C) {
        let g = &self.geometry;
        canvas.clear_region(0, g.top, g.width_px, g.height());
        canvas.set_wrap(!self.needs_scrolling);
        let Some(text) = self.last_text.as_deref() else {
            return;
        };

        if !self.needs_scrolling {
            canvas.set_cursor(0, g.top);
            canvas.draw_text(text);
            return;
        }
        for line in 0..g.lines {
            let x = -((offset + line * g.width_px) as i32);
            let y = g.top + (line * g.line_advance) as i32;
            canvas.set_cursor(x, y);
            canvas.draw_text(text);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use platform::mocks::{CanvasOp, FixedMetrics, MockCanvas};

    fn region(width_px: u32, lines: u32, interval: u32, ends_hold: u32) -> ScrollRegion {
        ScrollRegion::new(
            RegionGeometry {
                top: 0,
                width_px,
                lines,
                line_advance: 20,
            },
            ScrollTiming {
                interval,
                ends_hold,
            },
        )
    }

    fn metrics(char_px: u32) -> FixedMetrics {
        FixedMetrics {
            char_px,
            line_px: 20,
            display_width: 128,
        }
    }

    fn cursors(canvas: &MockCanvas) -> Vec<(i32, i32)> {
        canvas
            .ops()
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Cursor(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_static_text_paints_once_then_idles() {
        let mut region = region(100, 1, 3, 8);
        let mut canvas = MockCanvas::new();
        assert!(region.present("hello", &metrics(10), &mut canvas));
        let painted = canvas.ops().len();
        assert!(!region.present("hello", &metrics(10), &mut canvas));
        assert!(!region.present("hello", &metrics(10), &mut canvas));
        assert_eq!(canvas.ops().len(), painted);
    }

    #[test]
    fn test_width_exactly_at_budget_does_not_scroll() {
        let mut region = region(100, 1, 3, 8);
        let mut canvas = MockCanvas::new();
        let text: std::string::String = core::iter::repeat('x').take(100).collect();
        region.present(&text, &metrics(1), &mut canvas);
        assert!(!region.needs_scrolling());
    }

    #[test]
    fn test_width_one_past_budget_scrolls() {
        let mut region = region(100, 1, 3, 8);
        let mut canvas = MockCanvas::new();
        let text: std::string::String = core::iter::repeat('x').take(101).collect();
        region.present(&text, &metrics(1), &mut canvas);
        assert!(region.needs_scrolling());
    }

    #[test]
    fn test_static_text_draws_wrapped_at_origin() {
        let mut region = region(100, 2, 3, 8);
        let mut canvas = MockCanvas::new();
        region.present("hi", &metrics(10), &mut canvas);
        assert!(canvas.ops().contains(&CanvasOp::Wrap(true)));
        assert_eq!(cursors(&canvas), vec![(0, 0)]);
    }

    #[test]
    fn test_scrolling_text_disables_wrap_and_tiles_lines() {
        // 120 px of text across a two-line 50 px region (budget 100).
        let mut region = region(50, 2, 1, 0);
        let mut canvas = MockCanvas::new();
        let text: std::string::String = core::iter::repeat('x').take(12).collect();
        region.present(&text, &metrics(10), &mut canvas);
        assert!(canvas.ops().contains(&CanvasOp::Wrap(false)));
        // Line 1 starts one panel width further left than line 0.
        assert_eq!(cursors(&canvas), vec![(0, 0), (-50, 20)]);
    }

    #[test]
    fn test_scroll_step_throttle() {
        let mut region = region(100, 1, 3, 0);
        let mut canvas = MockCanvas::new();
        let text: std::string::String = core::iter::repeat('x').take(101).collect();
        region.present(&text, &metrics(1), &mut canvas);
        // Counter 1 and 2 sit inside the first interval; 3 crosses it.
        assert!(!region.present(&text, &metrics(1), &mut canvas));
        assert!(!region.present(&text, &metrics(1), &mut canvas));
        assert!(region.present(&text, &metrics(1), &mut canvas));
    }

    #[test]
    fn test_scroll_holds_at_ends_and_restarts() {
        // Overflow 2 px, one-frame steps, one-step holds.
        let mut region = region(2, 1, 1, 1);
        let mut canvas = MockCanvas::new();
        region.present("abcd", &metrics(1), &mut canvas);
        assert_eq!(cursors(&canvas), vec![(0, 0)]);

        let mut xs = Vec::new();
        for _ in 0..6 {
            canvas.clear_ops();
            if region.present("abcd", &metrics(1), &mut canvas) {
                xs.push(cursors(&canvas)[0].0);
            }
        }
        // Hold at the start, slide out, hold at the end, restart.
        assert_eq!(xs, vec![0, -1, -2, -2, 0, -1]);
    }

    #[test]
    fn test_text_change_restarts_from_held_start() {
        let mut region = region(2, 1, 1, 1);
        let mut canvas = MockCanvas::new();
        region.present("abcd", &metrics(1), &mut canvas);
        for _ in 0..3 {
            region.present("abcd", &metrics(1), &mut canvas);
        }
        canvas.clear_ops();
        assert!(region.present("wxyz", &metrics(1), &mut canvas));
        // Fresh text paints at offset zero, not the old scroll position.
        assert_eq!(cursors(&canvas), vec![(0, 0)]);
    }

    #[test]
    fn test_empty_text_is_valid_and_never_scrolls() {
        let mut region = region(100, 1, 3, 8);
        let mut canvas = MockCanvas::new();
        assert!(region.present("", &metrics(10), &mut canvas));
        assert!(!region.needs_scrolling());
        assert!(!region.present("", &metrics(10), &mut canvas));
    }

    #[test]
    fn test_repaint_clears_the_region_first() {
        let mut region = region(100, 2, 3, 8);
        let mut canvas = MockCanvas::new();
        region.present("hello", &metrics(10), &mut canvas);
        assert_eq!(canvas.ops().first(), Some(&CanvasOp::Clear(0, 0, 100, 40)));
    }

    #[test]
    fn test_overlong_text_is_truncated_not_rejected() {
        let mut region = region(100, 1, 3, 8);
        let mut canvas = MockCanvas::new();
        let text: std::string::String = core::iter::repeat('y').take(400).collect();
        assert!(region.present(&text, &metrics(1), &mut canvas));
        // The same overlong input compares equal after truncation.
        region.present(&text, &metrics(1), &mut canvas);
        let drawn = canvas
            .ops()
            .iter()
            .find_map(|op| match op {
                CanvasOp::Text(t) => Some(t.len()),
                _ => None,
            })
            .unwrap();
        assert_eq!(drawn, 256);
    }
}
