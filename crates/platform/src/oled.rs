//! Concrete [`Canvas`]/[`TextMetrics`] over an embedded-graphics panel.
//!
//! Targets the 128×64 monochrome OLED FeatherWing (SH1107, rotated to
//! landscape). Text renders in `FONT_10X20`, the closest embedded-graphics
//! match for the vendor library's size-2 font.

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use crate::canvas::Canvas;
use crate::text::{TextMetrics, TextSize};

/// Glyph advance of the panel font in pixels.
pub const CHAR_WIDTH: u32 = 10;

/// Line height of the panel font in pixels.
pub const LINE_HEIGHT: u32 = 20;

/// A frame-buffered panel that can push its buffer over the bus.
///
/// The SH1107/SSD1306-style drivers all expose exactly this: embedded-graphics
/// drawing into RAM plus an explicit flush.
pub trait PanelFlush: DrawTarget<Color = BinaryColor> {
    /// Push the frame buffer to the panel.
    ///
    /// # Errors
    ///
    /// Returns the bus error when the transfer fails.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// [`Canvas`] implementation over any [`PanelFlush`] target.
///
/// Draw calls are buffered by the underlying driver; the first draw error is
/// stashed and surfaced from [`Canvas::commit`], keeping the draw API
/// infallible the way the control loop expects.
pub struct OledCanvas<D: PanelFlush> {
    target: D,
    width: u32,
    cursor: Point,
    wrap: bool,
    deferred: Option<D::Error>,
}

impl<D: PanelFlush> OledCanvas<D>
where
    D::Error: core::fmt::Debug,
{
    /// Wrap a panel driver. `width` is the panel width in pixels.
    pub fn new(target: D, width: u32) -> Self {
        Self {
            target,
            width,
            cursor: Point::zero(),
            wrap: false,
            deferred: None,
        }
    }

    /// Release the underlying driver.
    pub fn into_inner(self) -> D {
        self.target
    }

    fn stash(&mut self, result: Result<(), D::Error>) {
        if let Err(e) = result {
            if self.deferred.is_none() {
                self.deferred = Some(e);
            }
        }
    }

    fn draw_line(&mut self, text: &str, origin: Point) {
        let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let result = Text::with_baseline(text, origin, style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ());
        self.stash(result);
    }
}

impl<D: PanelFlush> Canvas for OledCanvas<D>
where
    D::Error: core::fmt::Debug,
{
    type Error = D::Error;

    fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let result = Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut self.target);
        self.stash(result);
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    // SAFETY (lint allow): all operands are panel geometry (≤ 128) or short
    // line indices; products stay far below u32/i32 range.
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation
    )]
    fn draw_text(&mut self, text: &str) {
        if !self.wrap {
            self.draw_line(text, self.cursor);
            return;
        }

        // Manual wrap: the mono font has a fixed advance, so split into
        // whole-glyph lines. Splitting on char boundaries keeps multi-byte
        // tag titles intact (unknown glyphs render as the font's
        // replacement character).
        let per_line = (self.width / CHAR_WIDTH).max(1) as usize;
        let mut origin = self.cursor;
        let mut rest = text;
        while !rest.is_empty() {
            let cut = rest
                .char_indices()
                .nth(per_line)
                .map_or(rest.len(), |(i, _)| i);
            let (head, tail) = rest.split_at(cut);
            self.draw_line(head, origin);
            origin.y += LINE_HEIGHT as i32;
            rest = tail;
        }
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }
        self.target.flush()
    }
}

/// [`TextMetrics`] for the fixed-advance panel font.
#[derive(Debug, Clone, Copy)]
pub struct MonoMetrics {
    display_width: u32,
}

impl MonoMetrics {
    /// Metrics for a panel `display_width` pixels wide.
    pub const fn new(display_width: u32) -> Self {
        Self { display_width }
    }
}

impl TextMetrics for MonoMetrics {
    // SAFETY (lint allow): glyph counts are bounded by text length (≤ a few
    // hundred); all products fit comfortably in u32.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn measure(&self, text: &str, wrap: bool) -> TextSize {
        let glyphs = text.chars().count() as u32;
        let unwrapped = glyphs * CHAR_WIDTH;
        if !wrap || unwrapped <= self.display_width {
            return TextSize {
                width: unwrapped,
                height: LINE_HEIGHT,
            };
        }
        let per_line = (self.display_width / CHAR_WIDTH).max(1);
        let lines = glyphs.div_ceil(per_line);
        TextSize {
            width: per_line * CHAR_WIDTH,
            height: lines * LINE_HEIGHT,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use embedded_graphics::Pixel;

    /// Panel that records which pixels were lit.
    struct RecordingPanel {
        lit: std::vec::Vec<Point>,
    }

    impl RecordingPanel {
        fn new() -> Self {
            Self {
                lit: std::vec::Vec::new(),
            }
        }
    }

    impl OriginDimensions for RecordingPanel {
        fn size(&self) -> Size {
            Size::new(40, 64)
        }
    }

    impl DrawTarget for RecordingPanel {
        type Color = BinaryColor;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<BinaryColor>>,
        {
            for Pixel(point, color) in pixels {
                if color == BinaryColor::On {
                    self.lit.push(point);
                }
            }
            Ok(())
        }
    }

    impl PanelFlush for RecordingPanel {
        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_wrapped_draw_keeps_multibyte_titles() {
        // Four glyphs per 40 px line: a byte-count split would land inside
        // the first 'é' and lose the whole line.
        let mut canvas = OledCanvas::new(RecordingPanel::new(), 40);
        canvas.set_wrap(true);
        canvas.set_cursor(0, 0);
        canvas.draw_text("aéééé");
        canvas.commit().unwrap();
        let panel = canvas.into_inner();
        let line_height = LINE_HEIGHT as i32;
        assert!(panel.lit.iter().any(|p| p.y < line_height));
        assert!(panel.lit.iter().any(|p| p.y >= line_height));
    }

    #[test]
    fn test_unwrapped_draw_is_single_line() {
        let mut canvas = OledCanvas::new(RecordingPanel::new(), 40);
        canvas.set_wrap(false);
        canvas.set_cursor(0, 0);
        canvas.draw_text("abcdef");
        canvas.commit().unwrap();
        let panel = canvas.into_inner();
        assert!(!panel.lit.is_empty());
        assert!(panel.lit.iter().all(|p| p.y < LINE_HEIGHT as i32));
    }

    #[test]
    fn test_measure_unwrapped_is_glyphs_times_advance() {
        let m = MonoMetrics::new(128);
        let size = m.measure("abcdef", false);
        assert_eq!(size.width, 60);
        assert_eq!(size.height, LINE_HEIGHT);
    }

    #[test]
    fn test_measure_wrapped_caps_width_and_grows_height() {
        let m = MonoMetrics::new(128);
        // 20 glyphs, 12 per line -> 2 lines
        let size = m.measure("abcdefghijklmnopqrst", true);
        assert_eq!(size.width, 120);
        assert_eq!(size.height, 2 * LINE_HEIGHT);
    }

    #[test]
    fn test_measure_empty_text() {
        let m = MonoMetrics::new(128);
        let size = m.measure("", false);
        assert_eq!(size.width, 0);
    }
}
