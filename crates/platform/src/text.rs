//! Text measurement abstraction for the status display.

/// Pixel dimensions of a rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Reports how large a string renders in the display's font.
pub trait TextMetrics {
    /// Measure `text`.
    ///
    /// With `wrap` false the width is the full unwrapped line length; with
    /// `wrap` true the width is capped at the display width and the height
    /// grows by whole lines instead.
    fn measure(&self, text: &str, wrap: bool) -> TextSize;
}
