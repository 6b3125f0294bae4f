//! Drawing surface abstraction for the status display.

/// Buffered drawing surface.
///
/// Draw calls mutate an in-memory frame buffer; nothing reaches the panel
/// until [`commit`](Canvas::commit). The control loop commits at most once
/// per frame regardless of how many regions repainted.
pub trait Canvas {
    /// Error from pushing the frame buffer to the panel.
    type Error: core::fmt::Debug;

    /// Clear a rectangular region of the frame buffer.
    fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Position the text cursor. Negative coordinates are valid: glyphs
    /// left of the panel edge are clipped, which is how scrolled text is
    /// drawn.
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Enable or disable wrap-around rendering for subsequent
    /// [`draw_text`](Canvas::draw_text) calls. Scrolling text is drawn
    /// unwrapped; static short text wraps normally.
    fn set_wrap(&mut self, wrap: bool);

    /// Draw `text` at the current cursor.
    fn draw_text(&mut self, text: &str);

    /// Push the frame buffer to the physical panel.
    ///
    /// # Errors
    ///
    /// Returns the driver's bus error when the transfer fails.
    fn commit(&mut self) -> Result<(), Self::Error>;
}
