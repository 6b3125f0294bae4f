//! Input device abstraction — debounced encoder and button events.
//!
//! Debouncing happens in the hardware layer; the core only ever sees
//! settled events.

/// Input events from the rotary encoder and buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Accumulated encoder movement since the last frame
    /// (positive = clockwise). May exceed ±1 when the knob moves quickly.
    EncoderTurn(i32),
    /// Debounced button press.
    ButtonPress(Button),
}

/// Physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// The encoder's integrated push switch — toggles pause.
    Encoder,
    /// Switches the device into USB mass-storage mode.
    MassStorage,
}
