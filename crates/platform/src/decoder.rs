//! Hardware audio decoder abstraction (VS1053-class).
//!
//! The decoder streams audio in the background via its own interrupt-driven
//! mechanism; from the core's point of view it is an asynchronous process
//! polled through status queries, never blocked on.

/// Attenuation level for full volume (the register scale is inverted:
/// lower values are louder).
pub const ATTENUATION_MAX_VOLUME: u8 = 0;

/// 160 is low enough to seem silent.
pub const ATTENUATION_INAUDIBLE: u8 = 160;

/// Hard mute.
pub const ATTENUATION_SILENT: u8 = 255;

/// Control surface of the hardware decoder.
///
/// All calls are synchronous and bounded; audio streaming itself happens
/// outside this interface.
pub trait Decoder {
    /// Error reported when a file fails to start.
    type Error: core::fmt::Debug;

    /// Stop any current playback.
    fn stop(&mut self);

    /// Soft-reset the decoder, clearing its internal elapsed-time register
    /// so playtime does not accumulate across songs.
    fn soft_reset(&mut self);

    /// Begin background playback of `path`.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when the file cannot be opened or the
    /// decoder refuses the stream.
    fn start_playing_file(&mut self, path: &str) -> Result<(), Self::Error>;

    /// Suspend or resume the current stream without losing position.
    fn pause(&mut self, paused: bool);

    /// `true` when no stream is active (never started, or the current track
    /// ran to completion).
    fn is_stopped(&mut self) -> bool;

    /// Seconds of audio decoded since the last [`soft_reset`](Decoder::soft_reset).
    fn elapsed_seconds(&mut self) -> u32;

    /// Set per-channel attenuation. `0` is loudest;
    /// [`ATTENUATION_INAUDIBLE`] is effectively silent.
    fn set_volume(&mut self, left: u8, right: u8);
}
