//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use std::collections::BTreeMap;
use std::string::String;
use std::vec::Vec;

use crate::cache_store::{CacheReadError, CacheStore};
use crate::canvas::Canvas;
use crate::decoder::Decoder;
use crate::dir::{DirEntry, DirEnumerator};
use crate::tags::{TagKind, TagReader};
use crate::text::{TextMetrics, TextSize};

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Commands a [`MockDecoder`] has received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderCommand {
    /// `stop()` was called.
    Stop,
    /// `soft_reset()` was called.
    SoftReset,
    /// `start_playing_file(path)` was called.
    Start(String),
    /// `pause(flag)` was called.
    Pause(bool),
    /// `set_volume(left, right)` was called.
    SetVolume(u8, u8),
}

/// Error returned when a scripted start fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartRefused;

/// Scriptable mock decoder that records every command.
#[derive(Debug, Default)]
pub struct MockDecoder {
    commands: Vec<DecoderCommand>,
    fail_paths: Vec<String>,
    stopped: bool,
    elapsed: u32,
    current: Option<String>,
}

impl MockDecoder {
    /// New decoder reporting stopped (nothing ever played).
    pub fn new() -> Self {
        Self {
            stopped: true,
            ..Self::default()
        }
    }

    /// Script `path` to refuse to start.
    pub fn fail_path(&mut self, path: &str) {
        self.fail_paths.push(path.into());
    }

    /// Force the stopped flag, simulating natural end-of-track.
    pub fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    /// Set the value `elapsed_seconds()` reports.
    pub fn set_elapsed(&mut self, secs: u32) {
        self.elapsed = secs;
    }

    /// Every command received so far, in order.
    pub fn commands(&self) -> &[DecoderCommand] {
        &self.commands
    }

    /// Path of the stream most recently started, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl Decoder for MockDecoder {
    type Error = StartRefused;

    fn stop(&mut self) {
        self.commands.push(DecoderCommand::Stop);
        self.stopped = true;
    }

    fn soft_reset(&mut self) {
        self.commands.push(DecoderCommand::SoftReset);
        self.elapsed = 0;
    }

    fn start_playing_file(&mut self, path: &str) -> Result<(), StartRefused> {
        self.commands.push(DecoderCommand::Start(path.into()));
        if self.fail_paths.iter().any(|p| p == path) {
            return Err(StartRefused);
        }
        self.current = Some(path.into());
        self.stopped = false;
        Ok(())
    }

    fn pause(&mut self, paused: bool) {
        self.commands.push(DecoderCommand::Pause(paused));
    }

    fn is_stopped(&mut self) -> bool {
        self.stopped
    }

    fn elapsed_seconds(&mut self) -> u32 {
        self.elapsed
    }

    fn set_volume(&mut self, left: u8, right: u8) {
        self.commands.push(DecoderCommand::SetVolume(left, right));
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Draw operations a [`MockCanvas`] has received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasOp {
    /// `clear_region(x, y, w, h)`.
    Clear(i32, i32, u32, u32),
    /// `set_cursor(x, y)`.
    Cursor(i32, i32),
    /// `set_wrap(flag)`.
    Wrap(bool),
    /// `draw_text(text)`.
    Text(String),
}

/// Recording mock canvas. Drawing never fails; commits are counted.
#[derive(Debug, Default)]
pub struct MockCanvas {
    ops: Vec<CanvasOp>,
    commits: usize,
}

impl MockCanvas {
    /// New empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation received so far, in order.
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Number of `commit()` calls.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Drop the recorded operations (commit count is preserved).
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Canvas for MockCanvas {
    type Error = core::convert::Infallible;

    fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.ops.push(CanvasOp::Clear(x, y, width, height));
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.ops.push(CanvasOp::Cursor(x, y));
    }

    fn set_wrap(&mut self, wrap: bool) {
        self.ops.push(CanvasOp::Wrap(wrap));
    }

    fn draw_text(&mut self, text: &str) {
        self.ops.push(CanvasOp::Text(text.into()));
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.commits = self.commits.saturating_add(1);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Text metrics
// ---------------------------------------------------------------------------

/// Fixed-advance metrics with a configurable glyph width.
///
/// Lets tests pick exact pixel widths (e.g. a 120 px string in a 100 px
/// region) without involving a real font.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    /// Glyph advance in pixels.
    pub char_px: u32,
    /// Line height in pixels.
    pub line_px: u32,
    /// Display width used for wrapped measurement.
    pub display_width: u32,
}

impl TextMetrics for FixedMetrics {
    // SAFETY (lint allow): test-geometry products stay far below u32 range.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn measure(&self, text: &str, wrap: bool) -> TextSize {
        let glyphs = text.chars().count() as u32;
        let unwrapped = glyphs * self.char_px;
        if !wrap || unwrapped <= self.display_width {
            return TextSize {
                width: unwrapped,
                height: self.line_px,
            };
        }
        let per_line = (self.display_width / self.char_px).max(1);
        TextSize {
            width: per_line * self.char_px,
            height: glyphs.div_ceil(per_line) * self.line_px,
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Error from an in-memory store with scripted write failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemIoError;

/// In-memory [`CacheStore`].
#[derive(Debug, Default)]
pub struct MemCacheStore {
    files: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemCacheStore {
    /// New empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script all subsequent writes to fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw contents of `path`, if present.
    pub fn contents(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// `true` when `path` exists.
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Pre-seed `path` with raw contents (for corrupt-cache tests).
    pub fn seed(&mut self, path: &str, contents: &str) {
        self.files.insert(path.into(), contents.into());
    }
}

impl CacheStore for MemCacheStore {
    type Error = MemIoError;

    fn read_lines<F>(&mut self, path: &str, mut visit: F) -> Result<(), CacheReadError<MemIoError>>
    where
        F: FnMut(&str),
    {
        let Some(contents) = self.files.get(path) else {
            return Err(CacheReadError::NotFound);
        };
        for line in contents.lines() {
            visit(line);
        }
        Ok(())
    }

    fn write_lines<'a, I>(&mut self, path: &str, lines: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.fail_writes {
            return Err(MemIoError);
        }
        let mut out = String::new();
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        self.files.insert(path.into(), out);
        Ok(())
    }

    fn delete(&mut self, path: &str) {
        self.files.remove(path);
    }
}

/// [`DirEnumerator`] over a fixed entry list.
#[derive(Debug, Default)]
pub struct SliceDir {
    entries: Vec<(String, bool)>,
}

impl SliceDir {
    /// Enumerator over `(name, is_directory)` pairs.
    pub fn new(entries: &[(&str, bool)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(n, d)| (String::from(n), d))
                .collect(),
        }
    }

    /// Enumerator over plain file names.
    pub fn files(names: &[&str]) -> Self {
        Self::new(&names.iter().map(|&n| (n, false)).collect::<Vec<_>>())
    }
}

impl DirEnumerator for SliceDir {
    type Error = core::convert::Infallible;

    fn list_entries<F>(&mut self, mut visit: F) -> Result<(), Self::Error>
    where
        F: FnMut(DirEntry<'_>),
    {
        for (name, is_directory) in &self.entries {
            visit(DirEntry {
                name,
                is_directory: *is_directory,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// [`TagReader`] backed by a path → (title, artist, album) map.
#[derive(Debug, Default)]
pub struct MapTagReader {
    tags: BTreeMap<String, (String, String, String)>,
}

impl MapTagReader {
    /// New reader with no tagged files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `path` with `title`, `artist` and `album` (any may be empty).
    pub fn insert(&mut self, path: &str, title: &str, artist: &str, album: &str) {
        self.tags
            .insert(path.into(), (title.into(), artist.into(), album.into()));
    }
}

impl TagReader for MapTagReader {
    fn has_tags(&mut self, path: &str) -> bool {
        self.tags.contains_key(path)
    }

    fn read_tag(&mut self, path: &str, kind: TagKind) -> heapless::String<128> {
        let mut out = heapless::String::new();
        if let Some((title, artist, album)) = self.tags.get(path) {
            let value = match kind {
                TagKind::Title => title,
                TagKind::Artist => artist,
                TagKind::Album => album,
            };
            // Truncate silently if the tag exceeds the buffer capacity.
            let take = value.len().min(out.capacity());
            if let Some(head) = value.get(..take) {
                let _ = out.push_str(head);
            }
        }
        out
    }
}
