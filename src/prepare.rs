//! Note filtering and onset quantization
//!
//! Turns the raw note stream coming out of transcription into
//! `(time, pitch)` pairs on a fixed 1/8-second grid.
//!
//! ## Rules
//! - Notes shorter than [`MIN_NOTE_DURATION`] are treated as noise and dropped
//!   (so are notes whose duration is NaN). Negative durations simply fail the
//!   check.
//! - `transpose` is added to every surviving pitch with no clamping.
//! - Onsets snap to the nearest multiple of [`GRID_STEP`]. Rounding uses
//!   `f64::round`, i.e. half away from zero: `0.3125 s` lands on `0.375`.
//!
//! The grid is fixed in seconds and does not follow any tempo.

use serde::{Deserialize, Serialize};

/// Shortest note kept, in seconds.
pub const MIN_NOTE_DURATION: f64 = 0.05;

/// Grid divisions per second.
pub const GRID_DIVISIONS: f64 = 8.0;

/// Width of one grid slot in seconds.
pub const GRID_STEP: f64 = 1.0 / GRID_DIVISIONS;

/// A transcribed note as delivered by the transcription collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "start")]
    pub start_time: f64,
    #[serde(rename = "end")]
    pub end_time: f64,
    pub pitch: i32,
}

impl Note {
    pub fn new(start_time: f64, end_time: f64, pitch: i32) -> Self {
        Note {
            start_time,
            end_time,
            pitch,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// True when the note is long enough to survive filtering.
    pub fn is_audible(&self) -> bool {
        // NaN compares false, so it is dropped as well
        self.duration() >= MIN_NOTE_DURATION
    }
}

/// A note that passed filtering: quantized onset plus transposed pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreparedNote {
    pub time: f64,
    /// Widened so transposing an extreme pitch cannot overflow
    pub pitch: i64,
    /// Position of the originating note in the input stream
    pub source_index: usize,
}

/// Snap an onset (seconds) to the nearest grid slot.
///
/// Onsets just below zero land on `+0.0`, never `-0.0`.
pub fn quantize_time(seconds: f64) -> f64 {
    (seconds * GRID_DIVISIONS).round() / GRID_DIVISIONS + 0.0
}

/// Filter, transpose and quantize a note stream.
///
/// Input order is preserved.
pub fn prepare(notes: &[Note], transpose_semitones: i32) -> Vec<PreparedNote> {
    notes
        .iter()
        .enumerate()
        .filter(|(_, note)| note.is_audible())
        .map(|(source_index, note)| PreparedNote {
            time: quantize_time(note.start_time),
            pitch: i64::from(note.pitch) + i64::from(transpose_semitones),
            source_index,
        })
        .collect()
}
