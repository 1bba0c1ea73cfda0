//! # Tab Synthesis Pipeline
//!
//! Runs the full note list → tab events flow and collects what was lost on
//! the way.
//!
//! ## Stages
//! 1. [`prepare`] drops noise-length notes, transposes and quantizes onsets
//! 2. [`FretAssigner`] places each note against the capo-adjusted tuning
//! 3. [`TabEventStore`] orders the events by time
//!
//! Nothing in here fails because of the notes themselves. A dropped or hidden
//! note becomes a [`Diagnostic`] instead, and the only error path is an
//! invalid [`TabOptions`].
//!
//! ## Example
//! ```rust
//! use tabgen::{synthesize, Note, TabOptions};
//!
//! let notes = [Note::new(0.0, 1.0, 64), Note::new(0.5, 0.52, 60)];
//! let synthesis = synthesize(&notes, &TabOptions::default())?;
//!
//! assert_eq!(synthesis.store.len(), 1);
//! assert_eq!(synthesis.diagnostics.len(), 1); // the 20 ms blip
//! # Ok::<(), tabgen::TabError>(())
//! ```

use std::fmt;

use log::{debug, warn};

use crate::assign::FretAssigner;
use crate::error::TabError;
use crate::options::TabOptions;
use crate::prepare::{prepare, Note};
use crate::render::render;
use crate::store::{TabEvent, TabEventStore};

/// A note that did not make it onto the grid, or was hidden there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Diagnostic {
    /// Shorter than the noise threshold
    TooShort { index: usize, duration: f64 },
    /// No string reaches the pitch within the fret range
    Unplayable { index: usize, pitch: i64 },
    /// Shares a `(column, string)` cell with a later event
    Overwritten {
        column: i64,
        string_index: usize,
        lost: TabEvent,
        kept: TabEvent,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TooShort { index, duration } => {
                write!(f, "note {} dropped: duration {:.3}s is too short", index, duration)
            }
            Diagnostic::Unplayable { index, pitch } => {
                write!(f, "note {} dropped: pitch {} is out of range", index, pitch)
            }
            Diagnostic::Overwritten {
                column, lost, kept, ..
            } => write!(
                f,
                "column {} string {}: fret {} hidden by fret {}",
                column,
                lost.display_string(),
                lost.fret,
                kept.fret
            ),
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    pub store: TabEventStore,
    pub diagnostics: Vec<Diagnostic>,
}

impl Synthesis {
    /// Notes removed before rendering (too short or unplayable).
    pub fn dropped_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| !matches!(d, Diagnostic::Overwritten { .. }))
            .count()
    }

    pub fn overwritten_count(&self) -> usize {
        self.diagnostics.len() - self.dropped_count()
    }
}

/// Turn a note list into ordered tab events plus diagnostics.
///
/// # Errors
/// Returns [`TabError::InvalidConfig`] if `options` fails validation.
pub fn synthesize(notes: &[Note], options: &TabOptions) -> Result<Synthesis, TabError> {
    options.validate()?;

    let mut diagnostics = Vec::new();

    for (index, note) in notes.iter().enumerate().filter(|(_, n)| !n.is_audible()) {
        debug!("Dropping note {} ({:.3}s long)", index, note.duration());
        diagnostics.push(Diagnostic::TooShort {
            index,
            duration: note.duration(),
        });
    }

    let assigner = FretAssigner::new(options.effective_tuning()).with_max_fret(options.max_fret);
    let mut events = Vec::new();
    for prepared in prepare(notes, options.transpose) {
        match assigner.assign(&prepared) {
            Some(event) => events.push(event),
            None => {
                debug!(
                    "Dropping note {} (pitch {} is unplayable)",
                    prepared.source_index, prepared.pitch
                );
                diagnostics.push(Diagnostic::Unplayable {
                    index: prepared.source_index,
                    pitch: prepared.pitch,
                });
            }
        }
    }

    let store = TabEventStore::from_events(events);
    for collision in store.collisions() {
        warn!(
            "Fret {} at column {} hidden by fret {} on the same string",
            collision.lost.fret, collision.column, collision.kept.fret
        );
        diagnostics.push(Diagnostic::Overwritten {
            column: collision.column,
            string_index: collision.string_index,
            lost: collision.lost,
            kept: collision.kept,
        });
    }

    Ok(Synthesis { store, diagnostics })
}

/// Note list straight to ASCII tab.
///
/// Returns [`NO_DATA`](crate::NO_DATA) when no note survives.
pub fn generate_tab(notes: &[Note], options: &TabOptions) -> Result<String, TabError> {
    let synthesis = synthesize(notes, options)?;
    render(synthesis.store.events(), &options.render_options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_single_note_end_to_end() {
        let synthesis = synthesize(&[Note::new(0.0, 1.0, 64)], &TabOptions::default()).unwrap();
        assert_eq!(
            synthesis.store.events(),
            &[TabEvent {
                time: 0.0,
                string_index: 5,
                fret: 0,
                pitch: 64
            }]
        );
        assert!(synthesis.diagnostics.is_empty());
    }

    #[test]
    fn test_short_and_unplayable_notes_are_reported() {
        let notes = [
            Note::new(0.0, 0.01, 64),
            Note::new(0.0, 1.0, 20),
            Note::new(0.0, 1.0, 60),
        ];
        let synthesis = synthesize(&notes, &TabOptions::default()).unwrap();
        assert_eq!(synthesis.store.len(), 1);
        assert_eq!(synthesis.dropped_count(), 2);
        assert!(matches!(
            synthesis.diagnostics[0],
            Diagnostic::TooShort { index: 0, .. }
        ));
        assert_eq!(
            synthesis.diagnostics[1],
            Diagnostic::Unplayable { index: 1, pitch: 20 }
        );
    }

    #[test]
    fn test_transpose_applies_before_assignment() {
        let options = TabOptions {
            transpose: 2,
            ..TabOptions::default()
        };
        let synthesis = synthesize(&[Note::new(0.0, 1.0, 62)], &options).unwrap();
        assert_eq!(synthesis.store.events()[0].pitch, 64);
        assert_eq!(synthesis.store.events()[0].fret, 0);
    }

    #[test]
    fn test_capo_shifts_frets_down() {
        let notes: Vec<Note> = (45..80).map(|p| Note::new(0.0, 1.0, p)).collect();
        let open = synthesize(&notes, &TabOptions::default()).unwrap();
        let capo = synthesize(
            &notes,
            &TabOptions {
                capo: 2,
                ..TabOptions::default()
            },
        )
        .unwrap();

        let tuning = Tuning::STANDARD.with_capo(2);
        for event in capo.store.events() {
            assert_eq!(event.pitch - tuning.open_pitch(event.string_index), event.fret);
        }
        for (a, b) in open.store.events().iter().zip(capo.store.events()) {
            if a.string_index == b.string_index {
                assert_eq!(a.fret - 2, b.fret);
            }
        }
    }

    #[test]
    fn test_collisions_become_diagnostics() {
        // 61 and 62 both land on the B string in the same column
        let notes = [Note::new(0.0, 1.0, 61), Note::new(0.01, 1.0, 62)];
        let synthesis = synthesize(&notes, &TabOptions::default()).unwrap();
        assert_eq!(synthesis.store.len(), 2);
        assert_eq!(synthesis.overwritten_count(), 1);
        match synthesis.diagnostics[0] {
            Diagnostic::Overwritten { lost, kept, .. } => {
                assert_eq!(lost.fret, 2);
                assert_eq!(kept.fret, 3);
            }
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }

    #[test]
    fn test_onset_just_below_zero_ties_with_zero() {
        // -0.01 quantizes to 0.0, so both notes share the B-string cell and
        // the later note is the one printed
        let notes = [Note::new(0.0, 1.0, 61), Note::new(-0.01, 1.0, 62)];
        let synthesis = synthesize(&notes, &TabOptions::default()).unwrap();
        let pitches: Vec<i32> = synthesis.store.events().iter().map(|e| e.pitch).collect();
        assert_eq!(pitches, vec![61, 62]);

        let tab = generate_tab(&notes, &TabOptions::default()).unwrap();
        assert_eq!(tab.lines().nth(1), Some("B|-3--"));
    }

    #[test]
    fn test_integer_limit_pitches_are_unplayable() {
        let notes = [Note::new(0.0, 1.0, i32::MIN), Note::new(0.0, 1.0, i32::MAX)];
        let options = TabOptions {
            transpose: 1,
            ..TabOptions::default()
        };
        let synthesis = synthesize(&notes, &options).unwrap();
        assert!(synthesis.store.is_empty());
        assert_eq!(
            synthesis.diagnostics,
            vec![
                Diagnostic::Unplayable {
                    index: 0,
                    pitch: i64::from(i32::MIN) + 1
                },
                Diagnostic::Unplayable {
                    index: 1,
                    pitch: i64::from(i32::MAX) + 1
                },
            ]
        );

        let untransposed = synthesize(&notes[..1], &TabOptions::default()).unwrap();
        assert_eq!(untransposed.dropped_count(), 1);
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let options = TabOptions {
            width_limit: 0,
            ..TabOptions::default()
        };
        assert!(matches!(
            generate_tab(&[Note::new(0.0, 1.0, 64)], &options),
            Err(TabError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_generate_tab_empty_input() {
        assert_eq!(generate_tab(&[], &TabOptions::default()).unwrap(), "No Data");
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::Unplayable { index: 3, pitch: 100 };
        assert_eq!(diagnostic.to_string(), "note 3 dropped: pitch 100 is out of range");
    }
}
