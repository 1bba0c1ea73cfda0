//! Greedy fret assignment
//!
//! Each prepared note is placed on the highest-pitched string that can reach
//! it within `0..=max_fret`. Strings are tried from index 5 down to 0 and the
//! first fit wins, which keeps fret numbers low on the thin strings. Notes are
//! never reassigned and the previous note's position is not considered.

use crate::prepare::PreparedNote;
use crate::store::TabEvent;
use crate::tuning::{Tuning, STRING_COUNT};

/// Highest fret used when no override is given.
pub const DEFAULT_MAX_FRET: i32 = 22;

/// Assigns prepared notes to `(string, fret)` positions for one tuning.
#[derive(Debug, Clone, Copy)]
pub struct FretAssigner {
    tuning: Tuning,
    max_fret: i32,
}

impl FretAssigner {
    /// `tuning` must already include the capo offset.
    pub fn new(tuning: Tuning) -> Self {
        FretAssigner {
            tuning,
            max_fret: DEFAULT_MAX_FRET,
        }
    }

    pub fn with_max_fret(mut self, max_fret: i32) -> Self {
        self.max_fret = max_fret;
        self
    }

    /// Returns `None` when no string can play the pitch.
    ///
    /// Offsets are computed in `i64`, so pitches anywhere in the `i64`
    /// range are simply unplayable rather than overflowing.
    pub fn assign(&self, note: &PreparedNote) -> Option<TabEvent> {
        let max_fret = i64::from(self.max_fret);
        let pitch = i32::try_from(note.pitch).ok()?;
        (0..STRING_COUNT).rev().find_map(|string_index| {
            let fret = note.pitch - i64::from(self.tuning.open_pitch(string_index));
            if !(0..=max_fret).contains(&fret) {
                return None;
            }
            Some(TabEvent {
                time: note.time,
                string_index,
                fret: i32::try_from(fret).ok()?,
                pitch,
            })
        })
    }
}

/// Assign a single note against an effective tuning with the default fret ceiling.
pub fn assign(note: &PreparedNote, tuning: &Tuning) -> Option<TabEvent> {
    FretAssigner::new(*tuning).assign(note)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch: i64) -> PreparedNote {
        PreparedNote {
            time: 0.0,
            pitch,
            source_index: 0,
        }
    }

    #[test]
    fn test_high_e_goes_to_open_first_string() {
        let event = assign(&note(64), &Tuning::STANDARD).unwrap();
        assert_eq!(event.string_index, 5);
        assert_eq!(event.fret, 0);
        assert_eq!(event.pitch, 64);
    }

    #[test]
    fn test_highest_string_that_fits_wins() {
        // 63 is one below open high e, so the B string takes it at fret 4
        let event = assign(&note(63), &Tuning::STANDARD).unwrap();
        assert_eq!(event.string_index, 4);
        assert_eq!(event.fret, 4);
    }

    #[test]
    fn test_low_e_uses_lowest_string() {
        let event = assign(&note(40), &Tuning::STANDARD).unwrap();
        assert_eq!(event.string_index, 0);
        assert_eq!(event.fret, 0);
    }

    #[test]
    fn test_below_range_is_dropped() {
        assert!(assign(&note(39), &Tuning::STANDARD).is_none());
    }

    #[test]
    fn test_above_range_is_dropped() {
        // 64 + 22 = 86 is the top of the neck
        assert_eq!(assign(&note(86), &Tuning::STANDARD).unwrap().fret, 22);
        assert!(assign(&note(87), &Tuning::STANDARD).is_none());
    }

    #[test]
    fn test_custom_fret_ceiling() {
        let assigner = FretAssigner::new(Tuning::STANDARD).with_max_fret(20);
        assert_eq!(assigner.assign(&note(84)).unwrap().fret, 20);
        assert!(assigner.assign(&note(85)).is_none());
    }

    #[test]
    fn test_fret_matches_pitch_offset_for_all_pitches() {
        let tuning = Tuning::STANDARD.with_capo(3);
        for pitch in 0..128 {
            if let Some(event) = assign(&note(pitch), &tuning) {
                assert!((0..=DEFAULT_MAX_FRET).contains(&event.fret));
                assert_eq!(event.pitch - tuning.open_pitch(event.string_index), event.fret);
                assert_eq!(i64::from(event.pitch), pitch);
            }
        }
    }

    #[test]
    fn test_extreme_pitches_are_unplayable() {
        let tuning = Tuning::STANDARD;
        assert!(assign(&note(i64::from(i32::MIN)), &tuning).is_none());
        assert!(assign(&note(i64::from(i32::MAX) + 1), &tuning).is_none());
        assert!(assign(&note(i64::MIN), &tuning).is_none());
        assert!(assign(&note(i64::MAX), &tuning).is_none());
    }

    #[test]
    fn test_saturated_capo_does_not_overflow() {
        let tuning = Tuning::STANDARD.with_capo(i32::MAX);
        assert!(assign(&note(i64::from(i32::MAX)), &tuning).is_some());
        assert!(assign(&note(64), &tuning).is_none());
    }
}
