//! Open-string pitches for a six-string guitar.
//!
//! Index 0 is the lowest (thickest) string, index 5 the highest.

use serde::{Deserialize, Serialize};

/// Number of strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Six open-string MIDI pitches, lowest string first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tuning([i32; STRING_COUNT]);

impl Tuning {
    /// E2 A2 D3 G3 B3 E4
    pub const STANDARD: Tuning = Tuning([40, 45, 50, 55, 59, 64]);

    pub fn new(open_pitches: [i32; STRING_COUNT]) -> Self {
        Tuning(open_pitches)
    }

    /// Tuning in effect with a capo on the given fret.
    ///
    /// The capo raises every string by the same amount. Any integer is
    /// accepted; values outside 0..=7 are unusual but not rejected. Pitches
    /// saturate at the `i32` limits.
    pub fn with_capo(&self, capo_semitones: i32) -> Tuning {
        Tuning(self.0.map(|pitch| pitch.saturating_add(capo_semitones)))
    }

    pub fn open_pitch(&self, string_index: usize) -> i32 {
        self.0[string_index]
    }

    pub fn open_pitches(&self) -> &[i32; STRING_COUNT] {
        &self.0
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::STANDARD
    }
}

/// Resolve the effective open-string pitches for a base tuning and capo.
pub fn resolve(base: &Tuning, capo_semitones: i32) -> Tuning {
    base.with_capo(capo_semitones)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tuning_pitches() {
        assert_eq!(Tuning::STANDARD.open_pitches(), &[40, 45, 50, 55, 59, 64]);
        assert_eq!(Tuning::default(), Tuning::STANDARD);
    }

    #[test]
    fn test_capo_raises_every_string() {
        let capo2 = resolve(&Tuning::STANDARD, 2);
        assert_eq!(capo2.open_pitches(), &[42, 47, 52, 57, 61, 66]);
    }

    #[test]
    fn test_capo_zero_is_identity() {
        assert_eq!(resolve(&Tuning::STANDARD, 0), Tuning::STANDARD);
    }

    #[test]
    fn test_negative_capo_is_not_rejected() {
        let lowered = Tuning::STANDARD.with_capo(-1);
        assert_eq!(lowered.open_pitch(0), 39);
        assert_eq!(lowered.open_pitch(5), 63);
    }

    #[test]
    fn test_extreme_capo_saturates() {
        assert_eq!(Tuning::STANDARD.with_capo(i32::MAX).open_pitch(0), i32::MAX);
        assert_eq!(Tuning::STANDARD.with_capo(i32::MIN).open_pitch(5), i32::MIN + 64);
    }
}
