//! Per-run settings supplied by the caller
//!
//! Keys are kebab-case so the same struct reads straight out of a note
//! document's top level (`capo: 2`, `reverse-display: true`, ...).

use log::warn;
use serde::{Deserialize, Serialize};

use crate::assign::DEFAULT_MAX_FRET;
use crate::error::TabError;
use crate::render::{RenderOptions, DEFAULT_WIDTH_LIMIT};
use crate::tuning::Tuning;

/// Capo positions outside this range are accepted but logged.
pub const CONVENTIONAL_CAPO: std::ops::RangeInclusive<i32> = 0..=7;

/// Transpositions outside this range are accepted but logged.
pub const CONVENTIONAL_TRANSPOSE: std::ops::RangeInclusive<i32> = -12..=12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TabOptions {
    pub transpose: i32,
    pub capo: i32,
    pub reverse_display: bool,
    pub width_limit: usize,
    pub max_fret: i32,
    pub tuning: Tuning,
}

impl Default for TabOptions {
    fn default() -> Self {
        TabOptions {
            transpose: 0,
            capo: 0,
            reverse_display: false,
            width_limit: DEFAULT_WIDTH_LIMIT,
            max_fret: DEFAULT_MAX_FRET,
            tuning: Tuning::STANDARD,
        }
    }
}

impl TabOptions {
    /// Check the contract the pipeline relies on.
    ///
    /// Capo and transpose are only checked against their usual ranges and
    /// produce a warning, never an error.
    pub fn validate(&self) -> Result<(), TabError> {
        if self.width_limit == 0 {
            return Err(TabError::InvalidConfig(
                "width-limit must be greater than 0".to_string(),
            ));
        }
        if self.max_fret < 0 {
            return Err(TabError::InvalidConfig(format!(
                "max-fret must not be negative (got {})",
                self.max_fret
            )));
        }

        if !CONVENTIONAL_CAPO.contains(&self.capo) {
            warn!("Capo {} is outside the usual 0..=7 range", self.capo);
        }
        if !CONVENTIONAL_TRANSPOSE.contains(&self.transpose) {
            warn!("Transpose {} is outside the usual -12..=12 range", self.transpose);
        }
        Ok(())
    }

    /// Open-string pitches after applying the capo.
    pub fn effective_tuning(&self) -> Tuning {
        self.tuning.with_capo(self.capo)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            reverse_display: self.reverse_display,
            width_limit: self.width_limit,
        }
    }
}
