//! Note documents
//!
//! A note document is the hand-off format from the transcription step: a YAML
//! (or JSON) mapping with optional [`TabOptions`] keys at the top level, a
//! flat `notes` list, and/or `instruments` that each carry their own notes.
//!
//! ```yaml
//! capo: 2
//! notes:
//!   - { start: 0.0, end: 0.5, pitch: 64 }
//! instruments:
//!   - name: guitar
//!     notes:
//!       - { start: 0.5, end: 1.0, pitch: 67 }
//! ```
//!
//! All groupings are flattened into one stream: top-level `notes` first, then
//! each instrument in declaration order.

use serde::Deserialize;

use crate::error::TabError;
use crate::options::TabOptions;
use crate::prepare::Note;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Instrument {
    pub name: Option<String>,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NoteDocument {
    #[serde(flatten)]
    pub options: TabOptions,
    pub notes: Vec<Note>,
    pub instruments: Vec<Instrument>,
}

impl NoteDocument {
    /// Every note in the document as a single stream.
    pub fn notes(&self) -> Vec<Note> {
        self.notes
            .iter()
            .chain(self.instruments.iter().flat_map(|i| i.notes.iter()))
            .copied()
            .collect()
    }
}

/// Parse a note document from YAML or JSON text.
///
/// An empty document parses to no notes and default options.
pub fn parse_document(source: &str) -> Result<NoteDocument, TabError> {
    if source.trim().is_empty() {
        return Ok(NoteDocument::default());
    }
    serde_yaml::from_str(source).map_err(|e| TabError::Document(e.to_string()))
}
