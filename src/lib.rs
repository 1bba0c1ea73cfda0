pub mod assign;
pub mod document;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod prepare;
pub mod render;
pub mod store;
pub mod table;
pub mod tuning;

pub use assign::{assign, FretAssigner, DEFAULT_MAX_FRET};
pub use document::{parse_document, Instrument, NoteDocument};
pub use error::*;
pub use options::TabOptions;
pub use pipeline::{generate_tab, synthesize, Diagnostic, Synthesis};
pub use prepare::{prepare, quantize_time, Note, PreparedNote, GRID_STEP, MIN_NOTE_DURATION};
pub use render::{render, RenderOptions, NO_DATA};
pub use store::{Collision, TabEvent, TabEventStore};
pub use table::event_table;
pub use tuning::{resolve, Tuning, STRING_COUNT};

/// Turn a note document (YAML or JSON) into ASCII tab.
/// Settings come from the document itself.
pub fn compile(source: &str) -> Result<String, TabError> {
    let document = parse_document(source)?;
    generate_tab(&document.notes(), &document.options)
}
