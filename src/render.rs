//! # ASCII Tab Renderer
//!
//! Converts tab events into a six-row text grid suitable for a fixed-width font.
//!
//! ## Layout
//! - One column per 1/8-second grid slot, from the earliest to the latest
//!   occupied slot. Empty slots are still drawn so spacing follows elapsed time.
//! - Every cell is 3 characters wide (`-0-`, `-12`, `---`) and is followed by a
//!   single `-` separator.
//! - When several events land on the same cell, the last one in store order is
//!   printed.
//! - The six row buffers are cut at the same offsets every `width_limit`
//!   characters. Each chunk is printed as six header-prefixed lines followed by
//!   a blank line.
//!
//! ## Orientation
//! Normal display puts the high e string on top (`e| B| G| D| A| E|`).
//! Reversed display is the exact row mirror (`E| A| D| G| B| e|`).
//!
//! ## Example
//! ```rust
//! use tabgen::{render, RenderOptions, TabEvent};
//!
//! let events = [TabEvent { time: 0.0, string_index: 5, fret: 0, pitch: 64 }];
//! let text = render(&events, &RenderOptions::default())?;
//! assert!(text.starts_with("e|-0--\nB|----\n"));
//! # Ok::<(), tabgen::TabError>(())
//! ```

use std::collections::BTreeMap;

use log::warn;

use crate::error::TabError;
use crate::store::TabEvent;
use crate::tuning::STRING_COUNT;

/// Returned instead of a grid when there is nothing to draw.
pub const NO_DATA: &str = "No Data";

/// Width of one fret cell, separator excluded.
pub const CELL_WIDTH: usize = 3;

pub const DEFAULT_WIDTH_LIMIT: usize = 80;

const FILL: char = '-';

/// Row labels indexed by string index (lowest string first).
const STRING_LABELS: [&str; STRING_COUNT] = ["E|", "A|", "D|", "G|", "B|", "e|"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Put the low E string on the top row
    pub reverse_display: bool,
    /// Characters of grid per line, header excluded
    pub width_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            reverse_display: false,
            width_limit: DEFAULT_WIDTH_LIMIT,
        }
    }
}

impl RenderOptions {
    /// String index drawn on each row, top to bottom.
    fn row_strings(&self) -> [usize; STRING_COUNT] {
        let mut rows = [0; STRING_COUNT];
        for (row, slot) in rows.iter_mut().enumerate() {
            *slot = if self.reverse_display {
                row
            } else {
                STRING_COUNT - 1 - row
            };
        }
        rows
    }
}

/// Render tab events as wrapped ASCII tablature.
///
/// Output size is proportional to the time span between the first and last
/// event (four characters per 1/8 s on each row), not to the event count.
///
/// # Errors
/// Returns [`TabError::InvalidConfig`] when `width_limit` is 0.
pub fn render(events: &[TabEvent], options: &RenderOptions) -> Result<String, TabError> {
    if options.width_limit == 0 {
        return Err(TabError::InvalidConfig(
            "width-limit must be greater than 0".to_string(),
        ));
    }

    let columns = bucket_columns(events);
    let (first, last) = match (columns.keys().next(), columns.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Ok(NO_DATA.to_string()),
    };

    let rows = options.row_strings();
    let mut buffers = vec![String::new(); STRING_COUNT];

    for column in first..=last {
        let cells = columns.get(&column);
        for (buffer, &string_index) in buffers.iter_mut().zip(rows.iter()) {
            match cells.and_then(|cells| cells[string_index]) {
                Some(fret) => buffer.push_str(&center_cell(&fret.to_string())),
                None => buffer.extend(std::iter::repeat(FILL).take(CELL_WIDTH)),
            }
            buffer.push(FILL);
        }
    }

    let headers = rows.map(|string_index| STRING_LABELS[string_index]);
    Ok(wrap_rows(&buffers, &headers, options.width_limit))
}

/// Group frets by grid column; later events overwrite earlier ones.
fn bucket_columns(events: &[TabEvent]) -> BTreeMap<i64, [Option<i32>; STRING_COUNT]> {
    let mut columns: BTreeMap<i64, [Option<i32>; STRING_COUNT]> = BTreeMap::new();
    for event in events {
        if event.string_index >= STRING_COUNT {
            warn!(
                "Skipping event at {:.3}s with string index {}",
                event.time, event.string_index
            );
            continue;
        }
        columns.entry(event.column()).or_default()[event.string_index] = Some(event.fret);
    }
    columns
}

/// Center text in a cell; odd padding puts the extra fill on the left.
fn center_cell(text: &str) -> String {
    let padding = CELL_WIDTH.saturating_sub(text.len());
    let right = padding / 2;
    let left = padding - right;

    let mut cell = String::with_capacity(CELL_WIDTH.max(text.len()));
    cell.extend(std::iter::repeat(FILL).take(left));
    cell.push_str(text);
    cell.extend(std::iter::repeat(FILL).take(right));
    cell
}

fn wrap_rows(buffers: &[String], headers: &[&str], width_limit: usize) -> String {
    let total_len = buffers.first().map_or(0, String::len);
    let mut output = String::new();

    for start in (0..total_len).step_by(width_limit) {
        let end = (start + width_limit).min(total_len);
        for (header, buffer) in headers.iter().zip(buffers) {
            output.push_str(header);
            output.push_str(&buffer[start..end]);
            output.push('\n');
        }
        output.push('\n');
    }

    output
}
