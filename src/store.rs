//! Tab events and their time-ordered store

use std::collections::HashMap;

use serde::Serialize;

use crate::prepare::GRID_STEP;
use crate::tuning::STRING_COUNT;

/// One note placed on the fretboard.
///
/// Invariant: `pitch - effective_open_pitch[string_index] == fret`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabEvent {
    pub time: f64,
    /// 0 = lowest string, 5 = highest
    pub string_index: usize,
    pub fret: i32,
    pub pitch: i32,
}

impl TabEvent {
    /// Grid column this event falls into.
    ///
    /// Saturates at the `i64` limits for onsets far outside any real
    /// recording. The renderer draws every column between the first and last
    /// event, so its output grows with the time span covered, not with the
    /// event count.
    pub fn column(&self) -> i64 {
        (self.time / GRID_STEP).round() as i64
    }

    /// Guitarist's string number: 1 = high e, 6 = low E.
    pub fn display_string(&self) -> usize {
        STRING_COUNT - self.string_index
    }
}

/// An event hidden by a later event in the same `(column, string)` cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub column: i64,
    pub string_index: usize,
    pub lost: TabEvent,
    pub kept: TabEvent,
}

/// Tab events sorted by ascending time.
///
/// The sort is stable, so events sharing a time keep assignment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TabEventStore {
    events: Vec<TabEvent>,
}

impl TabEventStore {
    pub fn from_events(mut events: Vec<TabEvent>) -> Self {
        // `+ 0.0` folds -0.0 into +0.0 so signed zeros tie
        events.sort_by(|a, b| (a.time + 0.0).total_cmp(&(b.time + 0.0)));
        TabEventStore { events }
    }

    pub fn events(&self) -> &[TabEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Cells claimed by more than one event, in store order.
    ///
    /// The renderer prints the last event of a cell; every earlier one is
    /// reported here against the event that finally covers it.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut last_in_cell: HashMap<(i64, usize), usize> = HashMap::new();
        for (i, event) in self.events.iter().enumerate() {
            last_in_cell.insert((event.column(), event.string_index), i);
        }

        self.events
            .iter()
            .enumerate()
            .filter_map(|(i, event)| {
                let cell = (event.column(), event.string_index);
                let winner = last_in_cell[&cell];
                (winner != i).then(|| Collision {
                    column: cell.0,
                    string_index: cell.1,
                    lost: *event,
                    kept: self.events[winner],
                })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a TabEventStore {
    type Item = &'a TabEvent;
    type IntoIter = std::slice::Iter<'a, TabEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
