//! Plain-text detail table of assigned events
//!
//! One line per event with the onset, the guitarist's string number
//! (1 = high e), the fret and the sounding MIDI note.

use crate::store::TabEventStore;

pub fn event_table(store: &TabEventStore) -> String {
    let mut table = String::from("time  string  fret  note\n");
    for event in store {
        table.push_str(&format!(
            "{:>4.2}  {:>6}  {:>4}  {:>4}\n",
            event.time,
            event.display_string(),
            event.fret,
            event.pitch
        ));
    }
    table
}
