//! Note event table — the `Note_on_c` / `Note_off_c` rows of a dump, in file order.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The action column of a note row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NoteAction {
    NoteOn,
    NoteOff,
    /// Any other row tagged with "Note", kept verbatim.
    Other(String),
}

impl NoteAction {
    pub fn as_str(&self) -> &str {
        match self {
            NoteAction::NoteOn => "Note_on_c",
            NoteAction::NoteOff => "Note_off_c",
            NoteAction::Other(s) => s,
        }
    }
}

impl From<String> for NoteAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Note_on_c" => NoteAction::NoteOn,
            "Note_off_c" => NoteAction::NoteOff,
            _ => NoteAction::Other(s),
        }
    }
}

impl From<NoteAction> for String {
    fn from(a: NoteAction) -> Self {
        match a {
            NoteAction::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single note row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub track: u32,
    /// Absolute time in MIDI ticks.
    pub time: u64,
    pub action: NoteAction,
    pub channel: u8,
    /// MIDI note number (0–127).
    pub note: u8,
    pub velocity: u8,
}

/// Ordered table of note events. Duplicates are expected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteTable {
    events: Vec<NoteEvent>,
}

impl NoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<NoteEvent>) -> Self {
        Self { events }
    }

    pub fn push(&mut self, event: NoteEvent) {
        self.events.push(event);
    }

    /// Append all rows of `other`, keeping their order.
    pub fn extend_from(&mut self, other: &NoteTable) {
        self.events.extend_from_slice(&other.events);
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteEvent> {
        self.events.iter()
    }

    /// The MIDI note numbers, one per row.
    pub fn note_numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.events.iter().map(|e| e.note)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Write the table as CSV with a `track,time,action,channel,note,velocity` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for event in &self.events {
            wtr.serialize(event)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Read a table previously written by [`NoteTable::write_csv`].
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let events = rdr
            .deserialize()
            .collect::<std::result::Result<Vec<NoteEvent>, csv::Error>>()?;
        Ok(Self { events })
    }
}

impl FromIterator<NoteEvent> for NoteTable {
    fn from_iter<I: IntoIterator<Item = NoteEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
