//! Note letter names — MIDI numbers to "C", "C#", "Db"… under a sharp/flat spelling.

use serde::{Deserialize, Serialize};

/// Accidental marker distinguishing two spellings of the same semitone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    /// The 12 letter names in this spelling, starting at C.
    pub fn names(self) -> &'static [&'static str; 12] {
        match self {
            Accidental::Sharp => &SHARP_NAMES,
            Accidental::Flat => &FLAT_NAMES,
        }
    }
}

pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Accidental of a note name: the second character of a two-character name.
///
/// Single-character (natural) names have no pitch class.
pub fn pitch_class_of(name: &str) -> Option<Accidental> {
    let mut chars = name.chars();
    chars.next()?;
    let second = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Accidental::from_char(second)
}

/// Letter name of a MIDI note number, across all octaves.
///
/// `None` falls back to sharp spelling. The fallback is arbitrary for
/// naturals, which are spelled the same in both tables.
pub fn piano_note_name(midi: u8, pitch_class: Option<Accidental>) -> &'static str {
    let names = pitch_class.unwrap_or(Accidental::Sharp).names();
    names[(midi % 12) as usize]
}

/// Semitone offset above C (0–11) of a letter name such as "F#", "Bb" or "Cb".
pub fn semitone_of(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let base: i32 = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let accidental: i32 = match chars.next() {
        None => 0,
        Some('#') => 1,
        Some('b') => -1,
        Some(_) => return None,
    };
    if chars.next().is_some() {
        return None;
    }

    Some((base + accidental).rem_euclid(12) as u8)
}
