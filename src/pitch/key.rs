//! Key signatures — circle-of-fifths index + tonality to a root note.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

use super::note::{pitch_class_of, Accidental};

/// Major or minor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tonality {
    Major,
    Minor,
}

impl Tonality {
    pub fn as_str(self) -> &'static str {
        match self {
            Tonality::Major => "major",
            Tonality::Minor => "minor",
        }
    }

    /// Semitone steps between consecutive scale degrees.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Tonality::Major => [2, 2, 1, 2, 2, 2, 1],
            Tonality::Minor => [2, 1, 2, 2, 1, 3, 1],
        }
    }
}

impl fmt::Display for Tonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tonality {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "major" => Ok(Tonality::Major),
            "minor" => Ok(Tonality::Minor),
            _ => Err(()),
        }
    }
}

const SHARP_MAJOR: [&str; 7] = ["G", "D", "A", "E", "B", "F#", "C#"];
const SHARP_MINOR: [&str; 7] = ["E", "B", "F#", "C#", "G#", "D#", "A#"];
const FLAT_MAJOR: [&str; 7] = ["F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb"];
const FLAT_MINOR: [&str; 7] = ["D", "G", "C", "F", "Bb", "Eb", "Ab"];

/// The tonal centre of a piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    /// Root letter, possibly with a `#`/`b` suffix.
    pub note: String,
    pub tonality: Tonality,
}

impl KeySignature {
    /// Accidental carried by the root name, if any.
    pub fn accidental(&self) -> Option<Accidental> {
        pitch_class_of(&self.note)
    }

    /// Naming table used to spell this key's scale.
    ///
    /// The root's own accidental wins; natural minor roots use flats and
    /// natural major roots use sharps.
    pub fn spelling(&self) -> Accidental {
        match (self.accidental(), self.tonality) {
            (Some(acc), _) => acc,
            (None, Tonality::Minor) => Accidental::Flat,
            (None, Tonality::Major) => Accidental::Sharp,
        }
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.note, self.tonality)
    }
}

/// Build a key signature from a signed circle-of-fifths index.
///
/// Positive indices count sharps, negative count flats, 0 is C major / A minor.
pub fn key_signature(index: i32, tonality: Tonality) -> Result<KeySignature> {
    let note = match index {
        0 => match tonality {
            Tonality::Major => "C",
            Tonality::Minor => "A",
        },
        1..=7 => {
            let table = match tonality {
                Tonality::Major => &SHARP_MAJOR,
                Tonality::Minor => &SHARP_MINOR,
            };
            table[(index - 1) as usize]
        }
        -7..=-1 => {
            let table = match tonality {
                Tonality::Major => &FLAT_MAJOR,
                Tonality::Minor => &FLAT_MINOR,
            };
            table[(-index - 1) as usize]
        }
        _ => return Err(AnalysisError::OutOfRangeKeySignature(index)),
    };

    Ok(KeySignature {
        note: note.to_string(),
        tonality,
    })
}
