//! Statistics — unique notes, letter/MIDI occurrence, and scale-degree counts.
//!
//! Every function works on a [`NoteSource`], so the same analysis runs on a
//! single movement or a whole sonata.

pub mod scale;

use crate::piece::{NoteTable, Piece};
use crate::pitch::{piano_note_name, pitch_class_of, Accidental, KeySignature};
use crate::sonata::Sonata;

pub use scale::{scale_degrees, scale_note_count};

/// Anything carrying a note table and an optional key.
pub trait NoteSource {
    fn notes(&self) -> &NoteTable;
    fn key_signature(&self) -> Option<&KeySignature>;
}

impl NoteSource for Piece {
    fn notes(&self) -> &NoteTable {
        &self.notes
    }

    fn key_signature(&self) -> Option<&KeySignature> {
        self.key_sig.as_ref()
    }
}

impl NoteSource for Sonata {
    fn notes(&self) -> &NoteTable {
        &self.notes
    }

    fn key_signature(&self) -> Option<&KeySignature> {
        self.key_sig.as_ref()
    }
}

/// Number of distinct MIDI note numbers present. Multiplicity is ignored.
pub fn unique_note_count<S: NoteSource + ?Sized>(src: &S) -> usize {
    let mut present = [false; 128];
    for note in src.notes().note_numbers() {
        if let Some(slot) = present.get_mut(note as usize) {
            *slot = true;
        }
    }
    present.iter().filter(|&&p| p).count()
}

/// Rows whose note spells as `letter` (across all octaves).
///
/// Notes are spelled with the table matching `letter`'s accidental; a name
/// absent from that table (e.g. "Cb") never matches.
pub fn note_letter_occurrence<S: NoteSource + ?Sized>(letter: &str, src: &S) -> usize {
    let pitch_class = pitch_class_of(letter);
    src.notes()
        .note_numbers()
        .filter(|&n| piano_note_name(n, pitch_class) == letter)
        .count()
}

/// Rows whose note number is exactly `midi`.
pub fn midi_note_occurrence<S: NoteSource + ?Sized>(midi: u8, src: &S) -> usize {
    src.notes().note_numbers().filter(|&n| n == midi).count()
}

/// Occurrence count per MIDI note number.
pub fn note_histogram<S: NoteSource + ?Sized>(src: &S) -> [usize; 128] {
    let mut counts = [0usize; 128];
    for note in src.notes().note_numbers() {
        if let Some(slot) = counts.get_mut(note as usize) {
            *slot += 1;
        }
    }
    counts
}

/// Occurrence count per letter, C first, labelled in the given spelling.
pub fn letter_histogram<S: NoteSource + ?Sized>(
    src: &S,
    spelling: Accidental,
) -> Vec<(&'static str, usize)> {
    let mut counts = [0usize; 12];
    for note in src.notes().note_numbers() {
        counts[(note % 12) as usize] += 1;
    }
    spelling.names().iter().copied().zip(counts).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{NoteAction, NoteEvent, Tempo, Title};
    use crate::pitch::{key_signature, Tonality};

    pub(crate) fn piece_with(notes: &[u8], key: Option<KeySignature>) -> Piece {
        Piece {
            raw_title: String::new(),
            title: Title {
                sonata: 1,
                movement: 1,
                display: "Sonata No. 1: 1.".into(),
            },
            key_sig: key,
            tempo: Tempo {
                bpm: 120.0,
                label: None,
            },
            notes: notes
                .iter()
                .enumerate()
                .map(|(i, &note)| NoteEvent {
                    track: 1,
                    time: i as u64 * 120,
                    action: NoteAction::NoteOn,
                    channel: 0,
                    note,
                    velocity: 64,
                })
                .collect(),
            source: "ps01_01.csv".into(),
        }
    }

    #[test]
    fn unique_ignores_multiplicity() {
        let piece = piece_with(&[60, 60, 62, 64, 64, 64], None);
        assert_eq!(unique_note_count(&piece), 3);
    }

    #[test]
    fn unique_on_empty() {
        assert_eq!(unique_note_count(&piece_with(&[], None)), 0);
    }

    #[test]
    fn midi_occurrence_is_exact() {
        let piece = piece_with(&[60, 60, 62, 64, 64, 64, 72], None);
        assert_eq!(midi_note_occurrence(60, &piece), 2);
        assert_eq!(midi_note_occurrence(64, &piece), 3);
        assert_eq!(midi_note_occurrence(72, &piece), 1);
        assert_eq!(midi_note_occurrence(61, &piece), 0);
    }

    #[test]
    fn letter_occurrence_spans_octaves() {
        let piece = piece_with(&[48, 60, 60, 62, 72, 64], None);
        assert_eq!(note_letter_occurrence("C", &piece), 4);
        assert_eq!(note_letter_occurrence("D", &piece), 1);
        assert_eq!(note_letter_occurrence("F", &piece), 0);
    }

    #[test]
    fn letter_occurrence_respects_spelling() {
        let piece = piece_with(&[61, 73, 70], None);
        assert_eq!(note_letter_occurrence("C#", &piece), 2);
        assert_eq!(note_letter_occurrence("Db", &piece), 2);
        assert_eq!(note_letter_occurrence("Bb", &piece), 1);
        assert_eq!(note_letter_occurrence("A#", &piece), 1);
        assert_eq!(note_letter_occurrence("Cb", &piece), 0);
    }

    #[test]
    fn histograms() {
        let piece = piece_with(&[60, 60, 61, 72], Some(key_signature(0, Tonality::Major).unwrap()));
        let notes = note_histogram(&piece);
        assert_eq!(notes[60], 2);
        assert_eq!(notes[72], 1);
        let letters = letter_histogram(&piece, Accidental::Sharp);
        assert_eq!(letters[0], ("C", 3));
        assert_eq!(letters[1], ("C#", 1));
        assert_eq!(letters.iter().map(|(_, c)| c).sum::<usize>(), 4);
        let flats = letter_histogram(&piece, Accidental::Flat);
        assert_eq!(flats[1], ("Db", 1));
    }
}
