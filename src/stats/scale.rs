//! Scale-degree statistics — occurrence of each of the key's seven scale notes.

use super::{note_letter_occurrence, NoteSource};
use crate::pitch::{semitone_of, KeySignature};

/// The seven scale-degree names of `key`, tonic first.
///
/// Names come from the key's spelling table; the root is located by
/// semitone, so roots missing from the table (Cb) land on their enharmonic.
pub fn scale_degrees(key: &KeySignature) -> Vec<&'static str> {
    let names = key.spelling().names();
    let Some(root) = semitone_of(&key.note) else {
        return Vec::new();
    };

    let mut degrees = Vec::with_capacity(7);
    let mut current = root as usize;
    for step in key.tonality.intervals() {
        degrees.push(names[current % 12]);
        current += step as usize;
    }
    degrees
}

/// Occurrences of each scale degree, indexed tonic first.
///
/// Empty when the source has no key signature.
pub fn scale_note_count<S: NoteSource + ?Sized>(src: &S) -> Vec<usize> {
    let Some(key) = src.key_signature() else {
        return Vec::new();
    };
    scale_degrees(key)
        .into_iter()
        .map(|name| note_letter_occurrence(name, src))
        .collect()
}
