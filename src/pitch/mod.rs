//! Pitch and key model — letter spelling of MIDI numbers and key-signature roots.

pub mod key;
pub mod note;

pub use key::{key_signature, KeySignature, Tonality};
pub use note::{piano_note_name, pitch_class_of, semitone_of, Accidental, FLAT_NAMES, SHARP_NAMES};
