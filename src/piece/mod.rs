//! Pieces — one parsed movement file: title, key, tempo, and note table.

pub mod notes;
pub mod parser;
pub mod tempo;
pub mod title;

use std::path::PathBuf;

use crate::pitch::KeySignature;

pub use notes::{NoteAction, NoteEvent, NoteTable};
pub use parser::{parse_piece, parse_piece_str};
pub use tempo::{tempo_marking, Tempo};
pub use title::{parse_title, Title};

/// A single parsed movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    /// Title text as embedded in the dump.
    pub raw_title: String,
    pub title: Title,
    /// `None` when the dump has no key signature row.
    pub key_sig: Option<KeySignature>,
    pub tempo: Tempo,
    pub notes: NoteTable,
    /// File the piece was parsed from.
    pub source: PathBuf,
}

impl Piece {
    pub fn sonata(&self) -> u32 {
        self.title.sonata
    }

    pub fn movement(&self) -> u32 {
        self.title.movement
    }
}
