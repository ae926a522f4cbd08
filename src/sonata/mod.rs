//! Sonatas — all movements sharing a sonata number, notes concatenated.

pub mod grouping;

use crate::piece::{NoteTable, Piece, Title};
use crate::pitch::KeySignature;

pub use grouping::{group_sonatas, GroupingConfig, MissingGroupPolicy};

/// A whole sonata. Metadata is that of its first movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Sonata {
    pub raw_title: String,
    pub title: Title,
    pub key_sig: Option<KeySignature>,
    pub notes: NoteTable,
    /// Movement numbers of the members, in input order.
    pub movements: Vec<u32>,
}

impl Sonata {
    /// Build from member movements. Returns `None` for an empty slice.
    pub fn from_movements(members: &[&Piece]) -> Option<Self> {
        let first = members.first()?;
        let mut notes = NoteTable::new();
        for piece in members {
            notes.extend_from(&piece.notes);
        }
        Some(Self {
            raw_title: first.raw_title.clone(),
            title: first.title.clone(),
            key_sig: first.key_sig.clone(),
            notes,
            movements: members.iter().map(|p| p.movement()).collect(),
        })
    }
}
