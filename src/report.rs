//! Reports — per-piece and per-sonata summaries as JSON or a plain-text table.

use std::fmt::Write as _;

use serde::Serialize;

use crate::piece::Piece;
use crate::pitch::{Accidental, KeySignature};
use crate::sonata::Sonata;
use crate::stats::{letter_histogram, scale_degrees, scale_note_count, unique_note_count, NoteSource};

/// Statistics shared by pieces and sonatas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteSummary {
    pub key: Option<KeySignature>,
    pub note_events: usize,
    pub unique_notes: usize,
    /// Scale-degree names, tonic first. Empty without a key.
    pub scale_degrees: Vec<String>,
    pub scale_counts: Vec<usize>,
    /// Letter name → occurrences, C first.
    pub letters: Vec<(String, usize)>,
}

impl NoteSummary {
    pub fn of<S: NoteSource + ?Sized>(src: &S) -> Self {
        let key = src.key_signature().cloned();
        let spelling = key
            .as_ref()
            .map(|k| k.spelling())
            .unwrap_or(Accidental::Sharp);
        Self {
            scale_degrees: key
                .as_ref()
                .map(|k| scale_degrees(k).into_iter().map(String::from).collect())
                .unwrap_or_default(),
            key,
            note_events: src.notes().len(),
            unique_notes: unique_note_count(src),
            scale_counts: scale_note_count(src),
            letters: letter_histogram(src, spelling)
                .into_iter()
                .map(|(name, count)| (name.to_string(), count))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceSummary {
    pub file: String,
    pub title: String,
    pub raw_title: String,
    pub sonata: u32,
    pub movement: u32,
    pub bpm: f64,
    pub tempo_label: Option<String>,
    #[serde(flatten)]
    pub notes: NoteSummary,
}

impl From<&Piece> for PieceSummary {
    fn from(piece: &Piece) -> Self {
        Self {
            file: piece
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            title: piece.title.display.clone(),
            raw_title: piece.raw_title.clone(),
            sonata: piece.title.sonata,
            movement: piece.title.movement,
            bpm: piece.tempo.bpm,
            tempo_label: piece.tempo.label.clone(),
            notes: NoteSummary::of(piece),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SonataSummary {
    pub sonata: u32,
    pub title: String,
    pub movements: Vec<u32>,
    #[serde(flatten)]
    pub notes: NoteSummary,
}

impl From<&Sonata> for SonataSummary {
    fn from(sonata: &Sonata) -> Self {
        Self {
            sonata: sonata.title.sonata,
            title: sonata.title.display.clone(),
            movements: sonata.movements.clone(),
            notes: NoteSummary::of(sonata),
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub pieces: Vec<PieceSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sonatas: Vec<SonataSummary>,
}

impl Report {
    pub fn new(pieces: &[Piece], sonatas: &[Sonata]) -> Self {
        Self {
            pieces: pieces.iter().map(PieceSummary::from).collect(),
            sonatas: sonatas.iter().map(SonataSummary::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One line per piece, then one per sonata.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for p in &self.pieces {
            let _ = writeln!(
                out,
                "{:<40} {:>7.1} bpm {:<12} {:>6} events {:>3} unique  scale {:?}",
                p.title,
                p.bpm,
                p.tempo_label.as_deref().unwrap_or("-"),
                p.notes.note_events,
                p.notes.unique_notes,
                p.notes.scale_counts,
            );
        }
        if !self.sonatas.is_empty() {
            out.push('\n');
        }
        for s in &self.sonatas {
            let _ = writeln!(
                out,
                "Sonata {:>2} ({} movements) {:>6} events {:>3} unique  scale {:?}",
                s.sonata,
                s.movements.len(),
                s.notes.note_events,
                s.notes.unique_notes,
                s.notes.scale_counts,
            );
        }
        out
    }
}
