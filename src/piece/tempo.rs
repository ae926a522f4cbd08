//! Tempo — one averaged BPM per file, with an approximate Italian marking.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Average tempo of a piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tempo {
    pub bpm: f64,
    pub label: Option<String>,
}

impl Tempo {
    /// Tempo from a list of microseconds-per-quarter values.
    ///
    /// Values are averaged with integer truncation before conversion to BPM.
    pub fn from_micros(values: &[u64]) -> Result<Self> {
        if values.is_empty() {
            return Err(AnalysisError::NoTempoFound);
        }
        let sum: u128 = values.iter().map(|&v| v as u128).sum();
        let mean = (sum / values.len() as u128) as u64;
        if mean == 0 {
            return Err(AnalysisError::NoTempoFound);
        }
        let bpm = MICROS_PER_MINUTE / mean as f64;
        Ok(Self {
            bpm,
            label: Some(tempo_marking(bpm).to_string()),
        })
    }
}

/// Approximate tempo marking for a BPM value.
pub fn tempo_marking(bpm: f64) -> &'static str {
    match bpm {
        b if b < 40.0 => "Grave",
        b if b < 60.0 => "Largo",
        b if b < 76.0 => "Adagio",
        b if b < 108.0 => "Andante",
        b if b < 120.0 => "Moderato",
        b if b < 168.0 => "Allegro",
        b if b < 200.0 => "Presto",
        _ => "Prestissimo",
    }
}
