//! Titles — sonata and movement numbers read from fixed positions in the file name.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::pitch::KeySignature;

/// Sonata/movement identity of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub sonata: u32,
    pub movement: u32,
    /// e.g. "Sonata No. 14 in C# minor: 1."
    pub display: String,
}

/// Sonata and movement numbers from a base name such as `ps14_01.csv`.
///
/// Characters `[2,4)` hold the sonata number and `[5,7)` the movement.
pub fn parse_file_numbers(file_name: &str) -> Result<(u32, u32)> {
    let malformed = || AnalysisError::MalformedFilename(file_name.to_string());

    let digits = |start: usize, end: usize| -> Result<u32> {
        let slice: String = file_name.chars().skip(start).take(end - start).collect();
        if slice.chars().count() != end - start {
            return Err(malformed());
        }
        slice.trim().parse().map_err(|_| malformed())
    };

    Ok((digits(2, 4)?, digits(5, 7)?))
}

/// Build a title from a base name and the piece's key, if known.
pub fn parse_title(file_name: &str, key: Option<&KeySignature>) -> Result<Title> {
    let (sonata, movement) = parse_file_numbers(file_name)?;
    Ok(Title {
        sonata,
        movement,
        display: display_title(sonata, movement, key),
    })
}

fn display_title(sonata: u32, movement: u32, key: Option<&KeySignature>) -> String {
    match key {
        Some(key) => format!(
            "Sonata No. {sonata} in {} {}: {movement}.",
            key.note, key.tonality
        ),
        None => format!("Sonata No. {sonata}: {movement}."),
    }
}
