//! Dump parser — one midicsv text dump into a [`Piece`].
//!
//! Rows are recognised by substring, the way the dump is produced: any line
//! containing `Key_signature`, `Tempo` or `Note` is treated as that kind of row.

use std::path::Path;

use log::debug;

use super::notes::{NoteAction, NoteEvent, NoteTable};
use super::tempo::Tempo;
use super::title::parse_title;
use super::Piece;
use crate::error::{AnalysisError, Result};
use crate::pitch::{key_signature, KeySignature, Tonality};

/// Zero-based line holding the title meta event.
const TITLE_LINE: usize = 2;

/// Characters dropped from the end of the title's second segment.
const TITLE_SUFFIX_LEN: usize = 5;

/// Parse the dump at `path`.
///
/// The file is read fully and closed before parsing. Parse errors are
/// annotated with the path.
pub fn parse_piece(path: &Path) -> Result<Piece> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| AnalysisError::FileNotReadable {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut piece = parse_piece_str(&file_name, &contents).map_err(|e| e.in_file(path))?;
    piece.source = path.to_path_buf();
    Ok(piece)
}

/// Parse dump text. `file_name` is the base name carrying sonata/movement digits.
pub fn parse_piece_str(file_name: &str, contents: &str) -> Result<Piece> {
    let lines: Vec<&str> = contents.lines().collect();

    let raw_title = parse_raw_title(&lines)?;
    let key_sig = parse_key_signature(&lines)?;
    let title = parse_title(file_name, key_sig.as_ref())?;
    let tempo = parse_tempo(&lines)?;
    let notes = parse_notes(&lines)?;

    debug!(
        "parsed {file_name}: {:?}, {} note rows, {:.1} bpm",
        title.display,
        notes.len(),
        tempo.bpm
    );

    Ok(Piece {
        raw_title,
        title,
        key_sig,
        tempo,
        notes,
        source: file_name.into(),
    })
}

/// Title text from the third line: the part after `" - "` minus its fixed
/// suffix, or the whole line when there is no separator.
pub fn parse_raw_title(lines: &[&str]) -> Result<String> {
    let line = lines
        .get(TITLE_LINE)
        .ok_or(AnalysisError::MissingTitleLine)?;

    let mut segments = line.split(" - ");
    let first = segments.next().unwrap_or_default();
    match segments.next() {
        Some(second) => {
            let keep = second.chars().count().saturating_sub(TITLE_SUFFIX_LEN);
            Ok(second.chars().take(keep).collect())
        }
        None => Ok(first.to_string()),
    }
}

/// Key signature from the first `Key_signature` row, if any.
pub fn parse_key_signature(lines: &[&str]) -> Result<Option<KeySignature>> {
    let Some((idx, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, l)| l.contains("Key_signature"))
    else {
        return Ok(None);
    };

    let malformed = || AnalysisError::MalformedKeySignature {
        line: idx + 1,
        row: line.to_string(),
    };

    let fields: Vec<&str> = line.split(", ").collect();
    let index: i32 = fields
        .get(3)
        .and_then(|f| f.trim().parse().ok())
        .ok_or_else(malformed)?;
    let tonality: Tonality = fields
        .get(4)
        .and_then(|f| f.replace('"', "").trim().parse().ok())
        .ok_or_else(malformed)?;

    key_signature(index, tonality).map(Some)
}

/// Average tempo over every `Tempo` row.
pub fn parse_tempo(lines: &[&str]) -> Result<Tempo> {
    let micros = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains("Tempo"))
        .map(|(idx, line)| {
            line.split(", ")
                .nth(3)
                .and_then(|f| f.trim().parse::<u64>().ok())
                .ok_or_else(|| AnalysisError::MalformedTempoRow {
                    line: idx + 1,
                    row: line.to_string(),
                })
        })
        .collect::<Result<Vec<u64>>>()?;

    Tempo::from_micros(&micros)
}

/// Every `Note` row, whitespace removed, as a six-column event.
pub fn parse_notes(lines: &[&str]) -> Result<NoteTable> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains("Note"))
        .map(|(idx, line)| parse_note_row(line).ok_or_else(|| AnalysisError::MalformedNoteRow {
            line: idx + 1,
            row: line.to_string(),
        }))
        .collect()
}

fn parse_note_row(line: &str) -> Option<NoteEvent> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let fields: Vec<&str> = compact.split(',').collect();
    let [track, time, action, channel, note, velocity] = fields.as_slice() else {
        return None;
    };

    let note: u8 = note.parse().ok()?;
    if note > 127 {
        return None;
    }

    Some(NoteEvent {
        track: track.parse().ok()?,
        time: time.parse().ok()?,
        action: NoteAction::from(action.to_string()),
        channel: channel.parse().ok()?,
        note,
        velocity: velocity.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const DUMP: &str = "\
0, 0, Header, 1, 2, 480
1, 0, Start_track
1, 0, Title_t, \"Piano Sonata No. 14 - Moonlight (c)\"
1, 0, Key_signature, 4, \"minor\"
1, 0, Tempo, 500000
1, 960, Tempo, 500000
1, 1000, End_track
2, 0, Start_track
2, 0, Note_on_c, 0, 60, 80
2, 240, Note_off_c, 0, 60, 0
2, 240, Note_on_c, 0, 64, 72
2, 480, Note_on_c, 0, 64, 0
2, 480, End_track
0, 0, End_of_file
";

    #[test]
    fn parses_full_dump() {
        let piece = parse_piece_str("ps14_01.csv", DUMP).unwrap();
        assert_eq!(piece.raw_title, "Moonlight");
        assert_eq!(piece.title.sonata, 14);
        assert_eq!(piece.title.movement, 1);
        assert_eq!(piece.title.display, "Sonata No. 14 in C# minor: 1.");
        let key = piece.key_sig.as_ref().unwrap();
        assert_eq!(key.note, "C#");
        assert_eq!(key.tonality, Tonality::Minor);
        assert_approx_eq!(piece.tempo.bpm, 120.0);
        assert_eq!(piece.notes.len(), 4);
        assert_eq!(piece.notes.events()[1].action, NoteAction::NoteOff);
        assert_eq!(piece.notes.events()[2].note, 64);
        assert_eq!(piece.notes.events()[2].velocity, 72);
    }

    #[test]
    fn raw_title_without_separator_is_whole_line() {
        let lines = ["a", "b", "1, 0, Title_t, \"Untitled\""];
        assert_eq!(
            parse_raw_title(&lines).unwrap(),
            "1, 0, Title_t, \"Untitled\""
        );
    }

    #[test]
    fn raw_title_short_suffix_is_empty() {
        let lines = ["a", "b", "x - abc"];
        assert_eq!(parse_raw_title(&lines).unwrap(), "");
    }

    #[test]
    fn missing_title_line() {
        assert!(matches!(
            parse_raw_title(&["only", "two"]),
            Err(AnalysisError::MissingTitleLine)
        ));
    }

    #[test]
    fn missing_key_signature_is_none() {
        let lines = ["1, 0, Tempo, 500000"];
        assert_eq!(parse_key_signature(&lines).unwrap(), None);
    }

    #[test]
    fn first_key_signature_wins() {
        let lines = [
            "1, 0, Key_signature, -2, \"major\"",
            "1, 100, Key_signature, 3, \"major\"",
        ];
        let key = parse_key_signature(&lines).unwrap().unwrap();
        assert_eq!(key.note, "Bb");
    }

    #[test]
    fn key_signature_out_of_range() {
        let lines = ["1, 0, Key_signature, 9, \"major\""];
        assert!(matches!(
            parse_key_signature(&lines),
            Err(AnalysisError::OutOfRangeKeySignature(9))
        ));
    }

    #[test]
    fn key_signature_bad_tonality() {
        let lines = ["1, 0, Key_signature, 1, \"lydian\""];
        assert!(matches!(
            parse_key_signature(&lines),
            Err(AnalysisError::MalformedKeySignature { line: 1, .. })
        ));
    }

    #[test]
    fn no_tempo_rows() {
        let lines = ["2, 0, Note_on_c, 0, 60, 80"];
        assert!(matches!(parse_tempo(&lines), Err(AnalysisError::NoTempoFound)));
    }

    #[test]
    fn malformed_tempo_row() {
        let lines = ["x", "1, 0, Tempo"];
        assert!(matches!(
            parse_tempo(&lines),
            Err(AnalysisError::MalformedTempoRow { line: 2, .. })
        ));
    }

    #[test]
    fn note_row_wrong_field_count() {
        let lines = ["2, 0, Note_on_c, 0, 60"];
        assert!(matches!(
            parse_notes(&lines),
            Err(AnalysisError::MalformedNoteRow { line: 1, .. })
        ));
    }

    #[test]
    fn note_row_out_of_range_note() {
        let lines = ["2, 0, Note_on_c, 0, 200, 80"];
        assert!(parse_notes(&lines).is_err());
    }

    #[test]
    fn note_rows_ignore_whitespace() {
        let lines = ["2,\t0 ,Note_on_c,  0, 60 , 80\r"];
        let notes = parse_notes(&lines).unwrap();
        assert_eq!(notes.events()[0].note, 60);
        assert_eq!(notes.events()[0].velocity, 80);
    }

    #[test]
    fn malformed_filename_propagates() {
        assert!(matches!(
            parse_piece_str("bad.csv", DUMP),
            Err(AnalysisError::MalformedFilename(_))
        ));
    }

    #[test]
    fn unreadable_file() {
        let err = parse_piece(Path::new("/nonexistent/dir/ps01_01.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotReadable { .. }));
    }
}
