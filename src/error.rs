//! Error taxonomy for parsing, grouping, and rendering.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while analysing sonata dumps.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Sonata or movement digits could not be read from the base name.
    #[error("malformed file name {0:?}: expected sonata digits at [2,4) and movement digits at [5,7)")]
    MalformedFilename(String),

    /// A `Note` row did not split into six numeric fields.
    #[error("malformed note row at line {line}: {row:?}")]
    MalformedNoteRow { line: usize, row: String },

    /// The file has no `Tempo` rows to average.
    #[error("no tempo rows found")]
    NoTempoFound,

    /// A `Tempo` row has no usable microseconds-per-quarter field.
    #[error("malformed tempo row at line {line}: {row:?}")]
    MalformedTempoRow { line: usize, row: String },

    /// Key-signature index outside -7..=7.
    #[error("key signature index {0} is outside the circle of fifths (-7..=7)")]
    OutOfRangeKeySignature(i32),

    /// A `Key_signature` row has an unreadable index or tonality.
    #[error("malformed key signature row at line {line}: {row:?}")]
    MalformedKeySignature { line: usize, row: String },

    /// The dump has no third line to take the title from.
    #[error("missing title line (expected at least 3 lines)")]
    MissingTitleLine,

    /// A piece carries a sonata number outside the configured grouping range.
    #[error("sonata number {sonata} is outside the grouping range {start}..={end}")]
    SonataIndexOutOfRange { sonata: u32, start: u32, end: u32 },

    /// Strict grouping found a sonata number with no movements.
    #[error("no movements found for sonata {0}")]
    EmptySonataGroup(u32),

    /// Underlying I/O failure while reading an input.
    #[error("cannot read {}: {source}", path.display())]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A per-file failure, annotated with the file it came from.
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<AnalysisError>,
    },

    /// Configuration could not be loaded or saved.
    #[error("config error: {0}")]
    Config(String),

    /// Chart could not be rendered or written.
    #[error("plot error: {0}")]
    Plot(String),

    /// Note table CSV could not be read or written.
    #[error("note table csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Report could not be serialized.
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Attach the originating file path to an error.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            // I/O errors already carry their path.
            e @ AnalysisError::FileNotReadable { .. } => e,
            e @ AnalysisError::InFile { .. } => e,
            other => AnalysisError::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping file annotations.
    pub fn root(&self) -> &AnalysisError {
        match self {
            AnalysisError::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<png::EncodingError> for AnalysisError {
    fn from(e: png::EncodingError) -> Self {
        AnalysisError::Plot(e.to_string())
    }
}

impl From<serde_yaml::Error> for AnalysisError {
    fn from(e: serde_yaml::Error) -> Self {
        AnalysisError::Config(e.to_string())
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_file_wraps_once() {
        let err = AnalysisError::NoTempoFound
            .in_file("a.csv")
            .in_file("b.csv");
        match &err {
            AnalysisError::InFile { path, .. } => assert_eq!(path, &PathBuf::from("a.csv")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(err.root(), AnalysisError::NoTempoFound));
    }

    #[test]
    fn io_errors_keep_their_own_path() {
        let err = AnalysisError::FileNotReadable {
            path: PathBuf::from("x.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        }
        .in_file("y.csv");
        assert!(matches!(err, AnalysisError::FileNotReadable { .. }));
    }

    #[test]
    fn display_mentions_path() {
        let err = AnalysisError::OutOfRangeKeySignature(9).in_file("ps01_01.csv");
        let msg = err.to_string();
        assert!(msg.contains("ps01_01.csv"));
        assert!(msg.contains("9"));
    }
}
