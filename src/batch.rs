//! Batch driver — parse every `.csv` dump directly under a directory.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::piece::{parse_piece, Piece};

/// How a directory is walked and how per-file failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Sort by path. Otherwise files come in the platform's directory order.
    pub sorted: bool,
    /// Log and skip failing files instead of returning the first error.
    pub skip_failures: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            sorted: true,
            skip_failures: false,
        }
    }
}

impl From<&AnalysisConfig> for BatchOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            sorted: config.sorted,
            skip_failures: config.skip_failures,
        }
    }
}

/// Regular files with a `csv` extension directly under `dir`.
pub fn list_csv_files(dir: &Path, sorted: bool) -> Result<Vec<PathBuf>> {
    let unreadable = |source| AnalysisError::FileNotReadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    if sorted {
        files.sort();
    }
    Ok(files)
}

/// Parse every dump under `dir`.
///
/// Fails on the first bad file (with its path) unless `skip_failures` is set.
pub fn parse_all_pieces(dir: &Path, options: &BatchOptions) -> Result<Vec<Piece>> {
    let files = list_csv_files(dir, options.sorted)?;
    let mut pieces = Vec::with_capacity(files.len());
    let mut skipped = 0usize;

    for path in &files {
        match parse_piece(path) {
            Ok(piece) => pieces.push(piece),
            Err(e) if options.skip_failures => {
                warn!("skipping {}: {e}", path.display());
                skipped += 1;
            }
            Err(e) => return Err(e.in_file(path)),
        }
    }

    info!(
        "parsed {} of {} dumps in {} ({skipped} skipped)",
        pieces.len(),
        files.len(),
        dir.display()
    );
    Ok(pieces)
}
