//! Sonata statistics — key, tempo, and note analysis of piano sonata MIDI dumps.
//!
//! Dumps are the text form produced by `midicsv`, one file per movement, named
//! so that characters `[2,4)` and `[5,7)` hold the sonata and movement numbers.

pub mod batch;
pub mod config;
pub mod error;
pub mod piece;
pub mod pitch;
pub mod plot;
pub mod report;
pub mod sonata;
pub mod stats;

pub use error::{AnalysisError, Result};
