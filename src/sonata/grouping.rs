//! Grouping — movements into sonatas, keyed by the sonata numbers actually present.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::Sonata;
use crate::error::{AnalysisError, Result};
use crate::piece::Piece;

/// What to do with sonata numbers in range that have no movements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingGroupPolicy {
    /// Omit them from the output.
    #[default]
    Skip,
    /// Report the first one as [`AnalysisError::EmptySonataGroup`].
    Fail,
}

/// Accepted sonata numbers and the policy for gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    #[serde(default = "default_first")]
    pub first: u32,
    #[serde(default = "default_last")]
    pub last: u32,
    #[serde(default)]
    pub missing: MissingGroupPolicy,
}

fn default_first() -> u32 {
    1
}

fn default_last() -> u32 {
    32
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            first: default_first(),
            last: default_last(),
            missing: MissingGroupPolicy::default(),
        }
    }
}

impl GroupingConfig {
    pub fn contains(&self, sonata: u32) -> bool {
        (self.first..=self.last).contains(&sonata)
    }
}

/// Group movements by sonata number, in ascending sonata order.
///
/// Metadata comes from each group's first movement in input order; note
/// tables are concatenated in input order.
pub fn group_sonatas(pieces: &[Piece], config: &GroupingConfig) -> Result<Vec<Sonata>> {
    let mut groups: BTreeMap<u32, Vec<&Piece>> = BTreeMap::new();
    for piece in pieces {
        let sonata = piece.sonata();
        if !config.contains(sonata) {
            return Err(AnalysisError::SonataIndexOutOfRange {
                sonata,
                start: config.first,
                end: config.last,
            });
        }
        groups.entry(sonata).or_default().push(piece);
    }

    if config.missing == MissingGroupPolicy::Fail {
        if let Some(missing) = (config.first..=config.last).find(|n| !groups.contains_key(n)) {
            return Err(AnalysisError::EmptySonataGroup(missing));
        }
    }

    let sonatas: Vec<Sonata> = groups
        .into_values()
        .filter_map(|members| Sonata::from_movements(&members))
        .collect();
    debug!(
        "grouped {} movements into {} sonatas",
        pieces.len(),
        sonatas.len()
    );
    Ok(sonatas)
}
