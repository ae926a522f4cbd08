//! Analysis configuration — directories and grouping rules loaded from ~/.sonata-stats/config.yaml.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::sonata::GroupingConfig;

/// Analysis configuration loaded from YAML. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Directory holding the `.csv` dumps.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Directory charts and reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Sort input files by path instead of directory order.
    #[serde(default = "default_true")]
    pub sorted: bool,
    /// Log and skip files that fail to parse instead of aborting.
    #[serde(default)]
    pub skip_failures: bool,
    #[serde(default)]
    pub grouping: GroupingConfig,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("csvs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            sorted: true,
            skip_failures: false,
            grouping: GroupingConfig::default(),
        }
    }
}

/// Standard config location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sonata-stats").join("config.yaml"))
}

impl AnalysisConfig {
    /// Load from the standard path.
    /// Returns None if the file doesn't exist or can't be parsed.
    pub fn load() -> Option<Self> {
        let path = default_config_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Load from an explicit path. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| AnalysisError::FileNotReadable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save as YAML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
            std::fs::write(path, yaml)
        };
        write().map_err(|e| AnalysisError::Config(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sonata::MissingGroupPolicy;

    #[test]
    fn default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("csvs"));
        assert_eq!(config.output_dir, PathBuf::from("plots"));
        assert!(config.sorted);
        assert!(!config.skip_failures);
        assert_eq!(config.grouping.first, 1);
        assert_eq!(config.grouping.last, 32);
    }

    #[test]
    fn partial_yaml_config() {
        let yaml = "input_dir: dumps\nskip_failures: true\n";
        let config: AnalysisConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("dumps"));
        assert!(config.skip_failures);
        assert_eq!(config.output_dir, PathBuf::from("plots"));
        assert_eq!(config.grouping, GroupingConfig::default());
    }

    #[test]
    fn grouping_yaml_config() {
        let yaml = r#"
grouping:
  first: 1
  last: 8
  missing: fail
"#;
        let config: AnalysisConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.grouping.last, 8);
        assert_eq!(config.grouping.missing, MissingGroupPolicy::Fail);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = AnalysisConfig::default();
        config.output_dir = PathBuf::from("charts");
        config.grouping.missing = MissingGroupPolicy::Fail;

        config.save(&path).unwrap();
        let loaded = AnalysisConfig::load_from(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn load_from_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AnalysisConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotReadable { .. }));
    }

    #[test]
    fn load_from_bad_yaml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "sorted: [not, a, bool]\n").unwrap();
        assert!(matches!(
            AnalysisConfig::load_from(&path),
            Err(AnalysisError::Config(_))
        ));
    }

    #[test]
    fn load_default_path_does_not_panic() {
        let _ = AnalysisConfig::load();
    }
}
