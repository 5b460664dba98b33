//! Configuration for the comment classifier and its artifacts

use commentguard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Number of leading characters scored per comment
pub const DEFAULT_MAX_CHARS: usize = 512;

/// Configuration for the comment classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the fitted vectorizer artifact (JSON)
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Path to the fitted linear model artifact (JSON)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Comments are truncated to this many characters before scoring
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Confidence cut-offs for severity tiers
    #[serde(default)]
    pub severity: SeverityThresholds,
}

/// Confidence thresholds (percent) for severity tiers of flagged comments.
///
/// A flagged comment is `high` when confidence is strictly above `high`,
/// `medium` when strictly above `medium`, and `low` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    #[serde(default = "default_high")]
    pub high: f64,

    #[serde(default = "default_medium")]
    pub medium: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            high: default_high(),
            medium: default_medium(),
        }
    }
}

impl SeverityThresholds {
    /// Check the thresholds are ordered percentages
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.high) || !in_range(self.medium) {
            return Err(Error::config(format!(
                "severity thresholds must be within [0, 100], got high={} medium={}",
                self.high, self.medium
            )));
        }
        if self.medium > self.high {
            return Err(Error::config(format!(
                "medium severity threshold {} exceeds high threshold {}",
                self.medium, self.high
            )));
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: default_vectorizer_path(),
            model_path: default_model_path(),
            max_chars: default_max_chars(),
            severity: SeverityThresholds::default(),
        }
    }
}

impl ClassifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::config("max_chars must be greater than zero"));
        }
        self.severity.validate()
    }

    /// Resolve relative artifact paths against `base`
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.vectorizer_path.is_relative() {
            self.vectorizer_path = base.join(&self.vectorizer_path);
        }
        if self.model_path.is_relative() {
            self.model_path = base.join(&self.model_path);
        }
        self
    }
}

/// Load classifier configuration from a YAML file.
///
/// A missing file yields the defaults; artifact paths in a present file are
/// resolved relative to the file's directory.
pub fn load_config(path: impl AsRef<Path>) -> Result<ClassifierConfig> {
    let path = path.as_ref();

    let config = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_yaml::from_str(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        info!("Loaded classifier configuration from {}", path.display());
        config.resolve_paths(base)
    } else {
        info!(
            "Classifier configuration {} not found, using defaults",
            path.display()
        );
        ClassifierConfig::default()
    };

    config.validate()?;
    Ok(config)
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("./models/vectorizer.json")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./models/logreg_model.json")
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_high() -> f64 {
    90.0
}

fn default_medium() -> f64 {
    75.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.max_chars, 512);
        assert_eq!(config.severity.high, 90.0);
        assert_eq!(config.severity.medium, 75.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("/nonexistent/commentguard/classifiers.yaml").unwrap();
        assert_eq!(config.max_chars, DEFAULT_MAX_CHARS);
    }

    #[test]
    fn test_paths_resolved_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifiers.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "vectorizer_path: artifacts/vec.json\nmodel_path: /abs/model.json\nseverity:\n  high: 95.0"
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.vectorizer_path, dir.path().join("artifacts/vec.json"));
        assert_eq!(config.model_path, PathBuf::from("/abs/model.json"));
        assert_eq!(config.severity.high, 95.0);
        assert_eq!(config.severity.medium, 75.0);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let thresholds = SeverityThresholds {
            high: 70.0,
            medium: 80.0,
        };
        assert!(matches!(thresholds.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_max_chars_rejected() {
        let config = ClassifierConfig {
            max_chars: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
