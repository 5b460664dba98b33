//! Server configuration

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the YouTube Data API
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    /// API key; normally supplied through `YOUTUBE_API_KEY`
    #[serde(default, skip_serializing)]
    pub youtube_api_key: Option<String>,

    /// Upper bound on comments fetched per request
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,

    /// Timeout for each YouTube API call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Classifier configuration file
    #[serde(default = "default_classifiers_config")]
    pub classifiers_config: PathBuf,

    /// Static frontend directory served for unmatched routes
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(classifiers) = &cli.classifiers {
            config.classifiers_config = classifiers.clone();
        }

        if let Some(dir) = &cli.static_dir {
            config.static_dir = Some(dir.clone());
        }

        if let Some(key) = cli.youtube_api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            config.youtube_api_key = Some(key.trim().to_string());
        }

        if config.max_comments == 0 {
            anyhow::bail!("max_comments must be greater than zero");
        }

        Ok(config)
    }

    /// Whether an API key is available
    pub fn api_key_configured(&self) -> bool {
        self.youtube_api_key
            .as_deref()
            .is_some_and(|k| !k.is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            youtube_api_url: default_youtube_api_url(),
            youtube_api_key: None,
            max_comments: default_max_comments(),
            request_timeout_secs: default_request_timeout_secs(),
            classifiers_config: default_classifiers_config(),
            static_dir: None,
        }
    }
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_max_comments() -> usize {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_classifiers_config() -> PathBuf {
    PathBuf::from("./classifiers.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = ServerConfig::load("/nonexistent/commentguard.yaml", &Cli::default()).unwrap();
        assert_eq!(config.max_comments, 100);
        assert_eq!(config.youtube_api_url, "https://www.googleapis.com/youtube/v3");
        assert!(!config.api_key_configured());
    }

    #[test]
    fn test_file_and_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "max_comments: 40\nyoutube_api_key: from-file\n").unwrap();

        let cli = Cli {
            youtube_api_key: Some(" from-env ".to_string()),
            static_dir: Some(PathBuf::from("frontend")),
            ..Default::default()
        };
        let config = ServerConfig::load(path.to_str().unwrap(), &cli).unwrap();
        assert_eq!(config.max_comments, 40);
        assert_eq!(config.youtube_api_key.as_deref(), Some("from-env"));
        assert_eq!(config.static_dir, Some(PathBuf::from("frontend")));
    }

    #[test]
    fn test_blank_cli_key_does_not_override() {
        let cli = Cli {
            youtube_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        let config = ServerConfig::load("/nonexistent.yaml", &cli).unwrap();
        assert!(!config.api_key_configured());
    }

    #[test]
    fn test_zero_max_comments_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "max_comments: 0\n").unwrap();
        assert!(ServerConfig::load(path.to_str().unwrap(), &Cli::default()).is_err());
    }
}
