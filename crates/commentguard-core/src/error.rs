//! Error types for CommentGuard

/// Result type alias using CommentGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for CommentGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Per-comment inference errors (vectorization or scoring)
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Model or vectorizer artifact is missing, corrupt or inconsistent
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML configuration parse errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error must abort startup rather than degrade a single result
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            Self::Artifact(_) | Self::Config(_) | Self::Io(_) | Self::Yaml(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::artifact("vectorizer.json: vocabulary is empty");
        assert_eq!(
            err.to_string(),
            "artifact error: vectorizer.json: vocabulary is empty"
        );
    }

    #[test]
    fn test_startup_fatal_classification() {
        assert!(Error::artifact("missing").is_startup_fatal());
        assert!(Error::config("bad threshold").is_startup_fatal());
        assert!(!Error::classifier("nan decision value").is_startup_fatal());
        assert!(!Error::internal("oops").is_startup_fatal());
    }
}
