//! Loading of fitted vectorizer and model artifacts
//!
//! Artifacts are read once at startup. Any failure here is fatal for the
//! process and is reported as [`Error::Artifact`], distinct from per-comment
//! inference errors.

use crate::config::{ClassifierConfig, DEFAULT_MAX_CHARS};
use crate::linear::{LinearModelArtifact, LogisticRegression};
use crate::vectorizer::{TfidfVectorizer, VectorizerArtifact};
use crate::Vectorizer;
use commentguard_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Identity of the loaded artifacts, reported by health checks
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    /// Number of vocabulary terms / model features
    pub vocabulary_size: usize,

    /// SHA-256 of the vectorizer artifact bytes
    pub vectorizer_sha256: String,

    /// SHA-256 of the model artifact bytes
    pub model_sha256: String,

    #[serde(skip)]
    pub vectorizer_path: PathBuf,

    #[serde(skip)]
    pub model_path: PathBuf,
}

/// Vectorizer and model loaded from disk, shared read-only for the process lifetime
#[derive(Clone)]
pub struct LoadedModel {
    pub vectorizer: Arc<TfidfVectorizer>,
    pub model: Arc<LogisticRegression>,
    pub metadata: ModelMetadata,
}

impl LoadedModel {
    /// Load both artifacts named by the configuration
    pub fn load(config: &ClassifierConfig) -> Result<Self> {
        Self::load_bounded(&config.vectorizer_path, &config.model_path, config.max_chars)
    }

    /// Load both artifacts from explicit paths
    pub fn load_paths(vectorizer_path: &Path, model_path: &Path) -> Result<Self> {
        Self::load_bounded(vectorizer_path, model_path, DEFAULT_MAX_CHARS)
    }

    fn load_bounded(vectorizer_path: &Path, model_path: &Path, max_chars: usize) -> Result<Self> {
        let (vectorizer_artifact, vectorizer_sha256) =
            read_artifact::<VectorizerArtifact>(vectorizer_path)?;
        let vectorizer = TfidfVectorizer::from_artifact(vectorizer_artifact)
            .map_err(|e| in_file(vectorizer_path, e))?
            .with_max_chars(max_chars);

        let (model_artifact, model_sha256) = read_artifact::<LinearModelArtifact>(model_path)?;
        let model =
            LogisticRegression::from_artifact(model_artifact).map_err(|e| in_file(model_path, e))?;

        Self::from_parts(vectorizer, model, vectorizer_sha256, model_sha256).map(|mut loaded| {
            loaded.metadata.vectorizer_path = vectorizer_path.to_path_buf();
            loaded.metadata.model_path = model_path.to_path_buf();
            info!(
                vocabulary_size = loaded.metadata.vocabulary_size,
                vectorizer_sha256 = %loaded.metadata.vectorizer_sha256,
                model_sha256 = %loaded.metadata.model_sha256,
                "Loaded classification artifacts"
            );
            loaded
        })
    }

    /// Assemble from already-built components, checking their dimensions agree
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        model: LogisticRegression,
        vectorizer_sha256: String,
        model_sha256: String,
    ) -> Result<Self> {
        if vectorizer.dimension() != model.dimension() {
            return Err(Error::artifact(format!(
                "vectorizer has {} features but model expects {}",
                vectorizer.dimension(),
                model.dimension()
            )));
        }

        Ok(Self {
            metadata: ModelMetadata {
                vocabulary_size: vectorizer.dimension(),
                vectorizer_sha256,
                model_sha256,
                vectorizer_path: PathBuf::new(),
                model_path: PathBuf::new(),
            },
            vectorizer: Arc::new(vectorizer),
            model: Arc::new(model),
        })
    }
}

/// Read, fingerprint and parse a JSON artifact
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<(T, String)> {
    let bytes = std::fs::read(path).map_err(|e| {
        Error::artifact(format!("failed to read {}: {e}", path.display()))
    })?;
    let digest = sha256_hex(&bytes);
    let artifact = serde_json::from_slice(&bytes).map_err(|e| {
        Error::artifact(format!("failed to parse {}: {e}", path.display()))
    })?;
    Ok((artifact, digest))
}

fn in_file(path: &Path, err: Error) -> Error {
    match err {
        Error::Artifact(msg) => Error::artifact(format!("{}: {msg}", path.display())),
        other => other,
    }
}

/// Hex-encoded SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
