//! Application state shared across requests

use anyhow::Result;
use commentguard_classifiers::{load_config, BatchAggregator, CommentClassifier, ModelMetadata};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;
use crate::youtube::{CommentSource, YouTubeClient};

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Comment classification pipeline over the loaded artifacts
    pub aggregator: BatchAggregator,

    /// Identity of the loaded artifacts
    pub model: Arc<ModelMetadata>,

    /// Where comments and video metadata come from
    pub source: Arc<dyn CommentSource>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Load classification artifacts and build the YouTube client.
    ///
    /// Fails if the artifacts are missing or corrupt; the server must not
    /// start without a model.
    pub fn new(config: ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Result<Self> {
        info!("Loading classifier configuration from {}", config.classifiers_config.display());
        let classifier_config = load_config(&config.classifiers_config)?;

        let (classifier, loaded) = CommentClassifier::from_config(&classifier_config)?;
        info!(
            "Loaded {} over {} features (vectorizer: {}, model: {})",
            classifier.model_name(),
            loaded.metadata.vocabulary_size,
            loaded.metadata.vectorizer_path.display(),
            loaded.metadata.model_path.display()
        );

        let source = YouTubeClient::new(&config)?;

        Ok(Self::with_parts(
            config,
            classifier,
            loaded.metadata,
            Arc::new(source),
            metrics_handle,
        ))
    }

    /// Assemble state from pre-built components
    pub fn with_parts(
        config: ServerConfig,
        classifier: CommentClassifier,
        model: ModelMetadata,
        source: Arc<dyn CommentSource>,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            aggregator: BatchAggregator::new(classifier),
            model: Arc::new(model),
            source,
            metrics_handle,
        }
    }
}
