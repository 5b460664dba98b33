//! CommentGuard Classifiers
//!
//! Comment classification pipeline for toxic/sexist language detection.
//!
//! The pipeline is built from two frozen leaves loaded once at startup:
//! - [`TfidfVectorizer`]: text to sparse TF-IDF features (unigrams + bigrams)
//! - [`LogisticRegression`]: features to a positive-class probability
//!
//! [`CommentClassifier`] composes them into a flag/confidence/severity
//! decision per comment, and [`BatchAggregator`] applies it to ordered
//! batches and summarises the results. All inference is pure in-memory
//! computation over shared read-only state.

pub mod artifact;
pub mod batch;
pub mod classifier;
pub mod comment;
pub mod config;
pub mod features;
pub mod linear;
pub mod stop_words;
pub mod vectorizer;

pub use artifact::{LoadedModel, ModelMetadata};
pub use batch::{AnnotatedComment, BatchAggregator, BatchReport, SummaryReport};
pub use classifier::{Classifier, Prediction, Vectorizer, DECISION_THRESHOLD};
pub use comment::{ClassificationResult, CommentClassifier, Severity};
pub use config::{load_config, ClassifierConfig, SeverityThresholds};
pub use features::FeatureVector;
pub use linear::{LinearModelArtifact, LogisticRegression};
pub use vectorizer::{TfidfVectorizer, VectorizerArtifact};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::batch::{BatchAggregator, BatchReport, SummaryReport};
    pub use crate::classifier::{Classifier, Prediction, Vectorizer};
    pub use crate::comment::{ClassificationResult, CommentClassifier, Severity};
    pub use crate::config::ClassifierConfig;
    pub use crate::features::FeatureVector;
}
