//! Per-comment classification: flag decision, confidence and severity tier

use crate::artifact::LoadedModel;
use crate::classifier::{Classifier, Prediction, Vectorizer};
use crate::config::{ClassifierConfig, SeverityThresholds, DEFAULT_MAX_CHARS};
use commentguard_core::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Coarse bucketing of confidence for flagged comments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Tier for a flagged comment with the given confidence
    pub fn for_confidence(confidence: f64, thresholds: &SeverityThresholds) -> Self {
        if confidence > thresholds.high {
            Self::High
        } else if confidence > thresholds.medium {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Outcome of classifying one comment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub is_flagged: bool,

    /// Certainty of the chosen label, percent with one decimal
    pub confidence: f64,

    pub severity: Severity,
}

impl ClassificationResult {
    /// Result reported when inference fails; never flags
    pub const SAFE_DEFAULT: Self = Self {
        is_flagged: false,
        confidence: 0.0,
        severity: Severity::None,
    };

    /// Derive the result from a model prediction
    pub fn from_prediction(prediction: &Prediction, thresholds: &SeverityThresholds) -> Self {
        let confidence = prediction.confidence();
        let is_flagged = prediction.is_positive();
        let severity = if is_flagged {
            Severity::for_confidence(confidence, thresholds)
        } else {
            Severity::None
        };

        Self {
            is_flagged,
            confidence,
            severity,
        }
    }
}

/// Classifies individual comments with an injected vectorizer and model.
///
/// Holds only shared read-only state, so it is cheap to clone and safe to
/// use from many threads at once.
#[derive(Clone)]
pub struct CommentClassifier {
    vectorizer: Arc<dyn Vectorizer>,
    model: Arc<dyn Classifier>,
    thresholds: SeverityThresholds,
    max_chars: usize,
}

impl CommentClassifier {
    /// Create a classifier with default thresholds and truncation bound
    pub fn new(vectorizer: Arc<dyn Vectorizer>, model: Arc<dyn Classifier>) -> Self {
        Self {
            vectorizer,
            model,
            thresholds: SeverityThresholds::default(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Build from loaded artifacts and configuration
    pub fn from_loaded(loaded: &LoadedModel, config: &ClassifierConfig) -> Self {
        Self::new(loaded.vectorizer.clone(), loaded.model.clone())
            .with_thresholds(config.severity)
            .with_max_chars(config.max_chars)
    }

    /// Load artifacts named by the configuration and build the classifier
    pub fn from_config(config: &ClassifierConfig) -> Result<(Self, LoadedModel)> {
        config.validate()?;
        let loaded = LoadedModel::load(config)?;
        Ok((Self::from_loaded(&loaded, config), loaded))
    }

    /// Set severity thresholds
    pub fn with_thresholds(mut self, thresholds: SeverityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the truncation bound
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Classify one comment.
    ///
    /// Never fails: inference errors are logged and reported as
    /// [`ClassificationResult::SAFE_DEFAULT`].
    pub fn classify_comment(&self, text: &str) -> ClassificationResult {
        match self.try_classify(text) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, model = self.model.name(), "Comment classification failed, reporting safe default");
                metrics::counter!("commentguard_inference_errors_total").increment(1);
                ClassificationResult::SAFE_DEFAULT
            }
        }
    }

    /// Classify one comment, surfacing inference errors
    pub fn try_classify(&self, text: &str) -> Result<ClassificationResult> {
        let truncated = truncate_chars(text, self.max_chars);
        let features = self.vectorizer.vectorize(truncated)?;
        let prediction = self.model.classify(&features)?;
        Ok(ClassificationResult::from_prediction(
            &prediction,
            &self.thresholds,
        ))
    }
}

/// Prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
