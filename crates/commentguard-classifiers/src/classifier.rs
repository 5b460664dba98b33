//! Vectorizer and classifier traits and common types

use crate::features::FeatureVector;
use commentguard_core::Result;

/// Probability cutoff for the positive class. Fixed by the trained model.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Trait for text vectorizers
///
/// Implementations hold frozen, read-only state and must be deterministic:
/// the same text always maps to the same vector.
pub trait Vectorizer: Send + Sync {
    /// Map text to a sparse feature vector
    fn vectorize(&self, text: &str) -> Result<FeatureVector>;

    /// Number of feature dimensions (vocabulary size)
    fn dimension(&self) -> usize;
}

/// Trait for binary classifiers over feature vectors
pub trait Classifier: Send + Sync {
    /// Score the given feature vector
    fn classify(&self, features: &FeatureVector) -> Result<Prediction>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Binary prediction: the chosen label and the positive-class probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Class label, 0 (safe) or 1 (flagged)
    pub label: u8,

    /// Probability of the positive class (0.0-1.0)
    pub probability: f64,
}

impl Prediction {
    /// Build a prediction from the positive-class probability using the fixed threshold
    pub fn from_probability(probability: f64) -> Self {
        let label = u8::from(probability >= DECISION_THRESHOLD);
        Self { label, probability }
    }

    /// Whether the positive class was predicted
    pub fn is_positive(&self) -> bool {
        self.label == 1
    }

    /// Class probabilities as `[P(0), P(1)]`
    pub fn class_probabilities(&self) -> [f64; 2] {
        [1.0 - self.probability, self.probability]
    }

    /// Percentage certainty of the chosen label, rounded to one decimal place
    pub fn confidence(&self) -> f64 {
        let [negative, positive] = self.class_probabilities();
        round1(100.0 * negative.max(positive))
    }
}

/// Round to one decimal place.
///
/// Ties are broken to even on the exact binary value, so `6.25` becomes `6.2`
/// while `87.65` (stored just above the tie) becomes `87.7`.
pub(crate) fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
