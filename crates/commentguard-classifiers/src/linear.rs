//! Logistic regression over TF-IDF features

use crate::classifier::{Classifier, Prediction};
use crate::features::FeatureVector;
use commentguard_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Serialized form of a fitted binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    /// One weight per feature
    pub coef: Vec<f64>,

    pub intercept: f64,

    /// Class labels in column order
    #[serde(default = "default_classes")]
    pub classes: Vec<u8>,
}

fn default_classes() -> Vec<u8> {
    vec![0, 1]
}

impl LinearModelArtifact {
    /// Check that the weights are usable
    pub fn validate(&self) -> Result<()> {
        if self.coef.is_empty() {
            return Err(Error::artifact("model has no coefficients"));
        }
        if self.classes != [0, 1] {
            return Err(Error::artifact(format!(
                "expected binary classes [0, 1], found {:?}",
                self.classes
            )));
        }
        if !self.intercept.is_finite() {
            return Err(Error::artifact("model intercept is not finite"));
        }
        if let Some(bad) = self.coef.iter().position(|w| !w.is_finite()) {
            return Err(Error::artifact(format!(
                "model coefficient at index {bad} is not finite"
            )));
        }
        Ok(())
    }
}

/// Frozen logistic regression classifier
pub struct LogisticRegression {
    name: String,
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    /// Build a classifier from a validated artifact
    pub fn from_artifact(artifact: LinearModelArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(Self {
            name: "logistic-regression".to_string(),
            coef: artifact.coef,
            intercept: artifact.intercept,
        })
    }

    /// Number of input features
    pub fn dimension(&self) -> usize {
        self.coef.len()
    }

    /// Raw decision value `w·x + b`
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        if features.dimension() != self.coef.len() {
            return Err(Error::classifier(format!(
                "feature dimension {} does not match model dimension {}",
                features.dimension(),
                self.coef.len()
            )));
        }
        Ok(features.dot(&self.coef) + self.intercept)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticRegression {
    fn classify(&self, features: &FeatureVector) -> Result<Prediction> {
        let z = self.decision_function(features)?;
        let probability = sigmoid(z);
        if !probability.is_finite() {
            return Err(Error::classifier(format!(
                "non-finite probability for decision value {z}"
            )));
        }
        Ok(Prediction::from_probability(probability))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogisticRegression {
        LogisticRegression::from_artifact(LinearModelArtifact {
            coef: vec![-2.0, 4.0, 0.0],
            intercept: -0.5,
            classes: vec![0, 1],
        })
        .unwrap()
    }

    #[test]
    fn test_zero_vector_uses_intercept() {
        let prediction = model().classify(&FeatureVector::zeros(3)).unwrap();
        assert!((prediction.probability - sigmoid(-0.5)).abs() < 1e-12);
        assert_eq!(prediction.label, 0);
    }

    #[test]
    fn test_positive_weight_flags() {
        let v = FeatureVector::from_entries(3, vec![(1, 1.0)]).unwrap();
        let prediction = model().classify(&v).unwrap();
        assert_eq!(prediction.label, 1);
        assert!(prediction.probability > 0.95);
    }

    #[test]
    fn test_dimension_mismatch_is_inference_error() {
        let err = model().classify(&FeatureVector::zeros(4)).unwrap_err();
        assert!(matches!(err, Error::Classifier(_)));
    }

    #[test]
    fn test_rejects_non_binary_classes() {
        let artifact = LinearModelArtifact {
            coef: vec![1.0],
            intercept: 0.0,
            classes: vec![0, 1, 2],
        };
        assert!(LogisticRegression::from_artifact(artifact).is_err());
    }

    #[test]
    fn test_rejects_nan_weights() {
        let artifact = LinearModelArtifact {
            coef: vec![f64::NAN],
            intercept: 0.0,
            classes: vec![0, 1],
        };
        assert!(matches!(artifact.validate(), Err(Error::Artifact(_))));
    }
}
