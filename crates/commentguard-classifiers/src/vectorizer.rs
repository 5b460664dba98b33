//! TF-IDF text vectorizer (unigrams + bigrams over a frozen vocabulary)
//!
//! The analyzer mirrors the one used when the vocabulary was fitted:
//! lowercase, take maximal runs of two or more word characters, drop English
//! stop words, then emit unigrams followed by bigrams of adjacent surviving
//! tokens.
//!
//! Word characters are letters, numbers and `_`. Combining marks and other
//! connector punctuation split tokens, so decomposed `cafe\u{301}` yields
//! `cafe`. This is narrower than the `regex` crate's Unicode `\w`.

use crate::classifier::Vectorizer;
use crate::comment::truncate_chars;
use crate::config::DEFAULT_MAX_CHARS;
use crate::features::FeatureVector;
use crate::stop_words::ENGLISH_STOP_WORDS;
use commentguard_core::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Upper bound on vocabulary size accepted from an artifact
pub const MAX_FEATURES: usize = 5000;

/// Maximal runs of letters, numbers and underscores, at least two long
const TOKEN_PATTERN: &str = r"[\p{L}\p{N}_]{2,}";

/// Row normalisation applied after IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// Serialized form of a fitted vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Term to feature index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature index
    pub idf: Vec<f64>,

    /// Inclusive n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// `"english"` or absent
    #[serde(default)]
    pub stop_words: Option<String>,

    #[serde(default)]
    pub norm: Norm,

    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 2)
}

fn default_true() -> bool {
    true
}

impl VectorizerArtifact {
    /// Check internal consistency of the artifact
    pub fn validate(&self) -> Result<()> {
        let n = self.vocabulary.len();
        if n == 0 {
            return Err(Error::artifact("vectorizer vocabulary is empty"));
        }
        if n > MAX_FEATURES {
            return Err(Error::artifact(format!(
                "vectorizer vocabulary has {n} terms, limit is {MAX_FEATURES}"
            )));
        }
        if self.idf.len() != n {
            return Err(Error::artifact(format!(
                "idf has {} weights for {n} vocabulary terms",
                self.idf.len()
            )));
        }

        let mut seen = vec![false; n];
        for (term, &index) in &self.vocabulary {
            if index >= n || std::mem::replace(&mut seen[index], true) {
                return Err(Error::artifact(format!(
                    "vocabulary index {index} for term '{term}' is out of range or duplicated"
                )));
            }
        }

        if let Some(bad) = self.idf.iter().position(|w| !w.is_finite() || *w <= 0.0) {
            return Err(Error::artifact(format!(
                "idf weight at index {bad} is not a positive finite number"
            )));
        }

        let (lo, hi) = self.ngram_range;
        if lo < 1 || hi > 2 || lo > hi {
            return Err(Error::artifact(format!(
                "unsupported ngram_range ({lo}, {hi})"
            )));
        }

        match self.stop_words.as_deref() {
            None | Some("english") => Ok(()),
            Some(other) => Err(Error::artifact(format!(
                "unsupported stop word list '{other}'"
            ))),
        }
    }
}

/// Frozen TF-IDF vectorizer.
///
/// `vectorize` only reads the first `max_chars` characters of its input
/// (512 unless overridden), so per-call work stays bounded for direct callers.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    lowercase: bool,
    stop_words: HashSet<&'static str>,
    norm: Norm,
    sublinear_tf: bool,
    token_pattern: Regex,
    max_chars: usize,
}

impl TfidfVectorizer {
    /// Build a vectorizer from a validated artifact
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        artifact.validate()?;

        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::internal(format!("invalid token pattern: {e}")))?;

        let stop_words = match artifact.stop_words.as_deref() {
            Some("english") => ENGLISH_STOP_WORDS.iter().copied().collect(),
            _ => HashSet::new(),
        };

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            lowercase: artifact.lowercase,
            stop_words,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
            token_pattern,
            max_chars: DEFAULT_MAX_CHARS,
        })
    }

    /// Override the number of characters read per text
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Number of characters read per text
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Split text into the terms the vocabulary was built from
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(token))
            .collect();

        let (lo, hi) = self.ngram_range;
        let mut terms = Vec::new();
        for n in lo..=hi {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| t.to_string()));
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }

    /// Look up the feature index of a term
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

impl Vectorizer for TfidfVectorizer {
    fn vectorize(&self, text: &str) -> Result<FeatureVector> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(truncate_chars(text, self.max_chars)) {
            if let Some(index) = self.term_index(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .collect();

        let mut vector = FeatureVector::from_entries(self.dimension(), entries)
            .ok_or_else(|| Error::classifier("feature index outside vocabulary"))?;

        if self.norm == Norm::L2 {
            let norm = vector.l2_norm();
            if norm > 0.0 {
                vector.scale(1.0 / norm);
            }
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }
}
