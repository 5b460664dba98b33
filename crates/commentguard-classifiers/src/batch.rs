//! Batch classification of comments and report aggregation

use crate::classifier::round1;
use crate::comment::{ClassificationResult, CommentClassifier, Severity};
use commentguard_core::RawComment;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

/// A comment with its classification merged in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedComment {
    #[serde(flatten)]
    pub comment: RawComment,

    #[serde(flatten)]
    pub classification: ClassificationResult,
}

/// Summary statistics over a classified batch
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub total_comments: usize,
    pub flagged_count: usize,
    pub safe_count: usize,

    /// Flagged share in percent, one decimal; 0 for an empty batch
    pub toxicity_percentage: f64,

    pub high_severity: usize,
    pub medium_severity: usize,
    pub low_severity: usize,
}

impl SummaryReport {
    /// Fold classification results into a summary
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ClassificationResult>) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.total_comments += 1;
            if !result.is_flagged {
                continue;
            }
            summary.flagged_count += 1;
            match result.severity {
                Severity::High => summary.high_severity += 1,
                Severity::Medium => summary.medium_severity += 1,
                Severity::Low | Severity::None => summary.low_severity += 1,
            }
        }

        summary.safe_count = summary.total_comments - summary.flagged_count;
        summary.toxicity_percentage = if summary.total_comments == 0 {
            0.0
        } else {
            round1(summary.flagged_count as f64 / summary.total_comments as f64 * 100.0)
        };
        summary
    }
}

/// Annotated comments in input order plus their summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub comments: Vec<AnnotatedComment>,
    pub summary: SummaryReport,
}

/// Applies a [`CommentClassifier`] to ordered batches of comments
#[derive(Clone)]
pub struct BatchAggregator {
    classifier: CommentClassifier,
}

impl BatchAggregator {
    /// Create an aggregator around a comment classifier
    pub fn new(classifier: CommentClassifier) -> Self {
        Self { classifier }
    }

    /// Access the per-comment classifier
    pub fn classifier(&self) -> &CommentClassifier {
        &self.classifier
    }

    /// Classify every comment in order and summarise.
    ///
    /// Never fails; comments whose inference errors are reported with the
    /// safe default.
    pub fn classify_batch(&self, comments: &[RawComment]) -> BatchReport {
        let start = Instant::now();
        let annotated: Vec<AnnotatedComment> =
            comments.iter().map(|c| self.annotate(c)).collect();
        self.finish(annotated, start)
    }

    /// Same result as [`classify_batch`](Self::classify_batch), computed on up
    /// to `workers` scoped threads over contiguous chunks.
    pub fn classify_batch_parallel(&self, comments: &[RawComment], workers: usize) -> BatchReport {
        let workers = workers.max(1);
        if workers == 1 || comments.len() < 2 {
            return self.classify_batch(comments);
        }

        let start = Instant::now();
        let chunk_size = comments.len().div_ceil(workers);
        let annotated: Vec<AnnotatedComment> = std::thread::scope(|scope| {
            let handles: Vec<_> = comments
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk.iter().map(|c| self.annotate(c)).collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(chunk) => chunk,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        self.finish(annotated, start)
    }

    /// Parallel classification using one worker per available CPU
    pub fn classify_batch_auto(&self, comments: &[RawComment]) -> BatchReport {
        self.classify_batch_parallel(comments, num_cpus::get())
    }

    fn annotate(&self, comment: &RawComment) -> AnnotatedComment {
        AnnotatedComment {
            comment: comment.clone(),
            classification: self.classifier.classify_comment(&comment.text),
        }
    }

    fn finish(&self, comments: Vec<AnnotatedComment>, start: Instant) -> BatchReport {
        let summary = SummaryReport::from_results(comments.iter().map(|c| &c.classification));
        let latency_us = start.elapsed().as_micros() as u64;

        metrics::counter!("commentguard_comments_classified_total")
            .increment(summary.total_comments as u64);
        metrics::counter!("commentguard_comments_flagged_total")
            .increment(summary.flagged_count as u64);
        metrics::histogram!("commentguard_batch_latency_us").record(latency_us as f64);

        debug!(
            total = summary.total_comments,
            flagged = summary.flagged_count,
            latency_us,
            "Classified comment batch"
        );

        BatchReport { comments, summary }
    }
}
