//! Property tests for classification and summary invariants

use chrono::{TimeZone, Utc};
use commentguard_classifiers::{BatchAggregator, ClassifierConfig, CommentClassifier, Severity};
use commentguard_core::RawComment;
use proptest::prelude::*;
use std::path::PathBuf;
use std::sync::OnceLock;

fn classifier() -> &'static CommentClassifier {
    static CLASSIFIER: OnceLock<CommentClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(|| {
        let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
        let config = ClassifierConfig {
            vectorizer_path: fixtures.join("vectorizer.json"),
            model_path: fixtures.join("logreg_model.json"),
            ..Default::default()
        };
        CommentClassifier::from_config(&config)
            .expect("fixture artifacts load")
            .0
    })
}

fn vocabulary_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "stupid", "hate", "women", "kitchen", "amazing", "love", "video", "great", "belong",
            "the", "you", "are", "really", "so",
        ]),
        0..40,
    )
    .prop_map(|words| words.join(" "))
}

fn any_text() -> impl Strategy<Value = String> {
    prop_oneof![vocabulary_text(), "\\PC{0,700}"]
}

proptest! {
    #[test]
    fn prop_result_well_formed(text in any_text()) {
        let result = classifier().classify_comment(&text);
        prop_assert!((0.0..=100.0).contains(&result.confidence));
        prop_assert_eq!(result.is_flagged, result.severity != Severity::None);
    }

    #[test]
    fn prop_truncation_determinism(
        prefix in "[a-z ]{512}",
        tail_a in "\\PC{0,64}",
        tail_b in "\\PC{0,64}",
    ) {
        let a = classifier().classify_comment(&format!("{prefix}{tail_a}"));
        let b = classifier().classify_comment(&format!("{prefix}{tail_b}"));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_idempotent(text in any_text()) {
        prop_assert_eq!(
            classifier().classify_comment(&text),
            classifier().classify_comment(&text)
        );
    }

    #[test]
    fn prop_summary_invariants(texts in prop::collection::vec(vocabulary_text(), 0..25)) {
        let published = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let comments: Vec<_> = texts
            .iter()
            .map(|t| RawComment::new("someone", t.as_str(), published))
            .collect();

        let report = BatchAggregator::new(classifier().clone()).classify_batch(&comments);
        let s = report.summary;
        prop_assert_eq!(s.high_severity + s.medium_severity + s.low_severity, s.flagged_count);
        prop_assert_eq!(s.flagged_count + s.safe_count, s.total_comments);
        prop_assert_eq!(s.total_comments, comments.len());
        prop_assert!((0.0..=100.0).contains(&s.toxicity_percentage));
        if comments.is_empty() {
            prop_assert_eq!(s.toxicity_percentage, 0.0);
        }
    }
}
