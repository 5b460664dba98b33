//! Latency benchmarks for comment classification
//!
//! Run with: cargo bench -p commentguard-classifiers

use chrono::Utc;
use commentguard_classifiers::{BatchAggregator, ClassifierConfig, CommentClassifier};
use commentguard_core::RawComment;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

fn fixture_classifier() -> CommentClassifier {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let config = ClassifierConfig {
        vectorizer_path: fixtures.join("vectorizer.json"),
        model_path: fixtures.join("logreg_model.json"),
        ..Default::default()
    };
    CommentClassifier::from_config(&config)
        .expect("Failed to load fixture artifacts")
        .0
}

/// Benchmark single-comment classification across comment lengths
fn benchmark_comment_classifier(c: &mut Criterion) {
    let classifier = fixture_classifier();

    let long = "I really hate this stupid video ".repeat(64);
    let test_cases = vec![
        ("short_clean", "Great video, love it!"),
        ("short_flagged", "Women belong in the kitchen"),
        ("medium", "This is a longer comment that talks about the video in some detail and is mostly harmless."),
        ("truncated_long", long.as_str()),
    ];

    let mut group = c.benchmark_group("Comment_Classifier");
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &text, |b, text| {
            b.iter(|| classifier.classify_comment(black_box(text)));
        });
    }

    group.finish();
}

/// Benchmark sequential versus parallel batches of 100 comments
fn benchmark_batch(c: &mut Criterion) {
    let aggregator = BatchAggregator::new(fixture_classifier());
    let now = Utc::now();
    let comments: Vec<RawComment> = (0..100)
        .map(|i| {
            let text = if i % 5 == 0 {
                "I hate women, stupid take"
            } else {
                "Amazing video, great editing"
            };
            RawComment::new(format!("user{i}"), text, now)
        })
        .collect();

    let mut group = c.benchmark_group("Batch_Aggregator");
    group.bench_function("sequential_100", |b| {
        b.iter(|| aggregator.classify_batch(black_box(&comments)));
    });
    group.bench_function("parallel_100", |b| {
        b.iter(|| aggregator.classify_batch_auto(black_box(&comments)));
    });
    group.finish();
}

criterion_group!(benches, benchmark_comment_classifier, benchmark_batch);
criterion_main!(benches);
