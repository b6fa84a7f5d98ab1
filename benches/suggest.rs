//! Benchmarks for the search tokenizer and selection resolver.
//!
//! Both functions run on every keystroke in the search bar, so they are
//! expected to stay well under a millisecond for realistic category sets.

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

use bytestash::search::{compute_sections, resolve_selection};

/// Sample queries of varying shape.
const PLAIN_QUERY: &str = "retry with exponential backoff";
const EMPTY_TERM_QUERY: &str = "retry #";
const PARTIAL_TERM_QUERY: &str = "retry #ba";
const MULTI_TRIGGER_QUERY: &str = "#net retry #back";

fn category_set(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("category-{i:03}")).collect()
}

fn bench_compute_sections(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_sections");
    group.measurement_time(Duration::from_secs(5));

    let categories = category_set(40);
    let selected = vec!["category-001".to_string(), "category-017".to_string()];

    // No trigger character: the early-out path
    group.bench_function("plain_query", |b| {
        b.iter(|| compute_sections(black_box(PLAIN_QUERY), &categories, &selected));
    });

    // Empty term lists every unselected category
    group.bench_function("empty_term", |b| {
        b.iter(|| compute_sections(black_box(EMPTY_TERM_QUERY), &categories, &selected));
    });

    // Partial term with substring matching
    group.bench_function("partial_term", |b| {
        b.iter(|| compute_sections(black_box(PARTIAL_TERM_QUERY), &categories, &selected));
    });

    // Multiple triggers: only the last one counts
    group.bench_function("multi_trigger", |b| {
        b.iter(|| compute_sections(black_box(MULTI_TRIGGER_QUERY), &categories, &selected));
    });

    group.finish();
}

fn bench_category_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_sections_scaling");
    group.measurement_time(Duration::from_secs(5));

    for size in [10usize, 100, 1000] {
        let categories = category_set(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &categories, |b, cats| {
            b.iter(|| compute_sections(black_box("snippet #cat"), cats, &[]));
        });
    }

    group.finish();
}

fn bench_resolve_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_selection");

    group.bench_function("existing_category", |b| {
        b.iter(|| resolve_selection(black_box("backoff"), black_box(PARTIAL_TERM_QUERY)));
    });

    group.bench_function("add_new_option", |b| {
        b.iter(|| resolve_selection(black_box("Add new: Backoff"), black_box(PARTIAL_TERM_QUERY)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_sections,
    bench_category_scaling,
    bench_resolve_selection
);
criterion_main!(benches);
