// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the per-snap decision path.
//!
//! Measures the performance of:
//! - The prefetch trigger check run on every carousel snap
//! - Neighbor photo URL collection around the active card
//! - Filtering neighbor URLs against a warm photo cache

use criterion::{criterion_group, criterion_main, Criterion};
use iced_bites::app::state::ViewState;
use iced_bites::domain::PrefetchMargin;
use iced_bites::search::BusinessRecord;
use iced_bites::ui::photos::{neighbor_urls, PhotoCache};
use std::hint::black_box;

/// A result list of `count` records, each carrying a distinct photo URL.
fn result_list(count: usize) -> Vec<BusinessRecord> {
    (0..count)
        .map(|i| BusinessRecord {
            id: format!("biz-{i}"),
            name: format!("Restaurant {i}"),
            rating: 4.0,
            image_url: Some(format!("https://cdn.example.com/photos/{i}.jpg")),
            review_count: 100,
            price: Some("$$".to_string()),
        })
        .collect()
}

/// Benchmark the prefetch decision made on every snap.
///
/// This runs once per carousel movement, so it has to stay trivially cheap
/// even for long result lists.
fn bench_should_prefetch(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");

    let mut state = ViewState::new();
    state.apply_page(0, result_list(480));
    let margin = PrefetchMargin::default();

    group.bench_function("should_prefetch_hit", |b| {
        b.iter(|| {
            black_box(state.should_prefetch(black_box(476), margin));
        });
    });

    group.bench_function("should_prefetch_miss", |b| {
        b.iter(|| {
            black_box(state.should_prefetch(black_box(3), margin));
        });
    });

    group.finish();
}

/// Benchmark neighbor URL collection around the active card.
fn bench_neighbor_urls(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");

    let records = result_list(480);

    group.bench_function("neighbor_urls_mid_list", |b| {
        b.iter(|| {
            black_box(neighbor_urls(black_box(&records), 240, 2));
        });
    });

    group.bench_function("neighbor_urls_at_edge", |b| {
        b.iter(|| {
            black_box(neighbor_urls(black_box(&records), 0, 2));
        });
    });

    group.finish();
}

/// Benchmark filtering neighbor URLs against a warm cache.
///
/// Models the steady state while swiping: most neighbors are already
/// cached and the filter should reject them without allocating.
fn bench_urls_to_fetch(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");

    let records = result_list(48);
    let mut cache = PhotoCache::with_defaults();
    for record in &records {
        if let Some(url) = record.photo_url() {
            cache.insert(url, vec![0u8; 1024]);
        }
    }
    let urls = neighbor_urls(&records, 24, 2);

    group.bench_function("urls_to_fetch_warm_cache", |b| {
        b.iter(|| {
            black_box(cache.urls_to_fetch(black_box(&urls)));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_should_prefetch,
    bench_neighbor_urls,
    bench_urls_to_fetch
);
criterion_main!(benches);
