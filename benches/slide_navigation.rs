// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for slide navigation operations.
//!
//! Measures the performance of:
//! - Wraparound navigation (next/previous/go_to)
//! - Prefetch planning around the current slide

use criterion::{criterion_group, criterion_main, Criterion};
use keepsake::assets::SlideSource;
use keepsake::gallery::prefetch::prefetch_plan;
use keepsake::gallery::Carousel;
use std::hint::black_box;
use std::path::PathBuf;

fn carousel_of(count: usize) -> Carousel {
    let slides = (0..count)
        .map(|i| SlideSource::Local(PathBuf::from(format!("slide_{i}.jpg"))))
        .collect();
    Carousel::new(slides)
}

/// Benchmark pure navigation operations.
fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide_navigation");

    let carousel = carousel_of(500);

    group.bench_function("next", |b| {
        b.iter(|| {
            let mut nav = carousel.clone();
            nav.next();
            black_box(&nav);
        });
    });

    group.bench_function("previous", |b| {
        b.iter(|| {
            let mut nav = carousel.clone();
            nav.previous();
            black_box(&nav);
        });
    });

    group.bench_function("go_to", |b| {
        b.iter(|| {
            let mut nav = carousel.clone();
            nav.go_to(black_box(250));
            black_box(&nav);
        });
    });

    group.finish();
}

/// Benchmark prefetch planning around the current slide.
fn bench_prefetch_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide_navigation");

    group.bench_function("prefetch_plan_depth_2", |b| {
        b.iter(|| {
            black_box(prefetch_plan(black_box(250), 500, 2));
        });
    });

    group.bench_function("prefetch_plan_depth_8", |b| {
        b.iter(|| {
            black_box(prefetch_plan(black_box(499), 500, 8));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_navigate, bench_prefetch_plan);
criterion_main!(benches);
