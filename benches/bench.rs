// Criterion benchmarks for Listing Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use listing_match::core::{Matcher, summarize, distance::haversine_distance, scoring::calculate_compatibility};
use listing_match::models::{Item, Preferences, Weights};

const CATEGORIES: &[&str] = &["sale", "rent", "daily"];
const FEATURES: &[&str] = &["balcony", "parking", "garden", "elevator", "pool", "sea_view"];

fn create_candidate(id: usize) -> Item {
    let lat_offset = (id as f64 * 0.001) % 0.2;
    let lon_offset = (id as f64 * 0.0007) % 0.2;

    Item::new(id.to_string())
        .with_price(800_000.0 + (id % 40) as f64 * 10_000.0)
        .with_location(41.0 + lat_offset, 29.0 + lon_offset)
        .with_features(FEATURES.iter().skip(id % 3).take(2 + id % 4).copied())
        .with_category(CATEGORIES[id % CATEGORIES.len()])
}

fn create_query() -> Item {
    Item::new("query")
        .with_price(1_000_000.0)
        .with_location(41.0, 29.0)
        .with_features(["balcony", "parking"])
        .with_category("sale")
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(41.0082),
                black_box(28.9784),
                black_box(41.02),
                black_box(29.01),
            )
        });
    });
}

fn bench_compatibility(c: &mut Criterion) {
    let query = create_query();
    let candidate = create_candidate(7);
    let weights = Weights::default();

    c.bench_function("calculate_compatibility", |b| {
        b.iter(|| calculate_compatibility(black_box(&query), black_box(&candidate), black_box(&weights)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let query = create_query();
    let preferences = Preferences {
        min_compatibility_score: Some(40),
        max_distance: Some(25.0),
        ..Default::default()
    };

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Item> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.rank(
                        black_box(Some(&query)),
                        black_box(&candidates),
                        black_box(&preferences),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let candidates: Vec<Item> = (0..500).map(create_candidate).collect();
    let preferences = Preferences {
        max_results: Some(500),
        ..Default::default()
    };
    let ranked = matcher.rank(Some(&create_query()), &candidates, &preferences);

    c.bench_function("summarize_500_ranked", |b| {
        b.iter(|| summarize(black_box(&ranked)));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_compatibility,
    bench_ranking,
    bench_summarize
);

criterion_main!(benches);
