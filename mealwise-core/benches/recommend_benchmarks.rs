//! Criterion benchmarks for learning and recommendation.
//!
//! Measures each strategy across catalog sizes (100, 1 000, 10 000 dishes) so
//! regressions in scoring or sorting show up early.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package mealwise-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mealwise_core::{MealKind, MenuItem, RecommendRequest, Strategy, learn, recommend};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CATALOG_SIZES: &[usize] = &[100, 1_000, 10_000];
const BENCHMARK_SEED: u64 = 0x5EED;
const DIETS: &[&str] = &["vegan", "vegetarian", "meat", "pescatarian"];
const FLAVORS: &[&str] = &["spicy", "sweet", "savory, umami", "rich, smoky", "fresh"];

fn generate_catalog(size: usize, seed: u64) -> Vec<MenuItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|index| {
            let ratings = (0..rng.gen_range(0..5))
                .map(|_| rng.gen_range(1..=5))
                .collect();
            MenuItem {
                id: format!("m{index}"),
                name: format!("Dish {index}"),
                price: f64::from(rng.gen_range(300_u32..4_000)) / 100.0,
                calories: rng.gen_range(150..1_200),
                diet: pick(&mut rng, DIETS),
                flavor: pick(&mut rng, FLAVORS),
                ratings,
                kind: MealKind::Standard,
            }
        })
        .collect()
}

fn pick(rng: &mut StdRng, options: &[&str]) -> String {
    options
        .get(rng.gen_range(0..options.len()))
        .copied()
        .unwrap_or_default()
        .to_owned()
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    for &size in CATALOG_SIZES {
        let catalog = generate_catalog(size, BENCHMARK_SEED);
        let history: Vec<String> = (0..20).map(|n| format!("m{n}")).collect();
        let profile = learn(&catalog, &history);
        group.throughput(Throughput::Elements(size as u64));

        for strategy in [Strategy::Best, Strategy::Random, Strategy::Hybrid] {
            let request = RecommendRequest {
                budget: Some(15.0),
                top_k: 5,
                strategy,
            };
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), size),
                &catalog,
                |b, catalog| {
                    let mut rng = StdRng::seed_from_u64(BENCHMARK_SEED);
                    b.iter(|| recommend(catalog, &profile, &request, &mut rng));
                },
            );
        }
    }

    group.finish();
}

fn bench_learn(c: &mut Criterion) {
    let catalog = generate_catalog(1_000, BENCHMARK_SEED);
    let history: Vec<String> = (0..500).map(|n| format!("m{}", n % 1_000)).collect();
    c.bench_function("learn_500_entries", |b| b.iter(|| learn(&catalog, &history)));
}

criterion_group!(benches, bench_recommend, bench_learn);
criterion_main!(benches);
