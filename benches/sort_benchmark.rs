//! Performance benchmarks for sorting and paged rendering.
//!
//! Run with: cargo bench --bench sort_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use price_list::analytics::PriceMode;
use price_list::list::{ItemsList, ListOptions};
use price_list::model::Product;
use price_list::sorting::{NameSimilarityRanker, SimilarityRanker, SortMode, sort_products};
use price_list::view_state::QueryString;
use std::hint::black_box;

const WORDS: &[&str] = &[
    "bio", "vollmilch", "butter", "joghurt", "natur", "käse", "gouda", "apfel", "saft", "brot",
    "vollkorn", "nudeln", "reis", "tomaten", "passiert",
];
const STORES: &[&str] = &["billa", "spar", "hofer", "lidl", "penny"];
const UNITS: &[&str] = &["g", "ml", "stk"];

/// Generate a collection with repeating word combinations so similarity has neighbours.
fn generate_products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| {
            let name = format!(
                "{} {} {}",
                WORDS[i % WORDS.len()],
                WORDS[(i / 3) % WORDS.len()],
                i % 7
            );
            let price = 0.49 + (i * 37 % 1000) as f64 / 100.0;
            Product::new(STORES[i % STORES.len()], i.to_string(), name, price)
                .with_history(&[price, price * 1.1])
                .with_quantity(((i % 20) + 1) as f64 * 50.0, UNITS[i % UNITS.len()])
        })
        .collect()
}

fn bench_deterministic_sorts(c: &mut Criterion) {
    let items = generate_products(5_000);
    let mut group = c.benchmark_group("sort_5000");

    for mode in SortMode::ALL.into_iter().filter(|m| m.is_deterministic()) {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            b.iter(|| {
                black_box(sort_products(
                    black_box(items.clone()),
                    mode,
                    PriceMode::Unit,
                    &NameSimilarityRanker,
                ))
            });
        });
    }

    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");
    group.sample_size(10);

    for size in [100, 250, 500] {
        let items = generate_products(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| black_box(NameSimilarityRanker.rank(black_box(items.clone()))));
        });
    }

    group.finish();
}

fn bench_first_page(c: &mut Criterion) {
    let items = generate_products(5_000);

    c.bench_function("set_items_5000_first_page", |b| {
        b.iter(|| {
            let mut list = ItemsList::new("items", ListOptions::default());
            list.first_display();
            list.set_items(black_box(items.clone()), &QueryString::default());
            black_box(list.rows().len())
        });
    });
}

criterion_group!(benches, bench_deterministic_sorts, bench_similarity, bench_first_page);
criterion_main!(benches);
