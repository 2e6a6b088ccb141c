//! Column feature extraction throughput

use asset_sets::{builtin, AssetKind, AssetSets};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feature_engine::ColumnFeatureExtractor;
use std::sync::Arc;

fn address_column(rows: usize) -> Vec<String> {
    (0..rows)
        .map(|i| format!("{} Main St, Dallas TX 75{:03}", 100 + i, i % 1000))
        .collect()
}

fn bench_extract(c: &mut Criterion) {
    let assets = AssetSets::builder()
        .with_set(AssetKind::States, builtin::states_and_provinces())
        .with_tokens(AssetKind::Cities, ["dallas", "austin", "houston"])
        .build();
    let extractor = ColumnFeatureExtractor::new(Arc::new(assets));

    let mut group = c.benchmark_group("column_extraction");
    for rows in [100, 1_000, 10_000] {
        let column = address_column(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &column, |b, column| {
            b.iter(|| extractor.extract(black_box(column.as_slice())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
