//! Benchmarks for RoughnessModel.
//!
//! Run:
//! - cargo bench
//!
//! Compares the one-off O(n²) construction against the O(n) incremental
//! add/remove path across spectrum sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vassilakis_sra::RoughnessModel;

const SPECTRUM_LENS: [usize; 4] = [4, 16, 64, 256];

fn harmonic_spectrum(len: usize) -> Vec<(f64, f64)> {
    (1..=len)
        .map(|k| (110.0 * k as f64, 1.0 / k as f64))
        .collect()
}

fn bench_full_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_full_build");
    for &len in &SPECTRUM_LENS {
        let parts = harmonic_spectrum(len);
        let id = BenchmarkId::new("partials", len);
        group.bench_with_input(id, &parts, |b, parts| {
            b.iter(|| RoughnessModel::new(black_box(parts.iter().copied())).unwrap());
        });
    }
    group.finish();
}

fn bench_add_remove_one(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_add_remove_one");
    for &len in &SPECTRUM_LENS {
        let mut model = RoughnessModel::new(harmonic_spectrum(len)).unwrap();
        let id = BenchmarkId::new("partials", len);
        group.bench_function(id, |b| {
            b.iter(|| {
                // Off-grid frequency: a true insert plus a full cancel, so
                // the model is back in its starting state every iteration.
                model.add_sinusoid(black_box((466.1638, 1.0))).unwrap();
                model.remove_sinusoid(black_box((466.1638, 1.0))).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_roughness_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_roughness_sum");
    for &len in &SPECTRUM_LENS {
        let model = RoughnessModel::new(harmonic_spectrum(len)).unwrap();
        let id = BenchmarkId::new("partials", len);
        group.bench_function(id, |b| {
            b.iter(|| black_box(model.roughness()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_full_build,
    bench_add_remove_one,
    bench_roughness_query
);
criterion_main!(benches);
