//! Criterion benchmarks for the full classifier.
//! Inputs: one known constant per class plus a seeded mixed batch.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p hapd

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hapd::api::{classify_with, draw_samples, ClassifyCfg, SampleCfg};

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let cfg = ClassifyCfg::default();
    let inputs = [
        ("rational", 355.0 / 113.0),
        ("quadratic", (1.0 + 5f64.sqrt()) / 2.0),
        ("cubic", 1.324_717_957_244_746),
        ("higher_degree", 2f64.powf(0.25)),
        ("transcendental", std::f64::consts::PI),
    ];
    for (name, alpha) in inputs {
        group.bench_with_input(BenchmarkId::new("known", name), &alpha, |b, &alpha| {
            b.iter(|| classify_with(alpha, &cfg).unwrap())
        });
    }
    group.bench_function(BenchmarkId::new("mixed_batch", 16), |b| {
        b.iter_batched(
            || draw_samples(SampleCfg::default(), 42, 16),
            |samples| {
                for s in samples {
                    let _ = classify_with(s.alpha, &cfg);
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
