//! Criterion driver for the numeric benchmark suite
//!
//! Discovers the suite's `time_*` operations and measures each against a
//! freshly built fixture.
//!
//! ```bash
//! cargo bench --bench numeric_suite
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use matbench::{BenchmarkSuite, NumericSuite};
use std::hint::black_box;
use std::time::Duration;

fn bench_numeric_suite(c: &mut Criterion) {
    let mut group = c.benchmark_group(NumericSuite::NAME);

    // A 1000x1000 eigenvalue run takes hundreds of milliseconds per iteration
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));

    for op in NumericSuite::operations() {
        let suite = NumericSuite::setup().expect("fixture setup should succeed");

        group.bench_function(op.name(), |bench| {
            bench.iter(|| {
                op.call(black_box(&suite))
                    .expect("benchmark operation should succeed");
            });
        });
    }

    group.finish();
}

fn bench_numeric_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_sizes");

    // Sizes below the fixture dimension, for scaling plots
    let sizes = vec![
        32,  // Fits in L1
        64,  // Fits in L2
        128, // Medium
        256, // Large
    ];

    for op in NumericSuite::operations() {
        for &n in &sizes {
            let suite = NumericSuite::with_seed(n, 42);

            group.bench_with_input(BenchmarkId::new(op.name(), n), &suite, |bench, suite| {
                bench.iter(|| {
                    op.call(black_box(suite))
                        .expect("benchmark operation should succeed");
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_numeric_suite, bench_numeric_sizes);
criterion_main!(benches);
