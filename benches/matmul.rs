//! Blocked vs row-per-task kernel throughput.
//!
//! # Usage:
//! ```bash
//! # Run all kernel benchmarks
//! cargo bench --bench matmul
//!
//! # Run a single size
//! cargo bench --bench matmul -- matrix_product_256x256x256
//!
//! # Pin the worker count
//! RAYON_NUM_THREADS=4 cargo bench --bench matmul
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rand::prelude::*;

use matrix_product::{matrix_product, ColMajor, InitRule, Matrix, RowMajor, Tiling};

fn bench_matrix_product_by_size(c: &mut Criterion) {
    let sizes = [(64, 64, 64), (256, 256, 256), (500, 500, 500), (300, 700, 200)];

    for (m, n, k) in sizes {
        let group_name = format!("matrix_product_{}x{}x{}", m, n, k);
        let mut group = c.benchmark_group(&group_name);
        group.sample_size(20);
        group.throughput(Throughput::Elements((2 * m * n * k) as u64));

        let mut rng = StdRng::seed_from_u64(42);
        let alpha: f64 = rng.random();
        let mut a = Matrix::<RowMajor>::new(m, k);
        let mut b = Matrix::<ColMajor>::new(k, n);
        InitRule::Random.fill(&mut a, &mut rng);
        InitRule::Random.fill(&mut b, &mut rng);
        let beta: f64 = rng.random();
        let mut c0 = Matrix::<RowMajor>::new(m, n);
        InitRule::Random.fill(&mut c0, &mut rng);

        for (name, tiling) in [
            ("blocked_10", Tiling::default()),
            ("blocked_32", Tiling::Blocked { block_size: 32 }),
            ("naive", Tiling::Naive),
        ] {
            // Fresh C per batch; repeated in-place updates would drift into
            // subnormals and skew the timing.
            group.bench_function(name, |bench| {
                bench.iter_batched_ref(
                    || c0.clone(),
                    |c_run| {
                        matrix_product(
                            black_box(alpha),
                            black_box(&a),
                            black_box(&b),
                            black_box(beta),
                            c_run,
                            tiling,
                        );
                    },
                    BatchSize::LargeInput,
                );
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_matrix_product_by_size);
criterion_main!(benches);
