//! Criterion benchmarks for the branch-and-bound solver.
//!
//! Measures solve time across stop counts (5, 8, 11) to track the cost of
//! the exponential search and detect regressions in pruning.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package courier-solver-bnb
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use courier_core::TourSolver;
use courier_solver_bnb::BranchAndBoundSolver;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};


use bench_support::{BENCHMARK_SEED, generate_cost_matrix};

/// Stop counts to benchmark, depot included.
const PROBLEM_SIZES: &[u64] = &[5, 8, 11];

fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_time");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    let solver = BranchAndBoundSolver::new();
    for &size in PROBLEM_SIZES {
        let Ok(stops) = usize::try_from(size) else {
            continue;
        };
        let matrix = generate_cost_matrix(stops, BENCHMARK_SEED);

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("stops", size), &matrix, |b, matrix| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking solve performance, result is intentionally discarded"
                )]
                let _ = solver.solve(matrix);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);
