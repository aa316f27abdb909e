//! Integration test validating benchmark helpers work with
//! `BranchAndBoundSolver`.

use courier_core::TourSolver;
use courier_core::test_support::brute_force_optimum;
use courier_solver_bnb::BranchAndBoundSolver;
use rstest::rstest;

/// Include the benchmark support module from the benches directory.
#[path = "../benches/bench_support.rs"]
mod bench_support;

use bench_support::{BENCHMARK_SEED, generate_cost_matrix, generate_cost_rows, generate_stops};

#[rstest]
fn generation_is_deterministic() {
    let first = generate_stops(8, BENCHMARK_SEED);
    let second = generate_stops(8, BENCHMARK_SEED);
    assert_eq!(first, second);
    assert_eq!(
        generate_cost_rows(&first, BENCHMARK_SEED),
        generate_cost_rows(&second, BENCHMARK_SEED)
    );
}

#[rstest]
#[case(5)]
#[case(7)]
fn benchmark_instances_solve_to_the_optimum(#[case] stops: usize) {
    let matrix = generate_cost_matrix(stops, BENCHMARK_SEED);
    let response = BranchAndBoundSolver::new()
        .solve(&matrix)
        .expect("benchmark instance should solve");
    assert_eq!(Some(response.tour.cost()), brute_force_optimum(&matrix));
    assert!(response.tour.is_hamiltonian_cycle(stops));
}

#[rstest]
fn largest_benchmark_instance_completes() {
    let matrix = generate_cost_matrix(11, BENCHMARK_SEED);
    let response = BranchAndBoundSolver::new()
        .solve(&matrix)
        .expect("benchmark instance should solve");
    assert_eq!(response.tour.len(), 11);
}
