//! Proptest strategies for branch-and-bound property tests.
//!
//! Instances stay small enough for the brute-force cross-check to enumerate
//! every tour.

use std::collections::HashSet;

use courier_core::{CostMatrix, Edge, UNREACHABLE};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

/// Strategy for complete matrices: every off-diagonal edge is finite.
pub fn dense_matrix_strategy(
    min_stops: usize,
    max_stops: usize,
) -> impl Strategy<Value = CostMatrix> {
    matrix_strategy(min_stops, max_stops, || (0_u16..500).prop_map(Some))
}

/// Strategy for matrices where roughly one edge in five is unreachable.
pub fn sparse_matrix_strategy(
    min_stops: usize,
    max_stops: usize,
) -> impl Strategy<Value = CostMatrix> {
    matrix_strategy(min_stops, max_stops, || {
        proptest::option::weighted(0.8, 0_u16..500)
    })
}

fn matrix_strategy<C, S>(
    min_stops: usize,
    max_stops: usize,
    cell: C,
) -> impl Strategy<Value = CostMatrix>
where
    C: Fn() -> S,
    S: Strategy<Value = Option<u16>>,
{
    (min_stops..=max_stops).prop_flat_map(move |stops| {
        proptest::collection::vec(cell(), stops * stops)
            .prop_map(move |cells| build_matrix(stops, &cells))
    })
}

#[expect(
    clippy::expect_used,
    reason = "generated costs are non-negative and square by construction"
)]
fn build_matrix(stops: usize, cells: &[Option<u16>]) -> CostMatrix {
    let rows = cells
        .chunks(stops)
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or(UNREACHABLE, f64::from))
                .collect()
        })
        .collect();
    CostMatrix::new(rows).expect("generated matrix should be valid")
}

/// Assert that `edges` form one cycle through all `stops`.
pub fn assert_single_cycle(edges: &[Edge], stops: usize) -> Result<(), TestCaseError> {
    prop_assert_eq!(edges.len(), stops);
    let sources: HashSet<usize> = edges.iter().map(|edge| edge.from).collect();
    let targets: HashSet<usize> = edges.iter().map(|edge| edge.to).collect();
    prop_assert_eq!(sources.len(), stops, "a stop is left more than once");
    prop_assert_eq!(targets.len(), stops, "a stop is entered more than once");

    let mut current = 0;
    for _ in 0..stops {
        let next = edges.iter().find(|edge| edge.from == current).map(|edge| edge.to);
        prop_assert!(next.is_some(), "stop {} has no successor", current);
        current = next.unwrap_or(current);
    }
    prop_assert_eq!(current, 0, "walk of {} edges did not return to stop 0", stops);
    Ok(())
}
