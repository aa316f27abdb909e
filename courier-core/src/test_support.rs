//! Test-only helpers shared by unit, property and behaviour tests.
//!
//! The helpers are available under `cfg(test)` and behind the
//! `test-support` feature.

use crate::{CostMatrix, Edge, TravelCostError, TravelCostProvider, UNREACHABLE};

/// Costs of the five-stop reference instance; its optimum is 199.
///
/// # Examples
/// ```rust
/// use courier_core::CostMatrix;
/// use courier_core::test_support::five_stop_costs;
///
/// let matrix = CostMatrix::new(five_stop_costs()).expect("valid matrix");
/// assert_eq!(matrix.size(), 5);
/// ```
#[must_use]
pub fn five_stop_costs() -> Vec<Vec<f64>> {
    let x = UNREACHABLE;
    vec![
        vec![x, 40.0, 8.0, 80.0, 48.0],
        vec![24.0, x, 27.0, 68.0, 66.0],
        vec![9.0, 37.0, x, 82.0, 49.0],
        vec![64.0, 76.0, 62.0, x, 48.0],
        vec![43.0, 64.0, 41.0, 42.0, x],
    ]
}

/// A [`TravelCostProvider`] returning a fixed, pre-defined matrix.
///
/// The number of rows must match the number of stops requested; mismatches
/// produce [`TravelCostError::DimensionMismatch`].
#[derive(Debug, Clone)]
pub struct FixedCostProvider {
    rows: Vec<Vec<f64>>,
}

impl FixedCostProvider {
    /// Construct a provider from rows of costs.
    #[must_use]
    pub const fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }
}

impl<S> TravelCostProvider<S> for FixedCostProvider {
    fn cost_matrix(&self, stops: &[S]) -> Result<CostMatrix, TravelCostError> {
        if stops.is_empty() {
            return Err(TravelCostError::EmptyInput);
        }
        if self.rows.len() != stops.len() {
            return Err(TravelCostError::DimensionMismatch {
                expected: stops.len(),
                actual: self.rows.len(),
            });
        }
        Ok(CostMatrix::new(self.rows.clone())?)
    }
}

/// Cost of the cheapest closed tour, or `None` when no finite tour exists.
///
/// Enumerates every tour, so keep instances below eight stops.
#[must_use]
pub fn brute_force_optimum(matrix: &CostMatrix) -> Option<f64> {
    cheapest_tour_where(matrix, |_| true)
}

/// Cost of the cheapest finite tour whose edges satisfy `accept`.
///
/// Every tour is presented to `accept` as its edges in driving order from
/// stop 0.
#[must_use]
pub fn cheapest_tour_where<F>(matrix: &CostMatrix, accept: F) -> Option<f64>
where
    F: Fn(&[Edge]) -> bool,
{
    let mut best: Option<f64> = None;
    let mut rest: Vec<usize> = (1..matrix.size()).collect();
    permute(&mut rest, 0, &mut |order| {
        let edges = closed_edges(order);
        if !accept(&edges) {
            return;
        }
        if let Some(cost) = tour_cost(matrix, &edges)
            && best.is_none_or(|current| cost < current)
        {
            best = Some(cost);
        }
    });
    best
}

/// Sum of matrix costs along `edges`, or `None` if any edge is unreachable.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "tour costs are sums of floating-point edge costs"
)]
pub fn tour_cost(matrix: &CostMatrix, edges: &[Edge]) -> Option<f64> {
    let mut total = 0.0;
    for edge in edges {
        let cost = matrix.cost(edge.from, edge.to)?;
        if cost.is_infinite() {
            return None;
        }
        total += cost;
    }
    Some(total)
}

fn closed_edges(rest: &[usize]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(rest.len() + 1);
    let mut previous = 0;
    for &stop in rest {
        edges.push(Edge::new(previous, stop));
        previous = stop;
    }
    edges.push(Edge::new(previous, 0));
    edges
}

fn permute<F>(items: &mut [usize], fixed: usize, visit: &mut F)
where
    F: FnMut(&[usize]),
{
    if fixed >= items.len() {
        visit(items);
        return;
    }
    for i in fixed..items.len() {
        items.swap(fixed, i);
        permute(items, fixed + 1, visit);
        items.swap(fixed, i);
    }
}
