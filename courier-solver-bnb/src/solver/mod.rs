//! `BranchAndBoundSolver` implementation of Little's algorithm.
//!
//! The search always resumes from the unexpanded node with the smallest lower
//! bound, so the first complete tour it pops is optimal.

use std::time::Instant;

use courier_core::{CostMatrix, Diagnostics, Edge, SolveError, SolveResponse, Tour, TourSolver};

use crate::node::{Node, NodeId};
use crate::search::SearchTree;

/// Configuration for [`BranchAndBoundSolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct BranchAndBoundConfig {
    /// Stop with [`SolveError::ExpansionLimitReached`] after this many node
    /// expansions. `None` searches until a tour is found.
    pub expansion_limit: Option<usize>,
    /// Largest accepted difference between the tour's cost and the bound of
    /// the node that completed it.
    pub cost_tolerance: f64,
}

impl Default for BranchAndBoundConfig {
    fn default() -> Self {
        Self {
            expansion_limit: None,
            cost_tolerance: 1e-6,
        }
    }
}

/// Exact solver for the asymmetric travelling salesman problem.
///
/// # Examples
/// ```
/// use courier_core::{CostMatrix, TourSolver, UNREACHABLE};
/// use courier_solver_bnb::BranchAndBoundSolver;
///
/// let matrix = CostMatrix::new(vec![
///     vec![UNREACHABLE, 1.0, 5.0],
///     vec![5.0, UNREACHABLE, 1.0],
///     vec![1.0, 5.0, UNREACHABLE],
/// ])?;
/// let response = BranchAndBoundSolver::new().solve(&matrix)?;
/// assert_eq!(response.tour.cost(), 3.0);
/// assert_eq!(response.tour.visit_order(0), Some(vec![0, 1, 2]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundSolver {
    config: BranchAndBoundConfig,
}

impl BranchAndBoundSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: BranchAndBoundConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &BranchAndBoundConfig {
        &self.config
    }

    /// Run the search to completion and return the tree with the id of the
    /// node holding the optimal tour.
    pub(crate) fn search(&self, matrix: &CostMatrix) -> Result<(SearchTree, NodeId), SolveError> {
        let root = Node::root(matrix);
        log::debug!(
            "branch-and-bound solve of {} stops, root bound {}",
            matrix.size(),
            root.lower_bound()
        );
        let mut tree = SearchTree::new(root);

        loop {
            let id = tree.pop_best().ok_or(SolveError::Infeasible)?;
            let node = tree.node(id).ok_or_else(|| invariant("frontier refers to a missing node"))?;
            if node.lower_bound().is_infinite() {
                return Err(SolveError::Infeasible);
            }
            if node.is_complete_tour() {
                return Ok((tree, id));
            }
            if let Some(limit) = self.config.expansion_limit
                && tree.expanded() >= limit
            {
                log::warn!("expansion limit of {limit} reached before a tour was found");
                return Err(SolveError::ExpansionLimitReached { limit });
            }

            let (include, exclude) = tree.expand(id)?;
            if log::log_enabled!(log::Level::Trace) {
                trace_expansion(&tree, id, include, exclude);
            }
        }
    }
}

fn trace_expansion(tree: &SearchTree, parent: NodeId, include: NodeId, exclude: NodeId) {
    let bound = |id| tree.node(id).map(Node::lower_bound);
    let split = tree.node(parent).and_then(Node::next_split);
    log::trace!(
        "expanded node {} at depth {} on {:?}: include bound {:?}, exclude bound {:?}",
        parent.index(),
        tree.ancestors(parent).count(),
        split,
        bound(include),
        bound(exclude),
    );
}

fn invariant(reason: &str) -> SolveError {
    SolveError::InternalInvariantViolation {
        reason: reason.to_owned(),
    }
}

/// Sum of the original costs along `edges`.
#[expect(
    clippy::float_arithmetic,
    reason = "tour costs are sums of floating-point edge costs"
)]
fn original_cost(matrix: &CostMatrix, edges: &[Edge]) -> Result<f64, SolveError> {
    edges.iter().try_fold(0.0, |total, edge| {
        matrix
            .cost(edge.from, edge.to)
            .map(|cost| total + cost)
            .ok_or_else(|| invariant("tour edge lies outside the cost matrix"))
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "compares the tour cost with the bound under a tolerance"
)]
fn check_cost(cost: f64, bound: f64, tolerance: f64) -> Result<(), SolveError> {
    if cost.is_finite() && (cost - bound).abs() <= tolerance {
        return Ok(());
    }
    log::warn!("tour cost {cost} disagrees with its lower bound {bound}");
    Err(SolveError::InternalInvariantViolation {
        reason: format!("tour cost {cost} disagrees with its lower bound {bound}"),
    })
}

fn count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

impl TourSolver for BranchAndBoundSolver {
    fn solve(&self, matrix: &CostMatrix) -> Result<SolveResponse, SolveError> {
        let started_at = Instant::now();
        let (tree, id) = self.search(matrix)?;
        let node = tree
            .node(id)
            .ok_or_else(|| invariant("solution node is missing from the search tree"))?;

        let edges = node.tour().to_vec();
        let cost = original_cost(matrix, &edges)?;
        check_cost(cost, node.lower_bound(), self.config.cost_tolerance)?;
        let tour = Tour::new(edges, cost);
        if !tour.is_hamiltonian_cycle(matrix.size()) {
            return Err(invariant("committed edges do not form a single cycle"));
        }

        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            nodes_created: count(tree.len()),
            nodes_expanded: count(tree.expanded()),
        };
        log::debug!(
            "branch-and-bound solve finished: cost {cost}, {} nodes created, {} expanded in {:?}",
            diagnostics.nodes_created,
            diagnostics.nodes_expanded,
            diagnostics.solve_time
        );
        Ok(SolveResponse { tour, diagnostics })
    }
}
