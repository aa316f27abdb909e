//! The solver boundary.
//!
//! [`TourSolver`] turns a [`CostMatrix`] into a [`SolveResponse`]. Failures are
//! reported as [`SolveError`] and are never retried here; retrying a flaky
//! cost supplier is the caller's concern.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CostMatrix, CostMatrixError, Tour, TravelCostError, TravelCostProvider};

/// Search statistics reported alongside a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
    /// Search-tree nodes created, including the root.
    pub nodes_created: u64,
    /// Search-tree nodes expanded into children.
    pub nodes_expanded: u64,
}

/// Response from a successful solve.
///
/// Contains the optimal [`Tour`] and statistics about the search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResponse {
    /// The closed tour through every stop.
    pub tour: Tour,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`TourSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The cost matrix was rejected before the search started.
    #[error("invalid instance: {0}")]
    InvalidInstance(#[from] CostMatrixError),
    /// No closed tour visits every stop, e.g. a stop has no reachable
    /// successor.
    #[error("no closed tour visits every stop")]
    Infeasible,
    /// The search ended in a state that a feasible instance never reaches.
    #[error("solver invariant violated: {reason}")]
    InternalInvariantViolation {
        /// Description of the violated invariant.
        reason: String,
    },
    /// The configured cap on node expansions was hit before a tour was found.
    #[error("search stopped after {limit} node expansions")]
    ExpansionLimitReached {
        /// The configured limit.
        limit: usize,
    },
    /// The travel cost provider failed.
    #[error(transparent)]
    TravelCost(#[from] TravelCostError),
}

/// Compute an optimal closed tour over a cost matrix.
///
/// Implementations reject invalid input with an error rather than panicking
/// and must be `Send + Sync` so callers can move a solve onto a worker thread.
pub trait TourSolver: Send + Sync {
    /// Solve the instance described by `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] when the instance is infeasible or the search
    /// cannot complete.
    fn solve(&self, matrix: &CostMatrix) -> Result<SolveResponse, SolveError>;
}

/// Fetch costs for `stops` from `provider` and solve them with `solver`.
///
/// # Errors
///
/// Returns [`SolveError::TravelCost`] when the provider fails or returns a
/// matrix of the wrong size, and any error from the solver otherwise.
pub fn solve_stops<S, P, T>(
    solver: &T,
    provider: &P,
    stops: &[S],
) -> Result<SolveResponse, SolveError>
where
    P: TravelCostProvider<S> + ?Sized,
    T: TourSolver + ?Sized,
{
    let matrix = provider.cost_matrix(stops)?;
    if matrix.size() != stops.len() {
        return Err(TravelCostError::DimensionMismatch {
            expected: stops.len(),
            actual: matrix.size(),
        }
        .into());
    }
    solver.solve(&matrix)
}
