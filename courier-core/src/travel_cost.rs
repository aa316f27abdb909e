//! Supply travel costs for a set of stops.
//!
//! The `TravelCostProvider` trait abstracts the retrieval of pairwise costs
//! between stops, e.g. from a mapping service. Solvers never call providers
//! themselves; [`crate::solve_stops`] wires a provider to a solver.

use thiserror::Error;

use crate::{CostMatrix, CostMatrixError};

/// Errors from [`TravelCostProvider::cost_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelCostError {
    /// No stops were provided.
    #[error("at least one stop is required")]
    EmptyInput,
    /// The provider produced a matrix for a different number of stops.
    #[error("cost matrix covers {actual} stops but {expected} were requested")]
    DimensionMismatch {
        /// Number of stops requested.
        expected: usize,
        /// Number of stops in the produced matrix.
        actual: usize,
    },
    /// The provider produced costs that do not form a valid matrix.
    #[error("provider returned an invalid cost matrix: {0}")]
    InvalidMatrix(#[from] CostMatrixError),
    /// The upstream service reported an error.
    #[error("travel cost service error {code}: {message}")]
    ServiceError {
        /// Service-specific error code.
        code: String,
        /// Human-readable description.
        message: String,
    },
}

/// Fetch pairwise travel costs for a set of stops.
///
/// Implementers return a square matrix whose size equals `stops.len()`;
/// `cost(i, j)` is the cost from `stops[i]` to `stops[j]`.
///
/// # Examples
///
/// ```
/// use courier_core::{CostMatrix, TravelCostError, TravelCostProvider};
///
/// struct UnitCosts;
///
/// impl TravelCostProvider<&str> for UnitCosts {
///     fn cost_matrix(&self, stops: &[&str]) -> Result<CostMatrix, TravelCostError> {
///         if stops.is_empty() {
///             return Err(TravelCostError::EmptyInput);
///         }
///         let n = stops.len();
///         Ok(CostMatrix::new(vec![vec![1.0; n]; n])?)
///     }
/// }
///
/// let matrix = UnitCosts.cost_matrix(&["depot", "Baker St"])?;
/// assert_eq!(matrix.size(), 2);
/// # Ok::<(), TravelCostError>(())
/// ```
pub trait TravelCostProvider<S> {
    /// Return the cost matrix for `stops`.
    ///
    /// # Errors
    ///
    /// Returns [`TravelCostError`] when the costs cannot be produced.
    fn cost_matrix(&self, stops: &[S]) -> Result<CostMatrix, TravelCostError>;
}
