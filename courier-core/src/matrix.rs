//! Pairwise travel costs between a courier's stops.
//!
//! [`CostMatrix`] is the only input the tour solvers consume. It is square,
//! holds at least two stops, and every off-diagonal entry is either a
//! non-negative cost or [`UNREACHABLE`]. The diagonal is always
//! [`UNREACHABLE`]: a courier never travels from a stop to itself.

use std::time::Duration;

use thiserror::Error;

/// Sentinel cost for an edge that cannot be travelled.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Errors returned when constructing a [`CostMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostMatrixError {
    /// Fewer than two stops were supplied, so no closed tour exists.
    #[error("a tour needs at least two stops, found {size}")]
    TooFewStops {
        /// Number of rows supplied.
        size: usize,
    },
    /// A row length differs from the number of rows.
    #[error("row {row} has {len} columns but {expected} expected (matrix must be square)")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Number of rows, which every row length must match.
        expected: usize,
    },
    /// An off-diagonal cost was negative.
    #[error("cost from stop {from} to stop {to} is negative")]
    NegativeCost {
        /// Origin stop index.
        from: usize,
        /// Destination stop index.
        to: usize,
    },
    /// An off-diagonal cost was NaN.
    #[error("cost from stop {from} to stop {to} is not a number")]
    UndefinedCost {
        /// Origin stop index.
        from: usize,
        /// Destination stop index.
        to: usize,
    },
}

/// Immutable, validated `n x n` matrix of travel costs.
///
/// `cost(i, j)` is the cost of travelling from stop `i` to stop `j`. The
/// matrix need not be symmetric.
///
/// # Examples
/// ```
/// use courier_core::{CostMatrix, UNREACHABLE};
///
/// # fn main() -> Result<(), courier_core::CostMatrixError> {
/// let matrix = CostMatrix::new(vec![
///     vec![UNREACHABLE, 4.0],
///     vec![6.0, UNREACHABLE],
/// ])?;
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.cost(1, 0), Some(6.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    size: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    /// Validate rows of costs and build a matrix.
    ///
    /// Diagonal entries are ignored and replaced by [`UNREACHABLE`], so
    /// callers may pass zeros there. Off-diagonal [`UNREACHABLE`] entries are
    /// accepted and mark missing connections.
    ///
    /// # Errors
    ///
    /// Returns [`CostMatrixError`] when the matrix has fewer than two rows, is
    /// not square, or contains a negative or NaN off-diagonal cost.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, CostMatrixError> {
        let size = rows.len();
        if size < 2 {
            return Err(CostMatrixError::TooFewStops { size });
        }

        let mut costs = Vec::with_capacity(size * size);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(CostMatrixError::NotSquare {
                    row: from,
                    len: row.len(),
                    expected: size,
                });
            }
            for (to, cost) in row.into_iter().enumerate() {
                costs.push(validated_cost(from, to, cost)?);
            }
        }
        Ok(Self { size, costs })
    }

    /// Build a matrix where `None` marks an unreachable edge.
    ///
    /// This is the shape JSON payloads take, since JSON has no infinity.
    ///
    /// # Errors
    ///
    /// See [`CostMatrix::new`].
    pub fn from_optional(rows: Vec<Vec<Option<f64>>>) -> Result<Self, CostMatrixError> {
        Self::new(
            rows.into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cost| cost.unwrap_or(UNREACHABLE))
                        .collect()
                })
                .collect(),
        )
    }

    /// Build a matrix of travel times, measured in seconds.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use courier_core::CostMatrix;
    ///
    /// let matrix = CostMatrix::from_durations(&[
    ///     vec![Duration::ZERO, Duration::from_secs(90)],
    ///     vec![Duration::from_secs(30), Duration::ZERO],
    /// ])
    /// .expect("valid matrix");
    /// assert_eq!(matrix.cost(0, 1), Some(90.0));
    /// ```
    ///
    /// # Errors
    ///
    /// See [`CostMatrix::new`].
    pub fn from_durations(rows: &[Vec<Duration>]) -> Result<Self, CostMatrixError> {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(Duration::as_secs_f64).collect())
                .collect(),
        )
    }

    /// Number of stops, including the depot.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cost of travelling from `from` to `to`, or `None` when out of range.
    #[must_use]
    pub fn cost(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.costs.get(from * self.size + to).copied()
    }

    /// Row-major view of every cost.
    #[must_use]
    pub const fn as_slice(&self) -> &[f64] {
        self.costs.as_slice()
    }

    /// Iterate over the matrix rows in stop order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.costs.chunks(self.size)
    }
}

fn validated_cost(from: usize, to: usize, cost: f64) -> Result<f64, CostMatrixError> {
    if from == to {
        return Ok(UNREACHABLE);
    }
    if cost.is_nan() {
        return Err(CostMatrixError::UndefinedCost { from, to });
    }
    if cost < 0.0 {
        return Err(CostMatrixError::NegativeCost { from, to });
    }
    Ok(cost)
}
