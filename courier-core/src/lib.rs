//! Core domain types for courier route planning.
//!
//! A courier's stops are ordered by solving a closed asymmetric travelling
//! salesman tour over a pairwise [`CostMatrix`]. This crate holds the
//! validated matrix, the [`Tour`] a solver returns, the [`TourSolver`] trait
//! solvers implement and the [`TravelCostProvider`] boundary through which
//! callers supply costs. Constructors return `Result` so invalid instances are
//! rejected before any search starts.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod matrix;
pub mod solver;
pub mod tour;
pub mod travel_cost;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use matrix::{CostMatrix, CostMatrixError, UNREACHABLE};
pub use solver::{Diagnostics, SolveError, SolveResponse, TourSolver, solve_stops};
pub use tour::{Edge, Tour};
pub use travel_cost::{TravelCostError, TravelCostProvider};
