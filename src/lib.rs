//! Facade crate for courier stop ordering.
//!
//! This crate re-exports the core domain types and exposes the
//! branch-and-bound solver behind a feature flag.

#![forbid(unsafe_code)]

pub use courier_core::{
    CostMatrix, CostMatrixError, Diagnostics, Edge, SolveError, SolveResponse, Tour, TourSolver,
    TravelCostError, TravelCostProvider, UNREACHABLE, solve_stops,
};

#[cfg(feature = "solver-bnb")]
pub use courier_solver_bnb::{BranchAndBoundConfig, BranchAndBoundSolver};
