//! Exact branch-and-bound tour solver for courier routes.
//!
//! [`BranchAndBoundSolver`] implements [`TourSolver`](courier_core::TourSolver)
//! with Little's algorithm for the asymmetric travelling salesman problem.
//! Each search node reduces its copy of the cost matrix to obtain a lower
//! bound, then branches on the zero-cost edge whose exclusion would cost the
//! most: one child commits the edge, the other forbids it. The search always
//! resumes from the lowest-bound unexpanded node, so the first complete tour
//! reached is optimal.
//!
//! The search is exponential in the worst case and intended for the handful
//! of stops a single courier visits.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod constraint;
mod node;
mod search;
mod solver;

pub use constraint::{Axis, ConstraintMatrix, EdgeState, build_constraints};
pub use solver::{BranchAndBoundConfig, BranchAndBoundSolver};
