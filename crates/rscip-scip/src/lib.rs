//! SCIP backend for rscip.
//!
//! Turns a flat [`rscip_core::Problem`] into a SCIP model, solves it and
//! hands back the best solution. Each call owns a fresh SCIP environment
//! that is freed before the call returns.

pub mod ffi;
pub mod memory;
pub mod presolve;
pub mod solution;
pub mod solver;
mod status;

pub use ffi::{ObjectiveSense, ScipError, ScipModel, scip_version};
pub use presolve::PRESOLVE_DISABLE_PARAMS;
pub use solution::Solution;
pub use solver::{PROBLEM_NAME, ScipSolver, solve};
pub use status::ScipStatus;
