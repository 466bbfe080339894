//! Shared solver abstractions for rscip.
//!
//! # Overview
//!
//! - [`SolveOptions`]: configuration of one solve call
//! - [`SolverStatus`]: solver-agnostic terminal status
//! - [`SolverError`]: error type for solver operations
//! - [`Solve`]: trait for solver backends
//! - [`SolutionView`]: trait for reading solution data

mod config;
mod error;
mod status;
mod traits;

pub use config::{
    DEFAULT_DISPLAY_WIDTH, DEFAULT_GAP, DEFAULT_THREADS, DEFAULT_TIME_LIMIT, SolveOptions,
};
pub use error::SolverError;
pub use status::SolverStatus;
pub use traits::{SolutionView, Solve};
