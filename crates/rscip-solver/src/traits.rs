//! Seams between the problem model and a concrete solver backend.

use crate::{SolveOptions, SolverError, SolverStatus};
use rscip_core::Problem;

/// Read access to the result of a solve.
pub trait SolutionView {
    /// Objective value of the returned assignment.
    fn objective_value(&self) -> f64;

    /// One value per variable, in input order.
    fn values(&self) -> &[f64];

    /// Raw status code as reported by the solver library.
    fn raw_status(&self) -> i32;

    /// Solver-agnostic reading of the status.
    fn status(&self) -> SolverStatus;

    /// Whether the solver produced a primal solution.
    fn has_solution(&self) -> bool;

    /// Wall-clock duration of the solve in seconds.
    fn solve_time_seconds(&self) -> f64;

    /// Value of the variable at `index`.
    fn get_value(&self, index: usize) -> Option<f64> {
        self.values().get(index).copied()
    }

    fn is_optimal(&self) -> bool {
        self.status().is_optimal()
    }

    fn is_infeasible(&self) -> bool {
        self.status().is_infeasible()
    }

    fn is_unbounded(&self) -> bool {
        self.status().is_unbounded()
    }
}

/// A backend able to solve a [`Problem`].
///
/// Each call is self-contained: no solver state survives between calls.
pub trait Solve {
    type Solution: SolutionView;

    /// Build the problem in the backend, solve it and extract the result.
    ///
    /// # Errors
    ///
    /// Malformed problems or options, and failures inside the solver
    /// library, are errors. A solve that ends infeasible, unbounded or on
    /// a limit is not.
    fn solve(
        &self,
        problem: &Problem<'_>,
        options: &SolveOptions,
    ) -> Result<Self::Solution, SolverError>;
}
