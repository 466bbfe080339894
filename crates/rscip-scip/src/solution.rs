//! What a SCIP solve hands back.

use crate::status::ScipStatus;
use rscip_solver::{SolutionView, SolverStatus};

/// Result of one SCIP solve.
///
/// `values` holds one entry per variable in input order. When SCIP found no
/// solution at all, every value is `0.0` and so is the objective.
#[derive(Debug, Clone)]
pub struct Solution {
    pub(crate) values: Vec<f64>,
    pub(crate) objective_value: f64,
    pub(crate) status: ScipStatus,
    pub(crate) has_solution: bool,
    pub(crate) n_solutions: usize,
    pub(crate) primal_bound: f64,
    pub(crate) gap: f64,
    pub(crate) solve_time_seconds: f64,
}

impl Solution {
    /// Get the value of the variable at the given index
    pub fn get_value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get all variable values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the solution, keeping only the values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Objective recomputed from the returned values and the input
    /// coefficients.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Raw SCIP status code, as `SCIPgetStatus` reported it.
    pub fn raw_status(&self) -> i32 {
        self.status.code()
    }

    /// Decoded SCIP status.
    pub fn scip_status(&self) -> ScipStatus {
        self.status
    }

    /// Decoded status name, e.g. `"optimal"` or `"time_limit"`.
    pub fn status_string(&self) -> &'static str {
        self.status.as_str()
    }

    /// Number of feasible solutions SCIP found
    pub fn n_solutions(&self) -> usize {
        self.n_solutions
    }

    /// SCIP's primal bound (objective of the incumbent, in SCIP's terms)
    pub fn primal_bound(&self) -> f64 {
        self.primal_bound
    }

    /// Relative gap between primal and dual bound at termination
    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }

    /// Whether SCIP returned a best solution
    pub fn has_solution(&self) -> bool {
        self.has_solution
    }

    /// True only for a proven optimum.
    pub fn is_optimal(&self) -> bool {
        matches!(self.status, ScipStatus::Optimal)
    }
}

impl SolutionView for Solution {
    fn objective_value(&self) -> f64 {
        self.objective_value
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn raw_status(&self) -> i32 {
        self.status.code()
    }

    fn status(&self) -> SolverStatus {
        self.status.to_solver_status()
    }

    fn has_solution(&self) -> bool {
        self.has_solution
    }

    fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn solution(status: ScipStatus, values: Vec<f64>, has_solution: bool) -> Solution {
        Solution {
            objective_value: values.iter().sum(),
            values,
            status,
            has_solution,
            n_solutions: usize::from(has_solution),
            primal_bound: 0.0,
            gap: 0.0,
            solve_time_seconds: 0.25,
        }
    }

    #[test]
    fn test_accessors() {
        let sol = solution(ScipStatus::Optimal, vec![1.0, 2.0], true);
        assert_eq!(sol.get_value(0), Some(1.0));
        assert_eq!(sol.get_value(2), None);
        assert_eq!(sol.objective_value(), 3.0);
        assert!(sol.is_optimal());
        assert_eq!(sol.status_string(), "optimal");
        assert_eq!(sol.raw_status(), ScipStatus::Optimal.code());
        assert_eq!(sol.into_values(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_solution_view_uses_generic_status() {
        let sol = solution(ScipStatus::SolLimit, vec![0.0], true);
        assert_eq!(SolutionView::status(&sol), SolverStatus::SolutionLimit);
        assert!(!SolutionView::is_optimal(&sol));
        assert_eq!(SolutionView::solve_time_seconds(&sol), 0.25);
    }

    #[test]
    fn test_no_solution_keeps_zero_values() {
        let sol = solution(ScipStatus::Infeasible, vec![0.0, 0.0], false);
        assert!(!sol.has_solution());
        assert_eq!(sol.values(), &[0.0, 0.0]);
        assert!(SolutionView::is_infeasible(&sol));
    }
}
