//! SCIP solver implementation.

use crate::ffi::{ObjectiveSense, ScipError, ScipModel, clamp_bound, scip_version};
use crate::memory::RssWindow;
use crate::presolve::disable_presolve;
use crate::solution::Solution;
use crate::status::ScipStatus;
use rscip_core::{ModelSense, Problem, Row};
use rscip_solver::{Solve, SolveOptions, SolverError};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Name SCIP is given for every problem it builds.
pub const PROBLEM_NAME: &str = "PROBLEM";

/// Convert a ScipError into a SolverError.
fn scip_error_to_solver_error(err: ScipError) -> SolverError {
    SolverError::InternalError(err.to_string())
}

/// Stateless SCIP backend; every call builds and frees its own environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScipSolver;

impl ScipSolver {
    pub fn new() -> Self {
        ScipSolver
    }
}

impl Solve for ScipSolver {
    type Solution = Solution;

    fn solve(
        &self,
        problem: &Problem<'_>,
        options: &SolveOptions,
    ) -> Result<Self::Solution, SolverError> {
        solve(problem, options)
    }
}

/// Build `problem` in a fresh SCIP environment, solve it and return the
/// best solution found.
///
/// Every input check runs before SCIP is touched. The environment is freed
/// on every path out of this function.
///
/// # Errors
///
/// Returns [`SolverError::InvalidProblem`] or [`SolverError::InvalidSetting`]
/// for malformed input, and [`SolverError::InternalError`] when a SCIP call
/// fails. Infeasible, unbounded and limit statuses are returned as `Ok`.
pub fn solve(problem: &Problem<'_>, options: &SolveOptions) -> Result<Solution, SolverError> {
    options.validate()?;
    let rows = problem.rows()?;

    let solver_version = scip_version();
    let rss = RssWindow::open();
    let solve_started = Instant::now();

    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "scip",
        solver_version = %solver_version,
        num_vars = problem.num_variables(),
        num_constraints = problem.num_constraints(),
        nnz = problem.matrix.nnz(),
        rss_bytes = ?rss.start_bytes(),
        "Starting solve process"
    );

    let mut model = ScipModel::new(PROBLEM_NAME).map_err(scip_error_to_solver_error)?;
    build_model(&mut model, problem, &rows).map_err(scip_error_to_solver_error)?;
    apply_solve_options(&mut model, options).map_err(scip_error_to_solver_error)?;

    model
        .solve(options.is_parallel())
        .map_err(scip_error_to_solver_error)?;

    let status = ScipStatus::from_raw(model.status());
    let best = model.best_solution_values();
    let has_solution = best.is_some();
    let values = best.unwrap_or_else(|| vec![0.0; problem.num_variables()]);
    let objective_value = if has_solution {
        problem.objective_value(&values)
    } else {
        0.0
    };
    let n_solutions = model.n_solutions();
    let primal_bound = model.primal_bound();
    let gap = model.gap();
    drop(model);

    let solve_time_seconds = solve_started.elapsed().as_secs_f64();
    let (rss_bytes, rss_delta) = rss.close();

    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "scip",
        solver_version = %solver_version,
        solver_status = status.as_str(),
        status_code = status.code(),
        objective_value,
        n_solutions,
        optimality_gap = gap,
        duration_ms = solve_time_seconds * 1000.0,
        rss_bytes = ?rss_bytes,
        rss_delta_bytes = ?rss_delta,
        "SCIP solve completed"
    );

    if !has_solution {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = "scip",
            solver_status = status.as_str(),
            "SCIP returned no solution; values are zero"
        );
    } else if status != ScipStatus::Optimal {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = "scip",
            solver_status = status.as_str(),
            objective_value,
            optimality_gap = gap,
            "Solver stopped before proving optimality; returning best solution found"
        );
    }

    Ok(Solution {
        values,
        objective_value,
        status,
        has_solution,
        n_solutions,
        primal_bound,
        gap,
        solve_time_seconds,
    })
}

fn build_model(
    model: &mut ScipModel,
    problem: &Problem<'_>,
    rows: &[Row<'_>],
) -> Result<(), ScipError> {
    let sense = match problem.sense {
        ModelSense::Minimize => ObjectiveSense::Minimize,
        ModelSense::Maximize => ObjectiveSense::Maximize,
    };
    model.set_objective_sense(sense)?;

    for index in 0..problem.num_variables() {
        model.add_variable(
            problem.lower[index],
            problem.upper[index],
            problem.objective[index],
            problem.var_types[index],
        )?;
    }
    debug!(
        component = "solver",
        operation = "add_variables",
        status = "success",
        sense = problem.sense.as_str(),
        num_vars = problem.num_variables(),
        "Added all variables to SCIP"
    );

    let infinity = model.infinity();
    for row in rows {
        let relation = problem.relations[row.index];
        let rhs = clamp_bound(problem.rhs[row.index], infinity);
        let (lhs, rhs) = relation.row_bounds(rhs, infinity);
        trace!(
            component = "solver",
            operation = "translate_row",
            status = "success",
            row = row.index,
            relation = relation.as_str(),
            lhs,
            rhs,
            "Translated row bounds"
        );
        model.add_linear_constraint(&row.index.to_string(), row.cols, row.values, lhs, rhs)?;
    }
    debug!(
        component = "solver",
        operation = "add_constraints",
        status = "success",
        num_constraints = rows.len(),
        nnz = problem.matrix.nnz(),
        "Added all constraints to SCIP"
    );
    Ok(())
}

fn apply_solve_options(model: &mut ScipModel, options: &SolveOptions) -> Result<(), ScipError> {
    model.set_real_param("limits/gap", options.gap)?;
    model.set_real_param("limits/time", options.time_limit)?;
    if options.first_feasible {
        model.set_int_param("limits/solutions", 1)?;
    }
    if !options.verbose {
        model.set_int_param("display/verblevel", 0)?;
    }
    if options.is_parallel() {
        model.set_int_param("parallel/maxnthreads", c_int_setting(options.threads))?;
    }
    if !options.presolve {
        disable_presolve(model)?;
    }
    model.set_int_param("display/width", c_int_setting(options.display_width))?;

    debug!(
        component = "solver",
        operation = "apply_options",
        status = "success",
        gap = options.gap,
        time_limit = options.time_limit,
        first_feasible = options.first_feasible,
        presolve = options.presolve,
        threads = options.threads,
        verbose = options.verbose,
        "Applied solve options"
    );
    Ok(())
}

/// `SolveOptions::validate` has already bounded these to `i32`.
fn c_int_setting(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use rscip_core::{ProblemData, Relation, VarType};

    fn one_variable(sense: ModelSense) -> ProblemData {
        ProblemData {
            sense,
            objective: vec![1.0],
            lower: vec![0.0],
            upper: vec![5.0],
            var_types: vec![VarType::Continuous],
            rhs: vec![],
            relations: vec![],
            rows: vec![],
            cols: vec![],
            values: vec![],
        }
    }

    #[test]
    fn test_invalid_options_fail_before_scip() {
        let data = one_variable(ModelSense::Minimize);
        let problem = data.as_problem().unwrap();
        let err = solve(&problem, &SolveOptions::new().with_threads(0)).unwrap_err();
        assert_eq!(err.code(), "SOLVER_INVALID_SETTING");
    }

    #[test]
    fn test_invalid_triplets_fail_before_scip() {
        let mut data = one_variable(ModelSense::Minimize);
        data.rhs = vec![1.0];
        data.relations = vec![Relation::GreaterEqual];
        data.rows = vec![0];
        data.cols = vec![4];
        data.values = vec![1.0];
        let problem = data.as_problem().unwrap();
        let err = solve(&problem, &SolveOptions::new()).unwrap_err();
        assert_eq!(err.code(), "PROBLEM_TRIPLET_COLUMN_RANGE");
    }

    #[test]
    fn test_scip_error_becomes_internal_error() {
        let err = scip_error_to_solver_error(ScipError::InvalidName {
            name: "x".to_string(),
        });
        assert_eq!(err.code(), "SOLVER_INTERNAL");
        assert!(err.to_string().contains("SCIP_INVALID_NAME"));
    }

    #[test]
    fn test_c_int_setting() {
        assert_eq!(c_int_setting(143), 143);
        assert_eq!(c_int_setting(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_solver_trait_matches_free_function() {
        let data = one_variable(ModelSense::Maximize);
        let problem = data.as_problem().unwrap();
        let options = SolveOptions::new().with_verbose(false);
        let solution = ScipSolver::new().solve(&problem, &options).unwrap();
        assert!((solution.objective_value() - 5.0).abs() < 1e-6);
    }
}
