//! The `solve` and `version` entry points.

use crate::errors::{problem_error_to_py, solver_error_to_py};
use crate::solution::PySolveResult;
use pyo3::prelude::*;
use rscip_core::{ModelSense, Problem, TripletMatrix, parse_relations, parse_var_types};
use rscip_scip::scip_version;
use rscip_solver::{
    DEFAULT_DISPLAY_WIDTH, DEFAULT_GAP, DEFAULT_THREADS, DEFAULT_TIME_LIMIT, SolveOptions,
};
use tracing::debug;

/// Solve a mixed-integer linear program with SCIP.
///
/// Variables are described by the parallel lists `obj`, `lb`, `ub` and
/// `vtype` (`"C"`, `"B"` or `"I"`); constraints by `rhs` and `sense`
/// (`">="`, `"<="` or `"="`). The constraint matrix is given as triplets
/// `(a_i, a_j, a_x)`, sorted by row index `a_i`.
#[pyfunction]
#[pyo3(signature = (
    modelsense, obj, lb, ub, vtype, rhs, sense, a_i, a_j, a_x,
    gap=DEFAULT_GAP, time_limit=DEFAULT_TIME_LIMIT, first_feasible=false, presolve=true,
    threads=DEFAULT_THREADS, verbose=true, display_width=DEFAULT_DISPLAY_WIDTH
))]
#[allow(clippy::too_many_arguments)]
pub fn solve(
    modelsense: &str,
    obj: Vec<f64>,
    lb: Vec<f64>,
    ub: Vec<f64>,
    vtype: Vec<String>,
    rhs: Vec<f64>,
    sense: Vec<String>,
    a_i: Vec<usize>,
    a_j: Vec<usize>,
    a_x: Vec<f64>,
    gap: f64,
    time_limit: f64,
    first_feasible: bool,
    presolve: bool,
    threads: u32,
    verbose: bool,
    display_width: u32,
) -> PyResult<PySolveResult> {
    let model_sense: ModelSense = modelsense.parse().map_err(problem_error_to_py)?;
    let var_types = parse_var_types(&vtype).map_err(problem_error_to_py)?;
    let relations = parse_relations(&sense).map_err(problem_error_to_py)?;
    let matrix = TripletMatrix::new(&a_i, &a_j, &a_x).map_err(problem_error_to_py)?;

    let problem = Problem {
        sense: model_sense,
        objective: &obj,
        lower: &lb,
        upper: &ub,
        var_types: &var_types,
        rhs: &rhs,
        relations: &relations,
        matrix,
    };
    let options = SolveOptions::new()
        .with_gap(gap)
        .with_time_limit(time_limit)
        .with_first_feasible(first_feasible)
        .with_presolve(presolve)
        .with_threads(threads)
        .with_verbose(verbose)
        .with_display_width(display_width);

    debug!(
        component = "bindings",
        operation = "solve",
        status = "success",
        num_vars = problem.num_variables(),
        num_constraints = problem.num_constraints(),
        nnz = problem.matrix.nnz(),
        "Received problem from Python"
    );

    let solution = rscip_scip::solve(&problem, &options).map_err(solver_error_to_py)?;
    Ok(PySolveResult::new(solution))
}

/// Version of the linked SCIP library as `"major.minor.tech"`.
#[pyfunction]
pub fn version() -> String {
    scip_version()
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(pyo3::wrap_pyfunction!(solve, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(version, m)?)?;
    Ok(())
}
