//! Python bindings for rscip using PyO3
//!
//! Exposes a single flat `solve` call over SCIP, plus version and logging
//! helpers and the `RscipError` exception hierarchy.

mod errors;
mod logging;
mod solution;
mod solver;

use pyo3::prelude::*;

pub(crate) type PyObject = Py<PyAny>;

pub use solution::PySolveResult;

#[pymodule]
fn rscip(m: &Bound<'_, PyModule>) -> PyResult<()> {
    errors::register(m)?;
    solver::register(m)?;
    solution::register(m)?;
    logging::register(m)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
