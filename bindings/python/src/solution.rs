//! Python wrapper for solve results.

use pyo3::prelude::*;
use pyo3::types::PyDict;
use rscip_scip::Solution;

use crate::PyObject;

/// Result of `rscip.solve`.
///
/// `objval`, `x` and `status` carry the solver's answer; `status` is the raw
/// SCIP status code and `status_name` its decoded name.
#[pyclass(name = "SolveResult", frozen)]
pub struct PySolveResult {
    inner: Solution,
}

impl PySolveResult {
    pub fn new(inner: Solution) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PySolveResult {
    /// Objective value recomputed from `x`.
    #[getter]
    fn objval(&self) -> f64 {
        self.inner.objective_value()
    }

    /// Variable values in input order.
    #[getter]
    fn x(&self) -> Vec<f64> {
        self.inner.values().to_vec()
    }

    /// Raw SCIP status code.
    #[getter]
    fn status(&self) -> i32 {
        self.inner.raw_status()
    }

    #[getter]
    fn status_name(&self) -> &'static str {
        self.inner.status_string()
    }

    /// False when SCIP found no solution; `x` is then all zeros.
    #[getter]
    fn has_solution(&self) -> bool {
        self.inner.has_solution()
    }

    #[getter]
    fn solve_time_seconds(&self) -> f64 {
        self.inner.solve_time_seconds()
    }

    #[getter]
    fn n_solutions(&self) -> usize {
        self.inner.n_solutions()
    }

    #[getter]
    fn gap(&self) -> f64 {
        self.inner.gap()
    }

    #[getter]
    fn primal_bound(&self) -> f64 {
        self.inner.primal_bound()
    }

    fn is_optimal(&self) -> bool {
        self.inner.is_optimal()
    }

    /// Plain dict with `objval`, `x` and `status`.
    fn to_dict(&self, py: Python<'_>) -> PyResult<PyObject> {
        let dict = PyDict::new(py);
        dict.set_item("objval", self.inner.objective_value())?;
        dict.set_item("x", self.inner.values())?;
        dict.set_item("status", self.inner.raw_status())?;
        Ok(dict.unbind().into())
    }

    fn __repr__(&self) -> String {
        format!(
            "SolveResult(status={} ({}), objval={}, n_vars={})",
            self.inner.status_string(),
            self.inner.raw_status(),
            self.inner.objective_value(),
            self.inner.values().len()
        )
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySolveResult>()?;
    Ok(())
}
