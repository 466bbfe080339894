//! Owned handle around a SCIP environment.
//!
//! Every raw `scip-sys` call in the crate lives here. [`ScipModel`] owns the
//! environment and the variable handles it creates and releases both on drop.
#![allow(unsafe_code)]

use rscip_core::VarType;
use scip_sys as ffi;
use std::ffi::{CString, c_int};
use std::fmt;
use std::ptr;
use tracing::{debug, trace, warn};

/// Direction SCIP optimizes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Errors returned by the SCIP handle layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScipError {
    /// A SCIP call returned something other than `SCIP_OKAY`.
    Call {
        function: &'static str,
        retcode: i32,
    },
    /// A name handed to SCIP contains an interior NUL byte.
    InvalidName { name: String },
    /// A constraint term refers to a variable that was never added.
    ColumnOutOfRange { column: usize, num_variables: usize },
    /// Constraint columns and coefficients differ in length.
    LengthMismatch { columns: usize, coefficients: usize },
}

impl ScipError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ScipError::Call { .. } => "SCIP_CALL_FAILED",
            ScipError::InvalidName { .. } => "SCIP_INVALID_NAME",
            ScipError::ColumnOutOfRange { .. } => "SCIP_COLUMN_OUT_OF_RANGE",
            ScipError::LengthMismatch { .. } => "SCIP_LENGTH_MISMATCH",
        }
    }

    /// The raw SCIP return code, when the error came from a SCIP call.
    pub fn retcode(&self) -> Option<i32> {
        match self {
            ScipError::Call { retcode, .. } => Some(*retcode),
            _ => None,
        }
    }
}

impl fmt::Display for ScipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScipError::Call { function, retcode } => write!(
                f,
                "[{}] {} returned {} ({})",
                self.code(),
                function,
                retcode_name(*retcode),
                retcode
            ),
            ScipError::InvalidName { name } => write!(
                f,
                "[{}] name {:?} contains a NUL byte",
                self.code(),
                name
            ),
            ScipError::ColumnOutOfRange {
                column,
                num_variables,
            } => write!(
                f,
                "[{}] column index {} out of bounds (num_variables = {})",
                self.code(),
                column,
                num_variables
            ),
            ScipError::LengthMismatch {
                columns,
                coefficients,
            } => write!(
                f,
                "[{}] columns length ({}) must match coefficients length ({})",
                self.code(),
                columns,
                coefficients
            ),
        }
    }
}

impl std::error::Error for ScipError {}

/// Symbolic name of a SCIP return code.
pub fn retcode_name(retcode: i32) -> &'static str {
    match retcode {
        ffi::SCIP_Retcode_SCIP_OKAY => "SCIP_OKAY",
        ffi::SCIP_Retcode_SCIP_ERROR => "SCIP_ERROR",
        ffi::SCIP_Retcode_SCIP_NOMEMORY => "SCIP_NOMEMORY",
        ffi::SCIP_Retcode_SCIP_READERROR => "SCIP_READERROR",
        ffi::SCIP_Retcode_SCIP_WRITEERROR => "SCIP_WRITEERROR",
        ffi::SCIP_Retcode_SCIP_NOFILE => "SCIP_NOFILE",
        ffi::SCIP_Retcode_SCIP_FILECREATEERROR => "SCIP_FILECREATEERROR",
        ffi::SCIP_Retcode_SCIP_LPERROR => "SCIP_LPERROR",
        ffi::SCIP_Retcode_SCIP_NOPROBLEM => "SCIP_NOPROBLEM",
        ffi::SCIP_Retcode_SCIP_INVALIDCALL => "SCIP_INVALIDCALL",
        ffi::SCIP_Retcode_SCIP_INVALIDDATA => "SCIP_INVALIDDATA",
        ffi::SCIP_Retcode_SCIP_INVALIDRESULT => "SCIP_INVALIDRESULT",
        ffi::SCIP_Retcode_SCIP_PLUGINNOTFOUND => "SCIP_PLUGINNOTFOUND",
        ffi::SCIP_Retcode_SCIP_PARAMETERUNKNOWN => "SCIP_PARAMETERUNKNOWN",
        ffi::SCIP_Retcode_SCIP_PARAMETERWRONGTYPE => "SCIP_PARAMETERWRONGTYPE",
        ffi::SCIP_Retcode_SCIP_PARAMETERWRONGVAL => "SCIP_PARAMETERWRONGVAL",
        ffi::SCIP_Retcode_SCIP_KEYALREADYEXISTING => "SCIP_KEYALREADYEXISTING",
        ffi::SCIP_Retcode_SCIP_MAXDEPTHLEVEL => "SCIP_MAXDEPTHLEVEL",
        ffi::SCIP_Retcode_SCIP_BRANCHERROR => "SCIP_BRANCHERROR",
        ffi::SCIP_Retcode_SCIP_NOTIMPLEMENTED => "SCIP_NOTIMPLEMENTED",
        _ => "SCIP_UNKNOWN_RETCODE",
    }
}

fn check(function: &'static str, retcode: ffi::SCIP_Retcode) -> Result<(), ScipError> {
    if retcode == ffi::SCIP_Retcode_SCIP_OKAY {
        return Ok(());
    }
    warn!(
        component = "solver",
        operation = "scip_call",
        status = "error",
        function,
        retcode,
        retcode_name = retcode_name(retcode),
        "SCIP call failed"
    );
    Err(ScipError::Call { function, retcode })
}

fn c_name(name: &str) -> Result<CString, ScipError> {
    CString::new(name).map_err(|_| ScipError::InvalidName {
        name: name.to_string(),
    })
}

/// Clamp a bound into SCIP's `[-infinity, infinity]` range.
pub fn clamp_bound(value: f64, infinity: f64) -> f64 {
    if value >= infinity {
        infinity
    } else if value <= -infinity {
        -infinity
    } else {
        value
    }
}

fn scip_var_type(var_type: VarType) -> ffi::SCIP_Vartype {
    match var_type {
        VarType::Continuous => ffi::SCIP_Vartype_SCIP_VARTYPE_CONTINUOUS,
        VarType::Binary => ffi::SCIP_Vartype_SCIP_VARTYPE_BINARY,
        VarType::Integer => ffi::SCIP_Vartype_SCIP_VARTYPE_INTEGER,
    }
}

/// Safe wrapper around one SCIP environment and its variable handles.
///
/// Dropping the model releases every variable handle and then frees the
/// environment, whatever state construction or solving stopped in.
pub struct ScipModel {
    raw: *mut ffi::SCIP,
    vars: Vec<*mut ffi::SCIP_VAR>,
    infinity: f64,
    row_vars: Vec<*mut ffi::SCIP_VAR>,
    row_values: Vec<f64>,
}

impl ScipModel {
    /// Create an environment with the default plugins and an empty problem.
    ///
    /// # Errors
    ///
    /// Returns an error if any of `SCIPcreate`, `SCIPincludeDefaultPlugins`
    /// or `SCIPcreateProbBasic` fails, or if `name` contains a NUL byte.
    pub fn new(name: &str) -> Result<Self, ScipError> {
        let name = c_name(name)?;
        let mut model = ScipModel {
            raw: ptr::null_mut(),
            vars: Vec::new(),
            infinity: f64::INFINITY,
            row_vars: Vec::new(),
            row_values: Vec::new(),
        };
        // Owned by `model` before the retcode is checked, so a partly
        // created environment is still freed.
        check("SCIPcreate", unsafe { ffi::SCIPcreate(&mut model.raw) })?;
        check("SCIPincludeDefaultPlugins", unsafe {
            ffi::SCIPincludeDefaultPlugins(model.raw)
        })?;
        check("SCIPcreateProbBasic", unsafe {
            ffi::SCIPcreateProbBasic(model.raw, name.as_ptr())
        })?;
        model.infinity = unsafe { ffi::SCIPinfinity(model.raw) };

        debug!(
            component = "solver",
            operation = "init_scip",
            status = "success",
            infinity = model.infinity,
            "Created SCIP environment"
        );
        Ok(model)
    }

    /// SCIP's value for infinity in this environment.
    pub fn infinity(&self) -> f64 {
        self.infinity
    }

    /// Number of variables added so far.
    pub fn num_variables(&self) -> usize {
        self.vars.len()
    }

    /// Set the objective sense.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCIPsetObjsense` fails.
    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) -> Result<(), ScipError> {
        let scip_sense = match sense {
            ObjectiveSense::Minimize => ffi::SCIP_Objsense_SCIP_OBJSENSE_MINIMIZE,
            ObjectiveSense::Maximize => ffi::SCIP_Objsense_SCIP_OBJSENSE_MAXIMIZE,
        };
        check("SCIPsetObjsense", unsafe {
            ffi::SCIPsetObjsense(self.raw, scip_sense)
        })?;
        debug!(
            component = "solver",
            operation = "set_objective_sense",
            status = "success",
            ?sense,
            "Set objective sense"
        );
        Ok(())
    }

    /// Create a variable, add it to the problem and keep its handle.
    ///
    /// Bounds beyond SCIP's infinity are clamped to it.
    ///
    /// # Returns
    ///
    /// The position of the new variable.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCIPcreateVarBasic` or `SCIPaddVar` fails.
    pub fn add_variable(
        &mut self,
        lower: f64,
        upper: f64,
        objective: f64,
        var_type: VarType,
    ) -> Result<usize, ScipError> {
        let lower = clamp_bound(lower, self.infinity);
        let upper = clamp_bound(upper, self.infinity);
        let mut var: *mut ffi::SCIP_VAR = ptr::null_mut();
        check("SCIPcreateVarBasic", unsafe {
            ffi::SCIPcreateVarBasic(
                self.raw,
                &mut var,
                ptr::null(),
                lower,
                upper,
                objective,
                scip_var_type(var_type),
            )
        })?;
        // Owned from here on, so drop releases it even if adding fails.
        self.vars.push(var);
        check("SCIPaddVar", unsafe { ffi::SCIPaddVar(self.raw, var) })?;

        let index = self.vars.len() - 1;
        trace!(
            component = "solver",
            operation = "add_variable",
            status = "success",
            index,
            lower,
            upper,
            objective,
            var_type = var_type.as_str(),
            "Added variable to SCIP"
        );
        Ok(index)
    }

    /// Add a linear constraint `lhs <= sum(coefficients[k] * x[columns[k]]) <= rhs`.
    ///
    /// The constraint handle is released right after it is added, and also
    /// when adding it fails.
    ///
    /// # Errors
    ///
    /// Returns an error if columns and coefficients have different lengths,
    /// if any column index is out of bounds, or if a SCIP call fails.
    pub fn add_linear_constraint(
        &mut self,
        name: &str,
        columns: &[usize],
        coefficients: &[f64],
        lhs: f64,
        rhs: f64,
    ) -> Result<(), ScipError> {
        if columns.len() != coefficients.len() {
            return Err(ScipError::LengthMismatch {
                columns: columns.len(),
                coefficients: coefficients.len(),
            });
        }
        let c_name = c_name(name)?;
        let nvars = c_int::try_from(columns.len()).map_err(|_| ScipError::LengthMismatch {
            columns: columns.len(),
            coefficients: coefficients.len(),
        })?;

        self.row_vars.clear();
        self.row_values.clear();
        for &column in columns {
            let var = *self
                .vars
                .get(column)
                .ok_or(ScipError::ColumnOutOfRange {
                    column,
                    num_variables: self.vars.len(),
                })?;
            self.row_vars.push(var);
        }
        self.row_values.extend_from_slice(coefficients);

        let mut cons: *mut ffi::SCIP_CONS = ptr::null_mut();
        check("SCIPcreateConsBasicLinear", unsafe {
            ffi::SCIPcreateConsBasicLinear(
                self.raw,
                &mut cons,
                c_name.as_ptr(),
                nvars,
                self.row_vars.as_mut_ptr(),
                self.row_values.as_mut_ptr(),
                lhs,
                rhs,
            )
        })?;
        let added = unsafe { ffi::SCIPaddCons(self.raw, cons) };
        let released = unsafe { ffi::SCIPreleaseCons(self.raw, &mut cons) };
        check("SCIPaddCons", added)?;
        check("SCIPreleaseCons", released)?;

        trace!(
            component = "solver",
            operation = "add_constraint",
            status = "success",
            name,
            lhs,
            rhs,
            num_coeffs = columns.len(),
            "Added constraint to SCIP"
        );
        Ok(())
    }

    /// Set a real-valued parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCIPsetRealParam` fails.
    pub fn set_real_param(&mut self, name: &str, value: f64) -> Result<(), ScipError> {
        let c_name = c_name(name)?;
        check("SCIPsetRealParam", unsafe {
            ffi::SCIPsetRealParam(self.raw, c_name.as_ptr(), value)
        })?;
        trace!(
            component = "solver",
            operation = "set_param",
            status = "success",
            param = name,
            value,
            "Set real parameter"
        );
        Ok(())
    }

    /// Set an integer parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCIPsetIntParam` fails.
    pub fn set_int_param(&mut self, name: &str, value: i32) -> Result<(), ScipError> {
        let c_name = c_name(name)?;
        check("SCIPsetIntParam", unsafe {
            ffi::SCIPsetIntParam(self.raw, c_name.as_ptr(), value)
        })?;
        trace!(
            component = "solver",
            operation = "set_param",
            status = "success",
            param = name,
            value,
            "Set integer parameter"
        );
        Ok(())
    }

    /// Run the solver; blocks until SCIP reaches a terminal status.
    ///
    /// With `parallel`, `SCIPsolveConcurrent` runs first. SCIP builds without
    /// a task processing interface return from it without solving; the
    /// sequential solver then runs instead, so on `Ok` the model is always
    /// in the solved stage.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCIPsolveConcurrent` or `SCIPsolve` fails.
    pub fn solve(&mut self, parallel: bool) -> Result<(), ScipError> {
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            num_vars = self.vars.len(),
            parallel,
            "Solving model"
        );
        if parallel {
            check("SCIPsolveConcurrent", unsafe {
                ffi::SCIPsolveConcurrent(self.raw)
            })?;
            if self.is_solved() {
                return Ok(());
            }
            warn!(
                component = "solver",
                operation = "solve",
                status = "warn",
                stage = self.stage(),
                "Concurrent solve did not run; falling back to SCIPsolve"
            );
        }
        check("SCIPsolve", unsafe { ffi::SCIPsolve(self.raw) })
    }

    /// Raw SCIP stage of the environment.
    pub fn stage(&self) -> ffi::SCIP_Stage {
        unsafe { ffi::SCIPgetStage(self.raw) }
    }

    /// Whether a solve has run to completion.
    pub fn is_solved(&self) -> bool {
        self.stage() == ffi::SCIP_Stage_SCIP_STAGE_SOLVED
    }

    /// Raw SCIP status code.
    pub fn status(&self) -> ffi::SCIP_Status {
        unsafe { ffi::SCIPgetStatus(self.raw) }
    }

    /// Values of the best solution, one per variable in creation order.
    ///
    /// Returns `None` when SCIP holds no solution.
    pub fn best_solution_values(&self) -> Option<Vec<f64>> {
        let sol = unsafe { ffi::SCIPgetBestSol(self.raw) };
        if sol.is_null() {
            return None;
        }
        Some(
            self.vars
                .iter()
                .map(|&var| unsafe { ffi::SCIPgetSolVal(self.raw, sol, var) })
                .collect(),
        )
    }

    /// Objective value of the best primal bound found.
    pub fn primal_bound(&self) -> f64 {
        unsafe { ffi::SCIPgetPrimalbound(self.raw) }
    }

    /// Current relative gap between primal and dual bound.
    pub fn gap(&self) -> f64 {
        unsafe { ffi::SCIPgetGap(self.raw) }
    }

    /// Number of feasible solutions found.
    pub fn n_solutions(&self) -> usize {
        let count = unsafe { ffi::SCIPgetNSols(self.raw) };
        usize::try_from(count).unwrap_or(0)
    }
}

impl Drop for ScipModel {
    fn drop(&mut self) {
        if self.raw.is_null() {
            return;
        }
        for var in &mut self.vars {
            let retcode = unsafe { ffi::SCIPreleaseVar(self.raw, var) };
            if retcode != ffi::SCIP_Retcode_SCIP_OKAY {
                warn!(
                    component = "solver",
                    operation = "teardown",
                    status = "warn",
                    retcode_name = retcode_name(retcode),
                    "Failed to release variable"
                );
            }
        }
        self.vars.clear();
        let retcode = unsafe { ffi::SCIPfree(&mut self.raw) };
        if retcode != ffi::SCIP_Retcode_SCIP_OKAY {
            warn!(
                component = "solver",
                operation = "teardown",
                status = "warn",
                retcode_name = retcode_name(retcode),
                "Failed to free SCIP environment"
            );
        }
        trace!(
            component = "solver",
            operation = "teardown",
            status = "success",
            "Released SCIP environment"
        );
    }
}

impl fmt::Debug for ScipModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScipModel")
            .field("num_variables", &self.vars.len())
            .field("infinity", &self.infinity)
            .finish_non_exhaustive()
    }
}

/// Return the linked SCIP version as `major.minor.tech`.
pub fn scip_version() -> String {
    let (major, minor, tech) = unsafe {
        (
            ffi::SCIPmajorVersion(),
            ffi::SCIPminorVersion(),
            ffi::SCIPtechVersion(),
        )
    };
    format!("{}.{}.{}", major, minor, tech)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_of_uncreated_environment_is_a_no_op() {
        // The state `new` is in if `SCIPcreate` reports failure.
        let model = ScipModel {
            raw: ptr::null_mut(),
            vars: Vec::new(),
            infinity: f64::INFINITY,
            row_vars: Vec::new(),
            row_values: Vec::new(),
        };
        assert_eq!(model.num_variables(), 0);
        drop(model);
    }

    #[test]
    fn test_clamp_bound() {
        assert_eq!(clamp_bound(f64::INFINITY, 1e20), 1e20);
        assert_eq!(clamp_bound(f64::NEG_INFINITY, 1e20), -1e20);
        assert_eq!(clamp_bound(3e25, 1e20), 1e20);
        assert_eq!(clamp_bound(-4.5, 1e20), -4.5);
    }

    #[test]
    fn test_retcode_names() {
        assert_eq!(retcode_name(ffi::SCIP_Retcode_SCIP_OKAY), "SCIP_OKAY");
        assert_eq!(
            retcode_name(ffi::SCIP_Retcode_SCIP_PARAMETERUNKNOWN),
            "SCIP_PARAMETERUNKNOWN"
        );
        assert_eq!(retcode_name(-999), "SCIP_UNKNOWN_RETCODE");
    }

    #[test]
    fn test_error_display_names_function_and_retcode() {
        let err = ScipError::Call {
            function: "SCIPsolve",
            retcode: ffi::SCIP_Retcode_SCIP_NOMEMORY,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[SCIP_CALL_FAILED]"));
        assert!(msg.contains("SCIPsolve"));
        assert!(msg.contains("SCIP_NOMEMORY"));
        assert_eq!(err.retcode(), Some(ffi::SCIP_Retcode_SCIP_NOMEMORY));
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let err = ScipModel::new("bad\0name").unwrap_err();
        assert_eq!(err.code(), "SCIP_INVALID_NAME");
        assert_eq!(err.retcode(), None);
    }

    #[test]
    fn test_constraint_checks_terms() {
        let mut model = ScipModel::new("terms").unwrap();
        model
            .add_variable(0.0, 1.0, 1.0, VarType::Continuous)
            .unwrap();

        let err = model
            .add_linear_constraint("0", &[0, 1], &[1.0], 0.0, 1.0)
            .unwrap_err();
        assert_eq!(err.code(), "SCIP_LENGTH_MISMATCH");

        let err = model
            .add_linear_constraint("0", &[3], &[1.0], 0.0, 1.0)
            .unwrap_err();
        assert_eq!(
            err,
            ScipError::ColumnOutOfRange {
                column: 3,
                num_variables: 1
            }
        );
    }
}
