//! Structured RscipError exception hierarchy.
//!
//! `RscipError` is the base exception. Each error code gets its own subclass,
//! registered both on the module and as a class attribute of `RscipError`
//! named after the code (so `except RscipError.PROBLEM_TRIPLET_UNSORTED`
//! works).

use pyo3::exceptions::PyException;
use pyo3::prelude::*;
use rscip_core::ProblemError;
use rscip_solver::SolverError;

// Base exception
pyo3::create_exception!(
    rscip,
    RscipError,
    PyException,
    "Base exception for all rscip errors."
);

// Problem description errors
pyo3::create_exception!(
    rscip,
    ProblemLengthMismatchError,
    RscipError,
    "Parallel input arrays differ in length."
);
pyo3::create_exception!(
    rscip,
    ModelSenseUnknownError,
    RscipError,
    "Model sense is neither 'min' nor 'max'."
);
pyo3::create_exception!(
    rscip,
    VarTypeUnknownError,
    RscipError,
    "Variable type is not one of 'C', 'B', 'I'."
);
pyo3::create_exception!(
    rscip,
    RelationUnknownError,
    RscipError,
    "Constraint sense is not one of '>=', '<=', '='."
);
pyo3::create_exception!(
    rscip,
    TripletUnsortedError,
    RscipError,
    "Triplet row indices are not sorted."
);
pyo3::create_exception!(
    rscip,
    TripletRowRangeError,
    RscipError,
    "Triplet row index is out of range."
);
pyo3::create_exception!(
    rscip,
    TripletColumnRangeError,
    RscipError,
    "Triplet column index is out of range."
);
pyo3::create_exception!(
    rscip,
    TripletRowTooLongError,
    RscipError,
    "A constraint row has more entries than there are variables."
);
pyo3::create_exception!(
    rscip,
    ProblemInvalidDataError,
    RscipError,
    "Problem data could not be read."
);

// Solver errors
pyo3::create_exception!(
    rscip,
    SolverInvalidSettingError,
    RscipError,
    "Invalid solver setting."
);
pyo3::create_exception!(
    rscip,
    SolverInternalError,
    RscipError,
    "SCIP reported a failure."
);

/// Convert a `ProblemError` into the matching RscipError subclass.
pub fn problem_error_to_py(e: ProblemError) -> PyErr {
    let msg = e.to_string();
    match e {
        ProblemError::LengthMismatch { .. } => ProblemLengthMismatchError::new_err(msg),
        ProblemError::UnknownModelSense { .. } => ModelSenseUnknownError::new_err(msg),
        ProblemError::UnknownVarType { .. } => VarTypeUnknownError::new_err(msg),
        ProblemError::UnknownRelation { .. } => RelationUnknownError::new_err(msg),
        ProblemError::TripletRowOutOfOrder { .. } => TripletUnsortedError::new_err(msg),
        ProblemError::TripletRowOutOfRange { .. } => TripletRowRangeError::new_err(msg),
        ProblemError::TripletColumnOutOfRange { .. } => TripletColumnRangeError::new_err(msg),
        ProblemError::TripletRowTooLong { .. } => TripletRowTooLongError::new_err(msg),
        ProblemError::InvalidProblemData { .. } => ProblemInvalidDataError::new_err(msg),
    }
}

/// Convert a `SolverError` into the matching RscipError subclass.
pub fn solver_error_to_py(e: SolverError) -> PyErr {
    match e {
        SolverError::InvalidProblem(inner) => problem_error_to_py(inner),
        SolverError::InvalidSetting(_) => SolverInvalidSettingError::new_err(e.to_string()),
        SolverError::InternalError(_) => SolverInternalError::new_err(e.to_string()),
    }
}

/// Register RscipError and all subclass exceptions on the module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    let base = py.get_type::<RscipError>();
    m.add("RscipError", &base)?;

    let subclasses = [
        (
            "ProblemLengthMismatchError",
            "PROBLEM_LENGTH_MISMATCH",
            py.get_type::<ProblemLengthMismatchError>(),
        ),
        (
            "ModelSenseUnknownError",
            "PROBLEM_UNKNOWN_MODEL_SENSE",
            py.get_type::<ModelSenseUnknownError>(),
        ),
        (
            "VarTypeUnknownError",
            "PROBLEM_UNKNOWN_VAR_TYPE",
            py.get_type::<VarTypeUnknownError>(),
        ),
        (
            "RelationUnknownError",
            "PROBLEM_UNKNOWN_RELATION",
            py.get_type::<RelationUnknownError>(),
        ),
        (
            "TripletUnsortedError",
            "PROBLEM_TRIPLET_UNSORTED",
            py.get_type::<TripletUnsortedError>(),
        ),
        (
            "TripletRowRangeError",
            "PROBLEM_TRIPLET_ROW_RANGE",
            py.get_type::<TripletRowRangeError>(),
        ),
        (
            "TripletColumnRangeError",
            "PROBLEM_TRIPLET_COLUMN_RANGE",
            py.get_type::<TripletColumnRangeError>(),
        ),
        (
            "TripletRowTooLongError",
            "PROBLEM_TRIPLET_ROW_TOO_LONG",
            py.get_type::<TripletRowTooLongError>(),
        ),
        (
            "ProblemInvalidDataError",
            "PROBLEM_INVALID_DATA",
            py.get_type::<ProblemInvalidDataError>(),
        ),
        (
            "SolverInvalidSettingError",
            "SOLVER_INVALID_SETTING",
            py.get_type::<SolverInvalidSettingError>(),
        ),
        (
            "SolverInternalError",
            "SOLVER_INTERNAL",
            py.get_type::<SolverInternalError>(),
        ),
    ];

    for (name, code, exception) in &subclasses {
        m.add(*name, exception)?;
        base.setattr(*code, exception)?;
    }
    Ok(())
}
