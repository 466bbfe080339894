//! Solver error types.

use rscip_core::ProblemError;

/// Error type for solver operations.
#[derive(Debug, Clone)]
pub enum SolverError {
    /// The problem description is malformed.
    InvalidProblem(ProblemError),
    /// A solve option is out of range.
    InvalidSetting(String),
    /// The solver library reported a failure.
    InternalError(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::InvalidProblem(err) => err.code(),
            SolverError::InvalidSetting(_) => "SOLVER_INVALID_SETTING",
            SolverError::InternalError(_) => "SOLVER_INTERNAL",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::InvalidProblem(err) => write!(f, "{}", err),
            SolverError::InvalidSetting(msg) => {
                write!(f, "[{}] Invalid solver setting: {}", self.code(), msg)
            }
            SolverError::InternalError(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::InvalidProblem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProblemError> for SolverError {
    fn from(err: ProblemError) -> Self {
        SolverError::InvalidProblem(err)
    }
}
