//! Problem input error types.

/// Errors raised while reading a problem description.
///
/// All of these are caller mistakes and are detected before any solver
/// resource is created.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Two arrays that must be parallel have different lengths.
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    /// Model sense was neither `"min"` nor `"max"`.
    UnknownModelSense { value: String },
    /// Variable type code was not `"C"`, `"B"` or `"I"`.
    UnknownVarType { index: usize, value: String },
    /// Constraint relation was not `">="`, `"<="` or `"="`.
    UnknownRelation { index: usize, value: String },
    /// A triplet row index went backwards.
    TripletRowOutOfOrder {
        position: usize,
        row: usize,
        expected_at_least: usize,
    },
    /// A triplet row index does not name a constraint.
    TripletRowOutOfRange {
        position: usize,
        row: usize,
        num_constraints: usize,
    },
    /// A triplet column index does not name a variable.
    TripletColumnOutOfRange {
        position: usize,
        column: usize,
        num_variables: usize,
    },
    /// A row carries more entries than there are variables.
    TripletRowTooLong {
        row: usize,
        entries: usize,
        num_variables: usize,
    },
    /// Serialized problem data could not be read.
    InvalidProblemData { reason: String },
}

impl ProblemError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ProblemError::LengthMismatch { .. } => "PROBLEM_LENGTH_MISMATCH",
            ProblemError::UnknownModelSense { .. } => "PROBLEM_UNKNOWN_MODEL_SENSE",
            ProblemError::UnknownVarType { .. } => "PROBLEM_UNKNOWN_VAR_TYPE",
            ProblemError::UnknownRelation { .. } => "PROBLEM_UNKNOWN_RELATION",
            ProblemError::TripletRowOutOfOrder { .. } => "PROBLEM_TRIPLET_UNSORTED",
            ProblemError::TripletRowOutOfRange { .. } => "PROBLEM_TRIPLET_ROW_RANGE",
            ProblemError::TripletColumnOutOfRange { .. } => "PROBLEM_TRIPLET_COLUMN_RANGE",
            ProblemError::TripletRowTooLong { .. } => "PROBLEM_TRIPLET_ROW_TOO_LONG",
            ProblemError::InvalidProblemData { .. } => "PROBLEM_INVALID_DATA",
        }
    }
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::LengthMismatch {
                field,
                expected,
                got,
            } => write!(
                f,
                "[{}] `{}` has length {} but {} was expected",
                self.code(),
                field,
                got,
                expected
            ),
            ProblemError::UnknownModelSense { value } => write!(
                f,
                "[{}] `modelsense` not recognized: '{}' (expected 'min' or 'max')",
                self.code(),
                value
            ),
            ProblemError::UnknownVarType { index, value } => write!(
                f,
                "[{}] variable type '{}' at index {} not recognized (expected 'C', 'B' or 'I')",
                self.code(),
                value,
                index
            ),
            ProblemError::UnknownRelation { index, value } => write!(
                f,
                "[{}] constraint sense '{}' at index {} not recognized (expected '>=', '<=' or '=')",
                self.code(),
                value,
                index
            ),
            ProblemError::TripletRowOutOfOrder {
                position,
                row,
                expected_at_least,
            } => write!(
                f,
                "[{}] row indices must be sorted: entry {} has row {} after row {}",
                self.code(),
                position,
                row,
                expected_at_least
            ),
            ProblemError::TripletRowOutOfRange {
                position,
                row,
                num_constraints,
            } => write!(
                f,
                "[{}] entry {} has row {} but there are {} constraints",
                self.code(),
                position,
                row,
                num_constraints
            ),
            ProblemError::TripletColumnOutOfRange {
                position,
                column,
                num_variables,
            } => write!(
                f,
                "[{}] entry {} has column {} but there are {} variables",
                self.code(),
                position,
                column,
                num_variables
            ),
            ProblemError::TripletRowTooLong {
                row,
                entries,
                num_variables,
            } => write!(
                f,
                "[{}] row {} has {} entries but there are only {} variables",
                self.code(),
                row,
                entries,
                num_variables
            ),
            ProblemError::InvalidProblemData { reason } => {
                write!(f, "[{}] problem data invalid: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for ProblemError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = ProblemError::LengthMismatch {
            field: "ub",
            expected: 3,
            got: 2,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("[PROBLEM_LENGTH_MISMATCH]"));
        assert!(msg.contains("`ub`"));
    }

    #[test]
    fn test_model_sense_message_names_argument() {
        let err = ProblemError::UnknownModelSense {
            value: "up".to_string(),
        };
        assert!(err.to_string().contains("`modelsense` not recognized"));
    }

    #[test]
    fn test_triplet_codes() {
        assert_eq!(
            ProblemError::TripletRowOutOfOrder {
                position: 2,
                row: 0,
                expected_at_least: 1
            }
            .code(),
            "PROBLEM_TRIPLET_UNSORTED"
        );
        assert_eq!(
            ProblemError::TripletRowTooLong {
                row: 0,
                entries: 3,
                num_variables: 2
            }
            .code(),
            "PROBLEM_TRIPLET_ROW_TOO_LONG"
        );
    }
}
