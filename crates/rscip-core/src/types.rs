use crate::error::ProblemError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Objective direction of the whole problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelSense {
    #[serde(rename = "min")]
    Minimize,
    #[serde(rename = "max")]
    Maximize,
}

impl ModelSense {
    /// Host-facing spelling (`"min"` / `"max"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ModelSense::Minimize => "min",
            ModelSense::Maximize => "max",
        }
    }
}

impl FromStr for ModelSense {
    type Err = ProblemError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "min" => Ok(ModelSense::Minimize),
            "max" => Ok(ModelSense::Maximize),
            other => Err(ProblemError::UnknownModelSense {
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarType {
    #[serde(rename = "C")]
    Continuous,
    #[serde(rename = "B")]
    Binary,
    #[serde(rename = "I")]
    Integer,
}

impl VarType {
    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Continuous => "C",
            VarType::Binary => "B",
            VarType::Integer => "I",
        }
    }

    /// Parse the type code of the variable at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::UnknownVarType`] for anything other than
    /// `"C"`, `"B"` or `"I"`.
    pub fn parse_at(index: usize, value: &str) -> Result<Self, ProblemError> {
        match value {
            "C" => Ok(VarType::Continuous),
            "B" => Ok(VarType::Binary),
            "I" => Ok(VarType::Integer),
            other => Err(ProblemError::UnknownVarType {
                index,
                value: other.to_string(),
            }),
        }
    }
}

/// Relation between a constraint row and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = "=")]
    Equal,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::GreaterEqual => ">=",
            Relation::LessEqual => "<=",
            Relation::Equal => "=",
        }
    }

    /// Parse the relation symbol of the constraint at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::UnknownRelation`] for anything other than
    /// `">="`, `"<="` or `"="`.
    pub fn parse_at(index: usize, value: &str) -> Result<Self, ProblemError> {
        match value {
            ">=" => Ok(Relation::GreaterEqual),
            "<=" => Ok(Relation::LessEqual),
            "=" => Ok(Relation::Equal),
            other => Err(ProblemError::UnknownRelation {
                index,
                value: other.to_string(),
            }),
        }
    }

    /// Translate a right-hand side into `(lhs, rhs)` row bounds, using
    /// `infinity` for the open side.
    pub fn row_bounds(self, rhs: f64, infinity: f64) -> (f64, f64) {
        match self {
            Relation::GreaterEqual => (rhs, infinity),
            Relation::LessEqual => (-infinity, rhs),
            Relation::Equal => (rhs, rhs),
        }
    }
}

/// Parse a slice of variable type codes.
///
/// # Errors
///
/// Fails on the first unrecognized code, reporting its position.
pub fn parse_var_types<S: AsRef<str>>(codes: &[S]) -> Result<Vec<VarType>, ProblemError> {
    codes
        .iter()
        .enumerate()
        .map(|(index, code)| VarType::parse_at(index, code.as_ref()))
        .collect()
}

/// Parse a slice of relation symbols.
///
/// # Errors
///
/// Fails on the first unrecognized symbol, reporting its position.
pub fn parse_relations<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<Relation>, ProblemError> {
    symbols
        .iter()
        .enumerate()
        .map(|(index, symbol)| Relation::parse_at(index, symbol.as_ref()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_model_sense_parse() {
        assert_eq!("min".parse::<ModelSense>().unwrap(), ModelSense::Minimize);
        assert_eq!("max".parse::<ModelSense>().unwrap(), ModelSense::Maximize);

        let err = "minimize".parse::<ModelSense>().unwrap_err();
        assert_eq!(err.code(), "PROBLEM_UNKNOWN_MODEL_SENSE");
        assert!(err.to_string().contains("minimize"));
    }

    #[test]
    fn test_var_type_parse_rejects_unknown_code() {
        let types = parse_var_types(&["C", "B", "I"]).unwrap();
        assert_eq!(
            types,
            vec![VarType::Continuous, VarType::Binary, VarType::Integer]
        );

        let err = parse_var_types(&["C", "S"]).unwrap_err();
        assert_eq!(
            err,
            ProblemError::UnknownVarType {
                index: 1,
                value: "S".to_string()
            }
        );
    }

    #[test]
    fn test_relation_parse_rejects_unknown_symbol() {
        let relations = parse_relations(&[">=", "<=", "="]).unwrap();
        assert_eq!(
            relations,
            vec![Relation::GreaterEqual, Relation::LessEqual, Relation::Equal]
        );

        let err = parse_relations(&["=="]).unwrap_err();
        assert_eq!(err.code(), "PROBLEM_UNKNOWN_RELATION");
    }

    #[test]
    fn test_relation_row_bounds() {
        let inf = 1e20;
        assert_eq!(Relation::GreaterEqual.row_bounds(3.0, inf), (3.0, inf));
        assert_eq!(Relation::LessEqual.row_bounds(3.0, inf), (-inf, 3.0));
        assert_eq!(Relation::Equal.row_bounds(3.0, inf), (3.0, 3.0));
    }

    #[test]
    fn test_serde_uses_host_spelling() {
        let json = serde_json::to_string(&(ModelSense::Maximize, VarType::Binary, Relation::LessEqual))
            .unwrap();
        assert_eq!(json, r#"["max","B","<="]"#);

        let parsed: Vec<Relation> = serde_json::from_str(r#"[">=", "="]"#).unwrap();
        assert_eq!(parsed, vec![Relation::GreaterEqual, Relation::Equal]);
        assert!(serde_json::from_str::<VarType>(r#""X""#).is_err());
    }
}
