//! Problem descriptions in flattened, host-friendly form.

use crate::error::ProblemError;
use crate::triplet::{Row, TripletMatrix};
use crate::types::{ModelSense, Relation, VarType};
use serde::{Deserialize, Serialize};

/// Borrowed view of a problem: parallel arrays keyed by position.
///
/// Variables are indexed by position in `objective`, `lower`, `upper` and
/// `var_types`; constraints by position in `rhs` and `relations`.
#[derive(Debug, Clone, Copy)]
pub struct Problem<'a> {
    pub sense: ModelSense,
    pub objective: &'a [f64],
    pub lower: &'a [f64],
    pub upper: &'a [f64],
    pub var_types: &'a [VarType],
    pub rhs: &'a [f64],
    pub relations: &'a [Relation],
    pub matrix: TripletMatrix<'a>,
}

impl<'a> Problem<'a> {
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rhs.len()
    }

    /// Check that the parallel arrays line up.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::LengthMismatch`] naming the first array whose
    /// length disagrees with `objective` (variables) or `rhs` (constraints).
    pub fn validate(&self) -> Result<(), ProblemError> {
        let num_variables = self.num_variables();
        for (field, len) in [
            ("lower", self.lower.len()),
            ("upper", self.upper.len()),
            ("var_types", self.var_types.len()),
        ] {
            if len != num_variables {
                return Err(ProblemError::LengthMismatch {
                    field,
                    expected: num_variables,
                    got: len,
                });
            }
        }
        if self.relations.len() != self.num_constraints() {
            return Err(ProblemError::LengthMismatch {
                field: "relations",
                expected: self.num_constraints(),
                got: self.relations.len(),
            });
        }
        Ok(())
    }

    /// Validate and decode the constraint rows in one pass.
    ///
    /// # Errors
    ///
    /// Propagates [`Problem::validate`] and
    /// [`TripletMatrix::decode_rows`] failures.
    pub fn rows(&self) -> Result<Vec<Row<'a>>, ProblemError> {
        self.validate()?;
        self.matrix
            .decode_rows(self.num_constraints(), self.num_variables())
    }

    /// Objective value of an assignment, `sum(values[i] * objective[i])`.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        values
            .iter()
            .zip(self.objective)
            .map(|(value, coefficient)| value * coefficient)
            .sum()
    }
}

/// Owned problem description, readable from JSON.
///
/// JSON has no infinity: `null` means `-inf` in `lower` and `+inf` in
/// `upper`. Other non-finite bounds cannot be serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemData {
    pub sense: ModelSense,
    pub objective: Vec<f64>,
    #[serde(with = "lower_bounds")]
    pub lower: Vec<f64>,
    #[serde(with = "upper_bounds")]
    pub upper: Vec<f64>,
    pub var_types: Vec<VarType>,
    #[serde(default)]
    pub rhs: Vec<f64>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub rows: Vec<usize>,
    #[serde(default)]
    pub cols: Vec<usize>,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl ProblemData {
    /// Parse a problem from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::InvalidProblemData`] when the text is not a
    /// valid problem document (including unknown sense/type/relation strings).
    pub fn from_json(text: &str) -> Result<Self, ProblemError> {
        serde_json::from_str(text).map_err(|err| ProblemError::InvalidProblemData {
            reason: err.to_string(),
        })
    }

    /// Borrow this data as a [`Problem`].
    ///
    /// # Errors
    ///
    /// Returns an error if the triplet arrays differ in length.
    pub fn as_problem(&self) -> Result<Problem<'_>, ProblemError> {
        Ok(Problem {
            sense: self.sense,
            objective: &self.objective,
            lower: &self.lower,
            upper: &self.upper,
            var_types: &self.var_types,
            rhs: &self.rhs,
            relations: &self.relations,
            matrix: TripletMatrix::new(&self.rows, &self.cols, &self.values)?,
        })
    }
}

/// JSON encoding of a bound array where `null` stands for the open side
/// only: `-inf` for lower bounds, `+inf` for upper bounds. Any other
/// non-finite bound has no encoding and fails serialization.
mod open_bounds {
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        bounds: &[f64],
        open: f64,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut encoded = Vec::with_capacity(bounds.len());
        for (index, &bound) in bounds.iter().enumerate() {
            if bound == open {
                encoded.push(None);
            } else if bound.is_finite() {
                encoded.push(Some(bound));
            } else {
                return Err(S::Error::custom(format!(
                    "bound {bound} at index {index} cannot be written (only {open} maps to null)"
                )));
            }
        }
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        open: f64,
        deserializer: D,
    ) -> Result<Vec<f64>, D::Error> {
        let encoded = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(encoded
            .into_iter()
            .map(|bound| bound.unwrap_or(open))
            .collect())
    }
}

mod lower_bounds {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bounds: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        super::open_bounds::serialize(bounds, f64::NEG_INFINITY, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        super::open_bounds::deserialize(f64::NEG_INFINITY, deserializer)
    }
}

mod upper_bounds {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bounds: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        super::open_bounds::serialize(bounds, f64::INFINITY, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        super::open_bounds::deserialize(f64::INFINITY, deserializer)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn two_by_two() -> ProblemData {
        ProblemData {
            sense: ModelSense::Maximize,
            objective: vec![1.0, 2.0],
            lower: vec![0.0, 0.0],
            upper: vec![f64::INFINITY, 4.0],
            var_types: vec![VarType::Continuous, VarType::Integer],
            rhs: vec![3.0, 1.0],
            relations: vec![Relation::LessEqual, Relation::GreaterEqual],
            rows: vec![0, 0, 1],
            cols: vec![0, 1, 1],
            values: vec![1.0, 1.0, 1.0],
        }
    }

    #[test]
    fn test_validate_accepts_consistent_problem() {
        let data = two_by_two();
        let problem = data.as_problem().unwrap();
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 2);
        let rows = problem.rows().unwrap();
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn test_validate_names_mismatched_array() {
        let mut data = two_by_two();
        data.upper.pop();
        let err = data.as_problem().unwrap().validate().unwrap_err();
        assert_eq!(
            err,
            ProblemError::LengthMismatch {
                field: "upper",
                expected: 2,
                got: 1
            }
        );

        let mut data = two_by_two();
        data.relations.push(Relation::Equal);
        let err = data.as_problem().unwrap().rows().unwrap_err();
        assert_eq!(err.code(), "PROBLEM_LENGTH_MISMATCH");
    }

    #[test]
    fn test_objective_value_is_dot_product() {
        let data = two_by_two();
        let problem = data.as_problem().unwrap();
        assert_eq!(problem.objective_value(&[3.0, 1.0]), 5.0);
        assert_eq!(problem.objective_value(&[]), 0.0);
    }

    #[test]
    fn test_json_round_trip_encodes_infinity_as_null() {
        let data = two_by_two();
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains(r#""upper":[null,4.0]"#));

        let parsed = ProblemData::from_json(&json).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_json_refuses_bounds_that_would_read_back_differently() {
        let mut data = two_by_two();
        data.lower = vec![f64::INFINITY, 0.0];
        let err = serde_json::to_string(&data).unwrap_err();
        assert!(err.to_string().contains("index 0"));

        let mut data = two_by_two();
        data.upper = vec![1.0, f64::NEG_INFINITY];
        assert!(serde_json::to_string(&data).is_err());

        let mut data = two_by_two();
        data.lower = vec![f64::NAN, 0.0];
        assert!(serde_json::to_string(&data).is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_open_sides() {
        let mut data = two_by_two();
        data.lower = vec![f64::NEG_INFINITY, -2.0];
        data.upper = vec![3.0, f64::INFINITY];
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains(r#""lower":[null,-2.0]"#));
        assert!(json.contains(r#""upper":[3.0,null]"#));
        assert_eq!(ProblemData::from_json(&json).unwrap(), data);
    }

    #[test]
    fn test_json_defaults_to_no_constraints() {
        let parsed = ProblemData::from_json(
            r#"{"sense":"min","objective":[1.0],"lower":[null],"upper":[5.0],"var_types":["C"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.lower, vec![f64::NEG_INFINITY]);
        assert!(parsed.rhs.is_empty());
        assert!(parsed.as_problem().unwrap().rows().unwrap().is_empty());
    }

    #[test]
    fn test_json_rejects_unknown_sense() {
        let err = ProblemData::from_json(
            r#"{"sense":"up","objective":[],"lower":[],"upper":[],"var_types":[]}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "PROBLEM_INVALID_DATA");
    }
}
