//! Problem model for the rscip SCIP bindings.
//!
//! Describes a mixed-integer linear program as flat parallel arrays, the way a
//! scripting host hands it over, and decodes the triplet constraint matrix
//! into per-row slices.

pub mod error;
pub mod problem;
pub mod triplet;
pub mod types;

pub use error::ProblemError;
pub use problem::{Problem, ProblemData};
pub use triplet::{Row, TripletMatrix};
pub use types::{ModelSense, Relation, VarType, parse_relations, parse_var_types};
