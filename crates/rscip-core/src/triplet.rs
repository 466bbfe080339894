//! Row decoding for constraint matrices given in triplet form.
//!
//! The matrix arrives as three parallel arrays `(rows, cols, values)` sorted by
//! row index. Because every row is a contiguous run, decoding never copies:
//! each [`Row`] is a pair of sub-slices into the original column and value
//! arrays. A single cursor walks the entries once, so decoding is
//! `O(num_constraints + nnz)`.
//!
//! ```text
//! rows   = [0, 0, 1, 3]
//! cols   = [0, 2, 1, 0]
//! values = [1, 4, 2, 5]
//!
//! row 0 -> cols[0..2], values[0..2]
//! row 1 -> cols[2..3], values[2..3]
//! row 2 -> (empty)
//! row 3 -> cols[3..4], values[3..4]
//! ```

use crate::error::ProblemError;
use tracing::trace;

/// Borrowed constraint matrix in triplet (coordinate) form.
#[derive(Debug, Clone, Copy)]
pub struct TripletMatrix<'a> {
    rows: &'a [usize],
    cols: &'a [usize],
    values: &'a [f64],
}

/// One decoded constraint row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    pub index: usize,
    pub cols: &'a [usize],
    pub values: &'a [f64],
}

impl Row<'_> {
    /// Number of non-zero entries in the row.
    pub fn len(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }
}

impl<'a> TripletMatrix<'a> {
    /// Wrap three parallel triplet arrays.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::LengthMismatch`] when the arrays differ in length.
    pub fn new(
        rows: &'a [usize],
        cols: &'a [usize],
        values: &'a [f64],
    ) -> Result<Self, ProblemError> {
        if cols.len() != rows.len() {
            return Err(ProblemError::LengthMismatch {
                field: "cols",
                expected: rows.len(),
                got: cols.len(),
            });
        }
        if values.len() != rows.len() {
            return Err(ProblemError::LengthMismatch {
                field: "values",
                expected: rows.len(),
                got: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.rows.len()
    }

    /// Split the entries into one [`Row`] per constraint.
    ///
    /// Every constraint in `0..num_constraints` gets a row, possibly empty.
    ///
    /// # Errors
    ///
    /// Fails when:
    /// - a row index is smaller than the one before it,
    /// - a row index is `>= num_constraints`,
    /// - a column index is `>= num_variables`,
    /// - a row holds more than `num_variables` entries.
    pub fn decode_rows(
        &self,
        num_constraints: usize,
        num_variables: usize,
    ) -> Result<Vec<Row<'a>>, ProblemError> {
        let nnz = self.nnz();
        let mut decoded = Vec::with_capacity(num_constraints);
        let mut cursor = 0;

        for index in 0..num_constraints {
            if let Some(&row) = self.rows.get(cursor) {
                if row < index {
                    return Err(ProblemError::TripletRowOutOfOrder {
                        position: cursor,
                        row,
                        expected_at_least: self.previous_row(cursor),
                    });
                }
            }

            let start = cursor;
            while cursor < nnz && self.rows[cursor] == index {
                let column = self.cols[cursor];
                if column >= num_variables {
                    return Err(ProblemError::TripletColumnOutOfRange {
                        position: cursor,
                        column,
                        num_variables,
                    });
                }
                cursor += 1;
            }

            let entries = cursor - start;
            if entries > num_variables {
                return Err(ProblemError::TripletRowTooLong {
                    row: index,
                    entries,
                    num_variables,
                });
            }

            trace!(
                component = "triplet",
                operation = "decode_row",
                status = "success",
                row = index,
                entries,
                "Decoded constraint row"
            );
            decoded.push(Row {
                index,
                cols: &self.cols[start..cursor],
                values: &self.values[start..cursor],
            });
        }

        if let Some(&row) = self.rows.get(cursor) {
            if row < num_constraints {
                return Err(ProblemError::TripletRowOutOfOrder {
                    position: cursor,
                    row,
                    expected_at_least: self.previous_row(cursor),
                });
            }
            return Err(ProblemError::TripletRowOutOfRange {
                position: cursor,
                row,
                num_constraints,
            });
        }

        Ok(decoded)
    }

    fn previous_row(&self, cursor: usize) -> usize {
        cursor
            .checked_sub(1)
            .and_then(|position| self.rows.get(position))
            .copied()
            .unwrap_or(0)
    }
}
