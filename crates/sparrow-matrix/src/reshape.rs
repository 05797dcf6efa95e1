//! Row and column insertion/removal.
//!
//! Each operation validates its arguments, builds a complete new store of
//! the new dimensions, and only then move-assigns it into `self`. A failed
//! call leaves the matrix untouched.

use sparrow_types::{SparrowError, SparrowResult};

use crate::store::SparseMatrix;

impl SparseMatrix {
    /// Inserts a new row at 1-based position `row` (`1..=rows + 1`).
    ///
    /// Rows at or after `row` shift down by one; `values` (length `cols`)
    /// becomes the new row, exact zeros skipped.
    pub fn insert_row(&mut self, row: usize, values: &[f64]) -> SparrowResult<()> {
        let (rows, cols) = (self.number_of_rows(), self.number_of_columns());
        if row < 1 || row > rows + 1 {
            return Err(SparrowError::InvalidIndex {
                row,
                col: 1,
                rows: rows + 1,
                cols,
            });
        }
        if values.len() != cols {
            return Err(SparrowError::DimensionMismatch(format!(
                "Row vector length ({}) != number of columns ({cols})",
                values.len()
            )));
        }

        let mut rebuilt = SparseMatrix::empty(rows + 1, cols);
        for e in self.iter() {
            let r = if e.row < row { e.row } else { e.row + 1 };
            rebuilt.accumulate(r, e.col, e.value);
        }
        for (j, &v) in values.iter().enumerate() {
            rebuilt.accumulate(row, j + 1, v);
        }

        *self = rebuilt;
        Ok(())
    }

    /// Removes 1-based row `row`. Rows after it shift up by one.
    pub fn remove_row(&mut self, row: usize) -> SparrowResult<()> {
        let (rows, cols) = (self.number_of_rows(), self.number_of_columns());
        self.check_index(row, 1)?;
        if rows == 1 {
            return Err(SparrowError::DimensionMismatch(
                "Cannot remove the only row of a matrix".into(),
            ));
        }

        let mut rebuilt = SparseMatrix::empty(rows - 1, cols);
        for e in self.iter().filter(|e| e.row != row) {
            let r = if e.row < row { e.row } else { e.row - 1 };
            rebuilt.accumulate(r, e.col, e.value);
        }

        *self = rebuilt;
        Ok(())
    }

    /// Inserts a new column at 1-based position `col` (`1..=cols + 1`).
    ///
    /// Columns at or after `col` shift right by one; `values` (length
    /// `rows`) becomes the new column, exact zeros skipped.
    pub fn insert_column(&mut self, col: usize, values: &[f64]) -> SparrowResult<()> {
        let (rows, cols) = (self.number_of_rows(), self.number_of_columns());
        if col < 1 || col > cols + 1 {
            return Err(SparrowError::InvalidIndex {
                row: 1,
                col,
                rows,
                cols: cols + 1,
            });
        }
        if values.len() != rows {
            return Err(SparrowError::DimensionMismatch(format!(
                "Column vector length ({}) != number of rows ({rows})",
                values.len()
            )));
        }

        let mut rebuilt = SparseMatrix::empty(rows, cols + 1);
        for e in self.iter() {
            let c = if e.col < col { e.col } else { e.col + 1 };
            rebuilt.accumulate(e.row, c, e.value);
        }
        for (i, &v) in values.iter().enumerate() {
            rebuilt.accumulate(i + 1, col, v);
        }

        *self = rebuilt;
        Ok(())
    }

    /// Removes 1-based column `col`. Columns after it shift left by one.
    pub fn remove_column(&mut self, col: usize) -> SparrowResult<()> {
        let (rows, cols) = (self.number_of_rows(), self.number_of_columns());
        self.check_index(1, col)?;
        if cols == 1 {
            return Err(SparrowError::DimensionMismatch(
                "Cannot remove the only column of a matrix".into(),
            ));
        }

        let mut rebuilt = SparseMatrix::empty(rows, cols - 1);
        for e in self.iter().filter(|e| e.col != col) {
            let c = if e.col < col { e.col } else { e.col - 1 };
            rebuilt.accumulate(e.row, c, e.value);
        }

        *self = rebuilt;
        Ok(())
    }
}
