//! Matrix algebra on the sparse store.
//!
//! Every routine here is a single traversal of `iter()` that accumulates
//! into its output; none of them materializes a dense matrix.

use sparrow_types::{is_zero, SparrowError, SparrowResult};

use crate::store::SparseMatrix;

impl SparseMatrix {
    /// Multiplies every stored value by `factor` in place.
    ///
    /// Entries that become zero are kept.
    pub fn scale(&mut self, factor: f64) {
        for v in self.values_mut() {
            *v *= factor;
        }
    }

    /// Diagonal `[a(1,1), a(2,2), ..., a(rows,rows)]`.
    ///
    /// For a rectangular matrix the positions past `min(rows, cols)` are zero.
    pub fn diagonal(&self) -> Vec<f64> {
        let cols = self.number_of_columns();
        (1..=self.number_of_rows())
            .map(|i| if i <= cols { self.value_at(i, i) } else { 0.0 })
            .collect()
    }

    /// Adds `value` to every diagonal position (accumulating `assign`).
    pub fn add_to_diagonal(&mut self, value: f64) {
        let n = self.number_of_rows().min(self.number_of_columns());
        for i in 1..=n {
            self.accumulate(i, i, value);
        }
    }

    /// `y = A·x`. Requires `x.len() == cols`.
    pub fn mat_vec(&self, x: &[f64]) -> SparrowResult<Vec<f64>> {
        if x.len() != self.number_of_columns() {
            return Err(SparrowError::DimensionMismatch(format!(
                "Vector length ({}) != number of columns ({})",
                x.len(),
                self.number_of_columns()
            )));
        }
        let mut y = vec![0.0; self.number_of_rows()];
        for e in self.iter() {
            y[e.row - 1] += e.value * x[e.col - 1];
        }
        Ok(y)
    }

    /// `y = Aᵀ·x`. Requires `x.len() == rows`.
    pub fn transpose_mat_vec(&self, x: &[f64]) -> SparrowResult<Vec<f64>> {
        if x.len() != self.number_of_rows() {
            return Err(SparrowError::DimensionMismatch(format!(
                "Vector length ({}) != number of rows ({})",
                x.len(),
                self.number_of_rows()
            )));
        }
        let mut y = vec![0.0; self.number_of_columns()];
        for e in self.iter() {
            y[e.col - 1] += e.value * x[e.row - 1];
        }
        Ok(y)
    }

    /// Transfer matrix: each off-diagonal `a(r, c)` divided by `a(c, c)`.
    ///
    /// Diagonal entries are not copied. Fails with `SingularMatrix` if a
    /// column holding an off-diagonal entry has no usable diagonal.
    pub fn transfer_matrix(&self) -> SparrowResult<SparseMatrix> {
        let mut transfer = SparseMatrix::empty(self.number_of_rows(), self.number_of_columns());
        for e in self.iter().filter(|e| e.row != e.col) {
            let divisor = if e.col <= self.number_of_rows() {
                self.value_at(e.col, e.col)
            } else {
                0.0
            };
            if is_zero(divisor) {
                return Err(SparrowError::SingularMatrix { pivot: e.col - 1 });
            }
            transfer.accumulate(e.row, e.col, e.value / divisor);
        }
        Ok(transfer)
    }

    /// Accumulates every entry of `sub` into `self`, with `sub(1, 1)`
    /// landing on `(row0, col0)`. `sub` is not modified.
    pub fn insert_submatrix(
        &mut self,
        sub: &SparseMatrix,
        row0: usize,
        col0: usize,
    ) -> SparrowResult<()> {
        self.check_index(row0, col0)?;
        let row_end = row0 + sub.number_of_rows() - 1;
        let col_end = col0 + sub.number_of_columns() - 1;
        if row_end > self.number_of_rows() || col_end > self.number_of_columns() {
            return Err(SparrowError::DimensionMismatch(format!(
                "Inserted {}×{} matrix at ({row0}, {col0}) overflows {}×{} target",
                sub.number_of_rows(),
                sub.number_of_columns(),
                self.number_of_rows(),
                self.number_of_columns()
            )));
        }
        for e in sub.iter() {
            self.accumulate(e.row + row0 - 1, e.col + col0 - 1, e.value);
        }
        Ok(())
    }

    /// New `row_span × col_span` matrix holding the window of `self`
    /// that starts at `(row0, col0)`.
    pub fn extract_submatrix(
        &self,
        row0: usize,
        col0: usize,
        row_span: usize,
        col_span: usize,
    ) -> SparrowResult<SparseMatrix> {
        self.check_index(row0, col0)?;
        if row_span == 0
            || col_span == 0
            || row0 + row_span - 1 > self.number_of_rows()
            || col0 + col_span - 1 > self.number_of_columns()
        {
            return Err(SparrowError::DimensionMismatch(format!(
                "Window {row_span}×{col_span} at ({row0}, {col0}) does not fit {}×{} source",
                self.number_of_rows(),
                self.number_of_columns()
            )));
        }

        let row_end = row0 + row_span;
        let col_end = col0 + col_span;
        let mut extracted = SparseMatrix::empty(row_span, col_span);
        for e in self.iter() {
            if (row0..row_end).contains(&e.row) && (col0..col_end).contains(&e.col) {
                extracted.accumulate(e.row - row0 + 1, e.col - col0 + 1, e.value);
            }
        }
        Ok(extracted)
    }
}
