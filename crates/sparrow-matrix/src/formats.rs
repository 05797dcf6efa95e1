//! Sparse format snapshots: COO, CSR, Yale and dense.
//!
//! Every converter walks the store once in ascending `(row, col)` order
//! and builds its output in a single linear pass. Snapshots are deep,
//! independent copies; mutating the source matrix afterwards does not
//! affect them.
//!
//! Row and column numbers inside the snapshots stay 1-based, matching the
//! store. Pointer arrays (`row_ptr`, the offset half of `ija`) are 0-based
//! offsets into their companion arrays.

use serde::{Deserialize, Serialize};
use sparrow_types::{SparrowError, SparrowResult};

use crate::store::{Element, SparseMatrix};

/// Coordinate (COO) snapshot: parallel row/column/value arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooMatrix {
    /// Number of rows of the source matrix.
    pub rows: usize,
    /// Number of columns of the source matrix.
    pub cols: usize,
    /// Row numbers (1-based), ascending.
    pub row: Vec<usize>,
    /// Column numbers (1-based), ascending within a row.
    pub col: Vec<usize>,
    /// Values.
    pub value: Vec<f64>,
}

impl CooMatrix {
    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.value.len()
    }

    /// Iterates the snapshot as elements.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.row
            .iter()
            .zip(&self.col)
            .zip(&self.value)
            .map(|((&row, &col), &value)| Element { row, col, value })
    }
}

/// Compressed Sparse Row (CSR) snapshot.
///
/// `row_ptr[r]..row_ptr[r + 1]` are the indices into `col` and `value`
/// for the entries of row `r + 1`. Empty rows are zero-width slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row pointer array (length = rows + 1).
    pub row_ptr: Vec<usize>,
    /// Column numbers (1-based) of the entries.
    pub col: Vec<usize>,
    /// Values of the entries.
    pub value: Vec<f64>,
}

impl CsrMatrix {
    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.value.len()
    }

    /// Number of entries stored in 1-based row `row`, or `None` if `row`
    /// is outside `1..=rows` or the pointers are malformed.
    pub fn row_len(&self, row: usize) -> Option<usize> {
        let start = *self.row_ptr.get(row.checked_sub(1)?)?;
        let end = *self.row_ptr.get(row)?;
        end.checked_sub(start)
    }
}

/// Yale (modified sparse row) snapshot.
///
/// - `ija[0] = rows + 1`
/// - `val[0..rows]` are the diagonal entries (zero where absent)
/// - `ija[r]..ija[r + 1]` are the offsets of the off-diagonal entries of
///   row `r + 1`, each holding a `(ija[k], val[k])` column/value pair
/// - `ija[rows]` is one past the last off-diagonal offset
///
/// `val[rows]` is unused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YaleMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Combined pointer/column array.
    pub ija: Vec<usize>,
    /// Combined diagonal/off-diagonal value array.
    pub val: Vec<f64>,
}

impl YaleMatrix {
    /// Number of off-diagonal entries. Zero for a truncated `ija`.
    pub fn off_diagonal_count(&self) -> usize {
        self.ija.len().saturating_sub(self.rows + 1)
    }
}

/// Row-major dense snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// `rows * cols` values, row-major.
    pub data: Vec<f64>,
}

impl DenseMatrix {
    /// Zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Value at 0-based `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// 0-based row slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

/// A single row or column: the complementary coordinates and their values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Column numbers for a row, row numbers for a column (1-based, ascending).
    pub index: Vec<usize>,
    /// Values.
    pub value: Vec<f64>,
}

impl Line {
    /// Number of non-zero entries in the line.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the line has no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn push(&mut self, index: usize, value: f64) {
        self.index.push(index);
        self.value.push(value);
    }
}

impl SparseMatrix {
    /// Coordinate snapshot, ascending by row then column.
    pub fn to_coo(&self) -> CooMatrix {
        let nnz = self.number_of_elements();
        let mut coo = CooMatrix {
            rows: self.number_of_rows(),
            cols: self.number_of_columns(),
            row: Vec::with_capacity(nnz),
            col: Vec::with_capacity(nnz),
            value: Vec::with_capacity(nnz),
        };
        for e in self.iter() {
            coo.row.push(e.row);
            coo.col.push(e.col);
            coo.value.push(e.value);
        }
        coo
    }

    /// Compressed-row snapshot.
    pub fn to_csr(&self) -> CsrMatrix {
        let rows = self.number_of_rows();
        let nnz = self.number_of_elements();
        let mut row_ptr = vec![0usize; rows + 1];
        let mut col = Vec::with_capacity(nnz);
        let mut value = Vec::with_capacity(nnz);

        // `next_row` is the first 1-based row whose start is still unset.
        let mut next_row = 1;
        for (i, e) in self.iter().enumerate() {
            while next_row <= e.row {
                row_ptr[next_row - 1] = i;
                next_row += 1;
            }
            col.push(e.col);
            value.push(e.value);
        }
        while next_row <= rows + 1 {
            row_ptr[next_row - 1] = nnz;
            next_row += 1;
        }

        CsrMatrix {
            rows,
            cols: self.number_of_columns(),
            row_ptr,
            col,
            value,
        }
    }

    /// Yale snapshot.
    pub fn to_yale(&self) -> YaleMatrix {
        let rows = self.number_of_rows();
        let off_diagonal = self.iter().filter(|e| e.row != e.col).count();
        let len = rows + off_diagonal + 1;

        let mut ija = vec![0usize; len];
        let mut val = vec![0.0f64; len];
        ija[0] = rows + 1;

        let mut offset = rows + 1;
        // ija[0..next_row] are already set.
        let mut next_row = 1;
        for e in self.iter() {
            if e.row == e.col {
                val[e.row - 1] = e.value;
                continue;
            }
            while next_row < e.row {
                ija[next_row] = offset;
                next_row += 1;
            }
            ija[offset] = e.col;
            val[offset] = e.value;
            offset += 1;
        }
        while next_row <= rows {
            ija[next_row] = offset;
            next_row += 1;
        }

        YaleMatrix {
            rows,
            cols: self.number_of_columns(),
            ija,
            val,
        }
    }

    /// Dense row-major snapshot.
    pub fn to_dense(&self) -> DenseMatrix {
        let mut dense = DenseMatrix::zeros(self.number_of_rows(), self.number_of_columns());
        let cols = dense.cols;
        for e in self.iter() {
            dense.data[(e.row - 1) * cols + (e.col - 1)] = e.value;
        }
        dense
    }

    /// Deep copy with independent storage.
    pub fn copy(&self) -> SparseMatrix {
        self.clone()
    }

    /// New `cols × rows` matrix with every `(r, c, v)` moved to `(c, r, v)`.
    pub fn transpose(&self) -> SparseMatrix {
        let mut transposed = SparseMatrix::empty(self.number_of_columns(), self.number_of_rows());
        for e in self.iter() {
            transposed.accumulate(e.col, e.row, e.value);
        }
        transposed
    }

    /// Entries of 1-based row `row`, ascending by column.
    pub fn row(&self, row: usize) -> SparrowResult<Line> {
        self.check_index(row, 1)?;
        let mut line = Line::default();
        for e in self.row_entries(row) {
            line.push(e.col, e.value);
        }
        Ok(line)
    }

    /// Entries of 1-based column `col`, ascending by row.
    pub fn column(&self, col: usize) -> SparrowResult<Line> {
        self.check_index(1, col)?;
        let mut line = Line::default();
        for e in self.iter().filter(|e| e.col == col) {
            line.push(e.row, e.value);
        }
        Ok(line)
    }

    /// Rebuilds a store from a coordinate snapshot.
    pub fn from_coo(coo: &CooMatrix) -> SparrowResult<SparseMatrix> {
        if coo.row.len() != coo.value.len() || coo.col.len() != coo.value.len() {
            return Err(SparrowError::DimensionMismatch(format!(
                "COO arrays differ in length: row {}, col {}, value {}",
                coo.row.len(),
                coo.col.len(),
                coo.value.len()
            )));
        }
        SparseMatrix::from_elements(coo.rows, coo.cols, coo.elements())
    }

    /// Rebuilds a store from a compressed-row snapshot.
    pub fn from_csr(csr: &CsrMatrix) -> SparrowResult<SparseMatrix> {
        if csr.row_ptr.len() != csr.rows + 1 {
            return Err(SparrowError::DimensionMismatch(format!(
                "CSR row pointer length ({}) != rows + 1 ({})",
                csr.row_ptr.len(),
                csr.rows + 1
            )));
        }
        if csr.col.len() != csr.value.len() || csr.row_ptr[csr.rows] != csr.value.len() {
            return Err(SparrowError::DimensionMismatch(format!(
                "CSR arrays inconsistent: {} columns, {} values, final pointer {}",
                csr.col.len(),
                csr.value.len(),
                csr.row_ptr[csr.rows]
            )));
        }

        let mut matrix = SparseMatrix::new(csr.rows, csr.cols)?;
        for r in 0..csr.rows {
            let (start, end) = (csr.row_ptr[r], csr.row_ptr[r + 1]);
            if start > end || end > csr.value.len() {
                return Err(SparrowError::DimensionMismatch(format!(
                    "CSR row {} has invalid slice {start}..{end}",
                    r + 1
                )));
            }
            for k in start..end {
                matrix.assign(r + 1, csr.col[k], csr.value[k])?;
            }
        }
        Ok(matrix)
    }

    /// Rebuilds a store from a Yale snapshot.
    pub fn from_yale(yale: &YaleMatrix) -> SparrowResult<SparseMatrix> {
        let rows = yale.rows;
        if yale.ija.len() != yale.val.len() || yale.ija.len() < rows + 1 {
            return Err(SparrowError::DimensionMismatch(format!(
                "Yale arrays have lengths {} and {} for {rows} rows",
                yale.ija.len(),
                yale.val.len()
            )));
        }
        if yale.ija[0] != rows + 1 || yale.ija[rows] != yale.ija.len() {
            return Err(SparrowError::DimensionMismatch(format!(
                "Yale pointers must span {}..{}, got {}..{}",
                rows + 1,
                yale.ija.len(),
                yale.ija[0],
                yale.ija[rows]
            )));
        }

        let mut matrix = SparseMatrix::new(rows, yale.cols)?;
        for r in 0..rows.min(yale.cols) {
            matrix.assign(r + 1, r + 1, yale.val[r])?;
        }
        for r in 0..rows {
            let (start, end) = (yale.ija[r], yale.ija[r + 1]);
            if start > end || start < rows + 1 || end > yale.ija.len() {
                return Err(SparrowError::DimensionMismatch(format!(
                    "Yale row {} has invalid slice {start}..{end}",
                    r + 1
                )));
            }
            for k in start..end {
                matrix.assign(r + 1, yale.ija[k], yale.val[k])?;
            }
        }
        Ok(matrix)
    }

    /// Rebuilds a store from a dense snapshot, skipping exact zeros.
    pub fn from_dense(dense: &DenseMatrix) -> SparrowResult<SparseMatrix> {
        if dense.data.len() != dense.rows * dense.cols {
            return Err(SparrowError::DimensionMismatch(format!(
                "Dense data length ({}) != {}×{}",
                dense.data.len(),
                dense.rows,
                dense.cols
            )));
        }
        let mut matrix = SparseMatrix::new(dense.rows, dense.cols)?;
        for i in 0..dense.rows {
            for (j, &v) in dense.row(i).iter().enumerate() {
                matrix.accumulate(i + 1, j + 1, v);
            }
        }
        Ok(matrix)
    }
}
