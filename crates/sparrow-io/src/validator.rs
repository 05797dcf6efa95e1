//! Document validation.
//!
//! Validates matrix and vector documents before they are turned into
//! matrices, catching data-level errors early with clear diagnostics.
//! Every failure is reported as `MalformedInput`.

use sparrow_types::{SparrowError, SparrowResult};

use crate::contract::{MatrixDocument, MatrixPayload, VectorDocument};

/// Validates a matrix document.
///
/// Checks:
/// - Non-zero dimensions
/// - Parallel arrays have equal lengths
/// - Row/column numbers lie in range
/// - Pointer arrays start where the layout requires, never decrease and
///   end at the entry count
/// - Every value is finite
pub fn validate_document(doc: &MatrixDocument) -> SparrowResult<()> {
    let (rows, cols) = (doc.rows, doc.cols);
    if rows == 0 || cols == 0 {
        return Err(malformed(format!(
            "matrix dimensions must be non-zero, got {rows}×{cols}"
        )));
    }

    match &doc.payload {
        MatrixPayload::Coo { row, col, value } => {
            if row.len() != value.len() || col.len() != value.len() {
                return Err(malformed(format!(
                    "COO arrays differ in length: row {}, col {}, value {}",
                    row.len(),
                    col.len(),
                    value.len()
                )));
            }
            check_indices(row, rows, "row")?;
            check_indices(col, cols, "column")?;
            check_finite(value)
        }
        MatrixPayload::Csr {
            row_ptr,
            col,
            value,
        } => {
            if row_ptr.len() != rows + 1 {
                return Err(malformed(format!(
                    "CSR row_ptr length ({}) != rows + 1 ({})",
                    row_ptr.len(),
                    rows + 1
                )));
            }
            if col.len() != value.len() {
                return Err(malformed(format!(
                    "CSR col length ({}) != value length ({})",
                    col.len(),
                    value.len()
                )));
            }
            check_pointers(row_ptr, 0, value.len(), "CSR row_ptr")?;
            check_indices(col, cols, "column")?;
            check_finite(value)
        }
        MatrixPayload::Yale { ija, val } => {
            if ija.len() != val.len() {
                return Err(malformed(format!(
                    "Yale ija length ({}) != val length ({})",
                    ija.len(),
                    val.len()
                )));
            }
            if ija.len() < rows + 1 {
                return Err(malformed(format!(
                    "Yale arrays too short ({}) for {rows} rows",
                    ija.len()
                )));
            }
            check_pointers(&ija[..=rows], rows + 1, ija.len(), "Yale ija")?;
            for r in 0..rows {
                for k in ija[r]..ija[r + 1] {
                    let c = ija[k];
                    if c < 1 || c > cols || c == r + 1 {
                        return Err(malformed(format!(
                            "Yale off-diagonal column {c} invalid for row {}",
                            r + 1
                        )));
                    }
                }
            }
            check_finite(val)
        }
    }
}

/// Validates a vector document, optionally against an expected length.
pub fn validate_vector(doc: &VectorDocument, expected_len: Option<usize>) -> SparrowResult<()> {
    if let Some(len) = expected_len {
        if doc.values.len() != len {
            return Err(malformed(format!(
                "vector length ({}) != expected length ({len})",
                doc.values.len()
            )));
        }
    }
    check_finite(&doc.values)
}

fn check_indices(indices: &[usize], bound: usize, what: &str) -> SparrowResult<()> {
    if let Some((i, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| index < 1 || index > bound)
    {
        return Err(malformed(format!(
            "{what} index {index} at position {i} outside 1..={bound}"
        )));
    }
    Ok(())
}

/// `pointers` must start at `first`, be non-decreasing and end at `last`.
fn check_pointers(pointers: &[usize], first: usize, last: usize, what: &str) -> SparrowResult<()> {
    if pointers.first() != Some(&first) {
        return Err(malformed(format!("{what} must start at {first}")));
    }
    if pointers.last() != Some(&last) {
        return Err(malformed(format!("{what} must end at {last}")));
    }
    if let Some(i) = pointers.windows(2).position(|w| w[0] > w[1]) {
        return Err(malformed(format!(
            "{what} decreases at position {}: {} > {}",
            i + 1,
            pointers[i],
            pointers[i + 1]
        )));
    }
    Ok(())
}

fn check_finite(values: &[f64]) -> SparrowResult<()> {
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(malformed(format!(
            "non-finite value {} at position {i}",
            values[i]
        )));
    }
    Ok(())
}

fn malformed(message: String) -> SparrowError {
    SparrowError::MalformedInput(message)
}
