//! JSON document types for matrices and vectors.
//!
//! These types define the interchange boundary of the sparse-matrix
//! engine. A matrix document carries its dimensions plus one of the
//! snapshot payloads, tagged by `format`:
//!
//! ```json
//! { "rows": 3, "cols": 3,
//!   "payload": { "format": "csr", "row_ptr": [0, 2, 2, 4],
//!                "col": [1, 3, 1, 2], "value": [10.0, 3.0, -5.0, 2.0] } }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sparrow_matrix::{CooMatrix, CsrMatrix, SparseMatrix, YaleMatrix};
use sparrow_types::{SparrowError, SparrowResult};

use crate::validator::validate_document;

/// Snapshot format of a [`MatrixPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixFormat {
    /// Coordinate triples.
    Coo,
    /// Compressed sparse row.
    Csr,
    /// Yale (modified sparse row).
    Yale,
}

impl fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Coo => "coo",
            Self::Csr => "csr",
            Self::Yale => "yale",
        })
    }
}

impl FromStr for MatrixFormat {
    type Err = SparrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coo" => Ok(Self::Coo),
            "csr" => Ok(Self::Csr),
            "yale" => Ok(Self::Yale),
            other => Err(SparrowError::InvalidConfig(format!(
                "Unknown matrix format '{other}' (expected coo, csr or yale)"
            ))),
        }
    }
}

/// Matrix arrays in one of the snapshot layouts.
///
/// Row and column numbers are 1-based; pointer arrays are 0-based
/// offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum MatrixPayload {
    /// Parallel row/column/value arrays.
    Coo {
        row: Vec<usize>,
        col: Vec<usize>,
        value: Vec<f64>,
    },
    /// Row pointers plus column/value arrays.
    Csr {
        row_ptr: Vec<usize>,
        col: Vec<usize>,
        value: Vec<f64>,
    },
    /// Combined index and value arrays.
    Yale { ija: Vec<usize>, val: Vec<f64> },
}

impl MatrixPayload {
    /// Layout of this payload.
    pub fn format(&self) -> MatrixFormat {
        match self {
            Self::Coo { .. } => MatrixFormat::Coo,
            Self::Csr { .. } => MatrixFormat::Csr,
            Self::Yale { .. } => MatrixFormat::Yale,
        }
    }
}

/// A serialized sparse matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixDocument {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Matrix data.
    pub payload: MatrixPayload,
}

impl MatrixDocument {
    /// Snapshots `matrix` in the requested layout.
    pub fn from_matrix(matrix: &SparseMatrix, format: MatrixFormat) -> Self {
        let payload = match format {
            MatrixFormat::Coo => {
                let coo = matrix.to_coo();
                MatrixPayload::Coo {
                    row: coo.row,
                    col: coo.col,
                    value: coo.value,
                }
            }
            MatrixFormat::Csr => {
                let csr = matrix.to_csr();
                MatrixPayload::Csr {
                    row_ptr: csr.row_ptr,
                    col: csr.col,
                    value: csr.value,
                }
            }
            MatrixFormat::Yale => {
                let yale = matrix.to_yale();
                MatrixPayload::Yale {
                    ija: yale.ija,
                    val: yale.val,
                }
            }
        };
        Self {
            rows: matrix.number_of_rows(),
            cols: matrix.number_of_columns(),
            payload,
        }
    }

    /// Validates the document and rebuilds the sparse matrix.
    pub fn into_matrix(self) -> SparrowResult<SparseMatrix> {
        validate_document(&self)?;
        let (rows, cols) = (self.rows, self.cols);
        match self.payload {
            MatrixPayload::Coo { row, col, value } => SparseMatrix::from_coo(&CooMatrix {
                rows,
                cols,
                row,
                col,
                value,
            }),
            MatrixPayload::Csr {
                row_ptr,
                col,
                value,
            } => SparseMatrix::from_csr(&CsrMatrix {
                rows,
                cols,
                row_ptr,
                col,
                value,
            }),
            MatrixPayload::Yale { ija, val } => {
                SparseMatrix::from_yale(&YaleMatrix { rows, cols, ija, val })
            }
        }
    }

    /// Parses a JSON document. Structural validation happens in
    /// [`into_matrix`](Self::into_matrix).
    pub fn from_json(json: &str) -> SparrowResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SparrowError::MalformedInput(format!("matrix document: {e}")))
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> SparrowResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SparrowError::Serialization(e.to_string()))
    }
}

/// A serialized dense vector (right-hand side or solution).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorDocument {
    /// Vector entries.
    pub values: Vec<f64>,
}

impl VectorDocument {
    /// Wraps a vector.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Parses a JSON document.
    pub fn from_json(json: &str) -> SparrowResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SparrowError::MalformedInput(format!("vector document: {e}")))
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> SparrowResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SparrowError::Serialization(e.to_string()))
    }
}
