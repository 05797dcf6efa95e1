//! # sparrow-matrix
//!
//! Sparse matrix primitives for the sparrow engine.
//!
//! Provides:
//! - [`SparseMatrix`] — mutable store keyed by 1-based `(row, col)`
//! - Format snapshots: COO, CSR, Yale, dense, single rows/columns
//! - Algebra: scaling, diagonal ops, `A·x`, `Aᵀ·x`, transfer matrix,
//!   sub-matrix insertion/extraction
//! - Atomic row/column insertion and removal

pub mod algebra;
pub mod formats;
pub mod reshape;
pub mod store;

pub use formats::{CooMatrix, CsrMatrix, DenseMatrix, Line, YaleMatrix};
pub use store::{Element, Elements, SparseMatrix};
