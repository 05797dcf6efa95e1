//! Dense LU solver backed by `faer`.
//!
//! Reference and fallback path for systems without arrow structure:
//! the sparse matrix is expanded with `to_dense()` and factorized with
//! faer's partial-pivoting LU. Cost is `O(n³)` time and `O(n²)` memory.

use faer::linalg::solvers::Solve;
use faer::Mat;
use sparrow_matrix::SparseMatrix;
use sparrow_types::{SparrowError, SparrowResult};

use crate::strategy::LinearSolver;

/// Dense partial-pivoting LU solver using `faer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenseLuSolver;

impl DenseLuSolver {
    /// Creates a new solver.
    pub fn new() -> Self {
        Self
    }
}

impl LinearSolver for DenseLuSolver {
    fn solve(&mut self, matrix: &SparseMatrix, rhs: &[f64]) -> SparrowResult<Vec<f64>> {
        if !matrix.is_square() {
            return Err(SparrowError::DimensionMismatch(format!(
                "Matrix must be square, got {}×{}",
                matrix.number_of_rows(),
                matrix.number_of_columns()
            )));
        }
        let n = matrix.number_of_rows();
        if rhs.len() != n {
            return Err(SparrowError::DimensionMismatch(format!(
                "RHS length ({}) != matrix dimension ({n})",
                rhs.len()
            )));
        }

        let dense = matrix.to_dense();
        let a: Mat<f64> = Mat::from_fn(n, n, |i, j| dense.get(i, j));
        let b: Mat<f64> = Mat::from_fn(n, 1, |i, _| rhs[i]);

        let lu = a.as_ref().partial_piv_lu();
        let x = lu.solve(&b);

        let solution: Vec<f64> = (0..n).map(|i| x[(i, 0)]).collect();
        // A zero pivot surfaces as inf/NaN in the triangular solves.
        if let Some(pivot) = solution.iter().position(|v| !v.is_finite()) {
            return Err(SparrowError::SingularMatrix { pivot });
        }
        Ok(solution)
    }

    fn name(&self) -> &str {
        "dense_lu"
    }
}
