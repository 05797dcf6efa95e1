//! Solver strategy trait: the seam between the system driver and the
//! concrete linear solvers.
//!
//! Every solver takes the caller's matrix and right-hand side by shared
//! reference and returns a fresh solution vector, so the caller's data
//! is never mutated regardless of what the solver does internally.

use sparrow_matrix::SparseMatrix;
use sparrow_types::SparrowResult;

use crate::arrow::{ArrowLayout, ArrowMatrix};

/// Trait for direct solvers of `A·x = b`.
///
/// # Implementations
///
/// - [`ArrowSolver`] — banded arrow elimination, no pivoting
/// - [`DenseLuSolver`](crate::dense::DenseLuSolver) — faer partial-pivoting LU
pub trait LinearSolver: Send {
    /// Solves `matrix · x = rhs` and returns `x`.
    fn solve(&mut self, matrix: &SparseMatrix, rhs: &[f64]) -> SparrowResult<Vec<f64>>;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}

/// Arrow solver: partitions a copy of the matrix with a fixed wing width
/// and runs elimination plus back-substitution on it.
#[derive(Debug, Clone)]
pub struct ArrowSolver {
    wing_width: usize,
    last_layout: Option<ArrowLayout>,
}

impl ArrowSolver {
    /// Creates a solver treating the last `wing_width` rows and columns
    /// as wings.
    pub fn new(wing_width: usize) -> Self {
        Self {
            wing_width,
            last_layout: None,
        }
    }

    /// Configured wing width.
    pub fn wing_width(&self) -> usize {
        self.wing_width
    }

    /// Layout of the most recently partitioned matrix, if any.
    pub fn last_layout(&self) -> Option<ArrowLayout> {
        self.last_layout
    }
}

impl LinearSolver for ArrowSolver {
    fn solve(&mut self, matrix: &SparseMatrix, rhs: &[f64]) -> SparrowResult<Vec<f64>> {
        let mut arrow = ArrowMatrix::build(matrix, self.wing_width)?;
        self.last_layout = Some(arrow.layout());

        let mut scratch = rhs.to_vec();
        arrow.solve(&mut scratch)
    }

    fn name(&self) -> &str {
        "arrow"
    }
}
