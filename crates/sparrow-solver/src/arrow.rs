//! Arrow partitioning and the banded arrow solver.
//!
//! An arrow matrix is a square `n × n` matrix whose non-zeros form a
//! narrow diagonal band over the leading `m = n - w` rows and columns,
//! plus `w` dense trailing "wing" rows and columns. The entries are
//! scattered into four flat blocks:
//!
//! ```text
//!            m          w
//!      ┌───────────┬─────┐
//!    m │  A (band) │ Bᵀ  │
//!      ├───────────┼─────┤
//!    w │     C     │  D  │
//!      └───────────┴─────┘
//! ```
//!
//! - `A[i][j]` (`m × bandwidth`) holds row `i + 1`, column `i + 1 + j - band`
//! - `B[k][i]` (`w × m`) holds row `i + 1`, column `m + k + 1`
//! - `C[k][i]` (`w × m`) holds row `m + k + 1`, column `i + 1`
//! - `D[k][l]` (`w × w`) holds row `m + k + 1`, column `m + l + 1`
//!
//! Elimination runs without pivoting directly on the blocks and the
//! right-hand side, so the cost is `O(m · band · (band + w) + w³)`
//! instead of a dense `O(n³)` factorization.
//!
//! ## Lifecycle
//! `Built → Eliminated → Solved`. A zero pivot moves the matrix to
//! `Failed`; its blocks are then partially eliminated and it cannot be
//! reused.

use serde::{Deserialize, Serialize};
use sparrow_matrix::SparseMatrix;
use sparrow_types::{is_zero, SparrowError, SparrowResult};

/// Where an [`ArrowMatrix`] is in its solve lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowStage {
    /// Freshly partitioned; blocks hold the source entries.
    Built,
    /// Forward elimination done; band and corner are upper triangular.
    Eliminated,
    /// Back-substitution done.
    Solved,
    /// Elimination hit a zero pivot.
    Failed,
}

/// Shape summary of an arrow partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowLayout {
    /// System dimension `n`.
    pub rows: usize,
    /// Band half-width.
    pub band: usize,
    /// Number of wing rows/columns `w`.
    pub wing_width: usize,
    /// Arrow storage relative to a dense `n × n` matrix.
    pub memory_ratio: f64,
}

/// A square matrix partitioned into band, wing and corner blocks.
#[derive(Debug, Clone)]
pub struct ArrowMatrix {
    rows: usize,
    wing_width: usize,
    band: usize,
    bandwidth: usize,
    /// Band block, row-major `m × bandwidth`.
    a: Vec<f64>,
    /// Right wing, row-major `w × m`.
    b: Vec<f64>,
    /// Bottom wing, row-major `w × m`.
    c: Vec<f64>,
    /// Corner, row-major `w × w`.
    d: Vec<f64>,
    stage: ArrowStage,
}

/// Allocates a zero-filled buffer of `rows * cols` values.
fn zeroed(rows: usize, cols: usize, block: &str) -> SparrowResult<Vec<f64>> {
    let len = rows.checked_mul(cols).ok_or_else(|| {
        SparrowError::AllocationFailure(format!("block {block} ({rows}×{cols}) overflows usize"))
    })?;
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|e| {
        SparrowError::AllocationFailure(format!("block {block} ({rows}×{cols}): {e}"))
    })?;
    buffer.resize(len, 0.0);
    Ok(buffer)
}

impl ArrowMatrix {
    /// Partitions a square matrix with `wing_width` trailing wing rows
    /// and columns.
    ///
    /// The band half-width is the largest `|col - row|` among entries
    /// whose row and column both lie in the leading `n - wing_width`
    /// block. The source matrix is only read.
    pub fn build(matrix: &SparseMatrix, wing_width: usize) -> SparrowResult<Self> {
        if !matrix.is_square() {
            return Err(SparrowError::DimensionMismatch(format!(
                "Arrow matrix must be square, got {}×{}",
                matrix.number_of_rows(),
                matrix.number_of_columns()
            )));
        }
        let n = matrix.number_of_rows();
        if wing_width >= n {
            return Err(SparrowError::DimensionMismatch(format!(
                "Wing width ({wing_width}) must be less than the number of rows ({n})"
            )));
        }

        let m = n - wing_width;
        let band = matrix
            .iter()
            .filter(|e| e.row <= m && e.col <= m)
            .map(|e| e.row.abs_diff(e.col))
            .max()
            .unwrap_or(0);
        let bandwidth = 2 * band + 1;

        let mut arrow = Self {
            rows: n,
            wing_width,
            band,
            bandwidth,
            a: zeroed(m, bandwidth, "A")?,
            b: zeroed(wing_width, m, "B")?,
            c: zeroed(wing_width, m, "C")?,
            d: zeroed(wing_width, wing_width, "D")?,
            stage: ArrowStage::Built,
        };

        for e in matrix.iter() {
            let (r, c) = (e.row - 1, e.col - 1);
            match (r < m, c < m) {
                (true, true) => arrow.a[r * bandwidth + c + band - r] = e.value,
                (true, false) => arrow.b[(c - m) * m + r] = e.value,
                (false, true) => arrow.c[(r - m) * m + c] = e.value,
                (false, false) => arrow.d[(r - m) * wing_width + (c - m)] = e.value,
            }
        }

        tracing::debug!(
            rows = n,
            band,
            wing_width,
            memory_ratio = arrow.memory_ratio(),
            "arrow matrix built"
        );
        Ok(arrow)
    }

    /// System dimension `n`.
    #[inline]
    pub fn number_of_rows(&self) -> usize {
        self.rows
    }

    /// Number of wing rows/columns `w`.
    #[inline]
    pub fn wing_width(&self) -> usize {
        self.wing_width
    }

    /// Band half-width.
    #[inline]
    pub fn band(&self) -> usize {
        self.band
    }

    /// Full band width, `2 * band + 1`.
    #[inline]
    pub fn bandwidth(&self) -> usize {
        self.bandwidth
    }

    /// Number of band rows, `m = n - w`.
    #[inline]
    pub fn band_length(&self) -> usize {
        self.rows - self.wing_width
    }

    /// Current lifecycle stage.
    #[inline]
    pub fn stage(&self) -> ArrowStage {
        self.stage
    }

    /// Band block entry `A[i][j]` (0-based).
    pub fn a(&self, i: usize, j: usize) -> f64 {
        self.a[i * self.bandwidth + j]
    }

    /// Right wing entry `B[k][i]` (0-based).
    pub fn b(&self, k: usize, i: usize) -> f64 {
        self.b[k * self.band_length() + i]
    }

    /// Bottom wing entry `C[k][i]` (0-based).
    pub fn c(&self, k: usize, i: usize) -> f64 {
        self.c[k * self.band_length() + i]
    }

    /// Corner entry `D[k][l]` (0-based).
    pub fn d(&self, k: usize, l: usize) -> f64 {
        self.d[k * self.wing_width + l]
    }

    /// Arrow storage relative to a dense square matrix:
    /// `((bandwidth + 2w)(n - w) + w²) / n²`.
    pub fn memory_ratio(&self) -> f64 {
        let n = self.rows as f64;
        let w = self.wing_width as f64;
        let stored = (self.bandwidth as f64 + 2.0 * w) * (n - w) + w * w;
        stored / (n * n)
    }

    /// Shape summary for reporting.
    pub fn layout(&self) -> ArrowLayout {
        ArrowLayout {
            rows: self.rows,
            band: self.band,
            wing_width: self.wing_width,
            memory_ratio: self.memory_ratio(),
        }
    }

    /// Reassembles the blocks into a sparse matrix.
    ///
    /// Before elimination this reproduces every non-zero entry of the
    /// source matrix (stored entries that cancelled to exactly zero are
    /// dropped); afterwards it yields the eliminated system.
    pub fn to_matrix(&self) -> SparrowResult<SparseMatrix> {
        let (n, m, w) = (self.rows, self.band_length(), self.wing_width);
        let mut matrix = SparseMatrix::new(n, n)?;

        for i in 0..m {
            for j in 0..self.bandwidth {
                // Column `i + j - band`, skipping positions outside [0, m).
                let Some(col) = (i + j).checked_sub(self.band) else {
                    continue;
                };
                if col < m {
                    matrix.assign(i + 1, col + 1, self.a(i, j))?;
                }
            }
        }
        for k in 0..w {
            for i in 0..m {
                matrix.assign(i + 1, m + k + 1, self.b(k, i))?;
                matrix.assign(m + k + 1, i + 1, self.c(k, i))?;
            }
            for l in 0..w {
                matrix.assign(m + k + 1, m + l + 1, self.d(k, l))?;
            }
        }
        Ok(matrix)
    }

    fn expect_stage(&self, expected: ArrowStage, operation: &str) -> SparrowResult<()> {
        if self.stage != expected {
            return Err(SparrowError::InvariantViolation(format!(
                "{operation} requires an arrow matrix in stage {expected:?}, found {:?}",
                self.stage
            )));
        }
        Ok(())
    }

    fn check_rhs(&self, len: usize) -> SparrowResult<()> {
        if len != self.rows {
            return Err(SparrowError::DimensionMismatch(format!(
                "Arrow matrix and rhs vector must have the same size ({} != {len})",
                self.rows
            )));
        }
        Ok(())
    }

    /// Forward elimination over the blocks, updating `u` in place.
    ///
    /// Each band pivot eliminates the sub-diagonal band entries below it
    /// and the matching bottom-wing column, carrying the row operation
    /// into the right wing, the corner and `u`. For `w > 1` the corner is
    /// then reduced to upper-triangular form.
    ///
    /// `u` is only written once elimination has succeeded.
    ///
    /// # Errors
    /// - `InvariantViolation` unless the stage is `Built`
    /// - `DimensionMismatch` if `u.len() != n`
    /// - `SingularMatrix` on an exactly-zero band or corner pivot; `u` is
    ///   unchanged, the blocks are left partially eliminated and the
    ///   stage becomes `Failed`
    pub fn eliminate(&mut self, u: &mut [f64]) -> SparrowResult<()> {
        self.expect_stage(ArrowStage::Built, "eliminate")?;
        self.check_rhs(u.len())?;

        let mut scratch = self.scratch_rhs(u)?;
        if let Err(e) = self
            .eliminate_band(&mut scratch)
            .and_then(|()| self.eliminate_corner(&mut scratch))
        {
            self.stage = ArrowStage::Failed;
            return Err(e);
        }
        u.copy_from_slice(&scratch);

        self.stage = ArrowStage::Eliminated;
        tracing::debug!(pivots = self.band_length(), "arrow elimination complete");
        Ok(())
    }

    fn scratch_rhs(&self, u: &[f64]) -> SparrowResult<Vec<f64>> {
        let mut scratch = zeroed(u.len(), 1, "rhs")?;
        scratch.copy_from_slice(u);
        Ok(scratch)
    }

    fn eliminate_band(&mut self, u: &mut [f64]) -> SparrowResult<()> {
        let (m, w) = (self.band_length(), self.wing_width);
        let (band, bw) = (self.band, self.bandwidth);

        for i in 0..m {
            let pivot = self.a[i * bw + band];
            if is_zero(pivot) {
                return Err(SparrowError::SingularMatrix { pivot: i });
            }

            for j in 1..=band {
                if i + j >= m {
                    break;
                }
                let below = self.a[(i + j) * bw + band - j];
                if is_zero(below) {
                    continue;
                }
                let gam = -below / pivot;
                u[i + j] += gam * u[i];
                for k in band..bw {
                    let delta = gam * self.a[i * bw + k];
                    self.a[(i + j) * bw + k - j] += delta;
                }
                for k in 0..w {
                    let delta = gam * self.b[k * m + i];
                    self.b[k * m + i + j] += delta;
                }
            }

            for j in 0..w {
                let below = self.c[j * m + i];
                if is_zero(below) {
                    continue;
                }
                let gam = -below / pivot;
                u[m + j] += gam * u[i];
                for k in band..bw {
                    let col = i + k - band;
                    if col < m {
                        self.c[j * m + col] += gam * self.a[i * bw + k];
                    }
                }
                for k in 0..w {
                    self.d[j * w + k] += gam * self.b[k * m + i];
                }
            }
        }
        Ok(())
    }

    fn eliminate_corner(&mut self, u: &mut [f64]) -> SparrowResult<()> {
        let (m, w) = (self.band_length(), self.wing_width);
        if w <= 1 {
            return Ok(());
        }

        for i in 0..w {
            let pivot = self.d[i * w + i];
            if is_zero(pivot) {
                return Err(SparrowError::SingularMatrix { pivot: m + i });
            }
            for j in i + 1..w {
                let below = self.d[j * w + i];
                if is_zero(below) {
                    continue;
                }
                let gam = -below / pivot;
                u[m + j] += gam * u[m + i];
                for k in i..w {
                    let delta = gam * self.d[i * w + k];
                    self.d[j * w + k] += delta;
                }
            }
        }
        Ok(())
    }

    /// Back-substitution on an eliminated arrow matrix.
    ///
    /// Resolves the corner unknowns `x[m + w - 1] .. x[m]` bottom-up,
    /// then the band unknowns `x[m - 1] .. x[0]`. Returns the full
    /// solution of length `n`.
    ///
    /// # Errors
    /// - `InvariantViolation` unless the stage is `Eliminated`
    /// - `DimensionMismatch` if `u.len() != n`
    /// - `SingularMatrix` if the single corner pivot (`w == 1`) is zero
    pub fn back_substitute(&mut self, u: &[f64]) -> SparrowResult<Vec<f64>> {
        self.expect_stage(ArrowStage::Eliminated, "back_substitute")?;
        self.check_rhs(u.len())?;

        let (m, w) = (self.band_length(), self.wing_width);
        let (band, bw) = (self.band, self.bandwidth);
        let mut x = zeroed(self.rows, 1, "solution")?;

        for i in (0..w).rev() {
            let mut acc = u[m + i];
            for j in i + 1..w {
                acc -= self.d[i * w + j] * x[m + j];
            }
            let pivot = self.d[i * w + i];
            if is_zero(pivot) {
                return Err(SparrowError::SingularMatrix { pivot: m + i });
            }
            x[m + i] = acc / pivot;
        }

        for i in (0..m).rev() {
            let mut acc = u[i];
            for k in band + 1..bw {
                let col = i + k - band;
                if col < m {
                    acc -= self.a[i * bw + k] * x[col];
                }
            }
            for j in 0..w {
                acc -= self.b[j * m + i] * x[m + j];
            }
            x[i] = acc / self.a[i * bw + band];
        }

        self.stage = ArrowStage::Solved;
        Ok(x)
    }

    /// Eliminates and back-substitutes in one call.
    ///
    /// On success the blocks and `u` are left in their post-elimination
    /// state. On failure `u` is unchanged.
    pub fn solve(&mut self, u: &mut [f64]) -> SparrowResult<Vec<f64>> {
        self.check_rhs(u.len())?;
        let mut scratch = self.scratch_rhs(u)?;
        self.eliminate(&mut scratch)?;
        let x = self.back_substitute(&scratch)?;
        u.copy_from_slice(&scratch);
        Ok(x)
    }
}
