//! Benchmark scenarios: procedural arrow-structured systems.
//!
//! Three canonical systems for regression testing:
//! 1. **Tridiagonal**: pure band, no wings
//! 2. **Narrow arrow**: half-band 2 with a couple of wing rows
//! 3. **Wide arrow**: half-band 4 with a wide dense border
//!
//! Every matrix is strictly diagonally dominant by rows, so elimination
//! without pivoting never meets a zero pivot. Values are deterministic.

use serde::{Deserialize, Serialize};
use sparrow_matrix::SparseMatrix;
use sparrow_types::{SparrowError, SparrowResult};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Tridiagonal system, wing width 0.
    Tridiagonal,
    /// Half-band 2 with 2 wing rows/columns.
    NarrowArrow,
    /// Half-band 4 with 8 wing rows/columns.
    WideArrow,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::Tridiagonal,
            ScenarioKind::NarrowArrow,
            ScenarioKind::WideArrow,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Tridiagonal => "tridiagonal",
            ScenarioKind::NarrowArrow => "narrow_arrow",
            ScenarioKind::WideArrow => "wide_arrow",
        }
    }
}

/// A fully specified benchmark system.
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// System matrix.
    pub matrix: SparseMatrix,
    /// Right-hand side.
    pub rhs: Vec<f64>,
    /// Wing width handed to the arrow solver.
    pub wing_width: usize,
    /// Number of timed solves.
    pub repetitions: u32,
}

/// Builds an `n × n` arrow system with half-band `band` over the leading
/// `n - wing` rows and `wing` dense trailing rows/columns.
pub fn arrow_system(n: usize, band: usize, wing: usize) -> SparrowResult<SparseMatrix> {
    if wing >= n {
        return Err(SparrowError::DimensionMismatch(format!(
            "Wing width ({wing}) must be less than the system size ({n})"
        )));
    }
    let m = n - wing;
    let mut matrix = SparseMatrix::new(n, n)?;

    for i in 1..=m {
        let lo = i.saturating_sub(band).max(1);
        let hi = (i + band).min(m);
        for j in (lo..=hi).filter(|&j| j != i) {
            matrix.assign(i, j, -1.0 / (1.0 + ((3 * i + 5 * j) % 7) as f64))?;
        }
        for k in 0..wing {
            matrix.assign(i, m + k + 1, 0.5 / (1.0 + ((i + 2 * k) % 5) as f64))?;
            matrix.assign(m + k + 1, i, 0.5 / (1.0 + ((2 * i + k) % 3) as f64))?;
        }
    }
    for k in 0..wing {
        for l in (0..wing).filter(|&l| l != k) {
            matrix.assign(m + k + 1, m + l + 1, 0.1 * (1 + (k + l) % 4) as f64)?;
        }
    }

    for i in 1..=n {
        let off: f64 = matrix.row(i)?.value.iter().map(|v| v.abs()).sum();
        matrix.assign(i, i, off + 1.0 + (i % 4) as f64)?;
    }
    Ok(matrix)
}

/// Deterministic right-hand side of length `n`.
fn rhs(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 13) % 11) as f64 - 5.0).collect()
}

impl Scenario {
    fn build(kind: ScenarioKind, n: usize, band: usize, wing: usize) -> SparrowResult<Self> {
        Ok(Self {
            kind,
            matrix: arrow_system(n, band, wing)?,
            rhs: rhs(n),
            wing_width: wing,
            repetitions: 5,
        })
    }

    /// 400 unknowns, tridiagonal.
    pub fn tridiagonal() -> SparrowResult<Self> {
        Self::build(ScenarioKind::Tridiagonal, 400, 1, 0)
    }

    /// 300 unknowns, half-band 2, wing width 2.
    pub fn narrow_arrow() -> SparrowResult<Self> {
        Self::build(ScenarioKind::NarrowArrow, 300, 2, 2)
    }

    /// 200 unknowns, half-band 4, wing width 8.
    pub fn wide_arrow() -> SparrowResult<Self> {
        Self::build(ScenarioKind::WideArrow, 200, 4, 8)
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> SparrowResult<Self> {
        match kind {
            ScenarioKind::Tridiagonal => Self::tridiagonal(),
            ScenarioKind::NarrowArrow => Self::narrow_arrow(),
            ScenarioKind::WideArrow => Self::wide_arrow(),
        }
    }

    /// System dimension.
    pub fn size(&self) -> usize {
        self.matrix.number_of_rows()
    }
}
