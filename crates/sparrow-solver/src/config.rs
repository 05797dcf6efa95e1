//! Solver configuration.
//!
//! Selects the linear solver and the post-solve residual check. Loaded
//! from TOML by the CLI; every field has a default so partial files work.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sparrow_types::constants::{DEFAULT_RESIDUAL_TOLERANCE, DEFAULT_WING_WIDTH};
use sparrow_types::{SparrowError, SparrowResult};

/// Which direct solver to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethod {
    /// Banded arrow elimination.
    Arrow,
    /// Dense partial-pivoting LU.
    DenseLu,
}

impl SolverMethod {
    /// Stable name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::DenseLu => "dense_lu",
        }
    }
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverMethod {
    type Err = SparrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrow" => Ok(Self::Arrow),
            "dense_lu" | "dense" | "lu" => Ok(Self::DenseLu),
            other => Err(SparrowError::InvalidConfig(format!(
                "Unknown solver method '{other}' (expected 'arrow' or 'dense_lu')"
            ))),
        }
    }
}

/// Configuration for [`solve_system`](crate::system::solve_system).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Solver to dispatch to.
    pub method: SolverMethod,

    /// Number of trailing wing rows/columns for the arrow solver.
    /// Ignored by the dense solver.
    pub wing_width: usize,

    /// Whether to reject solutions whose relative residual exceeds
    /// `residual_tolerance`.
    pub check_residual: bool,

    /// Maximum accepted `‖Ax − b‖∞ / ‖b‖∞`.
    pub residual_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: SolverMethod::DenseLu,
            wing_width: DEFAULT_WING_WIDTH,
            check_residual: false,
            residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Arrow solver with the given wing width and residual checking on.
    pub fn arrow(wing_width: usize) -> Self {
        Self {
            method: SolverMethod::Arrow,
            wing_width,
            check_residual: true,
            ..Default::default()
        }
    }

    /// Dense LU with residual checking on.
    pub fn reference() -> Self {
        Self {
            method: SolverMethod::DenseLu,
            check_residual: true,
            ..Default::default()
        }
    }

    /// Checks the configuration for values no solve could accept.
    pub fn validate(&self) -> SparrowResult<()> {
        if !self.residual_tolerance.is_finite() || self.residual_tolerance <= 0.0 {
            return Err(SparrowError::InvalidConfig(format!(
                "residual_tolerance must be a positive finite number, got {}",
                self.residual_tolerance
            )));
        }
        Ok(())
    }
}
