//! System-solve driver.
//!
//! Dispatches a linear system to the solver named by [`SolverConfig`],
//! measures the relative residual of the result, and reports events to
//! an optional [`EventBus`].

use std::time::Instant;

use sparrow_matrix::SparseMatrix;
use sparrow_telemetry::{EventBus, EventKind, SolverEvent};
use sparrow_types::constants::RESIDUAL_NORM_FLOOR;
use sparrow_types::{SparrowError, SparrowResult};

use crate::config::{SolverConfig, SolverMethod};
use crate::dense::DenseLuSolver;
use crate::strategy::{ArrowSolver, LinearSolver};

/// Outcome of a successful solve.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Solution vector `x`.
    pub solution: Vec<f64>,
    /// Solver that produced it.
    pub method: SolverMethod,
    /// `‖Ax − b‖∞ / max(‖b‖∞, ε)`.
    pub relative_residual: f64,
    /// Wall-clock time for the solve (seconds), residual check excluded.
    pub wall_time: f64,
}

/// Relative residual `‖Ax − b‖∞ / max(‖b‖∞, ε)`.
pub fn relative_residual(matrix: &SparseMatrix, x: &[f64], rhs: &[f64]) -> SparrowResult<f64> {
    let ax = matrix.mat_vec(x)?;
    if ax.len() != rhs.len() {
        return Err(SparrowError::DimensionMismatch(format!(
            "RHS length ({}) != number of rows ({})",
            rhs.len(),
            ax.len()
        )));
    }
    let residual = ax
        .iter()
        .zip(rhs)
        .map(|(l, r)| (l - r).abs())
        .fold(0.0_f64, f64::max);
    let scale = rhs.iter().map(|v| v.abs()).fold(0.0_f64, f64::max);
    Ok(residual / scale.max(RESIDUAL_NORM_FLOOR))
}

/// Stateful driver that numbers its solves for telemetry.
pub struct SystemSolver {
    config: SolverConfig,
    solves: u32,
}

impl SystemSolver {
    /// Creates a driver after validating `config`.
    pub fn new(config: SolverConfig) -> SparrowResult<Self> {
        config.validate()?;
        Ok(Self { config, solves: 0 })
    }

    /// Configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of solves attempted so far.
    pub fn solve_count(&self) -> u32 {
        self.solves
    }

    /// Solves `matrix · x = rhs`. Neither input is modified.
    ///
    /// # Errors
    /// Any solver error, or `SolverDivergence` when residual checking is
    /// enabled and the relative residual exceeds the tolerance.
    pub fn solve(
        &mut self,
        matrix: &SparseMatrix,
        rhs: &[f64],
        bus: Option<&EventBus>,
    ) -> SparrowResult<SolveReport> {
        let index = self.solves;
        self.solves += 1;
        let emit = |kind: EventKind| {
            if let Some(bus) = bus {
                bus.emit(SolverEvent::new(index, kind));
            }
        };

        let method = self.config.method;
        emit(EventKind::SolveBegin {
            method: method.to_string(),
            rows: matrix.number_of_rows(),
            nnz: matrix.number_of_elements(),
        });

        let start = Instant::now();
        let solution = match method {
            SolverMethod::Arrow => {
                let mut solver = ArrowSolver::new(self.config.wing_width);
                let result = solver.solve(matrix, rhs);
                if let Some(layout) = solver.last_layout() {
                    emit(EventKind::ArrowBuilt {
                        rows: layout.rows,
                        band: layout.band,
                        wing_width: layout.wing_width,
                        memory_ratio: layout.memory_ratio,
                    });
                }
                let solution = result?;
                emit(EventKind::EliminationComplete {
                    pivots: matrix.number_of_rows() - self.config.wing_width,
                });
                solution
            }
            SolverMethod::DenseLu => DenseLuSolver::new().solve(matrix, rhs)?,
        };
        let wall_time = start.elapsed().as_secs_f64();

        let relative_residual = relative_residual(matrix, &solution, rhs)?;
        let tolerance = self.config.residual_tolerance;
        let rejected = relative_residual.is_nan() || relative_residual > tolerance;
        if self.config.check_residual && rejected {
            tracing::warn!(
                method = %method,
                residual = relative_residual,
                tolerance,
                "solution rejected by residual check"
            );
            emit(EventKind::ResidualExceeded {
                residual: relative_residual,
                tolerance,
            });
            return Err(SparrowError::SolverDivergence {
                residual: relative_residual,
                tolerance,
            });
        }

        emit(EventKind::Solved {
            method: method.to_string(),
            relative_residual,
            wall_time,
        });
        tracing::debug!(method = %method, relative_residual, wall_time, "system solved");

        Ok(SolveReport {
            solution,
            method,
            relative_residual,
            wall_time,
        })
    }
}

/// One-shot solve of `matrix · x = rhs` with `config`.
pub fn solve_system(
    matrix: &SparseMatrix,
    rhs: &[f64],
    config: &SolverConfig,
    bus: Option<&EventBus>,
) -> SparrowResult<SolveReport> {
    SystemSolver::new(config.clone())?.solve(matrix, rhs, bus)
}
