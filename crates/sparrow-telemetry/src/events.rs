//! Solver event types.
//!
//! Structured events emitted while a linear system is partitioned and
//! solved. Events are lightweight value types that carry just enough
//! data to be useful for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A solver event emitted by the engine.
///
/// Events are tagged with the index of the solve they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverEvent {
    /// Solve number (0-indexed, assigned by the caller).
    pub solve: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A solve started.
    SolveBegin {
        /// Solver method name.
        method: String,
        /// System dimension.
        rows: usize,
        /// Stored entries in the system matrix.
        nnz: usize,
    },

    /// A matrix was partitioned into arrow blocks.
    ArrowBuilt {
        /// System dimension.
        rows: usize,
        /// Band half-width.
        band: usize,
        /// Number of wing rows/columns.
        wing_width: usize,
        /// Arrow storage relative to a dense matrix.
        memory_ratio: f64,
    },

    /// Forward elimination finished.
    EliminationComplete {
        /// Number of band pivots processed.
        pivots: usize,
    },

    /// A solve finished.
    Solved {
        /// Solver method name.
        method: String,
        /// Relative residual `‖Ax − b‖∞ / ‖b‖∞`.
        relative_residual: f64,
        /// Wall-clock time for the solve (seconds).
        wall_time: f64,
    },

    /// The residual check rejected a solution.
    ResidualExceeded {
        /// Measured relative residual.
        residual: f64,
        /// Configured tolerance.
        tolerance: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SolverEvent {
    /// Creates a new event for the given solve.
    pub fn new(solve: u32, kind: EventKind) -> Self {
        Self { solve, kind }
    }
}
