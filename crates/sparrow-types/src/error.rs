//! Error types for the sparrow engine.
//!
//! All crates return `SparrowResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the sparrow engine.
#[derive(Debug, Error)]
pub enum SparrowError {
    /// A 1-based coordinate lies outside the matrix.
    #[error("Invalid index ({row}, {col}) for a {rows}×{cols} matrix")]
    InvalidIndex {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Vector length, block size or matrix shape does not fit the operation.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A working buffer could not be allocated.
    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    /// Elimination met an exact-zero pivot (0-based position in the system).
    #[error("Singular matrix: zero pivot at position {pivot}")]
    SingularMatrix { pivot: usize },

    /// Input document or text stream is malformed.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The computed solution does not satisfy the system to tolerance.
    #[error("Solution residual {residual:.2e} exceeds tolerance {tolerance:.2e}")]
    SolverDivergence {
        residual: f64,
        tolerance: f64,
    },

    /// An operation was called out of order (e.g. back-substitution
    /// before elimination).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, SparrowError>`.
pub type SparrowResult<T> = Result<T, SparrowError>;
