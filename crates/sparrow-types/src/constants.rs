//! Numeric defaults shared across crates.

/// Default wing width for the arrow solver. Zero means a pure band matrix.
pub const DEFAULT_WING_WIDTH: usize = 0;

/// Default relative residual tolerance used by the system-solve driver.
pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1.0e-8;

/// Default magnitude cutoff for the plain-text dump. Entries with
/// `|value| <= cutoff` are skipped.
pub const DEFAULT_DUMP_CUTOFF: f64 = 0.0;

/// Floor applied to the right-hand-side norm when computing a relative
/// residual, so an all-zero RHS does not divide by zero.
pub const RESIDUAL_NORM_FLOOR: f64 = 1.0e-300;
