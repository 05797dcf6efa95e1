//! # sparrow-solver
//!
//! Direct solvers for sparse linear systems.
//!
//! ## Key Types
//!
//! - [`ArrowMatrix`] — band/wing/corner partition with in-place elimination
//! - [`LinearSolver`] — pluggable solver trait
//! - [`ArrowSolver`] — arrow elimination behind the solver trait
//! - [`DenseLuSolver`] — faer partial-pivoting LU fallback
//! - [`SolverConfig`] — solver selection and residual checking
//! - [`solve_system`] — config-driven dispatch with residual check and telemetry

pub mod arrow;
pub mod config;
pub mod dense;
pub mod strategy;
pub mod system;

pub use arrow::{ArrowLayout, ArrowMatrix, ArrowStage};
pub use config::{SolverConfig, SolverMethod};
pub use dense::DenseLuSolver;
pub use strategy::{ArrowSolver, LinearSolver};
pub use system::{relative_residual, solve_system, SolveReport, SystemSolver};
