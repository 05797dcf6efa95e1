//! # sparrow-bench
//!
//! Benchmark suite for the sparrow solvers.
//!
//! Provides 3 procedural arrow-structured systems, a runner that times
//! any [`LinearSolver`](sparrow_solver::LinearSolver) on them, an arrow
//! vs dense LU comparison, and CSV/JSON export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::{BenchmarkMetrics, Comparison};
pub use runner::BenchmarkRunner;
pub use scenarios::{arrow_system, Scenario, ScenarioKind};
