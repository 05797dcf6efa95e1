//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from running one solver on one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Solver name.
    pub solver: String,
    /// System dimension.
    pub rows: usize,
    /// Stored entries in the system matrix.
    pub nnz: usize,
    /// Arrow band half-width of the system.
    pub band: usize,
    /// Wing width used for the arrow partition.
    pub wing_width: usize,
    /// Arrow storage relative to dense storage.
    pub memory_ratio: f64,
    /// Number of timed solves.
    pub repetitions: u32,
    /// Total wall-clock time over all solves (seconds).
    pub total_wall_time: f64,
    /// Average solve time (seconds).
    pub avg_solve_time: f64,
    /// Minimum solve time.
    pub min_solve_time: f64,
    /// Maximum solve time.
    pub max_solve_time: f64,
    /// Relative residual of the last solution.
    pub relative_residual: f64,
}

impl BenchmarkMetrics {
    /// CSV header line.
    pub fn to_csv_header() -> String {
        "scenario,solver,rows,nnz,band,wing_width,memory_ratio,repetitions,total_wall_time_s,avg_solve_ms,min_solve_ms,max_solve_ms,relative_residual".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.4},{},{:.6},{:.4},{:.4},{:.4},{:.3e}",
            self.scenario,
            self.solver,
            self.rows,
            self.nnz,
            self.band,
            self.wing_width,
            self.memory_ratio,
            self.repetitions,
            self.total_wall_time,
            self.avg_solve_time * 1000.0,
            self.min_solve_time * 1000.0,
            self.max_solve_time * 1000.0,
            self.relative_residual,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}

/// Arrow and dense LU run side by side on the same scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Arrow solver metrics.
    pub arrow: BenchmarkMetrics,
    /// Dense LU metrics.
    pub dense: BenchmarkMetrics,
    /// `max |x_arrow − x_dense| / max(1, ‖x_dense‖∞)`.
    pub solution_deviation: f64,
}

impl Comparison {
    /// Dense time over arrow time; above 1 means the arrow solver won.
    pub fn speedup(&self) -> f64 {
        if self.arrow.avg_solve_time > 0.0 {
            self.dense.avg_solve_time / self.arrow.avg_solve_time
        } else {
            f64::INFINITY
        }
    }
}
