//! Benchmark runner: executes scenarios with a solver and collects metrics.

use std::time::Instant;

use sparrow_solver::arrow::ArrowMatrix;
use sparrow_solver::dense::DenseLuSolver;
use sparrow_solver::strategy::{ArrowSolver, LinearSolver};
use sparrow_solver::system::relative_residual;
use sparrow_types::SparrowResult;

use crate::metrics::{BenchmarkMetrics, Comparison};
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Solves a scenario `repetitions` times with the given solver.
    ///
    /// Returns metrics plus the last solution.
    pub fn run_with_solution(
        scenario: &Scenario,
        solver: &mut dyn LinearSolver,
    ) -> SparrowResult<(BenchmarkMetrics, Vec<f64>)> {
        let layout = ArrowMatrix::build(&scenario.matrix, scenario.wing_width)?.layout();

        let repetitions = scenario.repetitions.max(1);
        let mut solve_times: Vec<f64> = Vec::with_capacity(repetitions as usize);
        let mut solution = Vec::new();

        let total_start = Instant::now();
        for _ in 0..repetitions {
            let start = Instant::now();
            solution = solver.solve(&scenario.matrix, &scenario.rhs)?;
            solve_times.push(start.elapsed().as_secs_f64());
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let residual = relative_residual(&scenario.matrix, &solution, &scenario.rhs)?;
        let avg = solve_times.iter().sum::<f64>() / solve_times.len() as f64;
        let min = solve_times.iter().copied().fold(f64::MAX, f64::min);
        let max = solve_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            solver: solver.name().to_string(),
            rows: scenario.size(),
            nnz: scenario.matrix.number_of_elements(),
            band: layout.band,
            wing_width: layout.wing_width,
            memory_ratio: layout.memory_ratio,
            repetitions,
            total_wall_time,
            avg_solve_time: avg,
            min_solve_time: min,
            max_solve_time: max,
            relative_residual: residual,
        };
        Ok((metrics, solution))
    }

    /// Run a single scenario with the given solver.
    pub fn run(
        scenario: &Scenario,
        solver: &mut dyn LinearSolver,
    ) -> SparrowResult<BenchmarkMetrics> {
        Self::run_with_solution(scenario, solver).map(|(metrics, _)| metrics)
    }

    /// Runs the arrow solver and dense LU on the same scenario.
    pub fn compare(scenario: &Scenario) -> SparrowResult<Comparison> {
        let mut arrow_solver = ArrowSolver::new(scenario.wing_width);
        let (arrow, x_arrow) = Self::run_with_solution(scenario, &mut arrow_solver)?;
        let (dense, x_dense) = Self::run_with_solution(scenario, &mut DenseLuSolver::new())?;

        let scale = x_dense.iter().map(|v| v.abs()).fold(1.0_f64, f64::max);
        let deviation = x_arrow
            .iter()
            .zip(&x_dense)
            .map(|(a, d)| (a - d).abs())
            .fold(0.0_f64, f64::max);

        Ok(Comparison {
            arrow,
            dense,
            solution_deviation: deviation / scale,
        })
    }

    /// Compare both solvers on every scenario.
    pub fn compare_all() -> SparrowResult<Vec<Comparison>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind)?;
            results.push(Self::compare(&scenario)?);
        }
        Ok(results)
    }
}
