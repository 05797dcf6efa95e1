//! CLI command implementations.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use sparrow_bench::metrics::BenchmarkMetrics;
use sparrow_bench::runner::BenchmarkRunner;
use sparrow_bench::scenarios::{Scenario, ScenarioKind};
use sparrow_io::contract::{MatrixDocument, MatrixFormat, VectorDocument};
use sparrow_io::text::{read_matrix, read_vector, write_matrix, write_vector};
use sparrow_io::validator::{validate_document, validate_vector};
use sparrow_matrix::SparseMatrix;
use sparrow_solver::arrow::ArrowMatrix;
use sparrow_solver::config::{SolverConfig, SolverMethod};
use sparrow_solver::system::solve_system;
use sparrow_telemetry::sinks::TracingSink;
use sparrow_telemetry::EventBus;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn is_json(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Loads a matrix from a JSON document or a text dump.
fn load_matrix(path: &str) -> Result<SparseMatrix, Box<dyn std::error::Error>> {
    if is_json(path) {
        let content = std::fs::read_to_string(path)?;
        Ok(MatrixDocument::from_json(&content)?.into_matrix()?)
    } else {
        let reader = BufReader::new(File::open(path)?);
        Ok(read_matrix(reader, None)?)
    }
}

fn load_vector(path: &str) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    if is_json(path) {
        let content = std::fs::read_to_string(path)?;
        let doc = VectorDocument::from_json(&content)?;
        validate_vector(&doc, None)?;
        Ok(doc.values)
    } else {
        Ok(read_vector(BufReader::new(File::open(path)?))?)
    }
}

/// Opens `path` for writing, or stdout.
fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}

/// Arguments of the `solve` command.
pub struct SolveArgs<'a> {
    pub matrix_path: &'a str,
    pub rhs_path: &'a str,
    pub config_path: Option<&'a str>,
    pub method: Option<&'a str>,
    pub wing_width: Option<usize>,
    pub check_residual: bool,
    pub output_path: Option<&'a str>,
}

/// Solve a linear system.
pub fn solve(args: &SolveArgs<'_>) -> CommandResult {
    let mut config = match args.config_path {
        Some(path) => toml::from_str::<SolverConfig>(&std::fs::read_to_string(path)?)?,
        None => SolverConfig::default(),
    };
    if let Some(method) = args.method {
        config.method = method.parse::<SolverMethod>()?;
    }
    if let Some(wing_width) = args.wing_width {
        config.wing_width = wing_width;
    }
    config.check_residual |= args.check_residual;

    let matrix = load_matrix(args.matrix_path)?;
    let rhs = load_vector(args.rhs_path)?;
    tracing::info!(
        rows = matrix.number_of_rows(),
        nnz = matrix.number_of_elements(),
        method = %config.method,
        wing_width = config.wing_width,
        "solving system"
    );

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
    let report = solve_system(&matrix, &rhs, &config, Some(&bus));
    bus.finish();
    let report = report?;

    let mut out = open_output(args.output_path)?;
    write_vector(&mut out, &report.solution)?;
    out.flush()?;

    eprintln!(
        "Solved {} unknowns with {} in {:.3}ms (relative residual {:.3e})",
        report.solution.len(),
        report.method,
        report.wall_time * 1000.0,
        report.relative_residual
    );
    Ok(())
}

/// Convert a matrix to a JSON document or a text dump.
pub fn convert(input: &str, format: &str, cutoff: f64, output: Option<&str>) -> CommandResult {
    let matrix = load_matrix(input)?;
    let mut out = open_output(output)?;

    if format.eq_ignore_ascii_case("text") {
        let written = write_matrix(&mut out, &matrix, cutoff)?;
        tracing::info!(written, cutoff, "wrote text dump");
    } else {
        let format: MatrixFormat = format.parse()?;
        let doc = MatrixDocument::from_matrix(&matrix, format);
        writeln!(out, "{}", doc.to_json()?)?;
    }
    out.flush()?;
    Ok(())
}

/// Print structure statistics for a matrix.
pub fn inspect(path: &str, wing_width: usize) -> CommandResult {
    println!("sparrow Matrix Inspector");
    println!("────────────────────────");
    println!();

    let matrix = load_matrix(path)?;
    let (rows, cols) = (matrix.number_of_rows(), matrix.number_of_columns());
    let nnz = matrix.number_of_elements();
    println!("Dimensions:   {rows} × {cols}");
    println!("Non-zeros:    {nnz}");
    println!("Density:      {:.4e}", nnz as f64 / (rows as f64 * cols as f64));

    let diagonal = matrix.diagonal();
    let missing = diagonal.iter().filter(|v| **v == 0.0).count();
    println!("Zero diag:    {missing}");

    if let Some(max) = matrix.iter().map(|e| e.value.abs()).reduce(f64::max) {
        println!("Max |value|:  {max:.6e}");
    }

    if matrix.is_square() {
        match ArrowMatrix::build(&matrix, wing_width) {
            Ok(arrow) => {
                println!();
                println!("Arrow (wing width {wing_width}):");
                println!("  Band:         {}", arrow.band());
                println!("  Bandwidth:    {}", arrow.bandwidth());
                println!("  Band rows:    {}", arrow.band_length());
                println!("  Memory ratio: {:.4}", arrow.memory_ratio());
            }
            Err(e) => println!("Arrow:        unavailable ({e})"),
        }
    }
    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, repetitions: u32, output_path: Option<&str>) -> CommandResult {
    println!("sparrow Benchmark Suite");
    println!("═══════════════════════");
    println!();

    let kinds: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::all().iter().find(|k| k.name() == scenario_name) {
            Some(&kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                return Err(format!(
                    "Unknown scenario: '{scenario_name}'. Available: {}, all",
                    available.join(", ")
                )
                .into());
            }
        }
    };

    let mut all_metrics = Vec::new();
    for kind in kinds {
        let mut scenario = Scenario::from_kind(kind)?;
        scenario.repetitions = repetitions;

        println!(
            "Running: {} ({} unknowns, {} non-zeros, wing width {})",
            kind.name(),
            scenario.size(),
            scenario.matrix.number_of_elements(),
            scenario.wing_width,
        );

        let comparison =
            BenchmarkRunner::compare(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Arrow avg:     {:.3}ms", comparison.arrow.avg_solve_time * 1000.0);
        println!("  Dense LU avg:  {:.3}ms", comparison.dense.avg_solve_time * 1000.0);
        println!("  Speedup:       {:.1}×", comparison.speedup());
        println!("  Deviation:     {:.3e}", comparison.solution_deviation);
        println!();

        all_metrics.push(comparison.arrow);
        all_metrics.push(comparison.dense);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }
    Ok(())
}

/// Validate a config, document or text dump.
pub fn validate(path: &str) -> CommandResult {
    println!("sparrow Validator");
    println!("─────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        let config: SolverConfig = toml::from_str(&content)?;
        config.validate()?;
        println!("✅ Config is valid ({} solver).", config.method);
    } else if is_json(path) {
        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        if value.get("values").is_some() {
            println!("Validating vector document: {path}");
            let doc = VectorDocument::from_json(&content)?;
            validate_vector(&doc, None)?;
            println!("✅ Vector is valid ({} entries).", doc.values.len());
        } else {
            println!("Validating matrix document: {path}");
            let doc = MatrixDocument::from_json(&content)?;
            match validate_document(&doc) {
                Ok(()) => println!(
                    "✅ Matrix is valid ({}×{}, {} payload).",
                    doc.rows,
                    doc.cols,
                    doc.payload.format()
                ),
                Err(e) => {
                    println!("❌ Matrix validation failed: {e}");
                    return Err(e.into());
                }
            }
        }
    } else {
        println!("Validating text matrix: {path}");
        let matrix = load_matrix(path)?;
        println!(
            "✅ Matrix is valid ({}×{}, {} non-zeros).",
            matrix.number_of_rows(),
            matrix.number_of_columns(),
            matrix.number_of_elements()
        );
    }
    Ok(())
}
