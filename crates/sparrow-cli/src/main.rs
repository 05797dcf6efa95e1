//! sparrow CLI: solving, converting and benchmarking sparse systems.

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod commands;

#[derive(Parser)]
#[command(name = "sparrow")]
#[command(version, about = "sparrow: sparse matrix store, converters and arrow solver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve A·x = b.
    Solve {
        /// Matrix file (.json document or `row col value` text).
        #[arg(short, long)]
        matrix: String,

        /// Right-hand side (.json vector document or one value per line).
        #[arg(short, long)]
        rhs: String,

        /// Solver config (TOML). Flags below override it.
        #[arg(short, long)]
        config: Option<String>,

        /// Solver method (arrow, dense_lu).
        #[arg(long)]
        method: Option<String>,

        /// Wing width for the arrow solver.
        #[arg(short, long)]
        wing_width: Option<usize>,

        /// Reject solutions whose relative residual exceeds the tolerance.
        #[arg(long)]
        check_residual: bool,

        /// Output file for the solution (stdout if omitted).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Convert a matrix between text and JSON layouts.
    Convert {
        /// Input matrix file.
        input: String,

        /// Target layout (coo, csr, yale, text).
        #[arg(short, long, default_value = "csr")]
        format: String,

        /// Drop entries with |value| <= cutoff (text output only).
        #[arg(long, default_value_t = sparrow_types::constants::DEFAULT_DUMP_CUTOFF)]
        cutoff: f64,

        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print structure statistics for a matrix.
    Inspect {
        /// Matrix file.
        path: String,

        /// Wing width used for the arrow statistics.
        #[arg(short, long, default_value_t = 0)]
        wing_width: usize,
    },

    /// Compare the arrow solver with dense LU on procedural systems.
    Benchmark {
        /// Which scenario to run (tridiagonal, narrow_arrow, wide_arrow, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Timed solves per scenario and solver.
        #[arg(long, default_value_t = 5)]
        repetitions: u32,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a solver config, matrix document or text dump.
    Validate {
        /// Path to a .toml config, .json document or text matrix.
        path: String,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve {
            matrix,
            rhs,
            config,
            method,
            wing_width,
            check_residual,
            output,
        } => commands::solve(&commands::SolveArgs {
            matrix_path: &matrix,
            rhs_path: &rhs,
            config_path: config.as_deref(),
            method: method.as_deref(),
            wing_width,
            check_residual,
            output_path: output.as_deref(),
        }),
        Commands::Convert {
            input,
            format,
            cutoff,
            output,
        } => commands::convert(&input, &format, cutoff, output.as_deref()),
        Commands::Inspect { path, wing_width } => commands::inspect(&path, wing_width),
        Commands::Benchmark {
            scenario,
            repetitions,
            output,
        } => commands::benchmark(&scenario, repetitions, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
