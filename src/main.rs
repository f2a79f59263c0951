//! # Main — CLI Entry Point
//!
//! Routes subcommands to the execution functions in `cli.rs`.
//!
//! ## Subcommands
//!
//! - `check`: run one test (or all four) on a single candidate.
//! - `compare`: time every test across a candidate list, print the table,
//!   optionally export JSON for plotting.
//! - `sieve`: print all primes up to a limit.
//!
//! ## Global Options
//!
//! - `--rounds`: witness rounds for the probabilistic tests (default 15).
//! - `--seed` / `PRIMELAB_SEED`: seed the witness generator for
//!   reproducible runs.
//! - `--td-max-digits`: digit cap before trial division is skipped.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "primelab", about = "Compare primality tests on arbitrary-precision integers")]
struct Cli {
    /// Witness rounds for the probabilistic tests (higher = more certain but slower)
    #[arg(long, default_value_t = 15)]
    rounds: u32,

    /// Seed for the witness generator; unseeded (non-reproducible) if absent
    #[arg(long, env = "PRIMELAB_SEED")]
    seed: Option<u64>,

    /// Skip trial division for candidates with more decimal digits than this
    #[arg(long, default_value_t = 10)]
    td_max_digits: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test a single candidate for primality
    Check {
        /// Candidate integer (decimal)
        n: String,
        /// Test to run: trial-division, fermat, miller-rabin, aks, or all
        #[arg(long, default_value = "all")]
        algorithm: String,
    },
    /// Time every test across a candidate list and print a comparison table
    Compare {
        /// File with one decimal candidate per line (built-in list if absent)
        #[arg(long)]
        candidates: Option<PathBuf>,
        /// Also write the timing rows as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print all primes up to a limit
    Sieve {
        /// Upper bound (inclusive)
        limit: u64,
    },
}

fn main() -> Result<()> {
    // Initialize structured logging: LOG_FORMAT=json for machine consumers, human-readable otherwise
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_target(false).init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    match &cli.command {
        Commands::Check { n, algorithm } => cli::run_check(&cli, n, algorithm),
        Commands::Compare { candidates, json } => {
            cli::run_compare(&cli, candidates.as_deref(), json.as_deref())
        }
        Commands::Sieve { limit } => cli::run_sieve(*limit),
    }
}
