//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim: candidate
//! parsing, RNG construction, and the per-subcommand logic.

use std::cmp::Ordering;
use std::path::Path;

use anyhow::{anyhow, bail, Result};
use primelab::{aks, compare, exact_digits, fermat, miller_rabin, sieve, trial_division};
use rug::rand::RandState;
use rug::Integer;
use tracing::info;

use super::Cli;

/// Witness generator for the probabilistic tests, seeded when requested so
/// runs are reproducible.
fn new_rand_state(seed: Option<u64>) -> RandState<'static> {
    let mut rng = RandState::new();
    if let Some(seed) = seed {
        rng.seed(&Integer::from(seed));
    }
    rng
}

fn parse_candidate(text: &str) -> Result<Integer> {
    let n = Integer::parse(text.trim())
        .map(Integer::from)
        .map_err(|_| anyhow!("not a decimal integer: {}", text))?;
    if n.cmp0() == Ordering::Less {
        bail!("candidate must be non-negative, got {}", n);
    }
    Ok(n)
}

// ── Check ───────────────────────────────────────────────────────

/// Run one test (or all four) on a single candidate and print verdicts.
pub fn run_check(cli: &Cli, candidate: &str, algorithm: &str) -> Result<()> {
    let n = parse_candidate(candidate)?;
    let mut rng = new_rand_state(cli.seed);

    fn report(name: &str, verdict: bool, exact: bool) {
        let word = match (verdict, exact) {
            (true, true) => "prime",
            (true, false) => "probably prime",
            (false, _) => "composite",
        };
        println!("{}: {}", name, word);
    }

    match algorithm {
        "trial-division" => report("trial-division", trial_division::trial_division(&n)?, true),
        "fermat" => report("fermat", fermat::fermat(&n, cli.rounds, &mut rng)?, false),
        "miller-rabin" => report(
            "miller-rabin",
            miller_rabin::miller_rabin(&n, cli.rounds, &mut rng)?,
            false,
        ),
        "aks" => report("aks", aks::aks(&n)?, true),
        "all" => {
            if exact_digits(&n) <= cli.td_max_digits {
                report("trial-division", trial_division::trial_division(&n)?, true);
            } else {
                println!("trial-division: skipped (over {} digits)", cli.td_max_digits);
            }
            report("fermat", fermat::fermat(&n, cli.rounds, &mut rng)?, false);
            report(
                "miller-rabin",
                miller_rabin::miller_rabin(&n, cli.rounds, &mut rng)?,
                false,
            );
            report("aks", aks::aks(&n)?, true);
        }
        other => bail!(
            "unknown algorithm: {} (expected trial-division, fermat, miller-rabin, aks, or all)",
            other
        ),
    }
    Ok(())
}

// ── Compare ─────────────────────────────────────────────────────

/// Time all tests over a candidate list, print the table, export JSON.
pub fn run_compare(cli: &Cli, candidates: Option<&Path>, json: Option<&Path>) -> Result<()> {
    let candidates = match candidates {
        Some(path) => compare::load_candidates(path)?,
        None => compare::default_candidates(),
    };
    info!(
        candidates = candidates.len(),
        rounds = cli.rounds,
        "timing primality tests"
    );

    let mut rng = new_rand_state(cli.seed);
    let rows = compare::run(&candidates, cli.rounds, cli.td_max_digits, &mut rng)?;
    compare::print_table(&rows);

    if let Some(path) = json {
        compare::write_json(path, &rows)?;
        info!(path = %path.display(), "wrote timing rows");
    }
    Ok(())
}

// ── Sieve ───────────────────────────────────────────────────────

/// Print all primes up to `limit`, space-separated on one line.
pub fn run_sieve(limit: u64) -> Result<()> {
    let primes = sieve::primes_up_to(limit);
    let line = primes
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    Ok(())
}
