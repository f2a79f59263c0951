//! # Compare — Timing Harness for the Four Tests
//!
//! Runs every test over a candidate list, measuring wall-clock time per
//! call, and renders the rows as an aligned table or JSON. Pure observer:
//! nothing in the test modules depends on this one.
//!
//! Trial division gets special treatment — it is O(√n), so candidates past
//! a digit cap skip it and report `None` instead of running unbounded.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use rug::rand::RandState;
use rug::Integer;
use serde::Serialize;
use tracing::info;

use crate::{aks, estimate_digits, exact_digits, fermat, miller_rabin, trial_division};

/// Built-in candidate list: known primes of increasing digit count, sized
/// so the deterministic AKS pass stays interactive. Larger runs should
/// supply their own list via `load_candidates`.
pub const DEFAULT_CANDIDATES: &[u64] = &[5, 97, 997, 7919];

/// One timed candidate; durations are seconds.
#[derive(Debug, Clone, Serialize)]
pub struct TimingRow {
    pub candidate: String,
    pub digits: u64,
    pub fermat_secs: f64,
    pub miller_rabin_secs: f64,
    pub aks_secs: f64,
    /// None when the candidate exceeded the trial-division digit cap.
    pub trial_division_secs: Option<f64>,
}

/// The built-in candidate list as integers.
pub fn default_candidates() -> Vec<Integer> {
    DEFAULT_CANDIDATES.iter().map(|&n| Integer::from(n)).collect()
}

/// Load a candidate list: one decimal integer per line, `#` comments and
/// blank lines skipped. Errors on unparseable or negative entries.
pub fn load_candidates(path: &Path) -> Result<Vec<Integer>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading candidate list {}", path.display()))?;
    let mut candidates = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let n = Integer::parse(line)
            .map(Integer::from)
            .map_err(|_| anyhow!("{}:{}: not an integer: {}", path.display(), lineno + 1, line))?;
        if n.cmp0() == Ordering::Less {
            bail!("{}:{}: negative candidate {}", path.display(), lineno + 1, n);
        }
        candidates.push(n);
    }
    if candidates.is_empty() {
        bail!("no candidates in {}", path.display());
    }
    Ok(candidates)
}

/// Time all four tests over the candidates.
///
/// `rounds` feeds the probabilistic tests; candidates whose estimated digit
/// count exceeds `td_max_digits` skip trial division.
pub fn run(
    candidates: &[Integer],
    rounds: u32,
    td_max_digits: u64,
    rng: &mut RandState,
) -> Result<Vec<TimingRow>> {
    let mut rows = Vec::with_capacity(candidates.len());
    for n in candidates {
        let digits = exact_digits(n);
        let (fermat_secs, fermat_verdict) = timed(|| fermat::fermat(n, rounds, rng))?;
        let (miller_rabin_secs, mr_verdict) = timed(|| miller_rabin::miller_rabin(n, rounds, rng))?;
        let (aks_secs, aks_verdict) = timed(|| aks::aks(n))?;
        let trial = if estimate_digits(n) <= td_max_digits {
            Some(timed(|| trial_division::trial_division(n))?)
        } else {
            None
        };

        info!(
            candidate = %n,
            digits,
            fermat = fermat_verdict,
            miller_rabin = mr_verdict,
            aks = aks_verdict,
            "timed candidate"
        );

        rows.push(TimingRow {
            candidate: n.to_string(),
            digits,
            fermat_secs,
            miller_rabin_secs,
            aks_secs,
            trial_division_secs: trial.map(|(secs, _)| secs),
        });
    }
    Ok(rows)
}

/// Print the aligned comparison table.
pub fn print_table(rows: &[TimingRow]) {
    println!(
        "{:<10} {:<10} {:<12} {:<10} {:<15}",
        "Digits", "Fermat", "Miller-Rabin", "AKS", "Trial Division"
    );
    for row in rows {
        let trial = row
            .trial_division_secs
            .map(|secs| format!("{:.6}", secs))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<10.6} {:<12.6} {:<10.6} {:<15}",
            row.digits, row.fermat_secs, row.miller_rabin_secs, row.aks_secs, trial
        );
    }
}

/// Write the rows as pretty-printed JSON for external plotting.
pub fn write_json(path: &Path, rows: &[TimingRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json).with_context(|| format!("writing timing rows to {}", path.display()))?;
    Ok(())
}

fn timed<T>(run: impl FnOnce() -> Result<T>) -> Result<(f64, T)> {
    let start = Instant::now();
    let value = run()?;
    Ok((start.elapsed().as_secs_f64(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn seeded() -> RandState<'static> {
        let mut rng = RandState::new();
        rng.seed(&Integer::from(99u32));
        rng
    }

    #[test]
    fn run_times_every_candidate() {
        let candidates = vec![Integer::from(2u32), Integer::from(97u32), Integer::from(100u32)];
        let rows = run(&candidates, 3, 10, &mut seeded()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].digits, 1);
        assert_eq!(rows[1].digits, 2);
        assert_eq!(rows[2].candidate, "100");
        for row in &rows {
            assert!(row.trial_division_secs.is_some(), "{} under the cap", row.candidate);
        }
    }

    #[test]
    fn run_caps_trial_division_by_digits() {
        let candidates = vec![Integer::from(7919u32)];
        let rows = run(&candidates, 2, 0, &mut seeded()).unwrap();
        assert!(rows[0].trial_division_secs.is_none());
    }

    #[test]
    fn default_candidates_are_all_prime() {
        for n in default_candidates() {
            assert!(trial_division::trial_division(&n).unwrap(), "{}", n);
        }
    }

    #[test]
    fn load_candidates_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# header").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  97  ").unwrap();
        writeln!(file, "561").unwrap();
        let candidates = load_candidates(file.path()).unwrap();
        assert_eq!(candidates, vec![Integer::from(97u32), Integer::from(561u32)]);
    }

    #[test]
    fn load_candidates_rejects_garbage_and_negatives() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not-a-number").unwrap();
        assert!(load_candidates(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-5").unwrap();
        assert!(load_candidates(file.path()).is_err());

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_candidates(file.path()).is_err());
    }

    #[test]
    fn write_json_roundtrips() {
        let candidates = vec![Integer::from(97u32)];
        let rows = run(&candidates, 2, 10, &mut seeded()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        write_json(&path, &rows).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed[0]["candidate"], "97");
        assert_eq!(parsed[0]["digits"], 2);
        assert!(parsed[0]["aks_secs"].is_f64());
    }
}
