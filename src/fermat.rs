//! Fermat test: k rounds of a^(n−1) ≡ 1 (mod n) for random witnesses a.
//!
//! A false verdict is certain compositeness; a true verdict is only
//! "probably prime". Carmichael numbers (561 = 3·11·17 is the smallest)
//! satisfy the congruence for every base coprime to n, so this family
//! carries no error bound — that is Miller-Rabin's job.

use std::cmp::Ordering;

use anyhow::{bail, Result};
use rug::rand::RandState;
use rug::Integer;

use crate::arith::{draw_witness, mod_pow};

/// Probabilistic Fermat primality test with `rounds` independent witnesses.
///
/// Witnesses are drawn uniformly from [2, n−2] via the caller's `rng`.
/// Errors on a negative candidate or rounds = 0.
pub fn fermat(n: &Integer, rounds: u32, rng: &mut RandState) -> Result<bool> {
    if n.cmp0() == Ordering::Less {
        bail!("candidate must be non-negative, got {}", n);
    }
    if rounds == 0 {
        bail!("at least one round is required");
    }
    if *n <= 1u32 {
        return Ok(false);
    }
    if *n == 2u32 || *n == 3u32 {
        return Ok(true);
    }
    if n.is_even() {
        return Ok(false);
    }

    let n_minus_1 = Integer::from(n - 1u32);
    for _ in 0..rounds {
        let a = draw_witness(n, rng);
        if mod_pow(&a, &n_minus_1, n)? != 1u32 {
            return Ok(false);
        }
    }
    Ok(true)
}
