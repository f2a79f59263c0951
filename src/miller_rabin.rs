//! # Miller-Rabin — Strong Probable-Prime Test
//!
//! Strengthens Fermat by examining the square-root chain: write
//! n−1 = 2^t · s with s odd, compute v = a^s mod n, and demand that the
//! sequence v, v², v⁴, … reach 1 only through −1. A composite n passes a
//! single round with probability at most 1/4 for uniformly drawn witnesses,
//! so k rounds bound the false-positive probability by 4^−k — which is why
//! witness selection must stay uniform over [2, n−2] and must not be
//! replaced by a weaker scheme. A prime is never rejected.

use std::cmp::Ordering;

use anyhow::{bail, Result};
use rug::rand::RandState;
use rug::Integer;

use crate::arith::{draw_witness, mod_pow};

/// Probabilistic Miller-Rabin primality test with `rounds` independent
/// witnesses drawn from the caller's `rng`.
///
/// Errors on a negative candidate or rounds = 0. A false result is certain
/// compositeness; a true result is wrong with probability at most 4^−rounds.
pub fn miller_rabin(n: &Integer, rounds: u32, rng: &mut RandState) -> Result<bool> {
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

    // n - 1 = 2^t * s with s odd; t >= 1 since n is odd and >= 5
    let n_minus_1 = Integer::from(n - 1u32);
    let mut s = n_minus_1.clone();
    let mut t = 0u32;
    while s.is_even() {
        s >>= 1;
        t += 1;
    }

    for _ in 0..rounds {
        let a = draw_witness(n, rng);
        let mut v = mod_pow(&a, &s, n)?;
        if v == 1u32 || v == n_minus_1 {
            continue;
        }
        let mut composite = true;
        for _ in 0..t - 1 {
            v.square_mut();
            v %= n;
            if v == n_minus_1 {
                composite = false;
                break;
            }
        }
        if composite {
            return Ok(false);
        }
    }
    Ok(true)
}
