//! Trial division: the exact, exponential-time baseline. O(√n) — callers
//! must impose a digit cap before handing it very large candidates (the
//! comparison harness does exactly that).

use std::cmp::Ordering;

use anyhow::{bail, Result};
use rug::Integer;

/// Exact primality by trial division.
///
/// Rejects n ≤ 1 and even n > 2 immediately, then tests every odd divisor
/// d = 3, 5, 7, … while d² ≤ n. Deterministic and always correct; runtime
/// is unbounded relative to the other tests, which is the caller's problem
/// to cap.
pub fn trial_division(n: &Integer) -> Result<bool> {
    if n.cmp0() == Ordering::Less {
        bail!("candidate must be non-negative, got {}", n);
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

    let mut d = Integer::from(3u32);
    while Integer::from(d.square_ref()) <= *n {
        if n.is_divisible(&d) {
            return Ok(false);
        }
        d += 2u32;
    }
    Ok(true)
}
