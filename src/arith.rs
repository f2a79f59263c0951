//! # Arith — Shared Modular Arithmetic over Arbitrary-Precision Integers
//!
//! The primitives every primality test is built on:
//!
//! 1. **Modular exponentiation** (`mod_pow`) by the binary square-and-multiply
//!    method — intermediates never exceed modulus², regardless of exponent size.
//! 2. **Greatest common divisor** (`gcd`) via the iterative Euclidean algorithm.
//!    Iterative on purpose: recursion depth would be unbounded on adversarial
//!    inputs.
//! 3. **Witness drawing** (`draw_witness`) for the probabilistic tests — a
//!    uniform draw from [2, n−2] against a caller-supplied `RandState`, never
//!    ambient randomness, so seeded runs reproduce exactly.

use std::cmp::Ordering;

use anyhow::{bail, Result};
use rug::rand::RandState;
use rug::Integer;

/// Modular exponentiation: base^exponent mod modulus.
///
/// Binary method: one squaring per exponent bit, one extra multiply per set
/// bit, reducing after every step so no intermediate exceeds modulus².
/// Errors when modulus is not positive or when base/exponent are negative.
pub fn mod_pow(base: &Integer, exponent: &Integer, modulus: &Integer) -> Result<Integer> {
    if base.cmp0() == Ordering::Less || exponent.cmp0() == Ordering::Less {
        bail!("mod_pow requires non-negative base and exponent");
    }
    if modulus.cmp0() != Ordering::Greater {
        bail!("mod_pow requires a positive modulus, got {}", modulus);
    }
    if *modulus == 1u32 {
        return Ok(Integer::new());
    }

    let mut base = Integer::from(base % modulus);
    let mut exp = exponent.clone();
    let mut result = Integer::from(1u32);
    while exp.cmp0() == Ordering::Greater {
        if exp.is_odd() {
            result *= &base;
            result %= modulus;
        }
        base.square_mut();
        base %= modulus;
        exp >>= 1;
    }
    Ok(result)
}

/// Greatest common divisor of two non-negative integers, iterative Euclid.
///
/// Loop invariant after the initial swap: a >= b >= 0. gcd(0, 0) = 0.
pub fn gcd(a: &Integer, b: &Integer) -> Result<Integer> {
    if a.cmp0() == Ordering::Less || b.cmp0() == Ordering::Less {
        bail!("gcd is defined here for non-negative inputs only");
    }
    let mut a = a.clone();
    let mut b = b.clone();
    if a < b {
        std::mem::swap(&mut a, &mut b);
    }
    while b.cmp0() != Ordering::Equal {
        let r = Integer::from(&a % &b);
        a = b;
        b = r;
    }
    Ok(a)
}

/// Uniform witness in [2, n−2] for one round of a probabilistic test.
///
/// Callers guarantee n >= 5, so the range is non-empty. The draw comes from
/// the caller's `RandState`, which keeps witness sequences reproducible
/// under a fixed seed.
pub(crate) fn draw_witness(n: &Integer, rng: &mut RandState) -> Integer {
    Integer::from(n - 3u32).random_below(rng) + 2u32
}
