//! # AKS — Deterministic Polynomial-Time Primality
//!
//! The Agrawal–Kayal–Saxena test: no randomness, polynomial in the bit
//! length of n. Stages, each a short-circuiting filter:
//!
//! 1. **Perfect-power check** — n = bᵉ with e ≥ 2 is composite.
//! 2. **Modulus search** — the smallest prime r whose multiplicative order
//!    of n exceeds b² (b = bit length). Scanning only primes (from the
//!    bounded sieve) keeps gcd structure trivial: a prime r either divides
//!    n outright — settling the verdict on the spot — or is coprime to it.
//! 3. **Small-factor filter** — gcd(a, n) for a up to min(r, n−1).
//! 4. **Small-n shortcut** — r ≥ n proves primality directly.
//! 5. **Polynomial congruence** — (X + a)ⁿ ≡ Xⁿ + a in Z_n[X]/(Xʳ − 1)
//!    for a = 1 … ⌊√φ(r)·b⌋, with φ(r) = r−1 since r is prime.
//!
//! The modulus scan runs below max(3, b⁵), the classical existence bound
//! for an order above b² (AKS 2004, Lemma 4.3); the scan grows the sieve
//! geometrically because the winning r almost always appears near b².
//!
//! ## Reference
//!
//! - M. Agrawal, N. Kayal, N. Saxena, "PRIMES is in P",
//!   Annals of Mathematics, 160(2):781–793, 2004.

use std::cmp::Ordering;

use anyhow::{bail, Result};
use rug::Integer;

use crate::arith;
use crate::sieve;

/// Deterministic AKS primality test.
///
/// Errors on a negative candidate; otherwise every call on the same n
/// returns the same verdict.
pub fn aks(n: &Integer) -> Result<bool> {
    if n.cmp0() == Ordering::Less {
        bail!("candidate must be non-negative, got {}", n);
    }
    if *n <= 1u32 {
        return Ok(false);
    }
    if n.is_perfect_power() {
        return Ok(false);
    }

    let bits = u64::from(n.significant_bits());
    let threshold = bits * bits;

    let r = match find_modulus(n, bits, threshold)? {
        ModulusSearch::Prime => return Ok(true),
        ModulusSearch::Composite => return Ok(false),
        ModulusSearch::Found(r) => r,
    };

    // Small-factor filter over a in [2, min(r, n-1)].
    let n_minus_1 = Integer::from(n - 1u32);
    let cap = if n_minus_1 < r {
        n_minus_1.to_u64().unwrap_or(r)
    } else {
        r
    };
    for a in 2..=cap {
        let a = Integer::from(a);
        if arith::gcd(&a, n)? > 1u32 && a < *n {
            return Ok(false);
        }
    }

    if *n <= r {
        return Ok(true);
    }

    let phi = r - 1;
    let a_limit = ((phi as f64).sqrt() * bits as f64).floor() as u64;
    for a in 1..=a_limit {
        if !poly_congruence_holds(n, r, a) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Outcome of the modulus scan.
enum ModulusSearch {
    /// Smallest prime r with ord_r(n) above the threshold.
    Found(u64),
    /// The scan reached a prime equal to n: n is prime.
    Prime,
    /// The scan hit a prime properly dividing n: n is composite.
    Composite,
}

/// Scan primes r ascending for the smallest with ord_r(n) > threshold.
///
/// The sieve bound starts near the threshold and doubles up to the b⁵
/// existence cap, so the common case never materializes the full table.
fn find_modulus(n: &Integer, bits: u64, threshold: u64) -> Result<ModulusSearch> {
    let cap = bits.saturating_pow(5).max(3);
    let mut bound = threshold.saturating_mul(4).clamp(3, cap);
    let mut scanned = 0u64;
    loop {
        for r in sieve::primes_up_to(bound) {
            if r <= scanned {
                continue;
            }
            if n.is_divisible(&Integer::from(r)) {
                return Ok(if *n == r {
                    ModulusSearch::Prime
                } else {
                    ModulusSearch::Composite
                });
            }
            if order_exceeds(residue(n, r), r, threshold) {
                return Ok(ModulusSearch::Found(r));
            }
        }
        if bound == cap {
            bail!(
                "no prime modulus below {} with multiplicative order above {}",
                cap,
                threshold
            );
        }
        scanned = bound;
        bound = bound.saturating_mul(2).min(cap);
    }
}

/// n mod m for non-negative n and positive m; the remainder fits u64.
fn residue(n: &Integer, m: u64) -> u64 {
    Integer::from(n % m).to_u64().unwrap_or(0)
}

/// Does the multiplicative order of `a` modulo `r` exceed `threshold`?
///
/// Walks a, a², a³, … with u128 intermediates, answering as soon as 1
/// appears. Callers guarantee gcd(a, r) = 1, so the order exists.
fn order_exceeds(a: u64, r: u64, threshold: u64) -> bool {
    let a = a % r;
    let mut x = 1u64;
    for _ in 1..=threshold {
        x = (x as u128 * a as u128 % r as u128) as u64;
        if x == 1 {
            return false;
        }
    }
    true
}

/// Check (X + a)ⁿ ≡ Xⁿ + a in Z_n[X]/(Xʳ − 1).
///
/// The right side is X^(n mod r) + a once exponents are folded; the left
/// side is computed by binary powering over the bits of n.
fn poly_congruence_holds(n: &Integer, r: u64, a: u64) -> bool {
    let r = r as usize;

    let mut base = vec![Integer::new(); r];
    base[0] = Integer::from(a) % n;
    base[1] += 1u32;
    let lhs = poly_pow_mod(&base, n, r, n);

    let mut rhs = vec![Integer::new(); r];
    rhs[residue(n, r as u64) as usize] += 1u32;
    rhs[0] += Integer::from(a) % n;
    rhs[0] %= n;

    lhs == rhs
}

/// Raise `base` to the power `exp` in Z_n[X]/(Xʳ − 1), binary method from
/// the most significant bit of `exp` down.
fn poly_pow_mod(base: &[Integer], exp: &Integer, r: usize, n: &Integer) -> Vec<Integer> {
    let mut result = vec![Integer::new(); r];
    result[0] = Integer::from(1u32);
    for i in (0..exp.significant_bits()).rev() {
        result = poly_mul_mod(&result, &result, r, n);
        if exp.get_bit(i) {
            result = poly_mul_mod(&result, base, r, n);
        }
    }
    result
}

/// Dense polynomial product with exponents folded mod r; coefficients are
/// accumulated unreduced (mpz_addmul) and taken mod n once per output slot.
fn poly_mul_mod(a: &[Integer], b: &[Integer], r: usize, n: &Integer) -> Vec<Integer> {
    let mut acc = vec![Integer::new(); r];
    for (i, ai) in a.iter().enumerate() {
        if ai.cmp0() == Ordering::Equal {
            continue;
        }
        for (j, bj) in b.iter().enumerate() {
            if bj.cmp0() == Ordering::Equal {
                continue;
            }
            acc[(i + j) % r] += ai * bj;
        }
    }
    for c in &mut acc {
        *c %= n;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aks_u(n: u64) -> bool {
        aks(&Integer::from(n)).unwrap()
    }

    // ── Verdicts ───────────────────────────────────────────────────────

    #[test]
    fn accepts_small_primes() {
        for p in [2u64, 3, 5, 7, 11, 13, 31, 97] {
            assert!(aks_u(p), "rejected prime {}", p);
        }
    }

    #[test]
    fn rejects_small_composites() {
        for c in [0u64, 1, 4, 6, 9, 15, 100, 561] {
            assert!(!aks_u(c), "accepted composite {}", c);
        }
    }

    /// Perfect powers must fall at the first filter, including prime powers
    /// that every later stage would be slow to refute.
    #[test]
    fn rejects_perfect_powers() {
        for c in [4u64, 8, 16, 27, 32, 49, 243, 1024, 3125] {
            assert!(!aks_u(c), "accepted perfect power {}", c);
        }
    }

    /// Full agreement with trial division across a contiguous range; this
    /// drives every stage including the polynomial congruence for the
    /// larger primes in the range.
    #[test]
    fn agrees_with_trial_division_up_to_200() {
        for n in 0u64..=200 {
            let expected = crate::trial_division::trial_division(&Integer::from(n)).unwrap();
            assert_eq!(aks_u(n), expected, "disagreement at {}", n);
        }
    }

    /// Determinism: no hidden state, identical verdicts on repeat calls.
    #[test]
    fn deterministic_on_repeat_calls() {
        for n in [2u64, 31, 91, 97, 561] {
            assert_eq!(aks_u(n), aks_u(n), "{}", n);
        }
    }

    /// A four-digit prime forces the real polynomial phase: r lands at 173
    /// and about 170 congruences are verified. The slowest test here by far.
    #[test]
    fn accepts_prime_7919() {
        assert!(aks_u(7919));
    }

    #[test]
    fn rejects_composite_7917() {
        // 7917 = 3 * 7 * 13 * 29 falls in the modulus scan
        assert!(!aks_u(7917));
    }

    #[test]
    fn rejects_negative_candidates() {
        assert!(aks(&Integer::from(-2)).is_err());
    }

    // ── Internals ──────────────────────────────────────────────────────

    #[test]
    fn order_exceeds_known_orders() {
        // ord_7(2) = 3, ord_7(3) = 6, ord_13(2) = 12
        assert!(!order_exceeds(2, 7, 3));
        assert!(order_exceeds(2, 7, 2));
        assert!(!order_exceeds(3, 7, 6));
        assert!(order_exceeds(3, 7, 5));
        assert!(order_exceeds(2, 13, 11));
        assert!(!order_exceeds(2, 13, 12));
    }

    #[test]
    fn poly_mul_mod_folds_exponents() {
        let n = Integer::from(97u32);
        // (X + 1)^2 = X^2 + 2X + 1 with r = 2 folds to 2X + 2
        let p = vec![Integer::from(1u32), Integer::from(1u32)];
        let got = poly_mul_mod(&p, &p, 2, &n);
        assert_eq!(got, vec![Integer::from(2u32), Integer::from(2u32)]);
    }

    #[test]
    fn poly_mul_mod_reduces_coefficients() {
        let n = Integer::from(5u32);
        // (3X + 4)^2 = 9X^2 + 24X + 16 -> mod (X^3 - 1, 5): 4X^2 + 4X + 1
        let p = vec![Integer::from(4u32), Integer::from(3u32), Integer::new()];
        let got = poly_mul_mod(&p, &p, 3, &n);
        assert_eq!(
            got,
            vec![Integer::from(1u32), Integer::from(4u32), Integer::from(4u32)]
        );
    }

    /// The congruence (X + a)^n ≡ X^n + a is Frobenius for prime n, and
    /// fails for composites once the earlier filters are bypassed.
    #[test]
    fn poly_congruence_separates_prime_from_composite() {
        assert!(poly_congruence_holds(&Integer::from(13u32), 5, 1));
        assert!(poly_congruence_holds(&Integer::from(13u32), 5, 2));
        assert!(!poly_congruence_holds(&Integer::from(15u32), 7, 1));
        assert!(!poly_congruence_holds(&Integer::from(21u32), 5, 2));
    }
}
