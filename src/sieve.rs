//! # Sieve — Bounded Prime Generation
//!
//! Sieve of Eratosthenes over a boolean table: mark a table of size n+1,
//! strike the multiples of each surviving p starting at p², for all p with
//! p² ≤ n. The output is the ascending list of all primes ≤ n.
//!
//! The AKS modulus search is the in-crate consumer: it scans sieve output
//! instead of all integers, so only prime moduli are ever order-checked.
//! Tables are rebuilt per call — nothing is cached between invocations.

/// Generate all primes up to `limit` (inclusive), ascending.
pub fn primes_up_to(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }

    let limit = limit as usize;
    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    is_prime[1] = false;

    let mut p = 2usize;
    while p * p <= limit {
        if is_prime[p] {
            let mut multiple = p * p;
            while multiple <= limit {
                is_prime[multiple] = false;
                multiple += p;
            }
        }
        p += 1;
    }

    let mut primes = Vec::with_capacity(estimate_prime_count(limit));
    for (i, &flag) in is_prime.iter().enumerate() {
        if flag {
            primes.push(i as u64);
        }
    }
    primes
}

/// Capacity hint from the prime counting function approximation.
fn estimate_prime_count(n: usize) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (1.3 * nf / nf.ln()) as usize
}
