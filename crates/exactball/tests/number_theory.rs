//! Smooth-prime lookup and Pollard-Brent factor search.

use exactball::nt::{
    exact_root, next_smooth_prime, pollard_brent, smooth_prime_count, smooth_prime_max,
    smooth_primes,
};
use exactball::RandState;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Removes every factor of `p` from `x`.
fn strip(x: &mut BigInt, p: u32) {
    let p = BigInt::from(p);
    while (&*x % &p).is_zero() {
        *x /= &p;
    }
}

#[test]
fn test_next_smooth_prime_walks_the_table() {
    let mut walked = Vec::new();
    let mut b = BigInt::zero();
    while let Some(p) = next_smooth_prime(&b) {
        walked.push(p.clone());
        b = p;
    }
    assert_eq!(walked.len(), smooth_prime_count());
    assert!(walked.iter().eq(smooth_primes()));
    assert_eq!(walked.last(), Some(smooth_prime_max()));
}

#[test]
fn test_smooth_primes_have_smooth_predecessors() {
    for p in smooth_primes() {
        let mut m = p - 1u32;
        for q in [2, 5, 7, 11, 13, 17, 19, 23] {
            strip(&mut m, q);
        }
        assert!(m.is_one(), "{p} - 1 has a factor outside the base");
    }
}

#[test]
fn test_next_smooth_prime_between_entries() {
    let primes: Vec<&BigInt> = smooth_primes().take(20).collect();
    for w in primes.windows(2) {
        let mut b = w[0].clone();
        while &b < w[1] {
            assert_eq!(next_smooth_prime(&b).as_ref(), Some(w[1]), "b = {b}");
            b += 1u32;
        }
    }
    let first = smooth_primes().next().unwrap();
    let mut b = BigInt::zero();
    while &b < first {
        assert_eq!(next_smooth_prime(&b).as_ref(), Some(first), "b = {b}");
        b += 1u32;
    }
}

#[test]
fn test_pollard_brent_splits_product_of_smooth_primes() {
    let primes: Vec<&BigInt> = smooth_primes().skip(3).step_by(7).take(3).collect();
    let mut state = RandState::new(77);
    for pair in primes.windows(2) {
        let n = pair[0] * pair[1];
        let f = pollard_brent(&n, &mut state, 20, 1 << 20).expect("factor");
        assert!(f > BigInt::one() && f < n);
        assert!(n.is_multiple_of(&f));
    }
}

#[test]
fn test_pollard_brent_on_perfect_square() {
    let p = BigInt::from(1_000_003u32);
    let n = &p * &p;
    let mut state = RandState::new(3);
    if let Some(f) = pollard_brent(&n, &mut state, 20, 1 << 16) {
        assert_eq!(f, p);
    }
    assert_eq!(exact_root(&n, 2), Some(p));
}
