//! Pollard-Brent factor search.
//!
//! Iterates `x -> x^2 + a (mod n)` with Brent's cycle detection, batching
//! `gcd` computations over blocks of differences.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use tracing::debug;

use crate::core::constants::POLLARD_BRENT_BLOCK;
use crate::core::RandState;

#[inline]
fn sqr_and_add(x: &mut BigInt, a: &BigInt, n: &BigInt) {
    *x = (&*x * &*x + a).mod_floor(n);
}

/// One Pollard-Brent run from the seed pair `(a, y0)`.
///
/// Returns a nontrivial factor of `n`, or `None` when this run finds
/// nothing: the batched product collapsed to zero, the cycle search
/// exceeded `max_iters`, or the only divisor found was `n` itself.
#[must_use]
pub fn pollard_brent_single(
    n: &BigInt,
    a: &BigInt,
    y0: &BigInt,
    max_iters: u64,
) -> Option<BigInt> {
    let mut y = y0.clone();
    let mut x = y.clone();
    let mut ys = y.clone();
    let mut q = BigInt::one();
    let mut g: BigInt;
    let mut iter: u64 = 1;

    loop {
        x.clone_from(&y);
        let mut k: u64 = 0;
        for _ in 0..iter {
            sqr_and_add(&mut y, a, n);
        }
        loop {
            let block = POLLARD_BRENT_BLOCK.min(iter - k);
            ys.clone_from(&y);
            for _ in 0..block {
                sqr_and_add(&mut y, a, n);
                q = (q * (&x - &y)).mod_floor(n);
            }
            if q.is_zero() {
                return None;
            }
            g = q.gcd(n);
            k += POLLARD_BRENT_BLOCK;
            if k >= iter || !g.is_one() {
                break;
            }
        }
        if iter > max_iters || !g.is_one() {
            break;
        }
        iter *= 2;
    }

    if g == *n {
        // The block overshot; replay it one step at a time.
        loop {
            sqr_and_add(&mut ys, a, n);
            g = (&x - &ys).gcd(n);
            if !g.is_one() {
                break;
            }
        }
    }

    (g != *n && !g.is_one()).then_some(g)
}

/// Repeats [`pollard_brent_single`] with up to `max_tries` random seeds
/// drawn from `state`.
///
/// Each try draws `a` uniformly from `[1, n - 3]` and the start point
/// from `[1, n - 1]`. Inputs below 4 have no seeds and yield `None`.
pub fn pollard_brent(
    n: &BigInt,
    state: &mut RandState,
    max_tries: u64,
    max_iters: u64,
) -> Option<BigInt> {
    if *n <= BigInt::from(3) {
        return None;
    }
    let max_a = n - 3u32;
    let max_x = n - 1u32;
    for attempt in 0..max_tries {
        let a = state.randm(&max_a) + 1u32;
        let x = state.randm(&max_x) + 1u32;
        if let Some(factor) = pollard_brent_single(n, &a, &x, max_iters) {
            debug!(%n, %factor, attempt, "pollard-brent found factor");
            return Some(factor);
        }
    }
    debug!(%n, max_tries, "pollard-brent exhausted tries");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_run_small_semiprime() {
        let n = BigInt::from(8051u32); // 83 * 97
        let f = pollard_brent_single(&n, &BigInt::from(1), &BigInt::from(2), 1 << 12)
            .expect("factor of 8051");
        assert!(f == BigInt::from(83) || f == BigInt::from(97));
    }

    #[test]
    fn test_randomized_finds_factor() {
        let p = BigInt::from(1_000_000_007u64);
        let q = BigInt::from(998_244_353u64);
        let n = &p * &q;
        let mut state = RandState::new(1);
        let f = pollard_brent(&n, &mut state, 10, 1 << 20).expect("factor");
        assert!(f == p || f == q, "unexpected factor {f}");
    }

    #[test]
    fn test_prime_input_fails() {
        let mut state = RandState::new(9);
        assert_eq!(pollard_brent(&BigInt::from(10007u32), &mut state, 3, 1 << 10), None);
    }

    #[test]
    fn test_tiny_inputs() {
        let mut state = RandState::new(9);
        assert_eq!(pollard_brent(&BigInt::from(3u32), &mut state, 3, 16), None);
    }
}
