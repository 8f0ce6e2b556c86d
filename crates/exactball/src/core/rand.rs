//! Seedable random state threaded through `randtest` and factor search.

use num_bigint::{BigInt, RandBigInt, Sign};
use num_traits::{One, Signed, Zero};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random state.
///
/// There is no global generator: every consumer receives the state it
/// draws from, so a seed reproduces a run exactly.
#[derive(Debug, Clone)]
pub struct RandState {
    rng: ChaCha8Rng,
}

impl RandState {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[0, n)`; returns 0 when `n == 0`.
    pub fn randint(&mut self, n: u64) -> u64 {
        if n == 0 {
            0
        } else {
            self.rng.gen_range(0..n)
        }
    }

    pub fn randbool(&mut self) -> bool {
        self.rng.gen()
    }

    /// Uniform nonnegative integer below `2^bits`.
    pub fn randbits(&mut self, bits: u64) -> BigInt {
        BigInt::from(self.rng.gen_biguint(bits))
    }

    /// Uniform integer in `[0, n)` for `n > 0`.
    pub fn randm(&mut self, n: &BigInt) -> BigInt {
        debug_assert!(n.is_positive());
        self.rng.gen_bigint_range(&BigInt::zero(), n)
    }

    /// Signed test integer with at most `bits` bits.
    ///
    /// The bit length is drawn uniformly and, one time in four, the value
    /// is forced to a power of two minus one so that carries and
    /// boundaries are exercised.
    pub fn randtest(&mut self, bits: u64) -> BigInt {
        let len = self.randint(bits + 1);
        let magnitude = if self.randint(4) == 0 {
            (BigInt::one() << len) - 1
        } else {
            self.randbits(len)
        };
        if self.randbool() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Like [`randtest`](Self::randtest) but never zero.
    pub fn randtest_not_zero(&mut self, bits: u64) -> BigInt {
        loop {
            let v = self.randtest(bits.max(1));
            if !v.is_zero() {
                return v;
            }
        }
    }

    /// Nonzero test integer with positive sign.
    pub fn randtest_positive(&mut self, bits: u64) -> BigInt {
        let v = self.randtest_not_zero(bits);
        match v.sign() {
            Sign::Minus => -v,
            _ => v,
        }
    }

    /// Direct access for callers that need other distributions.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl Default for RandState {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_reproduces_sequence() {
        let mut a = RandState::new(42);
        let mut b = RandState::new(42);
        for _ in 0..32 {
            assert_eq!(a.randint(1000), b.randint(1000));
            assert_eq!(a.randtest(80), b.randtest(80));
        }
    }

    #[test]
    fn test_randm_range() {
        let mut state = RandState::new(7);
        let n = BigInt::from(97);
        for _ in 0..200 {
            let v = state.randm(&n);
            assert!(!v.is_negative() && v < n);
        }
    }

    #[test]
    fn test_randtest_bits_bound() {
        let mut state = RandState::new(3);
        for _ in 0..200 {
            let v = state.randtest(40);
            assert!(v.bits() <= 40);
            assert!(!state.randtest_not_zero(5).is_zero());
            assert!(state.randtest_positive(5).is_positive());
        }
    }

    #[test]
    fn test_randint_zero() {
        let mut state = RandState::new(0);
        assert_eq!(state.randint(0), 0);
    }
}
