//! Word-size modular arithmetic and primality.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::core::constants::MILLER_RABIN_BASES;

/// `a * b mod n` without overflow.
#[inline]
#[must_use]
pub const fn mul_mod(a: u64, b: u64, n: u64) -> u64 {
    ((a as u128 * b as u128) % n as u128) as u64
}

/// `a^e mod n` by square-and-multiply; `n` must be nonzero.
#[must_use]
pub fn pow_mod(mut a: u64, mut e: u64, n: u64) -> u64 {
    let mut r = 1 % n;
    a %= n;
    while e > 0 {
        if e & 1 == 1 {
            r = mul_mod(r, a, n);
        }
        a = mul_mod(a, a, n);
        e >>= 1;
    }
    r
}

/// Deterministic Miller-Rabin for 64-bit inputs.
#[must_use]
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &MILLER_RABIN_BASES {
        if n % p == 0 {
            return n == p;
        }
    }
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    'witness: for &a in &MILLER_RABIN_BASES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Square root of `a` modulo a prime `p` by Tonelli-Shanks;
/// `None` when `a` is a non-residue.
#[must_use]
pub fn sqrt_mod_prime(a: u64, p: u64) -> Option<u64> {
    let a = a % p;
    if a == 0 || p == 2 {
        return Some(a);
    }
    if pow_mod(a, (p - 1) / 2, p) != 1 {
        return None;
    }
    if p % 4 == 3 {
        return Some(pow_mod(a, (p + 1) / 4, p));
    }
    let s = (p - 1).trailing_zeros();
    let q = (p - 1) >> s;
    let mut z = 2;
    while pow_mod(z, (p - 1) / 2, p) != p - 1 {
        z += 1;
    }
    let mut m = s;
    let mut c = pow_mod(z, q, p);
    let mut t = pow_mod(a, q, p);
    let mut r = pow_mod(a, (q + 1) / 2, p);
    while t != 1 {
        let mut i = 0;
        let mut t2 = t;
        while t2 != 1 {
            t2 = mul_mod(t2, t2, p);
            i += 1;
        }
        let b = pow_mod(c, 1u64 << (m - i - 1), p);
        m = i;
        c = mul_mod(b, b, p);
        t = mul_mod(t, c, p);
        r = mul_mod(r, b, p);
    }
    Some(r)
}

/// Inverse of `a` modulo `n`, if `gcd(a, n) == 1`.
#[must_use]
pub fn mod_inverse_u64(a: u64, n: u64) -> Option<u64> {
    let inv = mod_inverse(&BigInt::from(a), &BigInt::from(n))?;
    u64::try_from(inv).ok()
}

/// Inverse of `a` modulo `n > 0`, reduced into `[0, n)`.
#[must_use]
pub fn mod_inverse(a: &BigInt, n: &BigInt) -> Option<BigInt> {
    if !n.is_positive() {
        return None;
    }
    if n.is_one() {
        return Some(BigInt::zero());
    }
    let a = a.mod_floor(n);
    let eg = a.extended_gcd(n);
    eg.gcd.is_one().then(|| eg.x.mod_floor(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_primes() {
        let primes: Vec<u64> = (0..60).filter(|&n| is_prime_u64(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59]
        );
    }

    #[test]
    fn test_large_prime_and_pseudoprime() {
        assert!(is_prime_u64(18_446_744_073_709_551_557));
        // Strong pseudoprime to bases 2, 3, 5, 7.
        assert!(!is_prime_u64(3_215_031_751));
        assert!(!is_prime_u64(u64::MAX));
    }

    #[test]
    fn test_inverse() {
        assert_eq!(mod_inverse_u64(3, 7), Some(5));
        assert_eq!(mod_inverse_u64(4, 8), None);
        let inv = mod_inverse(&BigInt::from(-3), &BigInt::from(7));
        assert_eq!(inv, Some(BigInt::from(2)));
    }

    #[test]
    fn test_pow_mod() {
        assert_eq!(pow_mod(2, 10, 1000), 24);
        assert_eq!(pow_mod(5, 0, 1), 0);
    }

    #[test]
    fn test_sqrt_mod_prime() {
        for p in [2u64, 3, 5, 13, 17, 41, 97, 1_000_000_007] {
            for a in 0..40u64 {
                match sqrt_mod_prime(a, p) {
                    Some(r) => assert_eq!(mul_mod(r, r, p), a % p, "sqrt({a}) mod {p}"),
                    None => assert_eq!(pow_mod(a, (p - 1) / 2, p), p - 1),
                }
            }
        }
    }
}
