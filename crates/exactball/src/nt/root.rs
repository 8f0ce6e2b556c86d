//! Exact integer roots.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Returns `r` with `r^n == x` when such an integer exists.
///
/// Negative `x` has a root only for odd `n`. `n == 0` never has one.
#[must_use]
pub fn exact_root(x: &BigInt, n: u32) -> Option<BigInt> {
    match n {
        0 => None,
        1 => Some(x.clone()),
        _ if x.is_zero() => Some(BigInt::zero()),
        _ if x.is_negative() => {
            if n % 2 == 0 {
                return None;
            }
            exact_root(&-x, n).map(|r| -r)
        }
        _ => {
            let r = x.nth_root(n);
            (r.pow(n) == *x).then_some(r)
        }
    }
}

/// True when `x` is the square of an integer.
#[must_use]
pub fn is_square(x: &BigInt) -> bool {
    !x.is_negative() && exact_root(x, 2).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn test_perfect_powers() {
        assert_eq!(exact_root(&big(81), 4), Some(big(3)));
        assert_eq!(exact_root(&big(-27), 3), Some(big(-3)));
        assert_eq!(exact_root(&big(0), 5), Some(big(0)));
        assert_eq!(exact_root(&big(1), 7), Some(big(1)));
        assert_eq!(exact_root(&big(-1), 7), Some(big(-1)));
    }

    #[test]
    fn test_non_powers() {
        assert_eq!(exact_root(&big(80), 4), None);
        assert_eq!(exact_root(&big(-16), 2), None);
        assert_eq!(exact_root(&big(5), 0), None);
        assert!(!is_square(&big(2)));
        assert!(is_square(&big(144)));
        assert!(!is_square(&big(-4)));
    }

    #[test]
    fn test_large_root() {
        let base = BigInt::from(3u32).pow(200);
        let x = base.pow(3);
        assert_eq!(exact_root(&x, 3), Some(base.clone()));
        assert_eq!(exact_root(&(x + 1), 3), None);
    }
}
