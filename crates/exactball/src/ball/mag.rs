//! Low-precision upper bounds for ball radii.
//!
//! A [`Mag`] holds a nonnegative value with a [`MAG_BITS`]-bit mantissa,
//! or positive infinity. Every operation rounds up unless its name says
//! `lower`, so a `Mag` computed from exact inputs always bounds the true
//! result from above.

use core::cmp::Ordering;
use core::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::arf::{Arf, Round};
use crate::core::constants::MAG_BITS;

const INF_MAN: u64 = u64::MAX;

/// Nonnegative magnitude `man * 2^(exp - MAG_BITS)` or `+inf`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mag {
    man: u64,
    exp: i64,
}

impl Mag {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self { man: 0, exp: 0 }
    }

    #[inline]
    #[must_use]
    pub const fn inf() -> Self {
        Self {
            man: INF_MAN,
            exp: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.man == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_inf(self) -> bool {
        self.man == INF_MAN
    }

    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        !self.is_inf()
    }

    /// `2^e`.
    #[must_use]
    pub const fn from_2exp(e: i64) -> Self {
        Self {
            man: 1 << (MAG_BITS - 1),
            exp: e + 1,
        }
    }

    /// Takes a value that already fits in `MAG_BITS` bits.
    fn from_fitting(x: &Arf) -> Self {
        if x.is_zero() {
            return Self::zero();
        }
        let bits = x.bits();
        let man = x.man().magnitude().to_u64().unwrap_or(INF_MAN);
        Self {
            man: man << (MAG_BITS - bits),
            exp: x.top(),
        }
    }

    /// Smallest `Mag` not below `|x|`.
    #[must_use]
    pub fn from_arf_upper(x: &Arf) -> Self {
        Self::from_fitting(&x.abs().round(MAG_BITS, Round::Up).0)
    }

    /// Largest `Mag` not above `|x|`.
    #[must_use]
    pub fn from_arf_lower(x: &Arf) -> Self {
        Self::from_fitting(&x.abs().round(MAG_BITS, Round::Down).0)
    }

    #[must_use]
    pub fn from_u64(v: u64) -> Self {
        Self::from_arf_upper(&Arf::from_bigint(BigInt::from(v)))
    }

    /// Exact value, or `None` for infinity.
    #[must_use]
    pub fn to_arf(self) -> Option<Arf> {
        if self.is_inf() {
            return None;
        }
        Some(Arf::new(BigInt::from(self.man), self.exp - MAG_BITS as i64))
    }

    /// Exponent `t` with `self < 2^t`; meaningless for zero or infinity.
    #[inline]
    #[must_use]
    pub const fn top(self) -> i64 {
        self.exp
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        match (self.to_arf(), other.to_arf()) {
            (Some(a), Some(b)) => {
                Self::from_fitting(&Arf::add_round(&a, &b, MAG_BITS, Round::Up).0)
            }
            _ => Self::inf(),
        }
    }

    /// `max(self - other, 0)` rounded down.
    #[must_use]
    pub fn sub_lower(self, other: Self) -> Self {
        match (self.to_arf(), other.to_arf()) {
            (None, _) => Self::inf(),
            (Some(_), None) => Self::zero(),
            (Some(a), Some(b)) => {
                let (d, _) = Arf::sub_round(&a, &b, MAG_BITS, Round::Floor);
                if d.is_positive() {
                    Self::from_fitting(&d)
                } else {
                    Self::zero()
                }
            }
        }
    }

    fn mul_rounded(self, other: Self, mode: Round) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        if self.is_inf() || other.is_inf() {
            return Self::inf();
        }
        let prod = BigInt::from(u128::from(self.man) * u128::from(other.man));
        let exact = Arf::new(prod, self.exp + other.exp - 2 * MAG_BITS as i64);
        Self::from_fitting(&exact.round(MAG_BITS, mode).0)
    }

    /// Product; a zero factor wins over an infinite one.
    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        self.mul_rounded(other, Round::Up)
    }

    #[must_use]
    pub fn mul_lower(self, other: Self) -> Self {
        self.mul_rounded(other, Round::Down)
    }

    fn div_rounded(self, other: Self, mode: Round) -> Self {
        match (self.to_arf(), other.to_arf()) {
            (None, _) => Self::inf(),
            (Some(_), None) => Self::zero(),
            (Some(a), Some(b)) => {
                if a.is_zero() {
                    Self::zero()
                } else if b.is_zero() {
                    Self::inf()
                } else {
                    Self::from_fitting(&Arf::div_round(&a, &b, MAG_BITS, mode).0)
                }
            }
        }
    }

    #[must_use]
    pub fn div(self, other: Self) -> Self {
        self.div_rounded(other, Round::Up)
    }

    #[must_use]
    pub fn div_lower(self, other: Self) -> Self {
        self.div_rounded(other, Round::Down)
    }

    /// `self * 2^k`.
    #[must_use]
    pub const fn mul_2exp(self, k: i64) -> Self {
        if self.is_zero() || self.is_inf() {
            return self;
        }
        Self {
            man: self.man,
            exp: self.exp + k,
        }
    }

    /// Approximate value, for display.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self.to_arf() {
            None => f64::INFINITY,
            Some(a) => a.to_f64(),
        }
    }
}

impl PartialOrd for Mag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mag {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.to_arf(), other.to_arf()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl fmt::Debug for Mag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inf() {
            f.write_str("inf")
        } else {
            write!(f, "{} * 2^{}", self.man, self.exp - MAG_BITS as i64)
        }
    }
}

impl fmt::Display for Mag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inf() {
            f.write_str("inf")
        } else {
            write!(f, "{:.2e}", self.to_f64())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::BigRational;

    #[test]
    fn test_upper_rounding() {
        let third = Arf::div_round(&Arf::one(), &Arf::from_i64(3), 200, Round::Near).0;
        let m = Mag::from_arf_upper(&third);
        let back = m.to_arf().expect("finite");
        assert!(back >= third);
        let lower = Mag::from_arf_lower(&third).to_arf().expect("finite");
        assert!(lower <= third);
    }

    #[test]
    fn test_exact_small_values() {
        assert_eq!(Mag::from_u64(5).to_arf(), Some(Arf::from_i64(5)));
        assert_eq!(Mag::from_2exp(-3).to_arf(), Some(Arf::from_2exp(-3)));
        assert_eq!(Mag::from_u64(0), Mag::zero());
    }

    #[test]
    fn test_arithmetic_bounds() {
        let a = Mag::from_u64(3);
        let b = Mag::from_u64(7);
        assert_eq!(a.add(b), Mag::from_u64(10));
        assert_eq!(a.mul(b), Mag::from_u64(21));
        let q = a.div(b).to_arf().expect("finite").to_rational();
        assert!(q * BigRational::from_integer(7.into()) >= BigRational::from_integer(3.into()));
        assert_eq!(b.sub_lower(a), Mag::from_u64(4));
        assert_eq!(a.sub_lower(b), Mag::zero());
    }

    #[test]
    fn test_infinity_rules() {
        let inf = Mag::inf();
        assert!(inf.is_inf());
        assert_eq!(inf.add(Mag::from_u64(1)), inf);
        assert_eq!(Mag::zero().mul(inf), Mag::zero());
        assert_eq!(Mag::from_u64(2).mul(inf), inf);
        assert_eq!(Mag::from_u64(2).div(Mag::zero()), inf);
        assert!(Mag::from_u64(1u64 << 40) < inf);
    }

    #[test]
    fn test_wide_sum_rounds_up() {
        let big = Mag::from_2exp(100);
        let tiny = Mag::from_2exp(-100);
        let s = big.add(tiny);
        assert!(s > big);
    }
}
