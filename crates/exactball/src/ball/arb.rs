//! Real balls `[mid +/- rad]`.
//!
//! Every operation computes its midpoint by rounding to nearest at the
//! requested precision and accounts for that rounding, plus the spread
//! of the inputs, in a radius that only ever rounds up. The true result
//! therefore lies in the output ball whenever the true inputs lie in the
//! input balls.
//!
//! The propagated part of each radius is computed at a fixed internal
//! precision and the rounding part is one unit in the last place of the
//! result, so raising the precision never widens a result.
//!
//! # Example
//!
//! ```
//! use exactball::ball::Arb;
//! use num_bigint::BigInt;
//! use num_rational::BigRational;
//!
//! let third = Arb::from_rational(&BigRational::new(1.into(), 3.into()), 64);
//! let one = third.mul(&Arb::from_i64(3), 64);
//! assert!(one.contains_rational(&BigRational::from_integer(BigInt::from(1))));
//! ```

use core::cmp::Ordering;
use core::f64::consts::LOG10_2;
use core::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

use super::arf::{Arf, Round};
use super::mag::Mag;
use crate::core::constants::MAG_BITS;

/// One unit in the last place of `x` at `prec` bits.
pub(crate) fn ulp(x: &Arf, prec: u64) -> Mag {
    if x.is_zero() {
        Mag::zero()
    } else {
        Mag::from_2exp(x.top() - prec.max(1) as i64)
    }
}

fn rounding_error(mid: &Arf, inexact: bool, prec: u64) -> Mag {
    if inexact {
        ulp(mid, prec)
    } else {
        Mag::zero()
    }
}

/// Ball `[mid - rad, mid + rad]` on the real line.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Arb {
    mid: Arf,
    rad: Mag,
}

impl Arb {
    #[must_use]
    pub fn new(mid: Arf, rad: Mag) -> Self {
        Self { mid, rad }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn one() -> Self {
        Self::from_arf(Arf::one())
    }

    /// The whole real line: midpoint zero, infinite radius.
    #[must_use]
    pub fn indeterminate() -> Self {
        Self {
            mid: Arf::zero(),
            rad: Mag::inf(),
        }
    }

    /// Exact ball.
    #[must_use]
    pub fn from_arf(mid: Arf) -> Self {
        Self {
            mid,
            rad: Mag::zero(),
        }
    }

    #[must_use]
    pub fn from_i64(v: i64) -> Self {
        Self::from_arf(Arf::from_i64(v))
    }

    /// Exact ball holding an integer of any size.
    #[must_use]
    pub fn from_bigint(v: &BigInt) -> Self {
        Self::from_arf(Arf::from_bigint(v.clone()))
    }

    /// Exact ball holding a finite double.
    #[must_use]
    pub fn from_f64(v: f64) -> Option<Self> {
        Arf::from_f64(v).map(Self::from_arf)
    }

    /// Ball around `q` with a midpoint of `prec` bits.
    #[must_use]
    pub fn from_rational(q: &BigRational, prec: u64) -> Self {
        let (mid, inexact) = Arf::from_rational_round(q, prec, Round::Near);
        let rad = rounding_error(&mid, inexact, prec);
        Self { mid, rad }
    }

    #[inline]
    #[must_use]
    pub fn mid(&self) -> &Arf {
        &self.mid
    }

    #[inline]
    #[must_use]
    pub fn rad(&self) -> Mag {
        self.rad
    }

    #[inline]
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.rad.is_zero()
    }

    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rad.is_finite()
    }

    /// Exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.is_exact() && self.mid.is_zero()
    }

    /// Exactly one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.is_exact() && self.mid.is_one()
    }

    /// Rounds the midpoint to `prec` bits, widening the radius to match.
    #[must_use]
    pub fn round(&self, prec: u64) -> Self {
        let (mid, inexact) = self.mid.round(prec, Round::Near);
        let rad = self.rad.add(rounding_error(&mid, inexact, prec));
        Self { mid, rad }
    }

    /// Same midpoint, radius enlarged by `err`.
    #[must_use]
    pub fn add_error(&self, err: Mag) -> Self {
        Self {
            mid: self.mid.clone(),
            rad: self.rad.add(err),
        }
    }

    /// Exact lower endpoint; `None` for an infinite radius.
    #[must_use]
    pub fn lower(&self) -> Option<Arf> {
        Some(self.mid.sub(&self.rad.to_arf()?))
    }

    /// Exact upper endpoint; `None` for an infinite radius.
    #[must_use]
    pub fn upper(&self) -> Option<Arf> {
        Some(self.mid.add(&self.rad.to_arf()?))
    }

    /// Upper bound for every `|x|` in the ball.
    #[must_use]
    pub fn mag_upper(&self) -> Mag {
        Mag::from_arf_upper(&self.mid).add(self.rad)
    }

    /// Lower bound for every `|x|` in the ball.
    #[must_use]
    pub fn mag_lower(&self) -> Mag {
        Mag::from_arf_lower(&self.mid).sub_lower(self.rad)
    }

    #[must_use]
    pub fn contains_zero(&self) -> bool {
        match self.rad.to_arf() {
            None => true,
            Some(r) => self.mid.cmpabs(&r) != Ordering::Greater,
        }
    }

    /// Every point is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.lower().is_some_and(|l| l.is_positive())
    }

    /// Every point is nonnegative.
    #[must_use]
    pub fn is_nonnegative(&self) -> bool {
        self.lower().is_some_and(|l| !l.is_negative())
    }

    /// Every point is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.upper().is_some_and(|u| u.is_negative())
    }

    /// Every point is nonpositive.
    #[must_use]
    pub fn is_nonpositive(&self) -> bool {
        self.upper().is_some_and(|u| !u.is_positive())
    }

    #[must_use]
    pub fn contains_rational(&self, q: &BigRational) -> bool {
        match self.rad.to_arf() {
            None => true,
            Some(r) => (q - self.mid.to_rational()).abs() <= r.to_rational(),
        }
    }

    #[must_use]
    pub fn contains_arf(&self, x: &Arf) -> bool {
        match self.rad.to_arf() {
            None => true,
            Some(r) => x.sub(&self.mid).cmpabs(&r) != Ordering::Greater,
        }
    }

    /// The balls share at least one point.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.rad.to_arf(), other.rad.to_arf()) {
            (Some(r1), Some(r2)) => {
                self.mid.sub(&other.mid).cmpabs(&r1.add(&r2)) != Ordering::Greater
            }
            _ => true,
        }
    }

    /// Every point of `other` lies in `self`.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        match (self.rad.to_arf(), other.rad.to_arf()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(r1), Some(r2)) => {
                self.mid.sub(&other.mid).abs().add(&r2) <= r1
            }
        }
    }

    /// Decides the order of the two balls when they are disjoint or both
    /// exact.
    #[must_use]
    pub fn cmp_checked(&self, other: &Self) -> Option<Ordering> {
        if self.is_exact() && other.is_exact() {
            return Some(self.mid.cmp(&other.mid));
        }
        let spread = self.rad.to_arf()?.add(&other.rad.to_arf()?);
        let d = self.mid.sub(&other.mid);
        if d > spread {
            Some(Ordering::Greater)
        } else if d < spread.neg() {
            Some(Ordering::Less)
        } else {
            None
        }
    }

    /// Integers `[ceil(lower), floor(upper)]` the ball may hold; the range
    /// is empty when the first exceeds the second.
    #[must_use]
    pub fn integer_range(&self) -> Option<(BigInt, BigInt)> {
        Some((self.lower()?.ceil(), self.upper()?.floor()))
    }

    /// The only integer in the ball, if there is exactly one.
    #[must_use]
    pub fn get_unique_fmpz(&self) -> Option<BigInt> {
        let (lo, hi) = self.integer_range()?;
        (lo == hi).then_some(lo)
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            mid: self.mid.neg(),
            rad: self.rad,
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        if !self.contains_zero() {
            return Self {
                mid: self.mid.abs(),
                rad: self.rad,
            };
        }
        match self.rad.to_arf() {
            None => Self::indeterminate(),
            Some(r) => {
                let half = self.mid.abs().add(&r).mul_2exp(-1);
                let rad = Mag::from_arf_upper(&half);
                Self { mid: half, rad }
            }
        }
    }

    /// `self * 2^k`, exact.
    #[must_use]
    pub fn mul_2exp(&self, k: i64) -> Self {
        Self {
            mid: self.mid.mul_2exp(k),
            rad: self.rad.mul_2exp(k),
        }
    }

    #[must_use]
    pub fn add(&self, other: &Self, prec: u64) -> Self {
        let (mid, inexact) = Arf::add_round(&self.mid, &other.mid, prec, Round::Near);
        let rad = self
            .rad
            .add(other.rad)
            .add(rounding_error(&mid, inexact, prec));
        Self { mid, rad }
    }

    #[must_use]
    pub fn sub(&self, other: &Self, prec: u64) -> Self {
        self.add(&other.neg(), prec)
    }

    #[must_use]
    pub fn mul(&self, other: &Self, prec: u64) -> Self {
        let (mid, inexact) = Arf::mul_round(&self.mid, &other.mid, prec, Round::Near);
        let xm = Mag::from_arf_upper(&self.mid);
        let ym = Mag::from_arf_upper(&other.mid);
        let rad = xm
            .mul(other.rad)
            .add(ym.mul(self.rad))
            .add(self.rad.mul(other.rad))
            .add(rounding_error(&mid, inexact, prec));
        Self { mid, rad }
    }

    #[must_use]
    pub fn sqr(&self, prec: u64) -> Self {
        self.mul(self, prec)
    }

    /// Quotient; the whole line when the divisor may vanish.
    #[must_use]
    pub fn div(&self, other: &Self, prec: u64) -> Self {
        if other.contains_zero() || !self.is_finite() {
            return Self::indeterminate();
        }
        let (mid, inexact) = Arf::div_round(&self.mid, &other.mid, prec, Round::Near);
        let mut rad = rounding_error(&mid, inexact, prec);
        if !(self.is_exact() && other.is_exact()) {
            // |x/y - xm/ym| <= (|xm| yr + |ym| xr) / (|ym| (|ym| - yr))
            let xm = Mag::from_arf_upper(&self.mid);
            let ym_up = Mag::from_arf_upper(&other.mid);
            let ym_lo = Mag::from_arf_lower(&other.mid);
            let num = xm.mul(other.rad).add(ym_up.mul(self.rad));
            let den = ym_lo.mul_lower(ym_lo.sub_lower(other.rad));
            rad = rad.add(num.div(den));
        }
        Self { mid, rad }
    }

    #[must_use]
    pub fn inv(&self, prec: u64) -> Self {
        Self::one().div(self, prec)
    }

    /// Square root; the whole line unless every point is nonnegative.
    #[must_use]
    pub fn sqrt(&self, prec: u64) -> Self {
        let Some(lower) = self.lower() else {
            return Self::indeterminate();
        };
        if lower.is_negative() {
            return Self::indeterminate();
        }
        if lower.is_zero() && !self.is_exact() {
            // [0, u] maps into [0, sqrt(u)].
            let Some(upper) = self.upper() else {
                return Self::indeterminate();
            };
            let (s, _) = Arf::sqrt_round(&upper, prec, Round::Ceil);
            let half = s.mul_2exp(-1);
            let rad = Mag::from_arf_upper(&half);
            return Self { mid: half, rad };
        }
        let (mid, inexact) = Arf::sqrt_round(&self.mid, prec, Round::Near);
        let mut rad = rounding_error(&mid, inexact, prec);
        if !self.is_exact() {
            // |sqrt(x) - sqrt(m)| <= r / (2 sqrt(lower))
            let (root_lo, _) = Arf::sqrt_round(&lower, MAG_BITS, Round::Floor);
            let den = Mag::from_arf_lower(&root_lo).mul_2exp(1);
            rad = rad.add(self.rad.div(den));
        }
        Self { mid, rad }
    }

    #[must_use]
    pub fn rsqrt(&self, prec: u64) -> Self {
        self.sqrt(prec + 4).inv(prec)
    }

    /// `self^e` by repeated squaring.
    #[must_use]
    pub fn pow_ui(&self, e: u64, prec: u64) -> Self {
        if e == 0 {
            return Self::one();
        }
        let wp = prec + 64 - u64::from(e.leading_zeros()) + 4;
        let mut result = Self::one();
        let mut base = self.clone();
        let mut k = e;
        loop {
            if k & 1 == 1 {
                result = result.mul(&base, wp);
            }
            k >>= 1;
            if k == 0 {
                break;
            }
            base = base.sqr(wp);
        }
        result.finish(prec)
    }

    /// `self^e` for an integer exponent of any size.
    #[must_use]
    pub fn pow_fmpz(&self, e: &BigInt, prec: u64) -> Self {
        if e.is_negative() {
            return self.pow_fmpz(&-e, prec + 4).inv(prec);
        }
        if let Some(small) = e.to_u64() {
            return self.pow_ui(small, prec);
        }
        if self.is_exact() {
            if self.mid.is_zero() || self.mid.is_one() {
                return self.clone();
            }
            if self.mid.neg().is_one() {
                return if e.is_odd() { self.clone() } else { Self::one() };
            }
        }
        Self::indeterminate()
    }

    /// Rounds a result computed at a higher working precision down to
    /// `prec` bits.
    ///
    /// When the working error is below a quarter unit at `prec`, the
    /// radius becomes one unit in the last place of the upper bound of
    /// `|self|`, which never grows with `prec`.
    #[must_use]
    pub(crate) fn finish(&self, prec: u64) -> Self {
        if self.is_exact() {
            return self.round(prec);
        }
        let upper = self.mag_upper();
        if self.mid.is_zero() || upper.is_inf() {
            return self.round(prec);
        }
        let unit = Mag::from_2exp(upper.top() - prec.max(1) as i64);
        if self.rad > unit.mul_2exp(-2) {
            return self.round(prec);
        }
        let (mid, _) = self.mid.round(prec, Round::Near);
        Self { mid, rad: unit }
    }

    /// Number of decimal digits the midpoint carries.
    fn display_digits(&self) -> usize {
        let bits = match self.rad.to_arf() {
            Some(r) if !r.is_zero() && !self.mid.is_zero() => {
                (self.mid.top() - r.top()).clamp(1, self.mid.bits() as i64 + 4) as u64
            }
            _ => self.mid.bits(),
        };
        ((bits as f64) * LOG10_2).ceil().max(1.0) as usize
    }
}

impl fmt::Debug for Arb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Arb {{ mid: {:?}, rad: {:?} }}", self.mid, self.rad)
    }
}

impl fmt::Display for Arb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rad.is_inf() {
            return f.write_str("[+/- inf]");
        }
        let mid = self.mid.to_decimal_string(self.display_digits());
        if self.is_exact() {
            f.write_str(&mid)
        } else {
            write!(f, "[{mid} +/- {}]", self.rad)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_from_rational_contains() {
        for prec in [2, 8, 53, 300] {
            let x = Arb::from_rational(&q(1, 3), prec);
            assert!(x.contains_rational(&q(1, 3)), "prec {prec}");
            assert!(!x.is_exact());
        }
        assert!(Arb::from_rational(&q(3, 4), 8).is_exact());
    }

    #[test]
    fn test_exact_arithmetic_stays_exact() {
        let a = Arb::from_i64(6);
        let b = Arb::from_i64(3);
        assert_eq!(a.add(&b, 64), Arb::from_i64(9));
        assert_eq!(a.mul(&b, 64), Arb::from_i64(18));
        assert_eq!(a.div(&b, 64), Arb::from_i64(2));
        assert_eq!(Arb::from_i64(49).sqrt(64), Arb::from_i64(7));
    }

    #[test]
    fn test_division_by_ball_containing_zero() {
        let z = Arb::new(Arf::zero(), Mag::from_2exp(-10));
        let r = Arb::one().div(&z, 64);
        assert!(!r.is_finite());
    }

    #[test]
    fn test_sqrt_touching_zero() {
        let x = Arb::new(Arf::from_2exp(-4), Mag::from_2exp(-4));
        let r = x.sqrt(32);
        assert!(r.contains_rational(&BigRational::from_integer(0.into())));
        assert!(r.contains_rational(&q(1, 4)));
        let neg = Arb::from_i64(-1);
        assert!(!neg.sqrt(32).is_finite());
    }

    #[test]
    fn test_cmp_checked() {
        let a = Arb::new(Arf::from_i64(1), Mag::from_2exp(-2));
        let b = Arb::new(Arf::from_i64(2), Mag::from_2exp(-2));
        assert_eq!(a.cmp_checked(&b), Some(Ordering::Less));
        let c = Arb::new(Arf::from_i64(1), Mag::from_2exp(1));
        assert_eq!(c.cmp_checked(&b), None);
        assert_eq!(Arb::from_i64(5).cmp_checked(&Arb::from_i64(5)), Some(Ordering::Equal));
    }

    #[test]
    fn test_integer_range() {
        let x = Arb::new(Arf::from_i64(3), Mag::from_2exp(-1));
        assert_eq!(x.integer_range(), Some((BigInt::from(3), BigInt::from(3))));
        let y = Arb::new(Arf::new(BigInt::from(7), -1), Mag::from_2exp(-3));
        let (lo, hi) = y.integer_range().expect("finite");
        assert!(lo > hi);
    }

    #[test]
    fn test_pow_ui_exact_and_rounded() {
        assert_eq!(Arb::from_i64(3).pow_ui(5, 64), Arb::from_i64(243));
        let x = Arb::from_rational(&q(1, 3), 64);
        let p = x.pow_ui(7, 64);
        assert!(p.contains_rational(&q(1, 2187)));
        assert!(Arb::from_i64(-1).pow_fmpz(&(BigInt::one() << 70u32), 64).is_one());
    }

    #[test]
    fn test_abs_straddling_zero() {
        let x = Arb::new(Arf::from_i64(-1), Mag::from_u64(3));
        let a = x.abs();
        assert!(a.contains_rational(&q(0, 1)));
        assert!(a.contains_rational(&q(4, 1)));
        assert!(a.is_nonnegative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Arb::from_i64(-12).to_string(), "-12");
        assert_eq!(Arb::indeterminate().to_string(), "[+/- inf]");
        let third = Arb::from_rational(&q(1, 3), 20);
        assert!(third.to_string().starts_with("[0.333"));
    }
}
