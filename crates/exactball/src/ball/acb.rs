//! Complex balls: a pair of real balls for the real and imaginary parts.

use core::fmt;

use num_rational::BigRational;

use super::arb::Arb;

/// Rectangle `re + im*i` with each part a real ball.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Acb {
    re: Arb,
    im: Arb,
}

impl Acb {
    #[must_use]
    pub fn new(re: Arb, im: Arb) -> Self {
        Self { re, im }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn one() -> Self {
        Self::from_real(Arb::one())
    }

    #[must_use]
    pub fn i() -> Self {
        Self::new(Arb::zero(), Arb::one())
    }

    #[must_use]
    pub fn indeterminate() -> Self {
        Self::new(Arb::indeterminate(), Arb::indeterminate())
    }

    #[must_use]
    pub fn from_real(re: Arb) -> Self {
        Self::new(re, Arb::zero())
    }

    #[inline]
    #[must_use]
    pub fn re(&self) -> &Arb {
        &self.re
    }

    #[inline]
    #[must_use]
    pub fn im(&self) -> &Arb {
        &self.im
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.re.is_exact() && self.im.is_exact()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }

    /// True only if the imaginary part is exactly zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    #[must_use]
    pub fn contains_zero(&self) -> bool {
        self.re.contains_zero() && self.im.contains_zero()
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.re.overlaps(&other.re) && self.im.overlaps(&other.im)
    }

    #[must_use]
    pub fn contains_point(&self, re: &BigRational, im: &BigRational) -> bool {
        self.re.contains_rational(re) && self.im.contains_rational(im)
    }

    #[must_use]
    pub fn round(&self, prec: u64) -> Self {
        Self::new(self.re.round(prec), self.im.round(prec))
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.re.neg(), self.im.neg())
    }

    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.re.clone(), self.im.neg())
    }

    #[must_use]
    pub fn add(&self, other: &Self, prec: u64) -> Self {
        Self::new(self.re.add(&other.re, prec), self.im.add(&other.im, prec))
    }

    #[must_use]
    pub fn sub(&self, other: &Self, prec: u64) -> Self {
        Self::new(self.re.sub(&other.re, prec), self.im.sub(&other.im, prec))
    }

    #[must_use]
    pub fn mul(&self, other: &Self, prec: u64) -> Self {
        if self.is_real() && other.is_real() {
            return Self::from_real(self.re.mul(&other.re, prec));
        }
        let wp = prec + 4;
        let re = self
            .re
            .mul(&other.re, wp)
            .sub(&self.im.mul(&other.im, wp), prec);
        let im = self
            .re
            .mul(&other.im, wp)
            .add(&self.im.mul(&other.re, wp), prec);
        Self::new(re, im)
    }

    /// `(a + bi)^2 = (a^2 - b^2) + 2abi`.
    #[must_use]
    pub fn sqr(&self, prec: u64) -> Self {
        if self.is_real() {
            return Self::from_real(self.re.sqr(prec));
        }
        let wp = prec + 4;
        let re = self.re.sqr(wp).sub(&self.im.sqr(wp), prec);
        let im = self.re.mul(&self.im, prec).mul_2exp(1);
        Self::new(re, im)
    }

    /// `|z|^2`, a real ball.
    #[must_use]
    pub fn norm(&self, prec: u64) -> Arb {
        self.re.sqr(prec).add(&self.im.sqr(prec), prec)
    }

    #[must_use]
    pub fn abs(&self, prec: u64) -> Arb {
        if self.is_real() {
            return self.re.abs();
        }
        self.norm(prec + 4).sqrt(prec)
    }

    /// `conj(z) / |z|^2`; the whole plane when `z` may vanish.
    #[must_use]
    pub fn inv(&self, prec: u64) -> Self {
        if self.is_real() {
            return Self::from_real(self.re.inv(prec));
        }
        let wp = prec + 8;
        let d = self.norm(wp);
        if d.contains_zero() {
            return Self::indeterminate();
        }
        Self::new(self.re.div(&d, prec), self.im.neg().div(&d, prec))
    }

    #[must_use]
    pub fn div(&self, other: &Self, prec: u64) -> Self {
        if other.is_real() {
            return Self::new(self.re.div(&other.re, prec), self.im.div(&other.re, prec));
        }
        self.mul(&other.inv(prec + 8), prec)
    }
}

impl fmt::Debug for Acb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Acb {{ re: {:?}, im: {:?} }}", self.re, self.im)
    }
}

impl fmt::Display for Acb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_real() {
            write!(f, "{}", self.re)
        } else if self.re.is_zero() {
            write!(f, "{}*I", self.im)
        } else {
            write!(f, "{} + {}*I", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_i_squared() {
        let i = Acb::i();
        let m = i.mul(&i, 64);
        assert_eq!(m, Acb::from_real(Arb::from_i64(-1)));
    }

    #[test]
    fn test_inverse_contains_true_value() {
        // 1 / (1 + 2i) = (1 - 2i) / 5
        let z = Acb::new(Arb::from_i64(1), Arb::from_i64(2));
        let w = z.inv(64);
        assert!(w.contains_point(&q(1, 5), &q(-2, 5)));
        let back = z.mul(&w, 64);
        assert!(back.contains_point(&q(1, 1), &q(0, 1)));
    }

    #[test]
    fn test_abs_of_three_four() {
        let z = Acb::new(Arb::from_i64(3), Arb::from_i64(4));
        assert_eq!(z.abs(64), Arb::from_i64(5));
    }

    #[test]
    fn test_display() {
        assert_eq!(Acb::i().to_string(), "1*I");
        assert_eq!(Acb::new(Arb::from_i64(2), Arb::from_i64(-1)).to_string(), "2 + -1*I");
    }
}
