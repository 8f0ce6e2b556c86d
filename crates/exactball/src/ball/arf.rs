//! Arbitrary-precision binary floating-point numbers.
//!
//! An [`Arf`] is `man * 2^exp` with an odd (or zero) mantissa, so every
//! representable value has exactly one encoding. Arithmetic is exact
//! unless a `*_round` variant is used, which rounds the exact result to
//! a bit budget in a chosen [`Round`] direction and reports whether any
//! information was lost.

use core::cmp::Ordering;
use core::f64::consts::LOG10_2;
use core::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Rounding direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Round {
    /// Toward zero.
    Down,
    /// Away from zero.
    Up,
    /// Toward negative infinity.
    Floor,
    /// Toward positive infinity.
    Ceil,
    /// To nearest, ties to even.
    Near,
}

/// Binary floating-point number `man * 2^exp`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Arf {
    man: BigInt,
    exp: i64,
}

fn signed(negative: bool, magnitude: BigUint) -> BigInt {
    BigInt::from_biguint(if negative { Sign::Minus } else { Sign::Plus }, magnitude)
}

fn pow2(e: u64) -> BigInt {
    BigInt::one() << e
}

impl Arf {
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn one() -> Self {
        Self {
            man: BigInt::one(),
            exp: 0,
        }
    }

    /// `man * 2^exp`, normalized.
    #[must_use]
    pub fn new(man: BigInt, exp: i64) -> Self {
        match man.trailing_zeros() {
            None => Self::zero(),
            Some(0) => Self { man, exp },
            Some(tz) => Self {
                man: man >> tz,
                exp: exp + tz as i64,
            },
        }
    }

    /// `2^e`.
    #[must_use]
    pub fn from_2exp(e: i64) -> Self {
        Self {
            man: BigInt::one(),
            exp: e,
        }
    }

    #[must_use]
    pub fn from_i64(v: i64) -> Self {
        Self::new(BigInt::from(v), 0)
    }

    #[must_use]
    pub fn from_bigint(v: BigInt) -> Self {
        Self::new(v, 0)
    }

    /// Exact conversion; `None` for NaN and infinities.
    #[must_use]
    pub fn from_f64(v: f64) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }
        let bits = v.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & 0x000f_ffff_ffff_ffff;
        let (man, exp) = if biased == 0 {
            (fraction << 1, -1075)
        } else {
            (fraction | 0x0010_0000_0000_0000, biased - 1075)
        };
        let man = BigInt::from(man);
        Some(Self::new(if negative { -man } else { man }, exp))
    }

    /// Rounds `q` to `prec` bits.
    #[must_use]
    pub fn from_rational_round(q: &BigRational, prec: u64, mode: Round) -> (Self, bool) {
        Self::div_round(
            &Self::from_bigint(q.numer().clone()),
            &Self::from_bigint(q.denom().clone()),
            prec,
            mode,
        )
    }

    #[inline]
    #[must_use]
    pub fn man(&self) -> &BigInt {
        &self.man
    }

    #[inline]
    #[must_use]
    pub fn exp(&self) -> i64 {
        self.exp
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.man.is_zero()
    }

    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.man.is_negative()
    }

    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.man.is_positive()
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        self.exp == 0 && self.man.is_one()
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.is_zero() || self.exp >= 0
    }

    /// Sign as `-1`, `0` or `1`.
    #[must_use]
    pub fn sign(&self) -> i32 {
        match self.man.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// Bit length of the mantissa.
    #[inline]
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.man.bits()
    }

    /// Exponent `t` with `2^(t-1) <= |self| < 2^t`.
    ///
    /// Meaningless for zero; callers test [`is_zero`](Self::is_zero) first.
    #[inline]
    #[must_use]
    pub fn top(&self) -> i64 {
        self.exp + self.bits() as i64
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            man: -&self.man,
            exp: self.exp,
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            man: self.man.abs(),
            exp: self.exp,
        }
    }

    /// `self * 2^k`, exact.
    #[must_use]
    pub fn mul_2exp(&self, k: i64) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self {
            man: self.man.clone(),
            exp: self.exp + k,
        }
    }

    /// Exact value as a rational.
    #[must_use]
    pub fn to_rational(&self) -> BigRational {
        if self.exp >= 0 {
            BigRational::from_integer(&self.man << self.exp as u64)
        } else {
            BigRational::new(self.man.clone(), pow2(self.exp.unsigned_abs()))
        }
    }

    /// Largest integer not above `self`.
    #[must_use]
    pub fn floor(&self) -> BigInt {
        if self.exp >= 0 {
            &self.man << self.exp as u64
        } else {
            // Arithmetic shift rounds toward negative infinity.
            &self.man >> self.exp.unsigned_abs()
        }
    }

    /// Smallest integer not below `self`.
    #[must_use]
    pub fn ceil(&self) -> BigInt {
        -self.neg().floor()
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let (r, _) = self.round(53, Round::Near);
        let m = r.man.to_f64().unwrap_or(f64::NAN);
        let e = r.exp.clamp(-2200, 2200) as i32;
        let half = e / 2;
        m * 2f64.powi(half) * 2f64.powi(e - half)
    }

    /// Exact sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let e = self.exp.min(other.exp);
        let a = &self.man << (self.exp - e) as u64;
        let b = &other.man << (other.exp - e) as u64;
        Self::new(a + b, e)
    }

    /// Exact difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Exact product.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self::new(&self.man * &other.man, self.exp + other.exp)
    }

    /// Rounds to at most `prec` mantissa bits. The flag is `true` when
    /// the result differs from `self`.
    #[must_use]
    pub fn round(&self, prec: u64, mode: Round) -> (Self, bool) {
        let prec = prec.max(1);
        let bits = self.bits();
        if bits <= prec {
            return (self.clone(), false);
        }
        let shift = bits - prec;
        let negative = self.is_negative();
        let magnitude = self.man.magnitude();
        let mut q = magnitude >> shift;
        let away = match mode {
            Round::Down => false,
            Round::Up => true,
            Round::Floor => negative,
            Round::Ceil => !negative,
            Round::Near => {
                let half_bit = magnitude.bit(shift - 1);
                let below_half = magnitude
                    .trailing_zeros()
                    .is_some_and(|tz| tz < shift - 1);
                half_bit && (below_half || q.bit(0))
            }
        };
        if away {
            q += 1u32;
        }
        (Self::new(signed(negative, q), self.exp + shift as i64), true)
    }

    /// `a + b` rounded to `prec` bits.
    #[must_use]
    pub fn add_round(a: &Self, b: &Self, prec: u64, mode: Round) -> (Self, bool) {
        if a.is_zero() {
            return b.round(prec, mode);
        }
        if b.is_zero() {
            return a.round(prec, mode);
        }
        let (big, small) = if a.top() >= b.top() { (a, b) } else { (b, a) };
        let pos = (big.exp - 1).min(big.top() - prec as i64 - 3);
        if small.top() <= pos {
            // `small` sits strictly below every rounding boundary near
            // `big`; a single bit of the same sign rounds identically.
            let sticky = Self::new(BigInt::from(small.sign()), pos - 1);
            let (r, _) = big.add(&sticky).round(prec, mode);
            return (r, true);
        }
        a.add(b).round(prec, mode)
    }

    /// `a - b` rounded to `prec` bits.
    #[must_use]
    pub fn sub_round(a: &Self, b: &Self, prec: u64, mode: Round) -> (Self, bool) {
        Self::add_round(a, &b.neg(), prec, mode)
    }

    /// `a * b` rounded to `prec` bits.
    #[must_use]
    pub fn mul_round(a: &Self, b: &Self, prec: u64, mode: Round) -> (Self, bool) {
        a.mul(b).round(prec, mode)
    }

    /// `a / b` rounded to `prec` bits; `b` must be nonzero.
    #[must_use]
    pub fn div_round(a: &Self, b: &Self, prec: u64, mode: Round) -> (Self, bool) {
        debug_assert!(!b.is_zero(), "division by zero");
        if a.is_zero() || b.is_zero() {
            return (Self::zero(), b.is_zero());
        }
        let prec = prec.max(1);
        let s = ((prec + 2 + b.bits()) as i64 - a.bits() as i64).max(0) as u64;
        let num = a.man.magnitude() << s;
        let (q, r) = num.div_rem(b.man.magnitude());
        let negative = a.is_negative() != b.is_negative();
        let mut exp = a.exp - s as i64 - b.exp;
        let (q, sticky) = if r.is_zero() {
            (q, false)
        } else {
            exp -= 1;
            ((q << 1u32) + 1u32, true)
        };
        let (res, inexact) = Self::new(signed(negative, q), exp).round(prec, mode);
        (res, sticky || inexact)
    }

    /// `sqrt(a)` rounded to `prec` bits; `a` must be nonnegative.
    #[must_use]
    pub fn sqrt_round(a: &Self, prec: u64, mode: Round) -> (Self, bool) {
        debug_assert!(!a.is_negative(), "square root of a negative number");
        if a.is_zero() || a.is_negative() {
            return (Self::zero(), a.is_negative());
        }
        let prec = prec.max(1);
        let mut man = a.man.magnitude().clone();
        let mut exp = a.exp;
        if exp.rem_euclid(2) == 1 {
            man <<= 1u32;
            exp -= 1;
        }
        let mut s = (2 * (prec + 2)).saturating_sub(man.bits());
        if s % 2 == 1 {
            s += 1;
        }
        man <<= s;
        exp -= s as i64;
        let root = man.sqrt();
        let mut half = exp / 2;
        let (q, sticky) = if &root * &root == man {
            (root, false)
        } else {
            half -= 1;
            ((root << 1u32) + 1u32, true)
        };
        let (res, inexact) = Self::new(BigInt::from(q), half).round(prec, mode);
        (res, sticky || inexact)
    }

    /// Compares absolute values.
    #[must_use]
    pub fn cmpabs(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        match self.top().cmp(&other.top()) {
            Ordering::Equal => {
                let e = self.exp.min(other.exp);
                let a = self.man.magnitude() << (self.exp - e) as u64;
                let b = other.man.magnitude() << (other.exp - e) as u64;
                a.cmp(&b)
            }
            ord => ord,
        }
    }

    /// Decimal rendering with `digits` significant digits.
    ///
    /// Integers are printed exactly.
    #[must_use]
    pub fn to_decimal_string(&self, digits: usize) -> String {
        if self.is_integer() {
            return self.floor().to_string();
        }
        let digits = digits.max(1);
        let q = self.to_rational().abs();
        let mut k = ((self.top() - 1) as f64 * LOG10_2).floor() as i64;
        let text = loop {
            let shift = digits as i64 - 1 - k;
            let scale =
                BigRational::from_integer(BigInt::from(10u32).pow(shift.unsigned_abs() as u32));
            let scaled = if shift >= 0 { &q * &scale } else { &q / &scale };
            // Nearest integer, ties away from zero.
            let two = BigInt::from(2u32);
            let rounded = (scaled.numer() * &two + scaled.denom()).div_floor(&(scaled.denom() * &two));
            let text = rounded.to_string();
            match text.len().cmp(&digits) {
                Ordering::Greater => k += 1,
                Ordering::Less => k -= 1,
                Ordering::Equal => break text,
            }
        };
        let sign = if self.is_negative() { "-" } else { "" };
        let (lead, rest) = text.split_at(1);
        let rest = rest.trim_end_matches('0');
        if (-4..=20).contains(&k) {
            let mut plain = if k >= 0 {
                let int_len = (k + 1) as usize;
                if int_len >= text.len() {
                    format!("{text}{}", "0".repeat(int_len - text.len()))
                } else {
                    format!("{}.{}", &text[..int_len], &text[int_len..])
                }
            } else {
                format!("0.{}{}", "0".repeat((-k - 1) as usize), text)
            };
            if plain.contains('.') {
                plain = plain.trim_end_matches('0').trim_end_matches('.').to_string();
            }
            format!("{sign}{plain}")
        } else if rest.is_empty() {
            format!("{sign}{lead}e{k}")
        } else {
            format!("{sign}{lead}.{rest}e{k}")
        }
    }
}

impl PartialOrd for Arf {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Arf {
    fn cmp(&self, other: &Self) -> Ordering {
        let (sa, sb) = (self.sign(), other.sign());
        if sa != sb {
            return sa.cmp(&sb);
        }
        match sa {
            0 => Ordering::Equal,
            1 => self.cmpabs(other),
            _ => self.cmpabs(other).reverse(),
        }
    }
}

impl fmt::Debug for Arf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} * 2^{}", self.man, self.exp)
    }
}

impl fmt::Display for Arf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = ((self.bits() as f64) * LOG10_2).ceil().max(1.0) as usize;
        f.write_str(&self.to_decimal_string(digits))
    }
}
