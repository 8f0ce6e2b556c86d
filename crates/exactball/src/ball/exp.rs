//! Exponential of a ball.
//!
//! The argument is reduced by a multiple of `log(2)` and then scaled by
//! `2^-k`; the reduced value is fed to a fixed-point Taylor sum over raw
//! integers, and the result is squared back `k` times.

use core::f64::consts::LN_2;

use num_bigint::{BigInt, BigUint};
use num_traits::One;

use super::arb::Arb;
use super::arf::{Arf, Round};
use super::consts::const_log2;
use super::mag::Mag;
use crate::core::constants::{EXP_GUARD_BITS, MAG_BITS};

/// Sums `1 + x + x^2/2! + ... + x^(n-1)/(n-1)!` in fixed point.
///
/// `x` is read as `x / 2^wp` and must be below 1. The sum is returned in
/// the same scale together with its error in units of `2^-wp`; the
/// computed value never exceeds the exact partial sum. Every term is
/// truncated, so the caller bounds the omitted tail separately.
#[must_use]
pub fn exp_taylor_naive(x: &BigUint, wp: u64, n: u64) -> (BigUint, u64) {
    if n == 0 {
        return (BigUint::default(), 0);
    }
    let scale = wp + EXP_GUARD_BITS;
    let mut s = BigUint::one() << scale;
    let v = x << EXP_GUARD_BITS;
    let mut t = v.clone();
    for k in 1..n {
        s += &t;
        t = (&t * &v) >> scale;
        t /= k + 1;
    }
    (s >> EXP_GUARD_BITS, 2)
}

/// Smallest `n >= 1` with `2 * x^n / n! <= 2^-(wp + 1)` for `x < 2^top`.
fn taylor_terms(top: i64, wp: u64) -> u64 {
    let target = -(wp as f64) - 3.0;
    let mut log2_term = 0.0;
    let mut n = 0u64;
    loop {
        n += 1;
        log2_term += top as f64 - (n as f64).log2();
        if log2_term <= target {
            return n;
        }
    }
}

/// `exp(t)` for `|mid(t)| < 1` and `rad(t) <= 1/4`.
fn exp_reduced(t: &Arb, wp: u64) -> Arb {
    let tm = t.mid();
    if (!tm.is_zero() && tm.top() > 0) || t.rad() > Mag::from_2exp(-2) {
        return Arb::indeterminate();
    }
    let point = if tm.is_zero() {
        Arb::one()
    } else {
        let x = tm
            .abs()
            .mul_2exp(wp as i64)
            .floor()
            .to_biguint()
            .unwrap_or_default();
        let n = taylor_terms(tm.top(), wp);
        let (y, err) = exp_taylor_naive(&x, wp, n);
        // Sum error, one unit of tail and three of input truncation.
        let rad = Mag::from_u64(err + 4).mul_2exp(-(wp as i64));
        let ball = Arb::new(Arf::new(BigInt::from(y), -(wp as i64)), rad);
        if tm.is_negative() {
            ball.inv(wp)
        } else {
            ball
        }
    };
    // exp(tm) <= 3 and exp(tr) - 1 <= 3 tr for tr <= 1
    point.add_error(Mag::from_u64(9).mul(t.rad()))
}

/// Ball containing `exp(m)` for an exact `m`.
fn exp_point(m: &Arf, prec: u64) -> Arb {
    if m.is_zero() {
        return Arb::one();
    }
    if m.top() > 40 {
        return Arb::indeterminate();
    }
    let n = (m.to_f64() / LN_2).round() as i64;
    let k = ((prec as f64).sqrt() as u64 / 2).clamp(2, 40);
    let n_bits = u64::from(64 - n.unsigned_abs().leading_zeros());
    let wp = prec + n_bits + k + 30;
    let log2 = const_log2(wp + 8);
    let t = Arb::from_arf(m.clone())
        .sub(&log2.mul(&Arb::from_i64(n), wp), wp)
        .mul_2exp(-(k as i64));
    let mut e = exp_reduced(&t, wp);
    for _ in 0..k {
        e = e.sqr(wp);
    }
    e.mul_2exp(n).finish(prec)
}

impl Arb {
    /// `exp(x)` for every `x` in the ball.
    ///
    /// Midpoints of magnitude `2^40` or more give the whole line.
    #[must_use]
    pub fn exp(&self, prec: u64) -> Self {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        let y = exp_point(self.mid(), prec);
        if self.is_exact() || !y.is_finite() {
            return y;
        }
        // exp(m + t) - exp(m) = exp(m) (exp(t) - 1), |exp(t) - 1| <= exp(r) - 1
        let Some(r) = self.rad().to_arf() else {
            return Self::indeterminate();
        };
        let Some(er) = exp_point(&r, MAG_BITS + 16).upper() else {
            return Self::indeterminate();
        };
        let (em1, _) = Arf::sub_round(&er, &Arf::one(), MAG_BITS, Round::Ceil);
        let scale = exp_point(self.mid(), MAG_BITS + 16).mag_upper();
        y.add_error(scale.mul(Mag::from_arf_upper(&em1)))
    }
}
