//! Natural logarithm of a ball.

use super::arb::Arb;
use super::arf::Arf;
use super::consts::const_log2;
use super::mag::Mag;

/// `atanh(z) = z + z^3/3 + z^5/5 + ...` for `|z| < 1/4`.
fn atanh_series(z: &Arb, wp: u64) -> Arb {
    if z.is_zero() {
        return Arb::zero();
    }
    let top = z.mag_upper().top();
    if top > -2 {
        return Arb::indeterminate();
    }
    let z2 = z.sqr(wp);
    let mut power = z.clone();
    let mut sum = z.clone();
    let mut j: i64 = 1;
    loop {
        let exponent = (2 * j + 1) * top;
        if exponent <= -(wp as i64) - 2 {
            // Tail <= |z|^(2j+1) / (1 - z^2) <= 2 |z|^(2j+1)
            return sum.add_error(Mag::from_2exp(exponent + 1));
        }
        power = power.mul(&z2, wp);
        sum = sum.add(&power.div(&Arb::from_i64(2 * j + 1), wp), wp);
        j += 1;
    }
}

/// Ball containing `log(m)` for an exact `m > 0`.
fn log_point(m: &Arf, prec: u64) -> Arb {
    if m.is_one() {
        return Arb::zero();
    }
    let mut e = m.top();
    let mut f = m.mul_2exp(-e);
    if f < Arf::new(3.into(), -2) {
        f = f.mul_2exp(1);
        e -= 1;
    }
    let e_bits = u64::from(64 - e.unsigned_abs().leading_zeros());
    let wp = prec + e_bits + 30;
    // log(f) = 2 atanh((f - 1) / (f + 1)) with |z| <= 1/5 for f in [3/4, 3/2)
    let z = Arb::from_arf(f.sub(&Arf::one())).div(&Arb::from_arf(f.add(&Arf::one())), wp);
    let mut result = atanh_series(&z, wp).mul_2exp(1);
    if e != 0 {
        result = result.add(&const_log2(wp).mul(&Arb::from_i64(e), wp), wp);
    }
    result.finish(prec)
}

impl Arb {
    /// `log(x)` for every `x` in the ball; the whole line unless every
    /// point is strictly positive.
    #[must_use]
    pub fn log(&self, prec: u64) -> Self {
        let Some(lower) = self.lower() else {
            return Self::indeterminate();
        };
        if !lower.is_positive() {
            return Self::indeterminate();
        }
        let y = log_point(self.mid(), prec);
        if self.is_exact() {
            return y;
        }
        // |log(x) - log(m)| <= r / lower
        y.add_error(self.rad().div(Mag::from_arf_lower(&lower)))
    }
}
