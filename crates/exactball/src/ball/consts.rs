//! Mathematical constants as balls.
//!
//! `log(2)` below [`LOG2_TAB_THRESHOLD`] bits comes from a stored binary
//! expansion. Above it, and for `pi`, the constant is summed from a
//! series once per precision and cached; later requests at the same or
//! lower precision round the cached ball instead of recomputing.

use std::sync::{Mutex, OnceLock, PoisonError};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::{debug, trace};

use super::arb::Arb;
use super::arf::{Arf, Round};
use super::mag::Mag;
use crate::core::constants::{LOG2_TAB_BITS, LOG2_TAB_LIMBS, LOG2_TAB_THRESHOLD};

/// `floor(log(2) * 2^1024)`, most significant limb first.
#[rustfmt::skip]
static LOG2_TAB: [u64; LOG2_TAB_LIMBS] = [
    0xb17217f7d1cf79ab, 0xc9e3b39803f2f6af, 0x40f343267298b62d, 0x8a0d175b8baafa2b,
    0xe7b876206debac98, 0x559552fb4afa1b10, 0xed2eae35c1382144, 0x27573b291169b825,
    0x3e96ca16224ae8c5, 0x1acbda11317c387e, 0xb9ea9bc3b136603b, 0x256fa0ec7657f74b,
    0x72ce87b19d6548ca, 0xf5dfa6bd38303248, 0x655fa1872f20e3a2, 0xda2d97c50f3fd5c6,
];

/// A constant evaluated on demand and kept at the highest precision
/// requested so far.
pub(crate) struct ConstCache {
    name: &'static str,
    eval: fn(u64) -> Arb,
    cell: OnceLock<Mutex<Option<(u64, Arb)>>>,
}

impl ConstCache {
    pub(crate) const fn new(name: &'static str, eval: fn(u64) -> Arb) -> Self {
        Self {
            name,
            eval,
            cell: OnceLock::new(),
        }
    }

    fn slot(&self) -> &Mutex<Option<(u64, Arb)>> {
        self.cell.get_or_init(|| Mutex::new(None))
    }

    pub(crate) fn get(&self, prec: u64) -> Arb {
        let mut cached = self.slot().lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_prec, value)) = cached.as_ref() {
            if *cached_prec == prec {
                return value.clone();
            }
            if *cached_prec > prec {
                trace!(constant = self.name, prec, cached_prec, "rounding cached constant");
                return value.finish(prec);
            }
        }
        debug!(constant = self.name, prec, "evaluating constant");
        let value = (self.eval)(prec);
        *cached = Some((prec, value.clone()));
        value
    }

    /// Precision of the cached value, if any.
    pub(crate) fn cached_prec(&self) -> Option<u64> {
        let cached = self.slot().lock().unwrap_or_else(PoisonError::into_inner);
        cached.as_ref().map(|(p, _)| *p)
    }
}

static LOG2_CACHE: ConstCache = ConstCache::new("log2", log2_series);
static PI_CACHE: ConstCache = ConstCache::new("pi", pi_series);

fn log2_table_arf() -> Arf {
    let mut man = BigInt::zero();
    for &limb in &LOG2_TAB {
        man = (man << 64u32) + BigInt::from(limb);
    }
    Arf::new(man, -(LOG2_TAB_BITS as i64))
}

/// `log(2)` from the stored expansion; `prec` must be below the
/// threshold.
fn log2_from_table(prec: u64) -> Arb {
    let (mid, _) = log2_table_arf().round(prec, Round::Near);
    // Table truncation (< 2^-1024) plus rounding (<= 2^-(prec+1)) stays
    // below 2^-prec, one unit in the last place since log(2) < 1.
    Arb::new(mid, Mag::from_2exp(-(prec.max(1) as i64)))
}

/// `2^-bits`, compared against a positive rational.
fn below_2exp(x: &BigRational, bits: u64) -> bool {
    (x.numer() << bits) < *x.denom()
}

/// Hypergeometric series
/// `log(2) = (1/2160) sum_k (1497 + 1794k) prod_{j=1..k} j(2j-1) / (1080 + 7776j + 7776j^2)`.
///
/// Each ratio is below `1/3888`, so the tail after the last summed term
/// is at most twice the first omitted one.
fn log2_series(prec: u64) -> Arb {
    let wp = prec + 32;
    let mut ratio = BigRational::one();
    let mut sum = BigRational::zero();
    let mut k: u64 = 0;
    loop {
        let term = &ratio * BigRational::from_integer(BigInt::from(1497 + 1794 * k));
        if k >= 1 && below_2exp(&term, wp) {
            break;
        }
        sum += term;
        k += 1;
        let p = BigInt::from(k) * BigInt::from(2 * k - 1);
        let q = BigInt::from(1080u32) + BigInt::from(7776u32) * BigInt::from(k) * BigInt::from(k + 1);
        ratio = ratio * BigRational::new(p, q);
    }
    debug!(prec, terms = k, "summed log2 series");
    let value = sum / BigRational::from_integer(BigInt::from(2160u32));
    // tail / 2160 <= 2 * 2^-wp / 2160 < 2^-(wp + 10)
    Arb::from_rational(&value, wp)
        .add_error(Mag::from_2exp(-(wp as i64) - 10))
        .finish(prec)
}

/// `sum_{k>=0} (-1)^k / ((2k+1) x^(2k+1))` until a term drops below
/// `2^-bits`; the alternating tail is below that term.
fn atan_inv(x: u32, bits: u64) -> BigRational {
    let x = BigInt::from(x);
    let x2 = &x * &x;
    let mut power = x;
    let mut sum = BigRational::zero();
    let mut k: u64 = 0;
    loop {
        let term = BigRational::new(BigInt::one(), BigInt::from(2 * k + 1) * &power);
        if below_2exp(&term, bits) {
            return sum;
        }
        if k % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        power *= &x2;
        k += 1;
    }
}

/// Machin's formula `pi = 16 atan(1/5) - 4 atan(1/239)`.
fn pi_series(prec: u64) -> Arb {
    let wp = prec + 32;
    let value = BigRational::from_integer(16.into()) * atan_inv(5, wp + 5)
        - BigRational::from_integer(4.into()) * atan_inv(239, wp + 5);
    // 16 * 2^-(wp+5) + 4 * 2^-(wp+5) < 2^-wp
    Arb::from_rational(&value, wp)
        .add_error(Mag::from_2exp(-(wp as i64)))
        .finish(prec)
}

/// `log(2)` to `prec` bits.
#[must_use]
pub fn const_log2(prec: u64) -> Arb {
    if prec < LOG2_TAB_THRESHOLD {
        log2_from_table(prec)
    } else {
        LOG2_CACHE.get(prec)
    }
}

/// `pi` to `prec` bits.
#[must_use]
pub fn const_pi(prec: u64) -> Arb {
    PI_CACHE.get(prec)
}

/// Precision of the cached series value of `log(2)`, if one exists.
#[must_use]
pub fn log2_cached_prec() -> Option<u64> {
    LOG2_CACHE.cached_prec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_series() {
        let table = log2_from_table(LOG2_TAB_THRESHOLD - 1);
        let series = log2_series(LOG2_TAB_THRESHOLD - 1);
        assert!(table.overlaps(&series));
        assert!(series.rad() <= Mag::from_2exp(-(LOG2_TAB_THRESHOLD as i64) + 2));
    }

    #[test]
    fn test_low_precision_log2() {
        let x = const_log2(53);
        assert!((x.mid().to_f64() - core::f64::consts::LN_2).abs() < 1e-15);
        assert!(x.contains_arf(&log2_table_arf()));
    }

    #[test]
    fn test_high_precision_log2_is_cached() {
        let prec = LOG2_TAB_THRESHOLD + 200;
        let a = const_log2(prec);
        assert!(log2_cached_prec().is_some_and(|p| p >= prec));
        let b = const_log2(prec);
        assert!(a.overlaps(&b));
        assert!(a.overlaps(&log2_from_table(1000)));
    }

    #[test]
    fn test_cache_serves_lower_precision_by_rounding() {
        let cache = ConstCache::new("test", log2_series);
        let high = cache.get(2000);
        assert_eq!(cache.cached_prec(), Some(2000));
        let low = cache.get(1500);
        assert_eq!(cache.cached_prec(), Some(2000));
        assert!(low.overlaps(&high));
        let higher = cache.get(2500);
        assert_eq!(cache.cached_prec(), Some(2500));
        assert!(higher.overlaps(&high));
    }

    #[test]
    fn test_pi() {
        let pi = const_pi(200);
        assert!((pi.mid().to_f64() - core::f64::consts::PI).abs() < 1e-15);
        assert!(pi.rad() <= Mag::from_2exp(-198));
        let low = const_pi(60);
        assert!(low.overlaps(&pi));
    }
}
