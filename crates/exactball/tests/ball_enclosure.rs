//! Enclosure and precision behavior of real and complex balls.
//!
//! Random rational inputs are turned into balls at random precisions
//! between 8 and 500 bits. Every result must contain the exact rational
//! result, and asking for more precision must never widen a result.
//!
//! Wide balls get their own sweep: radii run from `2^(t-12)` up to
//! `2^(t+1)` for a midpoint with top exponent `t`, and a point sampled
//! inside each input must map into the output.

use exactball::ball::{const_log2, const_pi, Acb, Arb, Arf, Mag};
use exactball::RandState;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

const TRIALS: usize = 10_000;

fn random_rational(state: &mut RandState) -> BigRational {
    let bits = 1 + state.randint(120);
    let num = state.randtest(bits);
    let den_bits = 1 + state.randint(120);
    let den = state.randtest_positive(den_bits);
    BigRational::new(num, den)
}

fn random_prec(state: &mut RandState) -> u64 {
    8 + state.randint(493)
}

fn square(x: &Arf) -> BigRational {
    let r = x.to_rational();
    &r * &r
}

/// Midpoint with top exponent in `[-30, 6]`, so `exp` stays representable.
fn random_mid(state: &mut RandState) -> Arf {
    let bits = 1 + state.randint(60);
    let man = state.randtest_not_zero(bits);
    let mid = Arf::new(man, 0);
    let top = state.randint(37) as i64 - 30;
    mid.mul_2exp(top - mid.top())
}

/// A ball of radius `2^(t+s)` with `s` in `[-12, 1]`, and a point in it.
fn random_wide_ball(state: &mut RandState) -> (Arb, Arf) {
    let mid = random_mid(state);
    let shift = state.randint(14) as i64 - 12;
    let rad = Mag::from_2exp(mid.top() + shift);
    let r = rad.to_arf().expect("finite radius");
    let k = state.randint(2049) as i64 - 1024;
    let point = mid.add(&r.mul(&Arf::from_i64(k)).mul_2exp(-10));
    (Arb::new(mid, rad), point)
}

// =============================================================================
// Containment
// =============================================================================

#[test]
fn test_arithmetic_contains_exact_result() {
    let mut state = RandState::new(0x00c0_ffee);
    for trial in 0..TRIALS {
        let a = random_rational(&mut state);
        let b = random_rational(&mut state);
        let prec = random_prec(&mut state);
        let x = Arb::from_rational(&a, prec);
        let y = Arb::from_rational(&b, prec);
        assert!(x.contains_rational(&a), "trial {trial}: rounding a");

        let sum = x.add(&y, prec);
        assert!(sum.contains_rational(&(&a + &b)), "trial {trial}: {a} + {b}");
        let diff = x.sub(&y, prec);
        assert!(diff.contains_rational(&(&a - &b)), "trial {trial}: {a} - {b}");
        let prod = x.mul(&y, prec);
        assert!(prod.contains_rational(&(&a * &b)), "trial {trial}: {a} * {b}");
        let sq = x.sqr(prec);
        assert!(sq.contains_rational(&(&a * &a)), "trial {trial}: {a}^2");
        if !b.is_zero() {
            let quot = x.div(&y, prec);
            assert!(quot.contains_rational(&(&a / &b)), "trial {trial}: {a} / {b}");
        }
    }
}

#[test]
fn test_sqrt_brackets_exact_value() {
    let mut state = RandState::new(17);
    for trial in 0..TRIALS {
        let a = random_rational(&mut state).abs();
        let prec = random_prec(&mut state);
        let r = Arb::from_rational(&a, prec).sqrt(prec);
        let (Some(lo), Some(hi)) = (r.lower(), r.upper()) else {
            panic!("trial {trial}: sqrt({a}) is unbounded");
        };
        if !lo.is_negative() {
            assert!(square(&lo) <= a, "trial {trial}: lower bound of sqrt({a})");
        }
        assert!(square(&hi) >= a, "trial {trial}: upper bound of sqrt({a})");
    }
}

#[test]
fn test_integer_powers_contain_exact_result() {
    let mut state = RandState::new(99);
    for trial in 0..2_000 {
        let a = random_rational(&mut state);
        let e = state.randint(12);
        let prec = random_prec(&mut state);
        let exact = num_traits::pow(a.clone(), e as usize);
        let r = Arb::from_rational(&a, prec).pow_ui(e, prec);
        assert!(r.contains_rational(&exact), "trial {trial}: {a}^{e}");
    }
}

#[test]
fn test_exp_and_log_agree_across_precisions() {
    let mut state = RandState::new(2024);
    for trial in 0..500 {
        let num = BigInt::from(state.randint(2001) as i64 - 1000);
        let den = BigInt::from(1 + state.randint(100) as i64);
        let a = BigRational::new(num, den);
        let prec = random_prec(&mut state);
        let x = Arb::from_rational(&a, prec);
        let lo = x.exp(prec);
        let hi = x.exp(prec + 64);
        assert!(lo.overlaps(&hi), "trial {trial}: exp({a})");

        let back = lo.log(prec);
        assert!(back.contains_rational(&a), "trial {trial}: log(exp({a}))");
    }
}

#[test]
fn test_complex_arithmetic_contains_exact_result() {
    let mut state = RandState::new(5);
    for trial in 0..2_000 {
        let parts: Vec<BigRational> = (0..4).map(|_| random_rational(&mut state)).collect();
        let prec = random_prec(&mut state);
        let ball = |i: usize| Arb::from_rational(&parts[i], prec);
        let z = Acb::new(ball(0), ball(1));
        let w = Acb::new(ball(2), ball(3));
        let (a, b, c, d) = (&parts[0], &parts[1], &parts[2], &parts[3]);

        let prod = z.mul(&w, prec);
        assert!(
            prod.contains_point(&(a * c - b * d), &(a * d + b * c)),
            "trial {trial}: product"
        );
        let sq = z.sqr(prec);
        assert!(
            sq.contains_point(&(a * a - b * b), &(a * b * BigRational::from_integer(2.into()))),
            "trial {trial}: square"
        );
        let norm = c * c + d * d;
        if !norm.is_zero() {
            let quot = z.div(&w, prec);
            let re = (a * c + b * d) / &norm;
            let im = (b * c - a * d) / &norm;
            assert!(quot.contains_point(&re, &im), "trial {trial}: quotient");
        }
    }
}

// =============================================================================
// Wide balls
// =============================================================================

#[test]
fn test_wide_balls_contain_image_of_interior_point() {
    let mut state = RandState::new(0x0ba11);
    for trial in 0..TRIALS {
        let (x, p) = random_wide_ball(&mut state);
        let (y, q) = random_wide_ball(&mut state);
        assert!(x.contains_arf(&p), "trial {trial}: sampled point escapes {x}");
        let prec = random_prec(&mut state);
        let (a, b) = (p.to_rational(), q.to_rational());

        assert!(x.add(&y, prec).contains_rational(&(&a + &b)), "trial {trial}: {x} + {y}");
        assert!(x.sub(&y, prec).contains_rational(&(&a - &b)), "trial {trial}: {x} - {y}");
        assert!(x.mul(&y, prec).contains_rational(&(&a * &b)), "trial {trial}: {x} * {y}");
        assert!(x.sqr(prec).contains_rational(&(&a * &a)), "trial {trial}: {x}^2");
        if !b.is_zero() {
            assert!(x.div(&y, prec).contains_rational(&(&a / &b)), "trial {trial}: {x} / {y}");
        }

        let e = state.randint(7);
        let exact = num_traits::pow(a.clone(), e as usize);
        assert!(x.pow_ui(e, prec).contains_rational(&exact), "trial {trial}: {x}^{e}");

        if !a.is_negative() {
            let r = x.sqrt(prec);
            if let Some(hi) = r.upper() {
                assert!(square(&hi) >= a, "trial {trial}: upper bound of sqrt({x})");
            }
            if let Some(lo) = r.lower() {
                if !lo.is_negative() {
                    assert!(square(&lo) <= a, "trial {trial}: lower bound of sqrt({x})");
                }
            }
        }
    }
}

#[test]
fn test_wide_balls_exp_and_log_contain_reference_value() {
    let mut state = RandState::new(0x00e1_0e1);
    for trial in 0..TRIALS {
        let (x, p) = random_wide_ball(&mut state);
        let prec = 8 + state.randint(121);
        let point = Arb::from_arf(p.clone());

        let reference = point.exp(4 * prec);
        assert!(reference.is_finite(), "trial {trial}: exp({p}) at {}", 4 * prec);
        let y = x.exp(prec);
        assert!(y.overlaps(&reference), "trial {trial}: exp({x}) = {y} misses {reference}");

        if p.is_positive() {
            let reference = point.log(4 * prec);
            assert!(reference.is_finite(), "trial {trial}: log({p}) at {}", 4 * prec);
            let y = x.log(prec);
            assert!(y.overlaps(&reference), "trial {trial}: log({x}) = {y} misses {reference}");
        }
    }
}

#[test]
fn test_exp_and_log_of_points_contain_reference_value() {
    let mut state = RandState::new(808);
    for trial in 0..2_000 {
        let p = random_mid(&mut state);
        let prec = 8 + state.randint(121);
        let point = Arb::from_arf(p.clone());

        let exact = point.exp(4 * prec);
        let y = point.exp(prec);
        assert!(y.overlaps(&exact), "trial {trial}: exp({p})");
        assert!(exact.rad() <= y.rad(), "trial {trial}: reference for exp({p}) is wider");

        let q = p.abs();
        let point = Arb::from_arf(q.clone());
        let exact = point.log(4 * prec);
        let y = point.log(prec);
        assert!(y.overlaps(&exact), "trial {trial}: log({q})");
    }
}

// =============================================================================
// Precision monotonicity
// =============================================================================

#[test]
fn test_more_precision_never_widens_exact_inputs() {
    let mut state = RandState::new(31337);
    for trial in 0..TRIALS {
        let x = Arb::from_rational(&random_rational(&mut state), 600);
        let y = Arb::from_rational(&random_rational(&mut state), 600);
        let x = Arb::from_arf(x.mid().clone());
        let y = Arb::from_arf(y.mid().clone());
        let p1 = random_prec(&mut state);
        let p2 = p1 + 1 + state.randint(200);

        assert!(x.add(&y, p2).rad() <= x.add(&y, p1).rad(), "trial {trial}: add");
        assert!(x.mul(&y, p2).rad() <= x.mul(&y, p1).rad(), "trial {trial}: mul");
        if !y.contains_zero() {
            assert!(x.div(&y, p2).rad() <= x.div(&y, p1).rad(), "trial {trial}: div");
        }
        let ax = x.abs();
        assert!(ax.sqrt(p2).rad() <= ax.sqrt(p1).rad(), "trial {trial}: sqrt");
    }
}

#[test]
fn test_more_precision_never_widens_inexact_inputs() {
    let mut state = RandState::new(4);
    for trial in 0..TRIALS {
        let input_prec = random_prec(&mut state);
        let x = Arb::from_rational(&random_rational(&mut state), input_prec);
        let y = Arb::from_rational(&random_rational(&mut state), input_prec);
        let p1 = random_prec(&mut state);
        let p2 = p1 + 1 + state.randint(200);

        assert!(x.add(&y, p2).rad() <= x.add(&y, p1).rad(), "trial {trial}: add");
        assert!(x.sub(&y, p2).rad() <= x.sub(&y, p1).rad(), "trial {trial}: sub");
        assert!(x.mul(&y, p2).rad() <= x.mul(&y, p1).rad(), "trial {trial}: mul");
    }
}

#[test]
fn test_constants_tighten_with_precision() {
    let mut last_log2 = const_log2(8);
    let mut last_pi = const_pi(8);
    for prec in (16..=2048).step_by(61) {
        let log2 = const_log2(prec);
        let pi = const_pi(prec);
        assert!(log2.overlaps(&last_log2), "log2 at {prec}");
        assert!(pi.overlaps(&last_pi), "pi at {prec}");
        assert!(log2.rad() <= last_log2.rad(), "log2 radius at {prec}");
        assert!(pi.rad() <= last_pi.rad(), "pi radius at {prec}");
        last_log2 = log2;
        last_pi = pi;
    }
}
