//! Real balls as a ring.
//!
//! Every result encloses the true value. Predicates answer `True` or
//! `False` only when the enclosure decides them, and operations whose
//! result depends on information the ball has lost return `UNABLE`
//! instead of guessing:
//!
//! | Input | `div`, `inv` | `sqrt` | `log` |
//! |-------|--------------|--------|-------|
//! | exactly zero | `DOMAIN` | `0` | `DOMAIN` |
//! | contains zero | `UNABLE` | `UNABLE` unless nonnegative | `UNABLE` unless positive |
//! | certainly negative | ok | `DOMAIN` | `DOMAIN` |
//!
//! # Example
//!
//! ```
//! use exactball::gr::GrCtx;
//! use exactball::Truth;
//!
//! let ctx = GrCtx::real_ball(128);
//! let mut pi = ctx.init();
//! assert!(ctx.pi(&mut pi).is_success());
//! let mut d = ctx.init();
//! assert!(ctx.sub(&mut d, &pi, &pi).is_success());
//! // pi - pi is a small ball around zero, not exact zero.
//! assert_eq!(ctx.is_zero(&d), Truth::Unknown);
//! ```

use core::cmp::Ordering;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::randtest_bits;
use crate::ball::{const_pi, Acb, Arb, Arf, Mag};
use crate::core::{GrStream, RandState, Status, Truth};
use crate::gr::slot::typed_slot;
use crate::gr::{CtxParams, Elem, GrCtx, Method, MethodTable, RingTag, Slot};

static METHODS: OnceLock<MethodTable> = OnceLock::new();

fn methods() -> &'static MethodTable {
    METHODS.get_or_init(|| {
        use Method as M;
        MethodTable::build(
            RingTag::RealBall,
            &[
                (M::CtxWrite, Slot::CtxWrite(ctx_write)),
                (M::CtxIsRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsCommutativeRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsIntegralDomain, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsField, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsUniqueFactorizationDomain, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsFinite, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsFiniteCharacteristic, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsAlgebraicallyClosed, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsOrderedRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsExact, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsCanonical, Slot::CtxPredicate(|_| Truth::False)),
                (M::Init, Slot::Init(|_| Elem::new(Arb::zero()))),
                (M::Randtest, typed_slot!(Randtest, Arb, randtest)),
                (M::Write, typed_slot!(Write, Arb, write)),
                (M::Zero, typed_slot!(Constant, Arb, zero)),
                (M::One, typed_slot!(Constant, Arb, one)),
                (M::IsZero, typed_slot!(Predicate, Arb, is_zero)),
                (M::IsOne, typed_slot!(Predicate, Arb, is_one)),
                (M::IsNegOne, typed_slot!(Predicate, Arb, is_neg_one)),
                (M::Equal, typed_slot!(BinaryPredicate, Arb, equal)),
                (M::Set, typed_slot!(Unary, Arb, set)),
                (M::SetSi, typed_slot!(SetSi, Arb, set_si)),
                (M::SetUi, typed_slot!(SetUi, Arb, set_ui)),
                (M::SetFmpz, typed_slot!(SetFmpz, Arb, set_fmpz)),
                (M::SetFmpq, typed_slot!(SetFmpq, Arb, set_fmpq)),
                (M::SetOther, typed_slot!(SetOther, Arb, set_other)),
                (M::GetSi, typed_slot!(GetSi, Arb, get_si)),
                (M::GetFmpz, typed_slot!(GetFmpz, Arb, get_fmpz)),
                (M::GetFmpq, typed_slot!(GetFmpq, Arb, get_fmpq)),
                (M::GetD, typed_slot!(GetD, Arb, get_d)),
                (M::Neg, typed_slot!(Unary, Arb, neg)),
                (M::Add, typed_slot!(Binary, Arb, add)),
                (M::Sub, typed_slot!(Binary, Arb, sub)),
                (M::Mul, typed_slot!(Binary, Arb, mul)),
                (M::Sqr, typed_slot!(Unary, Arb, sqr)),
                (M::Div, typed_slot!(Binary, Arb, div)),
                (M::IsInvertible, typed_slot!(Predicate, Arb, is_invertible)),
                (M::Inv, typed_slot!(Unary, Arb, inv)),
                (M::PowUi, typed_slot!(BinaryUi, Arb, pow_ui)),
                (M::PowSi, typed_slot!(BinarySi, Arb, pow_si)),
                (M::PowFmpz, typed_slot!(BinaryFmpz, Arb, pow_fmpz)),
                (M::PowFmpq, typed_slot!(BinaryFmpq, Arb, pow_fmpq)),
                (M::Pow, typed_slot!(Binary, Arb, pow)),
                (M::IsSquare, typed_slot!(Predicate, Arb, is_square)),
                (M::Sqrt, typed_slot!(Unary, Arb, sqrt)),
                (M::Rsqrt, typed_slot!(Unary, Arb, rsqrt)),
                (M::Floor, typed_slot!(Unary, Arb, floor)),
                (M::Ceil, typed_slot!(Unary, Arb, ceil)),
                (M::Trunc, typed_slot!(Unary, Arb, trunc)),
                (M::Nint, typed_slot!(Unary, Arb, nint)),
                (M::I, typed_slot!(Constant, Arb, not_in_domain)),
                (M::Pi, typed_slot!(Constant, Arb, pi)),
                (M::Abs, typed_slot!(Unary, Arb, abs)),
                (M::Conj, typed_slot!(Unary, Arb, set)),
                (M::Re, typed_slot!(Unary, Arb, set)),
                (M::Im, typed_slot!(Unary, Arb, im)),
                (M::Sgn, typed_slot!(Unary, Arb, sgn)),
                (M::Csgn, typed_slot!(Unary, Arb, sgn)),
                (M::Cmp, typed_slot!(Cmp, Arb, cmp)),
                (M::Cmpabs, typed_slot!(Cmp, Arb, cmpabs)),
                (M::Exp, typed_slot!(Unary, Arb, exp)),
                (M::Log, typed_slot!(Unary, Arb, log)),
            ],
        )
    })
}

pub(crate) fn ctx(prec: u64) -> GrCtx {
    GrCtx::from_parts(
        RingTag::RealBall,
        core::mem::size_of::<Arb>(),
        methods(),
        CtxParams::Ball { prec: prec.max(2) },
    )
}

// ============================================================================
// Shared with the complex binding
// ============================================================================

/// Truth of `x == c` for an exact constant `c`.
pub(super) fn equal_rational(x: &Arb, c: &BigRational) -> Truth {
    if x.is_exact() {
        Truth::from_bool(x.contains_rational(c))
    } else if x.contains_rational(c) {
        Truth::Unknown
    } else {
        Truth::False
    }
}

pub(super) fn equal_balls(x: &Arb, y: &Arb) -> Truth {
    if x.is_exact() && y.is_exact() {
        Truth::from_bool(x == y)
    } else if x.overlaps(y) {
        Truth::Unknown
    } else {
        Truth::False
    }
}

fn small(c: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(c))
}

/// Nearest integer to `x`, ties to even.
fn nint_arf(x: &Arf) -> BigInt {
    let shifted = x.add(&Arf::new(BigInt::one(), -1));
    let f = shifted.floor();
    if shifted.is_integer() && f.is_odd() {
        f - 1
    } else {
        f
    }
}

fn trunc_arf(x: &Arf) -> BigInt {
    if x.is_negative() {
        x.ceil()
    } else {
        x.floor()
    }
}

/// Applies an integer rounding to both endpoints; succeeds when they agree.
fn round_ends(res: &mut Arb, x: &Arb, f: fn(&Arf) -> BigInt) -> Status {
    let (Some(lo), Some(hi)) = (x.lower(), x.upper()) else {
        return Status::UNABLE;
    };
    let a = f(&lo);
    if a != f(&hi) {
        return Status::UNABLE;
    }
    *res = Arb::from_bigint(&a);
    Status::SUCCESS
}

/// Maps an exact or enclosed-integer ball to its integer value.
pub(super) fn unique_integer(x: &Arb) -> Result<BigInt, Status> {
    if x.is_exact() && x.mid().is_integer() {
        return Ok(x.mid().floor());
    }
    match x.integer_range() {
        Some((lo, hi)) if lo > hi => Err(Status::DOMAIN),
        _ => Err(Status::UNABLE),
    }
}

/// Finite results succeed; a blown-up enclosure means the precision was
/// not enough to say anything.
fn finite_or_unable(res: &mut Arb, value: Arb) -> Status {
    let ok = value.is_finite();
    *res = value;
    if ok {
        Status::SUCCESS
    } else {
        Status::UNABLE
    }
}

// ============================================================================
// Basics
// ============================================================================

fn ctx_write(out: &mut GrStream, ctx: &GrCtx) -> Status {
    out.write_str("Real numbers (arb, prec = ");
    out.write_display(&ctx.ball_prec());
    out.write_str(")");
    Status::SUCCESS
}

/// A random ball at `prec` bits, exact half of the time.
pub(super) fn random_ball(state: &mut RandState, prec: u64) -> Arb {
    let bits = randtest_bits(state);
    let mid = Arf::new(state.randtest(bits), state.randint(41) as i64 - 20);
    let exact = Arb::from_arf(mid).round(prec);
    if state.randbool() {
        exact
    } else {
        exact.add_error(Mag::from_2exp(-(state.randint(80) as i64)))
    }
}

fn randtest(res: &mut Arb, state: &mut RandState, ctx: &GrCtx) -> Status {
    *res = random_ball(state, ctx.ball_prec());
    Status::SUCCESS
}

fn write(out: &mut GrStream, x: &Arb, _: &GrCtx) -> Status {
    out.write_display(x);
    Status::SUCCESS
}

fn zero(res: &mut Arb, _: &GrCtx) -> Status {
    *res = Arb::zero();
    Status::SUCCESS
}

fn one(res: &mut Arb, _: &GrCtx) -> Status {
    *res = Arb::one();
    Status::SUCCESS
}

fn pi(res: &mut Arb, ctx: &GrCtx) -> Status {
    *res = const_pi(ctx.ball_prec());
    Status::SUCCESS
}

fn not_in_domain(_: &mut Arb, _: &GrCtx) -> Status {
    Status::DOMAIN
}

fn is_zero(x: &Arb, _: &GrCtx) -> Truth {
    equal_rational(x, &BigRational::zero())
}

fn is_one(x: &Arb, _: &GrCtx) -> Truth {
    equal_rational(x, &small(1))
}

fn is_neg_one(x: &Arb, _: &GrCtx) -> Truth {
    equal_rational(x, &small(-1))
}

fn equal(x: &Arb, y: &Arb, _: &GrCtx) -> Truth {
    equal_balls(x, y)
}

// ============================================================================
// Conversions
// ============================================================================

fn set(res: &mut Arb, x: &Arb, _: &GrCtx) -> Status {
    res.clone_from(x);
    Status::SUCCESS
}

fn set_si(res: &mut Arb, c: i64, ctx: &GrCtx) -> Status {
    *res = Arb::from_i64(c).round(ctx.ball_prec());
    Status::SUCCESS
}

fn set_ui(res: &mut Arb, c: u64, ctx: &GrCtx) -> Status {
    *res = Arb::from_bigint(&BigInt::from(c)).round(ctx.ball_prec());
    Status::SUCCESS
}

fn set_fmpz(res: &mut Arb, c: &BigInt, ctx: &GrCtx) -> Status {
    *res = Arb::from_bigint(c).round(ctx.ball_prec());
    Status::SUCCESS
}

fn set_fmpq(res: &mut Arb, c: &BigRational, ctx: &GrCtx) -> Status {
    *res = Arb::from_rational(c, ctx.ball_prec());
    Status::SUCCESS
}

fn set_other(res: &mut Arb, x: &Elem, x_ctx: &GrCtx, ctx: &GrCtx) -> Status {
    match x_ctx.which_ring() {
        RingTag::RealBall => {
            *res = x.get::<Arb>().round(ctx.ball_prec());
            Status::SUCCESS
        }
        RingTag::ComplexBall => {
            let z = x.get::<Acb>();
            match equal_rational(z.im(), &BigRational::zero()) {
                Truth::True => {
                    *res = z.re().round(ctx.ball_prec());
                    Status::SUCCESS
                }
                Truth::False => Status::DOMAIN,
                Truth::Unknown => Status::UNABLE,
            }
        }
        RingTag::Fmpz => set_fmpz(res, x.get::<BigInt>(), ctx),
        RingTag::Fmpq => set_fmpq(res, x.get::<BigRational>(), ctx),
        _ => {
            let mut q = BigRational::zero();
            let status = x_ctx.get_fmpq(&mut q, x);
            if status.is_success() {
                set_fmpq(res, &q, ctx)
            } else {
                status
            }
        }
    }
}

/// Succeeds for exact integers only.
fn get_fmpz(res: &mut BigInt, x: &Arb, _: &GrCtx) -> Status {
    match unique_integer(x) {
        Ok(n) => {
            *res = n;
            Status::SUCCESS
        }
        Err(status) => status,
    }
}

fn get_si(res: &mut i64, x: &Arb, _: &GrCtx) -> Status {
    match unique_integer(x) {
        Ok(n) => match n.to_i64() {
            Some(v) => {
                *res = v;
                Status::SUCCESS
            }
            None => Status::DOMAIN,
        },
        Err(status) => status,
    }
}

/// Exact balls hold a dyadic rational; wider balls have no single value.
fn get_fmpq(res: &mut BigRational, x: &Arb, _: &GrCtx) -> Status {
    if !x.is_exact() {
        return Status::UNABLE;
    }
    *res = x.mid().to_rational();
    Status::SUCCESS
}

fn get_d(res: &mut f64, x: &Arb, _: &GrCtx) -> Status {
    *res = x.mid().to_f64();
    Status::SUCCESS
}

// ============================================================================
// Arithmetic
// ============================================================================

fn neg(res: &mut Arb, x: &Arb, _: &GrCtx) -> Status {
    *res = x.neg();
    Status::SUCCESS
}

fn add(res: &mut Arb, x: &Arb, y: &Arb, ctx: &GrCtx) -> Status {
    *res = x.add(y, ctx.ball_prec());
    Status::SUCCESS
}

fn sub(res: &mut Arb, x: &Arb, y: &Arb, ctx: &GrCtx) -> Status {
    *res = x.sub(y, ctx.ball_prec());
    Status::SUCCESS
}

fn mul(res: &mut Arb, x: &Arb, y: &Arb, ctx: &GrCtx) -> Status {
    *res = x.mul(y, ctx.ball_prec());
    Status::SUCCESS
}

fn sqr(res: &mut Arb, x: &Arb, ctx: &GrCtx) -> Status {
    *res = x.sqr(ctx.ball_prec());
    Status::SUCCESS
}

/// `DOMAIN` for an exact zero, `UNABLE` for a ball straddling zero.
fn check_divisor(y: &Arb) -> Option<Status> {
    if y.is_zero() {
        Some(Status::DOMAIN)
    } else if y.contains_zero() {
        Some(Status::UNABLE)
    } else {
        None
    }
}

fn div(res: &mut Arb, x: &Arb, y: &Arb, ctx: &GrCtx) -> Status {
    if let Some(status) = check_divisor(y) {
        return status;
    }
    *res = x.div(y, ctx.ball_prec());
    Status::SUCCESS
}

fn is_invertible(x: &Arb, _: &GrCtx) -> Truth {
    match check_divisor(x) {
        None => Truth::True,
        Some(Status::DOMAIN) => Truth::False,
        Some(_) => Truth::Unknown,
    }
}

fn inv(res: &mut Arb, x: &Arb, ctx: &GrCtx) -> Status {
    if let Some(status) = check_divisor(x) {
        return status;
    }
    *res = x.inv(ctx.ball_prec());
    Status::SUCCESS
}

fn pow_ui(res: &mut Arb, x: &Arb, e: u64, ctx: &GrCtx) -> Status {
    *res = x.pow_ui(e, ctx.ball_prec());
    Status::SUCCESS
}

fn pow_si(res: &mut Arb, x: &Arb, e: i64, ctx: &GrCtx) -> Status {
    pow_fmpz(res, x, &BigInt::from(e), ctx)
}

fn pow_fmpz(res: &mut Arb, x: &Arb, e: &BigInt, ctx: &GrCtx) -> Status {
    if e.is_negative() {
        if let Some(status) = check_divisor(x) {
            return status;
        }
    }
    finite_or_unable(res, x.pow_fmpz(e, ctx.ball_prec()))
}

/// `exp(y log x)` for a certainly positive base.
fn pow_positive(res: &mut Arb, x: &Arb, y: &Arb, ctx: &GrCtx) -> Status {
    let prec = ctx.ball_prec();
    let wp = prec + 16;
    let value = x.log(wp).mul(y, wp).exp(prec);
    finite_or_unable(res, value)
}

fn pow_fmpq(res: &mut Arb, x: &Arb, e: &BigRational, ctx: &GrCtx) -> Status {
    if e.is_integer() {
        return pow_fmpz(res, x, e.numer(), ctx);
    }
    if x.is_zero() && e.is_positive() {
        *res = Arb::zero();
        return Status::SUCCESS;
    }
    if x.is_positive() {
        let y = Arb::from_rational(e, ctx.ball_prec() + 16);
        return pow_positive(res, x, &y, ctx);
    }
    Status::UNABLE
}

fn pow(res: &mut Arb, x: &Arb, y: &Arb, ctx: &GrCtx) -> Status {
    if y.is_exact() && y.mid().is_integer() {
        return pow_fmpz(res, x, &y.mid().floor(), ctx);
    }
    if x.is_positive() {
        return pow_positive(res, x, y, ctx);
    }
    Status::UNABLE
}

fn is_square(x: &Arb, _: &GrCtx) -> Truth {
    if x.is_nonnegative() {
        Truth::True
    } else if x.is_negative() {
        Truth::False
    } else {
        Truth::Unknown
    }
}

fn sqrt(res: &mut Arb, x: &Arb, ctx: &GrCtx) -> Status {
    if x.is_negative() {
        Status::DOMAIN
    } else if x.is_nonnegative() {
        *res = x.sqrt(ctx.ball_prec());
        Status::SUCCESS
    } else {
        Status::UNABLE
    }
}

fn rsqrt(res: &mut Arb, x: &Arb, ctx: &GrCtx) -> Status {
    if x.is_nonpositive() {
        Status::DOMAIN
    } else if x.is_positive() {
        *res = x.rsqrt(ctx.ball_prec());
        Status::SUCCESS
    } else {
        Status::UNABLE
    }
}

fn floor(res: &mut Arb, x: &Arb, _: &GrCtx) -> Status {
    round_ends(res, x, Arf::floor)
}

fn ceil(res: &mut Arb, x: &Arb, _: &GrCtx) -> Status {
    round_ends(res, x, Arf::ceil)
}

fn trunc(res: &mut Arb, x: &Arb, _: &GrCtx) -> Status {
    round_ends(res, x, trunc_arf)
}

fn nint(res: &mut Arb, x: &Arb, _: &GrCtx) -> Status {
    round_ends(res, x, nint_arf)
}

fn abs(res: &mut Arb, x: &Arb, _: &GrCtx) -> Status {
    *res = x.abs();
    Status::SUCCESS
}

fn im(res: &mut Arb, _: &Arb, _: &GrCtx) -> Status {
    *res = Arb::zero();
    Status::SUCCESS
}

fn sgn(res: &mut Arb, x: &Arb, _: &GrCtx) -> Status {
    let s = if x.is_zero() {
        0
    } else if x.is_positive() {
        1
    } else if x.is_negative() {
        -1
    } else {
        return Status::UNABLE;
    };
    *res = Arb::from_i64(s);
    Status::SUCCESS
}

/// `UNABLE` while the balls overlap.
fn cmp(res: &mut Ordering, x: &Arb, y: &Arb, _: &GrCtx) -> Status {
    match x.cmp_checked(y) {
        Some(ord) => {
            *res = ord;
            Status::SUCCESS
        }
        None => Status::UNABLE,
    }
}

fn cmpabs(res: &mut Ordering, x: &Arb, y: &Arb, ctx: &GrCtx) -> Status {
    cmp(res, &x.abs(), &y.abs(), ctx)
}

fn exp(res: &mut Arb, x: &Arb, ctx: &GrCtx) -> Status {
    finite_or_unable(res, x.exp(ctx.ball_prec()))
}

fn log(res: &mut Arb, x: &Arb, ctx: &GrCtx) -> Status {
    if x.is_nonpositive() {
        Status::DOMAIN
    } else if x.is_positive() {
        *res = x.log(ctx.ball_prec());
        Status::SUCCESS
    } else {
        Status::UNABLE
    }
}
