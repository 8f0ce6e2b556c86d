//! Complex balls as a ring.
//!
//! Predicates combine the real and imaginary parts with three-valued
//! logic. The field is algebraically closed and carries no order, so
//! `cmp` is a `DOMAIN` error while `cmpabs` compares moduli.

use core::cmp::Ordering;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::arb::{equal_balls, equal_rational, random_ball, unique_integer};
use crate::ball::{const_pi, Acb, Arb};
use crate::core::{GrStream, RandState, Status, Truth};
use crate::gr::slot::typed_slot;
use crate::gr::{CtxParams, Elem, GrCtx, Method, MethodTable, RingTag, Slot};

static METHODS: OnceLock<MethodTable> = OnceLock::new();

fn methods() -> &'static MethodTable {
    METHODS.get_or_init(|| {
        use Method as M;
        MethodTable::build(
            RingTag::ComplexBall,
            &[
                (M::CtxWrite, Slot::CtxWrite(ctx_write)),
                (M::CtxIsRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsCommutativeRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsIntegralDomain, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsField, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsUniqueFactorizationDomain, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsFinite, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsFiniteCharacteristic, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsAlgebraicallyClosed, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsOrderedRing, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsExact, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsCanonical, Slot::CtxPredicate(|_| Truth::False)),
                (M::Init, Slot::Init(|_| Elem::new(Acb::zero()))),
                (M::Randtest, typed_slot!(Randtest, Acb, randtest)),
                (M::Write, typed_slot!(Write, Acb, write)),
                (M::Zero, typed_slot!(Constant, Acb, zero)),
                (M::One, typed_slot!(Constant, Acb, one)),
                (M::IsZero, typed_slot!(Predicate, Acb, is_zero)),
                (M::IsOne, typed_slot!(Predicate, Acb, is_one)),
                (M::IsNegOne, typed_slot!(Predicate, Acb, is_neg_one)),
                (M::Equal, typed_slot!(BinaryPredicate, Acb, equal)),
                (M::Set, typed_slot!(Unary, Acb, set)),
                (M::SetSi, typed_slot!(SetSi, Acb, set_si)),
                (M::SetFmpz, typed_slot!(SetFmpz, Acb, set_fmpz)),
                (M::SetFmpq, typed_slot!(SetFmpq, Acb, set_fmpq)),
                (M::SetOther, typed_slot!(SetOther, Acb, set_other)),
                (M::GetSi, typed_slot!(GetSi, Acb, get_si)),
                (M::GetFmpz, typed_slot!(GetFmpz, Acb, get_fmpz)),
                (M::GetFmpq, typed_slot!(GetFmpq, Acb, get_fmpq)),
                (M::Neg, typed_slot!(Unary, Acb, neg)),
                (M::Add, typed_slot!(Binary, Acb, add)),
                (M::Sub, typed_slot!(Binary, Acb, sub)),
                (M::Mul, typed_slot!(Binary, Acb, mul)),
                (M::Sqr, typed_slot!(Unary, Acb, sqr)),
                (M::Div, typed_slot!(Binary, Acb, div)),
                (M::IsInvertible, typed_slot!(Predicate, Acb, is_invertible)),
                (M::Inv, typed_slot!(Unary, Acb, inv)),
                (M::PowUi, typed_slot!(BinaryUi, Acb, pow_ui)),
                (M::I, typed_slot!(Constant, Acb, i)),
                (M::Pi, typed_slot!(Constant, Acb, pi)),
                (M::Abs, typed_slot!(Unary, Acb, abs)),
                (M::Conj, typed_slot!(Unary, Acb, conj)),
                (M::Re, typed_slot!(Unary, Acb, re)),
                (M::Im, typed_slot!(Unary, Acb, im)),
                (M::Csgn, typed_slot!(Unary, Acb, csgn)),
                (M::Cmp, typed_slot!(Cmp, Acb, cmp)),
                (M::Cmpabs, typed_slot!(Cmp, Acb, cmpabs)),
            ],
        )
    })
}

pub(crate) fn ctx(prec: u64) -> GrCtx {
    GrCtx::from_parts(
        RingTag::ComplexBall,
        core::mem::size_of::<Acb>(),
        methods(),
        CtxParams::Ball { prec: prec.max(2) },
    )
}

fn ctx_write(out: &mut GrStream, ctx: &GrCtx) -> Status {
    out.write_str("Complex numbers (acb, prec = ");
    out.write_display(&ctx.ball_prec());
    out.write_str(")");
    Status::SUCCESS
}

fn randtest(res: &mut Acb, state: &mut RandState, ctx: &GrCtx) -> Status {
    let prec = ctx.ball_prec();
    let re = random_ball(state, prec);
    let im = if state.randint(4) == 0 {
        Arb::zero()
    } else {
        random_ball(state, prec)
    };
    *res = Acb::new(re, im);
    Status::SUCCESS
}

fn write(out: &mut GrStream, x: &Acb, _: &GrCtx) -> Status {
    out.write_display(x);
    Status::SUCCESS
}

fn zero(res: &mut Acb, _: &GrCtx) -> Status {
    *res = Acb::zero();
    Status::SUCCESS
}

fn one(res: &mut Acb, _: &GrCtx) -> Status {
    *res = Acb::one();
    Status::SUCCESS
}

fn i(res: &mut Acb, _: &GrCtx) -> Status {
    *res = Acb::i();
    Status::SUCCESS
}

fn pi(res: &mut Acb, ctx: &GrCtx) -> Status {
    *res = Acb::from_real(const_pi(ctx.ball_prec()));
    Status::SUCCESS
}

fn equals_real(x: &Acb, c: i64) -> Truth {
    let c = BigRational::from_integer(BigInt::from(c));
    equal_rational(x.re(), &c).and(equal_rational(x.im(), &BigRational::zero()))
}

fn is_zero(x: &Acb, _: &GrCtx) -> Truth {
    equals_real(x, 0)
}

fn is_one(x: &Acb, _: &GrCtx) -> Truth {
    equals_real(x, 1)
}

fn is_neg_one(x: &Acb, _: &GrCtx) -> Truth {
    equals_real(x, -1)
}

fn equal(x: &Acb, y: &Acb, _: &GrCtx) -> Truth {
    equal_balls(x.re(), y.re()).and(equal_balls(x.im(), y.im()))
}

// ============================================================================
// Conversions
// ============================================================================

fn set(res: &mut Acb, x: &Acb, _: &GrCtx) -> Status {
    res.clone_from(x);
    Status::SUCCESS
}

fn set_si(res: &mut Acb, c: i64, ctx: &GrCtx) -> Status {
    *res = Acb::from_real(Arb::from_i64(c).round(ctx.ball_prec()));
    Status::SUCCESS
}

fn set_fmpz(res: &mut Acb, c: &BigInt, ctx: &GrCtx) -> Status {
    *res = Acb::from_real(Arb::from_bigint(c).round(ctx.ball_prec()));
    Status::SUCCESS
}

fn set_fmpq(res: &mut Acb, c: &BigRational, ctx: &GrCtx) -> Status {
    *res = Acb::from_real(Arb::from_rational(c, ctx.ball_prec()));
    Status::SUCCESS
}

fn set_other(res: &mut Acb, x: &Elem, x_ctx: &GrCtx, ctx: &GrCtx) -> Status {
    let prec = ctx.ball_prec();
    match x_ctx.which_ring() {
        RingTag::ComplexBall => {
            *res = x.get::<Acb>().round(prec);
            Status::SUCCESS
        }
        RingTag::RealBall => {
            *res = Acb::from_real(x.get::<Arb>().round(prec));
            Status::SUCCESS
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

/// The real part, provided the imaginary part is exactly zero.
fn real_part(x: &Acb) -> Result<&Arb, Status> {
    match equal_rational(x.im(), &BigRational::zero()) {
        Truth::True => Ok(x.re()),
        Truth::False => Err(Status::DOMAIN),
        Truth::Unknown => Err(Status::UNABLE),
    }
}

fn get_fmpz(res: &mut BigInt, x: &Acb, _: &GrCtx) -> Status {
    match real_part(x).and_then(unique_integer) {
        Ok(n) => {
            *res = n;
            Status::SUCCESS
        }
        Err(status) => status,
    }
}

fn get_si(res: &mut i64, x: &Acb, _: &GrCtx) -> Status {
    match real_part(x).and_then(unique_integer) {
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

fn get_fmpq(res: &mut BigRational, x: &Acb, _: &GrCtx) -> Status {
    match real_part(x) {
        Ok(re) if re.is_exact() => {
            *res = re.mid().to_rational();
            Status::SUCCESS
        }
        Ok(_) => Status::UNABLE,
        Err(status) => status,
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

fn neg(res: &mut Acb, x: &Acb, _: &GrCtx) -> Status {
    *res = x.neg();
    Status::SUCCESS
}

fn add(res: &mut Acb, x: &Acb, y: &Acb, ctx: &GrCtx) -> Status {
    *res = x.add(y, ctx.ball_prec());
    Status::SUCCESS
}

fn sub(res: &mut Acb, x: &Acb, y: &Acb, ctx: &GrCtx) -> Status {
    *res = x.sub(y, ctx.ball_prec());
    Status::SUCCESS
}

fn mul(res: &mut Acb, x: &Acb, y: &Acb, ctx: &GrCtx) -> Status {
    *res = x.mul(y, ctx.ball_prec());
    Status::SUCCESS
}

fn sqr(res: &mut Acb, x: &Acb, ctx: &GrCtx) -> Status {
    *res = x.sqr(ctx.ball_prec());
    Status::SUCCESS
}

fn check_divisor(y: &Acb) -> Option<Status> {
    if y.is_zero() {
        Some(Status::DOMAIN)
    } else if y.contains_zero() {
        Some(Status::UNABLE)
    } else {
        None
    }
}

fn div(res: &mut Acb, x: &Acb, y: &Acb, ctx: &GrCtx) -> Status {
    if let Some(status) = check_divisor(y) {
        return status;
    }
    *res = x.div(y, ctx.ball_prec());
    Status::SUCCESS
}

fn is_invertible(x: &Acb, _: &GrCtx) -> Truth {
    match check_divisor(x) {
        None => Truth::True,
        Some(Status::DOMAIN) => Truth::False,
        Some(_) => Truth::Unknown,
    }
}

fn inv(res: &mut Acb, x: &Acb, ctx: &GrCtx) -> Status {
    if let Some(status) = check_divisor(x) {
        return status;
    }
    *res = x.inv(ctx.ball_prec());
    Status::SUCCESS
}

fn pow_ui(res: &mut Acb, x: &Acb, e: u64, ctx: &GrCtx) -> Status {
    let prec = ctx.ball_prec();
    let wp = prec + 64 - u64::from(e.leading_zeros()) + 4;
    let mut acc = Acb::one();
    let mut base = x.clone();
    let mut k = e;
    while k != 0 {
        if k & 1 == 1 {
            acc = acc.mul(&base, wp);
        }
        k >>= 1;
        if k != 0 {
            base = base.sqr(wp);
        }
    }
    *res = acc.round(prec);
    Status::SUCCESS
}

fn abs(res: &mut Acb, x: &Acb, ctx: &GrCtx) -> Status {
    *res = Acb::from_real(x.abs(ctx.ball_prec()));
    Status::SUCCESS
}

fn conj(res: &mut Acb, x: &Acb, _: &GrCtx) -> Status {
    *res = x.conj();
    Status::SUCCESS
}

fn re(res: &mut Acb, x: &Acb, _: &GrCtx) -> Status {
    *res = Acb::from_real(x.re().clone());
    Status::SUCCESS
}

fn im(res: &mut Acb, x: &Acb, _: &GrCtx) -> Status {
    *res = Acb::from_real(x.im().clone());
    Status::SUCCESS
}

/// Sign of the real part, or of the imaginary part on the imaginary axis.
fn csgn(res: &mut Acb, x: &Acb, _: &GrCtx) -> Status {
    let sign = |b: &Arb| {
        if b.is_positive() {
            Some(1)
        } else if b.is_negative() {
            Some(-1)
        } else if b.is_zero() {
            Some(0)
        } else {
            None
        }
    };
    let s = match sign(x.re()) {
        Some(0) => sign(x.im()),
        other => other,
    };
    match s {
        Some(s) => {
            *res = Acb::from_real(Arb::from_i64(s));
            Status::SUCCESS
        }
        None => Status::UNABLE,
    }
}

fn cmp(_: &mut Ordering, _: &Acb, _: &Acb, _: &GrCtx) -> Status {
    Status::DOMAIN
}

fn cmpabs(res: &mut Ordering, x: &Acb, y: &Acb, ctx: &GrCtx) -> Status {
    let prec = ctx.ball_prec();
    match x.abs(prec).cmp_checked(&y.abs(prec)) {
        Some(ord) => {
            *res = ord;
            Status::SUCCESS
        }
        None => Status::UNABLE,
    }
}
