//! The field of rationals.
//!
//! Values are [`BigRational`]s, always reduced with a positive
//! denominator, so structural equality is value equality.
//!
//! # Powers
//!
//! Exponentiation follows a fixed ladder so that the bases whose powers
//! stay small (`1`, `-1`, `0`) succeed for any exponent, while growing
//! powers are refused with `UNABLE` once the exponent passes the
//! context's size limit:
//!
//! | Base | Exponent | Result |
//! |------|----------|--------|
//! | `1` | any | `1` |
//! | `-1` | integer | `±1` by parity |
//! | `0` | positive | `0` |
//! | `0` | zero or negative | `DOMAIN` |
//! | other | integer beyond the size limit | `UNABLE` |
//! | `x` | `p/q` | `(x^(1/q))^p` when the root is exact, else `DOMAIN` |
//!
//! # Bulk operations
//!
//! Polynomial and matrix products clear denominators, run the integer
//! kernel from [`fmpz`](super::fmpz), and divide the common denominator
//! back out. The results agree exactly with the generic element-wise
//! algorithms.
//!
//! # Example
//!
//! ```
//! use exactball::gr::GrCtx;
//! use num_rational::BigRational;
//!
//! let ctx = GrCtx::fmpq();
//! let x = ctx.elem_fmpq(&BigRational::new(4.into(), 9.into())).unwrap();
//! let mut r = ctx.init();
//! assert!(ctx.pow_fmpq(&mut r, &x, &BigRational::new(1.into(), 2.into())).is_success());
//! assert_eq!(ctx.elem_to_string(&r), "2/3");
//! ```

use core::cmp::Ordering;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::fmpz::{det_bareiss_int, mat_mul_int, poly_mullow_int};
use super::randtest_bits;
use crate::core::{GrStream, RandState, Status, Truth};
use crate::gr::slot::typed_slot;
use crate::gr::{CtxParams, Elem, GrCtx, GrMat, Method, MethodTable, RingTag, Slot};
use crate::nt;

static METHODS: OnceLock<MethodTable> = OnceLock::new();

fn methods() -> &'static MethodTable {
    METHODS.get_or_init(|| {
        use Method as M;
        MethodTable::build(
            RingTag::Fmpq,
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
                (M::CtxIsExact, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsCanonical, Slot::CtxPredicate(|_| Truth::True)),
                (M::Init, Slot::Init(|_| Elem::new(BigRational::zero()))),
                (M::Randtest, typed_slot!(Randtest, BigRational, randtest)),
                (M::Write, typed_slot!(Write, BigRational, write)),
                (M::Zero, typed_slot!(Constant, BigRational, zero)),
                (M::One, typed_slot!(Constant, BigRational, one)),
                (M::IsZero, typed_slot!(Predicate, BigRational, is_zero)),
                (M::IsOne, typed_slot!(Predicate, BigRational, is_one)),
                (M::IsNegOne, typed_slot!(Predicate, BigRational, is_neg_one)),
                (M::Equal, typed_slot!(BinaryPredicate, BigRational, equal)),
                (M::Set, typed_slot!(Unary, BigRational, set)),
                (M::SetSi, typed_slot!(SetSi, BigRational, set_si)),
                (M::SetUi, typed_slot!(SetUi, BigRational, set_ui)),
                (M::SetFmpz, typed_slot!(SetFmpz, BigRational, set_fmpz)),
                (M::SetFmpq, typed_slot!(SetFmpq, BigRational, set_fmpq)),
                (M::SetOther, typed_slot!(SetOther, BigRational, set_other)),
                (M::GetSi, typed_slot!(GetSi, BigRational, get_si)),
                (M::GetUi, typed_slot!(GetUi, BigRational, get_ui)),
                (M::GetFmpz, typed_slot!(GetFmpz, BigRational, get_fmpz)),
                (M::GetFmpq, typed_slot!(GetFmpq, BigRational, get_fmpq)),
                (M::GetD, typed_slot!(GetD, BigRational, get_d)),
                (M::Neg, typed_slot!(Unary, BigRational, neg)),
                (M::Add, typed_slot!(Binary, BigRational, add)),
                (M::AddUi, typed_slot!(BinaryUi, BigRational, add_ui)),
                (M::AddSi, typed_slot!(BinarySi, BigRational, add_si)),
                (M::Sub, typed_slot!(Binary, BigRational, sub)),
                (M::Mul, typed_slot!(Binary, BigRational, mul)),
                (M::MulSi, typed_slot!(BinarySi, BigRational, mul_si)),
                (M::Div, typed_slot!(Binary, BigRational, div)),
                (M::IsInvertible, typed_slot!(Predicate, BigRational, is_invertible)),
                (M::Inv, typed_slot!(Unary, BigRational, inv)),
                (M::PowUi, typed_slot!(BinaryUi, BigRational, pow_ui)),
                (M::PowSi, typed_slot!(BinarySi, BigRational, pow_si)),
                (M::PowFmpz, typed_slot!(BinaryFmpz, BigRational, pow_fmpz)),
                (M::PowFmpq, typed_slot!(BinaryFmpq, BigRational, pow_fmpq)),
                (M::Pow, typed_slot!(Binary, BigRational, pow)),
                (M::IsSquare, typed_slot!(Predicate, BigRational, is_square)),
                (M::Sqrt, typed_slot!(Unary, BigRational, sqrt)),
                (M::Rsqrt, typed_slot!(Unary, BigRational, rsqrt)),
                (M::Floor, typed_slot!(Unary, BigRational, floor)),
                (M::Ceil, typed_slot!(Unary, BigRational, ceil)),
                (M::Trunc, typed_slot!(Unary, BigRational, trunc)),
                (M::Nint, typed_slot!(Unary, BigRational, nint)),
                (M::I, typed_slot!(Constant, BigRational, not_in_domain)),
                (M::Pi, typed_slot!(Constant, BigRational, not_in_domain)),
                (M::Abs, typed_slot!(Unary, BigRational, abs)),
                (M::Conj, typed_slot!(Unary, BigRational, set)),
                (M::Re, typed_slot!(Unary, BigRational, set)),
                (M::Im, typed_slot!(Unary, BigRational, im)),
                (M::Sgn, typed_slot!(Unary, BigRational, sgn)),
                (M::Csgn, typed_slot!(Unary, BigRational, sgn)),
                (M::Cmp, typed_slot!(Cmp, BigRational, cmp)),
                (M::Cmpabs, typed_slot!(Cmp, BigRational, cmpabs)),
                (M::Exp, typed_slot!(Unary, BigRational, exp)),
                (M::Log, typed_slot!(Unary, BigRational, log)),
                (M::PolyMullow, Slot::PolyMullow(poly_mullow)),
                (M::MatMul, Slot::MatMul(mat_mul)),
                (M::MatDet, Slot::MatDet(mat_det)),
            ],
        )
    })
}

pub(crate) fn ctx() -> GrCtx {
    GrCtx::from_parts(
        RingTag::Fmpq,
        core::mem::size_of::<BigRational>(),
        methods(),
        CtxParams::None,
    )
}

fn ctx_write(out: &mut GrStream, _: &GrCtx) -> Status {
    out.write_str("Rational field (fmpq)");
    Status::SUCCESS
}

fn randtest(res: &mut BigRational, state: &mut RandState, _: &GrCtx) -> Status {
    let bits = randtest_bits(state);
    let num = state.randtest(bits);
    let den = state.randtest_positive(bits);
    *res = BigRational::new(num, den);
    Status::SUCCESS
}

fn write(out: &mut GrStream, x: &BigRational, _: &GrCtx) -> Status {
    out.write_display(x.numer());
    if !x.denom().is_one() {
        out.write_str("/");
        out.write_display(x.denom());
    }
    Status::SUCCESS
}

fn zero(res: &mut BigRational, _: &GrCtx) -> Status {
    res.set_zero();
    Status::SUCCESS
}

fn one(res: &mut BigRational, _: &GrCtx) -> Status {
    res.set_one();
    Status::SUCCESS
}

fn not_in_domain(_: &mut BigRational, _: &GrCtx) -> Status {
    Status::DOMAIN
}

fn is_neg_one_value(x: &BigRational) -> bool {
    x.is_integer() && *x.numer() == -BigInt::one()
}

fn is_zero(x: &BigRational, _: &GrCtx) -> Truth {
    Truth::from_bool(x.is_zero())
}

fn is_one(x: &BigRational, _: &GrCtx) -> Truth {
    Truth::from_bool(x.is_one())
}

fn is_neg_one(x: &BigRational, _: &GrCtx) -> Truth {
    Truth::from_bool(is_neg_one_value(x))
}

fn equal(x: &BigRational, y: &BigRational, _: &GrCtx) -> Truth {
    Truth::from_bool(x == y)
}

// ============================================================================
// Conversions
// ============================================================================

fn set(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    res.clone_from(x);
    Status::SUCCESS
}

fn set_si(res: &mut BigRational, c: i64, _: &GrCtx) -> Status {
    *res = BigRational::from_integer(c.into());
    Status::SUCCESS
}

fn set_ui(res: &mut BigRational, c: u64, _: &GrCtx) -> Status {
    *res = BigRational::from_integer(c.into());
    Status::SUCCESS
}

fn set_fmpz(res: &mut BigRational, c: &BigInt, _: &GrCtx) -> Status {
    *res = BigRational::from_integer(c.clone());
    Status::SUCCESS
}

fn set_fmpq(res: &mut BigRational, c: &BigRational, _: &GrCtx) -> Status {
    res.clone_from(c);
    Status::SUCCESS
}

fn set_other(res: &mut BigRational, x: &Elem, x_ctx: &GrCtx, _: &GrCtx) -> Status {
    match x_ctx.which_ring() {
        RingTag::Fmpz => {
            *res = BigRational::from_integer(x.get::<BigInt>().clone());
            Status::SUCCESS
        }
        RingTag::Fmpq => {
            res.clone_from(x.get::<BigRational>());
            Status::SUCCESS
        }
        _ => x_ctx.get_fmpq(res, x),
    }
}

fn get_si(res: &mut i64, x: &BigRational, _: &GrCtx) -> Status {
    if !x.is_integer() {
        return Status::DOMAIN;
    }
    match x.numer().to_i64() {
        Some(v) => {
            *res = v;
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn get_ui(res: &mut u64, x: &BigRational, _: &GrCtx) -> Status {
    if !x.is_integer() {
        return Status::DOMAIN;
    }
    match x.numer().to_u64() {
        Some(v) => {
            *res = v;
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn get_fmpz(res: &mut BigInt, x: &BigRational, _: &GrCtx) -> Status {
    if !x.is_integer() {
        return Status::DOMAIN;
    }
    res.clone_from(x.numer());
    Status::SUCCESS
}

fn get_fmpq(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    res.clone_from(x);
    Status::SUCCESS
}

fn get_d(res: &mut f64, x: &BigRational, _: &GrCtx) -> Status {
    *res = x.to_f64().unwrap_or(f64::NAN);
    Status::SUCCESS
}

// ============================================================================
// Arithmetic
// ============================================================================

fn neg(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    *res = -x;
    Status::SUCCESS
}

fn add(res: &mut BigRational, x: &BigRational, y: &BigRational, _: &GrCtx) -> Status {
    *res = x + y;
    Status::SUCCESS
}

fn add_ui(res: &mut BigRational, x: &BigRational, c: u64, _: &GrCtx) -> Status {
    *res = x + BigRational::from_integer(c.into());
    Status::SUCCESS
}

fn add_si(res: &mut BigRational, x: &BigRational, c: i64, _: &GrCtx) -> Status {
    *res = x + BigRational::from_integer(c.into());
    Status::SUCCESS
}

fn sub(res: &mut BigRational, x: &BigRational, y: &BigRational, _: &GrCtx) -> Status {
    *res = x - y;
    Status::SUCCESS
}

fn mul(res: &mut BigRational, x: &BigRational, y: &BigRational, _: &GrCtx) -> Status {
    *res = x * y;
    Status::SUCCESS
}

fn mul_si(res: &mut BigRational, x: &BigRational, c: i64, _: &GrCtx) -> Status {
    *res = x * BigRational::from_integer(c.into());
    Status::SUCCESS
}

fn div(res: &mut BigRational, x: &BigRational, y: &BigRational, _: &GrCtx) -> Status {
    if y.is_zero() {
        return Status::DOMAIN;
    }
    *res = x / y;
    Status::SUCCESS
}

fn is_invertible(x: &BigRational, _: &GrCtx) -> Truth {
    Truth::from_bool(!x.is_zero())
}

fn inv(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    if x.is_zero() {
        return Status::DOMAIN;
    }
    *res = x.recip();
    Status::SUCCESS
}

// ============================================================================
// Powers and roots
// ============================================================================

/// Powers of `1`, `-1` and `0`, which never grow; `None` for other bases.
fn pow_small_base(
    res: &mut BigRational,
    x: &BigRational,
    e_positive: bool,
    e_odd: bool,
) -> Option<Status> {
    if x.is_one() {
        res.set_one();
        Some(Status::SUCCESS)
    } else if is_neg_one_value(x) {
        *res = if e_odd { -BigRational::one() } else { BigRational::one() };
        Some(Status::SUCCESS)
    } else if x.is_zero() {
        Some(if e_positive {
            res.set_zero();
            Status::SUCCESS
        } else {
            Status::DOMAIN
        })
    } else {
        None
    }
}

fn pow_ui(res: &mut BigRational, x: &BigRational, e: u64, ctx: &GrCtx) -> Status {
    match i64::try_from(e) {
        Ok(e) if e.unsigned_abs() < ctx.size_limit() => pow_si(res, x, e, ctx),
        _ => Status::UNABLE,
    }
}

fn pow_si(res: &mut BigRational, x: &BigRational, e: i64, ctx: &GrCtx) -> Status {
    if let Some(status) = pow_small_base(res, x, e > 0, e % 2 != 0) {
        return status;
    }
    let k = e.unsigned_abs();
    if k >= ctx.size_limit() {
        return Status::UNABLE;
    }
    let Ok(k) = u32::try_from(k) else {
        return Status::UNABLE;
    };
    let num = x.numer().pow(k);
    let den = x.denom().pow(k);
    *res = if e < 0 {
        BigRational::new(den, num)
    } else {
        BigRational::new_raw(num, den)
    };
    Status::SUCCESS
}

fn pow_fmpz(res: &mut BigRational, x: &BigRational, e: &BigInt, ctx: &GrCtx) -> Status {
    if let Some(e) = e.to_i64() {
        return pow_si(res, x, e, ctx);
    }
    match pow_small_base(res, x, e.is_positive(), e.is_odd()) {
        Some(status) => status,
        None => Status::UNABLE,
    }
}

fn pow_fmpq(res: &mut BigRational, x: &BigRational, e: &BigRational, ctx: &GrCtx) -> Status {
    if e.is_integer() {
        return pow_fmpz(res, x, e.numer(), ctx);
    }
    if x.is_one() {
        res.set_one();
        return Status::SUCCESS;
    }
    if x.is_zero() {
        return if e.is_positive() {
            res.set_zero();
            Status::SUCCESS
        } else {
            Status::DOMAIN
        };
    }
    let Some(n) = e.denom().to_u32() else {
        return Status::UNABLE;
    };
    if x.is_negative() && n % 2 == 0 {
        return Status::DOMAIN;
    }
    match (nt::exact_root(x.numer(), n), nt::exact_root(x.denom(), n)) {
        (Some(a), Some(b)) => pow_fmpz(res, &BigRational::new_raw(a, b), e.numer(), ctx),
        _ => Status::DOMAIN,
    }
}

fn pow(res: &mut BigRational, x: &BigRational, y: &BigRational, ctx: &GrCtx) -> Status {
    pow_fmpq(res, x, y, ctx)
}

fn is_square(x: &BigRational, _: &GrCtx) -> Truth {
    Truth::from_bool(nt::is_square(x.numer()) && nt::is_square(x.denom()))
}

fn sqrt(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    if x.is_negative() {
        return Status::DOMAIN;
    }
    match (nt::exact_root(x.numer(), 2), nt::exact_root(x.denom(), 2)) {
        (Some(a), Some(b)) => {
            *res = BigRational::new_raw(a, b);
            Status::SUCCESS
        }
        _ => Status::DOMAIN,
    }
}

fn rsqrt(res: &mut BigRational, x: &BigRational, ctx: &GrCtx) -> Status {
    if !x.is_positive() {
        return Status::DOMAIN;
    }
    let status = sqrt(res, x, ctx);
    if status.is_success() {
        *res = res.recip();
    }
    status
}

// ============================================================================
// Rounding, order, parts
// ============================================================================

fn floor(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    *res = x.floor();
    Status::SUCCESS
}

fn ceil(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    *res = x.ceil();
    Status::SUCCESS
}

fn trunc(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    *res = x.trunc();
    Status::SUCCESS
}

/// Nearest integer, ties to even: `floor(x + 1/2)`, less one when
/// `x + 1/2` is an odd integer.
fn nint(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    if x.is_integer() {
        res.clone_from(x);
        return Status::SUCCESS;
    }
    let t = x + BigRational::new_raw(BigInt::one(), BigInt::from(2));
    let mut n = t.floor().to_integer();
    if t.is_integer() && t.numer().is_odd() {
        n -= 1;
    }
    *res = BigRational::from_integer(n);
    Status::SUCCESS
}

fn abs(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    *res = x.abs();
    Status::SUCCESS
}

fn im(res: &mut BigRational, _: &BigRational, _: &GrCtx) -> Status {
    res.set_zero();
    Status::SUCCESS
}

fn sgn(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    *res = x.signum();
    Status::SUCCESS
}

fn cmp(res: &mut Ordering, x: &BigRational, y: &BigRational, _: &GrCtx) -> Status {
    *res = x.cmp(y);
    Status::SUCCESS
}

fn cmpabs(res: &mut Ordering, x: &BigRational, y: &BigRational, _: &GrCtx) -> Status {
    *res = x.abs().cmp(&y.abs());
    Status::SUCCESS
}

/// `exp` of a nonzero rational is irrational.
fn exp(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    if x.is_zero() {
        res.set_one();
        Status::SUCCESS
    } else {
        Status::DOMAIN
    }
}

fn log(res: &mut BigRational, x: &BigRational, _: &GrCtx) -> Status {
    if x.is_one() {
        res.set_zero();
        Status::SUCCESS
    } else {
        Status::DOMAIN
    }
}

// ============================================================================
// Common-denominator bulk operations
// ============================================================================

/// Least common multiple of the denominators.
fn common_denominator<'a>(vals: impl IntoIterator<Item = &'a BigRational>) -> BigInt {
    vals.into_iter()
        .fold(BigInt::one(), |acc, q| acc.lcm(q.denom()))
}

/// Numerators of `vals` scaled to the denominator `den`.
fn scaled_numerators<'a>(vals: impl IntoIterator<Item = &'a BigRational>, den: &BigInt) -> Vec<BigInt> {
    vals.into_iter()
        .map(|q| {
            if q.denom() == den {
                q.numer().clone()
            } else {
                q.numer() * (den / q.denom())
            }
        })
        .collect()
}

fn rationals(v: &[Elem]) -> impl Iterator<Item = &BigRational> {
    v.iter().map(|e| e.get::<BigRational>())
}

fn poly_mullow(res: &mut [Elem], a: &[Elem], b: &[Elem], len: usize, _: &GrCtx) -> Status {
    let da = common_denominator(rationals(a));
    let db = common_denominator(rationals(b));
    let za = scaled_numerators(rationals(a), &da);
    let zb = scaled_numerators(rationals(b), &db);
    let prod = if za.len() >= zb.len() {
        poly_mullow_int(&za, &zb, len)
    } else {
        poly_mullow_int(&zb, &za, len)
    };
    let den = da * db;
    for (out, c) in res.iter_mut().zip(prod) {
        *out.get_mut::<BigRational>() = BigRational::new(c, den.clone());
    }
    Status::SUCCESS
}

/// Clears denominators per row of `a` and per column of `b`, multiplies
/// the integer matrices, then divides entry `(i, j)` by both scales.
fn mat_mul(res: &mut GrMat, a: &GrMat, b: &GrMat, _: &GrCtx) -> Status {
    if a.cols() != b.rows() || res.rows() != a.rows() || res.cols() != b.cols() {
        return Status::DOMAIN;
    }
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let row_dens: Vec<BigInt> = (0..m).map(|i| common_denominator(rationals(a.row(i)))).collect();
    let col_dens: Vec<BigInt> = (0..n)
        .map(|j| common_denominator((0..k).map(|l| b.entry(l, j).get::<BigRational>())))
        .collect();
    let mut za = Vec::with_capacity(m * k);
    for (i, d) in row_dens.iter().enumerate() {
        za.extend(scaled_numerators(rationals(a.row(i)), d));
    }
    let mut zb = vec![BigInt::zero(); k * n];
    for (j, d) in col_dens.iter().enumerate() {
        let col = scaled_numerators((0..k).map(|l| b.entry(l, j).get::<BigRational>()), d);
        for (l, v) in col.into_iter().enumerate() {
            zb[l * n + j] = v;
        }
    }
    let prod = mat_mul_int(&za, &zb, m, k, n);
    res.fill(|out, i, j| {
        *out.get_mut::<BigRational>() =
            BigRational::new(prod[i * n + j].clone(), &row_dens[i] * &col_dens[j]);
        Status::SUCCESS
    })
}

/// Scales each row to integers and divides the integer determinant by
/// the product of the row scales.
fn mat_det(res: &mut Elem, a: &GrMat, _: &GrCtx) -> Status {
    if !a.is_square() {
        return Status::DOMAIN;
    }
    let n = a.rows();
    let mut den = BigInt::one();
    let mut z = Vec::with_capacity(n * n);
    for i in 0..n {
        let d = common_denominator(rationals(a.row(i)));
        z.extend(scaled_numerators(rationals(a.row(i)), &d));
        den *= d;
    }
    *res.get_mut::<BigRational>() = BigRational::new(det_bareiss_int(z, n), den);
    Status::SUCCESS
}
