//! The ring of integers.
//!
//! Division is exact division: a quotient that is not an integer is a
//! `DOMAIN` error, as is any inverse other than that of `±1`. The
//! integer kernels at the bottom of this module also serve the
//! common-denominator paths of [`fmpq`](super::fmpq).

use core::borrow::Borrow;
use core::cmp::Ordering;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

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
            RingTag::Fmpz,
            &[
                (M::CtxWrite, Slot::CtxWrite(ctx_write)),
                (M::CtxIsRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsCommutativeRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsIntegralDomain, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsField, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsUniqueFactorizationDomain, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsFinite, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsFiniteCharacteristic, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsAlgebraicallyClosed, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsOrderedRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsExact, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsCanonical, Slot::CtxPredicate(|_| Truth::True)),
                (M::Init, Slot::Init(|_| Elem::new(BigInt::zero()))),
                (M::Randtest, typed_slot!(Randtest, BigInt, randtest)),
                (M::Write, typed_slot!(Write, BigInt, write)),
                (M::Zero, typed_slot!(Constant, BigInt, zero)),
                (M::One, typed_slot!(Constant, BigInt, one)),
                (M::IsZero, typed_slot!(Predicate, BigInt, is_zero)),
                (M::IsOne, typed_slot!(Predicate, BigInt, is_one)),
                (M::IsNegOne, typed_slot!(Predicate, BigInt, is_neg_one)),
                (M::Equal, typed_slot!(BinaryPredicate, BigInt, equal)),
                (M::Set, typed_slot!(Unary, BigInt, set)),
                (M::SetSi, typed_slot!(SetSi, BigInt, set_si)),
                (M::SetUi, typed_slot!(SetUi, BigInt, set_ui)),
                (M::SetFmpz, typed_slot!(SetFmpz, BigInt, set_fmpz)),
                (M::SetFmpq, typed_slot!(SetFmpq, BigInt, set_fmpq)),
                (M::SetOther, typed_slot!(SetOther, BigInt, set_other)),
                (M::GetSi, typed_slot!(GetSi, BigInt, get_si)),
                (M::GetUi, typed_slot!(GetUi, BigInt, get_ui)),
                (M::GetFmpz, typed_slot!(GetFmpz, BigInt, get_fmpz)),
                (M::GetFmpq, typed_slot!(GetFmpq, BigInt, get_fmpq)),
                (M::GetD, typed_slot!(GetD, BigInt, get_d)),
                (M::Neg, typed_slot!(Unary, BigInt, neg)),
                (M::Add, typed_slot!(Binary, BigInt, add)),
                (M::AddSi, typed_slot!(BinarySi, BigInt, add_si)),
                (M::Sub, typed_slot!(Binary, BigInt, sub)),
                (M::Mul, typed_slot!(Binary, BigInt, mul)),
                (M::MulSi, typed_slot!(BinarySi, BigInt, mul_si)),
                (M::Sqr, typed_slot!(Unary, BigInt, sqr)),
                (M::Div, typed_slot!(Binary, BigInt, div)),
                (M::IsInvertible, typed_slot!(Predicate, BigInt, is_invertible)),
                (M::Inv, typed_slot!(Unary, BigInt, inv)),
                (M::PowUi, typed_slot!(BinaryUi, BigInt, pow_ui)),
                (M::PowSi, typed_slot!(BinarySi, BigInt, pow_si)),
                (M::PowFmpz, typed_slot!(BinaryFmpz, BigInt, pow_fmpz)),
                (M::PowFmpq, typed_slot!(BinaryFmpq, BigInt, pow_fmpq)),
                (M::IsSquare, typed_slot!(Predicate, BigInt, is_square)),
                (M::Sqrt, typed_slot!(Unary, BigInt, sqrt)),
                (M::Rsqrt, typed_slot!(Unary, BigInt, rsqrt)),
                (M::Floor, typed_slot!(Unary, BigInt, set)),
                (M::Ceil, typed_slot!(Unary, BigInt, set)),
                (M::Trunc, typed_slot!(Unary, BigInt, set)),
                (M::Nint, typed_slot!(Unary, BigInt, set)),
                (M::I, typed_slot!(Constant, BigInt, not_in_domain)),
                (M::Pi, typed_slot!(Constant, BigInt, not_in_domain)),
                (M::Abs, typed_slot!(Unary, BigInt, abs)),
                (M::Sgn, typed_slot!(Unary, BigInt, sgn)),
                (M::Csgn, typed_slot!(Unary, BigInt, sgn)),
                (M::Cmp, typed_slot!(Cmp, BigInt, cmp)),
                (M::Cmpabs, typed_slot!(Cmp, BigInt, cmpabs)),
                (M::Exp, typed_slot!(Unary, BigInt, exp)),
                (M::Log, typed_slot!(Unary, BigInt, log)),
                (M::PolyMullow, Slot::PolyMullow(poly_mullow)),
                (M::MatMul, Slot::MatMul(mat_mul)),
                (M::MatDet, Slot::MatDet(mat_det)),
            ],
        )
    })
}

pub(crate) fn ctx() -> GrCtx {
    GrCtx::from_parts(
        RingTag::Fmpz,
        core::mem::size_of::<BigInt>(),
        methods(),
        CtxParams::None,
    )
}

fn ctx_write(out: &mut GrStream, _: &GrCtx) -> Status {
    out.write_str("Integer ring (fmpz)");
    Status::SUCCESS
}

fn randtest(res: &mut BigInt, state: &mut RandState, _: &GrCtx) -> Status {
    let bits = randtest_bits(state);
    *res = state.randtest(bits);
    Status::SUCCESS
}

fn write(out: &mut GrStream, x: &BigInt, _: &GrCtx) -> Status {
    out.write_display(x);
    Status::SUCCESS
}

fn zero(res: &mut BigInt, _: &GrCtx) -> Status {
    res.set_zero();
    Status::SUCCESS
}

fn one(res: &mut BigInt, _: &GrCtx) -> Status {
    res.set_one();
    Status::SUCCESS
}

fn not_in_domain(_: &mut BigInt, _: &GrCtx) -> Status {
    Status::DOMAIN
}

fn is_zero(x: &BigInt, _: &GrCtx) -> Truth {
    Truth::from_bool(x.is_zero())
}

fn is_one(x: &BigInt, _: &GrCtx) -> Truth {
    Truth::from_bool(x.is_one())
}

fn is_neg_one(x: &BigInt, _: &GrCtx) -> Truth {
    Truth::from_bool(*x == -BigInt::one())
}

fn equal(x: &BigInt, y: &BigInt, _: &GrCtx) -> Truth {
    Truth::from_bool(x == y)
}

// ============================================================================
// Conversions
// ============================================================================

fn set(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    res.clone_from(x);
    Status::SUCCESS
}

fn set_si(res: &mut BigInt, c: i64, _: &GrCtx) -> Status {
    *res = BigInt::from(c);
    Status::SUCCESS
}

fn set_ui(res: &mut BigInt, c: u64, _: &GrCtx) -> Status {
    *res = BigInt::from(c);
    Status::SUCCESS
}

fn set_fmpz(res: &mut BigInt, c: &BigInt, _: &GrCtx) -> Status {
    res.clone_from(c);
    Status::SUCCESS
}

fn set_fmpq(res: &mut BigInt, c: &BigRational, _: &GrCtx) -> Status {
    if !c.is_integer() {
        return Status::DOMAIN;
    }
    res.clone_from(c.numer());
    Status::SUCCESS
}

fn set_other(res: &mut BigInt, x: &Elem, x_ctx: &GrCtx, _: &GrCtx) -> Status {
    match x_ctx.which_ring() {
        RingTag::Fmpz => {
            res.clone_from(x.get::<BigInt>());
            Status::SUCCESS
        }
        RingTag::Fmpq => {
            let q = x.get::<BigRational>();
            if q.is_integer() {
                res.clone_from(q.numer());
                Status::SUCCESS
            } else {
                Status::DOMAIN
            }
        }
        _ => x_ctx.get_fmpz(res, x),
    }
}

fn get_si(res: &mut i64, x: &BigInt, _: &GrCtx) -> Status {
    match x.to_i64() {
        Some(v) => {
            *res = v;
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn get_ui(res: &mut u64, x: &BigInt, _: &GrCtx) -> Status {
    match x.to_u64() {
        Some(v) => {
            *res = v;
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn get_fmpz(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    res.clone_from(x);
    Status::SUCCESS
}

fn get_fmpq(res: &mut BigRational, x: &BigInt, _: &GrCtx) -> Status {
    *res = BigRational::from_integer(x.clone());
    Status::SUCCESS
}

fn get_d(res: &mut f64, x: &BigInt, _: &GrCtx) -> Status {
    *res = x.to_f64().unwrap_or(f64::NAN);
    Status::SUCCESS
}

// ============================================================================
// Arithmetic
// ============================================================================

fn neg(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    *res = -x;
    Status::SUCCESS
}

fn add(res: &mut BigInt, x: &BigInt, y: &BigInt, _: &GrCtx) -> Status {
    *res = x + y;
    Status::SUCCESS
}

fn add_si(res: &mut BigInt, x: &BigInt, c: i64, _: &GrCtx) -> Status {
    *res = x + c;
    Status::SUCCESS
}

fn sub(res: &mut BigInt, x: &BigInt, y: &BigInt, _: &GrCtx) -> Status {
    *res = x - y;
    Status::SUCCESS
}

fn mul(res: &mut BigInt, x: &BigInt, y: &BigInt, _: &GrCtx) -> Status {
    *res = x * y;
    Status::SUCCESS
}

fn mul_si(res: &mut BigInt, x: &BigInt, c: i64, _: &GrCtx) -> Status {
    *res = x * c;
    Status::SUCCESS
}

fn sqr(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    *res = x * x;
    Status::SUCCESS
}

/// Exact quotient.
fn div(res: &mut BigInt, x: &BigInt, y: &BigInt, _: &GrCtx) -> Status {
    if y.is_zero() {
        return Status::DOMAIN;
    }
    let (q, r) = x.div_rem(y);
    if !r.is_zero() {
        return Status::DOMAIN;
    }
    *res = q;
    Status::SUCCESS
}

fn is_invertible(x: &BigInt, _: &GrCtx) -> Truth {
    Truth::from_bool(x.abs().is_one())
}

fn inv(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    if x.abs().is_one() {
        res.clone_from(x);
        Status::SUCCESS
    } else {
        Status::DOMAIN
    }
}

// ============================================================================
// Powers and roots
// ============================================================================

/// `x^e` for the bases whose powers never grow: `0`, `1`, `-1`.
fn pow_trivial_base(res: &mut BigInt, x: &BigInt, e_positive: bool, e_even: bool) -> Option<Status> {
    if x.is_one() {
        res.set_one();
        Some(Status::SUCCESS)
    } else if x.is_zero() {
        Some(if e_positive {
            res.set_zero();
            Status::SUCCESS
        } else {
            Status::DOMAIN
        })
    } else if *x == -BigInt::one() {
        *res = if e_even { BigInt::one() } else { -BigInt::one() };
        Some(Status::SUCCESS)
    } else {
        None
    }
}

fn pow_ui(res: &mut BigInt, x: &BigInt, e: u64, ctx: &GrCtx) -> Status {
    if let Some(status) = pow_trivial_base(res, x, e > 0, e % 2 == 0) {
        return status;
    }
    if e >= ctx.size_limit() {
        return Status::UNABLE;
    }
    match u32::try_from(e) {
        Ok(e) => {
            *res = x.pow(e);
            Status::SUCCESS
        }
        Err(_) => Status::UNABLE,
    }
}

fn pow_si(res: &mut BigInt, x: &BigInt, e: i64, ctx: &GrCtx) -> Status {
    if e >= 0 {
        return pow_ui(res, x, e.unsigned_abs(), ctx);
    }
    match pow_trivial_base(res, x, false, e % 2 == 0) {
        Some(status) => status,
        None => Status::DOMAIN,
    }
}

fn pow_fmpz(res: &mut BigInt, x: &BigInt, e: &BigInt, ctx: &GrCtx) -> Status {
    if let Some(e) = e.to_i64() {
        return pow_si(res, x, e, ctx);
    }
    match pow_trivial_base(res, x, e.is_positive(), e.is_even()) {
        Some(status) => status,
        None if e.is_negative() => Status::DOMAIN,
        None => Status::UNABLE,
    }
}

fn pow_fmpq(res: &mut BigInt, x: &BigInt, e: &BigRational, ctx: &GrCtx) -> Status {
    if e.is_integer() {
        return pow_fmpz(res, x, e.numer(), ctx);
    }
    if x.is_one() || x.is_zero() {
        if let Some(status) = pow_trivial_base(res, x, e.is_positive(), false) {
            return status;
        }
    }
    let Some(q) = e.denom().to_u32() else {
        return Status::UNABLE;
    };
    if x.is_negative() && q % 2 == 0 {
        return Status::DOMAIN;
    }
    match nt::exact_root(x, q) {
        Some(r) => pow_fmpz(res, &r, e.numer(), ctx),
        None => Status::DOMAIN,
    }
}

fn is_square(x: &BigInt, _: &GrCtx) -> Truth {
    Truth::from_bool(nt::is_square(x))
}

fn sqrt(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    if x.is_negative() {
        return Status::DOMAIN;
    }
    let r = x.sqrt();
    if &r * &r != *x {
        return Status::DOMAIN;
    }
    *res = r;
    Status::SUCCESS
}

fn rsqrt(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    if x.is_one() {
        res.set_one();
        Status::SUCCESS
    } else {
        Status::DOMAIN
    }
}

// ============================================================================
// Order and elementary functions
// ============================================================================

fn abs(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    *res = x.abs();
    Status::SUCCESS
}

fn sgn(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    *res = x.signum();
    Status::SUCCESS
}

fn cmp(res: &mut Ordering, x: &BigInt, y: &BigInt, _: &GrCtx) -> Status {
    *res = x.cmp(y);
    Status::SUCCESS
}

fn cmpabs(res: &mut Ordering, x: &BigInt, y: &BigInt, _: &GrCtx) -> Status {
    *res = x.magnitude().cmp(y.magnitude());
    Status::SUCCESS
}

fn exp(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    if x.is_zero() {
        res.set_one();
        Status::SUCCESS
    } else {
        Status::DOMAIN
    }
}

fn log(res: &mut BigInt, x: &BigInt, _: &GrCtx) -> Status {
    if x.is_one() {
        res.set_zero();
        Status::SUCCESS
    } else {
        Status::DOMAIN
    }
}

// ============================================================================
// Integer kernels
// ============================================================================

/// First `len` coefficients of `a * b`.
pub(crate) fn poly_mullow_int<A, B>(a: &[A], b: &[B], len: usize) -> Vec<BigInt>
where
    A: Borrow<BigInt>,
    B: Borrow<BigInt>,
{
    let mut res = vec![BigInt::zero(); len];
    for (i, x) in a.iter().enumerate().take(len) {
        let x = x.borrow();
        if x.is_zero() {
            continue;
        }
        for (j, y) in b.iter().enumerate().take(len - i) {
            res[i + j] += x * y.borrow();
        }
    }
    res
}

/// Row-major `(m x k) * (k x n)` product.
pub(crate) fn mat_mul_int<A, B>(a: &[A], b: &[B], m: usize, k: usize, n: usize) -> Vec<BigInt>
where
    A: Borrow<BigInt>,
    B: Borrow<BigInt>,
{
    let mut res = vec![BigInt::zero(); m * n];
    for i in 0..m {
        for l in 0..k {
            let x = a[i * k + l].borrow();
            if x.is_zero() {
                continue;
            }
            for j in 0..n {
                res[i * n + j] += x * b[l * n + j].borrow();
            }
        }
    }
    res
}

/// Determinant of a row-major `n x n` integer matrix by Bareiss
/// elimination.
pub(crate) fn det_bareiss_int(mut m: Vec<BigInt>, n: usize) -> BigInt {
    if n == 0 {
        return BigInt::one();
    }
    let mut prev = BigInt::one();
    let mut negate = false;
    for k in 0..n - 1 {
        if m[k * n + k].is_zero() {
            match (k + 1..n).find(|&r| !m[r * n + k].is_zero()) {
                Some(r) => {
                    for j in 0..n {
                        m.swap(k * n + j, r * n + j);
                    }
                    negate = !negate;
                }
                None => return BigInt::zero(),
            }
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let v = (&m[i * n + j] * &m[k * n + k] - &m[i * n + k] * &m[k * n + j]) / &prev;
                m[i * n + j] = v;
            }
        }
        prev = m[k * n + k].clone();
    }
    let d = m.swap_remove(n * n - 1);
    if negate {
        -d
    } else {
        d
    }
}

fn ints(v: &[Elem]) -> Vec<&BigInt> {
    v.iter().map(|e| e.get::<BigInt>()).collect()
}

fn poly_mullow(res: &mut [Elem], a: &[Elem], b: &[Elem], len: usize, _: &GrCtx) -> Status {
    let prod = poly_mullow_int(&ints(a), &ints(b), len);
    for (out, v) in res.iter_mut().zip(prod) {
        *out.get_mut::<BigInt>() = v;
    }
    Status::SUCCESS
}

fn mat_mul(res: &mut GrMat, a: &GrMat, b: &GrMat, _: &GrCtx) -> Status {
    if a.cols() != b.rows() || res.rows() != a.rows() || res.cols() != b.cols() {
        return Status::DOMAIN;
    }
    let prod = mat_mul_int(&ints(a.entries()), &ints(b.entries()), a.rows(), a.cols(), b.cols());
    for (out, v) in res.entries_mut().iter_mut().zip(prod) {
        *out.get_mut::<BigInt>() = v;
    }
    Status::SUCCESS
}

fn mat_det(res: &mut Elem, a: &GrMat, _: &GrCtx) -> Status {
    if !a.is_square() {
        return Status::DOMAIN;
    }
    let entries = a.entries().iter().map(|e| e.get::<BigInt>().clone()).collect();
    *res.get_mut::<BigInt>() = det_bareiss_int(entries, a.rows());
    Status::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gr::generic;

    fn z(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn test_exact_division() {
        let ctx = ctx();
        let mut r = z(0);
        assert!(div(&mut r, &z(12), &z(-4), &ctx).is_success());
        assert_eq!(r, z(-3));
        assert_eq!(div(&mut r, &z(7), &z(2), &ctx), Status::DOMAIN);
        assert_eq!(div(&mut r, &z(7), &z(0), &ctx), Status::DOMAIN);
    }

    #[test]
    fn test_pow_ladder() {
        let ctx = ctx();
        let mut r = z(0);
        let huge = BigInt::one() << 70;
        assert!(pow_fmpz(&mut r, &z(-1), &(&huge + 1), &ctx).is_success());
        assert_eq!(r, z(-1));
        assert!(pow_fmpz(&mut r, &z(0), &huge, &ctx).is_success());
        assert_eq!(r, z(0));
        assert_eq!(pow_fmpz(&mut r, &z(0), &-huge.clone(), &ctx), Status::DOMAIN);
        assert_eq!(pow_fmpz(&mut r, &z(3), &huge, &ctx), Status::UNABLE);
        assert_eq!(pow_fmpz(&mut r, &z(3), &-huge, &ctx), Status::DOMAIN);
        assert_eq!(pow_ui(&mut r, &z(0), 0, &ctx), Status::DOMAIN);
        assert!(pow_si(&mut r, &z(-1), -3, &ctx).is_success());
        assert_eq!(r, z(-1));
        assert_eq!(pow_si(&mut r, &z(2), -1, &ctx), Status::DOMAIN);
    }

    #[test]
    fn test_pow_fmpq_roots() {
        let ctx = ctx();
        let mut r = z(0);
        let e = BigRational::new(z(3), z(2));
        assert!(pow_fmpq(&mut r, &z(16), &e, &ctx).is_success());
        assert_eq!(r, z(64));
        assert_eq!(pow_fmpq(&mut r, &z(2), &e, &ctx), Status::DOMAIN);
        assert_eq!(pow_fmpq(&mut r, &z(-4), &e, &ctx), Status::DOMAIN);
        let third = BigRational::new(z(1), z(3));
        assert!(pow_fmpq(&mut r, &z(-27), &third, &ctx).is_success());
        assert_eq!(r, z(-3));
        assert!(pow_fmpq(&mut r, &z(-1), &third, &ctx).is_success());
        assert_eq!(r, z(-1));
    }

    #[test]
    fn test_sqrt() {
        let ctx = ctx();
        let mut r = z(0);
        assert!(sqrt(&mut r, &z(144), &ctx).is_success());
        assert_eq!(r, z(12));
        assert_eq!(sqrt(&mut r, &z(145), &ctx), Status::DOMAIN);
        assert_eq!(sqrt(&mut r, &z(-4), &ctx), Status::DOMAIN);
    }

    #[test]
    fn test_set_other_from_rationals() {
        let q = GrCtx::fmpq();
        let ctx = ctx();
        let mut r = ctx.init();
        let x = q.elem_fmpq(&BigRational::from_integer(z(9))).unwrap();
        assert!(ctx.set_other(&mut r, &x, &q).is_success());
        assert_eq!(ctx.to_fmpz(&r).unwrap(), z(9));
        let y = q.elem_fmpq(&BigRational::new(z(1), z(2))).unwrap();
        assert_eq!(ctx.set_other(&mut r, &y, &q), Status::DOMAIN);
    }

    #[test]
    fn test_bulk_kernels_match_generic() {
        let ctx = ctx();
        let mut state = RandState::new(7);
        for n in 0..5 {
            let mut m = GrMat::new(n, n, &ctx);
            let _ = m.fill(|e, _, _| ctx.randtest(e, &mut state));
            let mut fast = ctx.init();
            let mut slow = ctx.init();
            assert!(ctx.mat_det(&mut fast, &m).is_success());
            assert!(generic::mat_det_elimination(&mut slow, &m, &ctx).is_success());
            assert!(ctx.equal(&fast, &slow).is_true(), "n = {n}");
        }
    }

    #[test]
    fn test_poly_mullow_int() {
        let a = [z(1), z(1)];
        let p = poly_mullow_int(&a, &a, 4);
        assert_eq!(p, vec![z(1), z(2), z(1), z(0)]);
    }

    #[test]
    fn test_predicates_and_description() {
        let ctx = ctx();
        assert!(ctx.is_integral_domain().is_true());
        assert!(ctx.is_field().is_false());
        assert_eq!(ctx.ctx_to_string(), "Integer ring (fmpz)");
    }
}
