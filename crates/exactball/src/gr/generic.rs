//! Generic fallback algorithms.
//!
//! These fill every slot a domain leaves empty. Each one is written
//! purely in terms of other dispatched methods, so it works over any
//! domain that provides the primitives it relies on, and reports
//! `UNABLE` when those primitives are missing too. Fallbacks never call
//! each other in a cycle: the primitives at the bottom (`set`, `set_si`,
//! `add`, `mul`, `equal`, `cmp`, `get_fmpq`, ...) fall back to a plain
//! `UNABLE` stub or an `Unknown` answer.
//!
//! Composite algorithms OR the status of every sub-operation into their
//! result, so a partial failure is never reported as success.

use core::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use tracing::trace;

use super::ctx::GrCtx;
use super::elem::Elem;
use super::mat::GrMat;
use super::method::Method;
use super::slot::Slot;
use crate::core::{GrStream, RandState, Status, Truth};

/// The fallback installed for `method` when a domain does not supply one.
#[must_use]
pub fn default_slot(method: Method) -> Slot {
    use Method as M;
    match method {
        M::CtxWrite => Slot::CtxWrite(ctx_write),
        M::CtxIsRing
        | M::CtxIsCommutativeRing
        | M::CtxIsIntegralDomain
        | M::CtxIsField
        | M::CtxIsUniqueFactorizationDomain
        | M::CtxIsFinite
        | M::CtxIsFiniteCharacteristic
        | M::CtxIsAlgebraicallyClosed
        | M::CtxIsOrderedRing
        | M::CtxIsExact
        | M::CtxIsCanonical => Slot::CtxPredicate(ctx_unknown),

        M::Init => Slot::Init(missing_init),
        M::Clear => Slot::Clear(clear),
        M::Swap => Slot::Swap(swap),
        M::Randtest => Slot::Randtest(unable_randtest),
        M::Write => Slot::Write(unable_write),

        M::Zero => Slot::Constant(zero),
        M::One => Slot::Constant(one),
        M::IsZero => Slot::Predicate(is_zero),
        M::IsOne => Slot::Predicate(is_one),
        M::IsNegOne => Slot::Predicate(is_neg_one),
        M::Equal => Slot::BinaryPredicate(binary_unknown),

        M::Set => Slot::Unary(unable_unary),
        M::SetSi => Slot::SetSi(unable_set_si),
        M::SetUi => Slot::SetUi(set_ui),
        M::SetFmpz => Slot::SetFmpz(set_fmpz),
        M::SetFmpq => Slot::SetFmpq(set_fmpq),
        M::SetOther => Slot::SetOther(set_other),
        M::GetSi => Slot::GetSi(get_si),
        M::GetUi => Slot::GetUi(get_ui),
        M::GetFmpz => Slot::GetFmpz(get_fmpz),
        M::GetFmpq => Slot::GetFmpq(unable_get_fmpq),
        M::GetD => Slot::GetD(get_d),

        M::Neg => Slot::Unary(neg),
        M::Add | M::Mul => Slot::Binary(unable_binary),
        M::Pow => Slot::Binary(pow),
        M::AddUi => Slot::BinaryUi(add_ui),
        M::AddSi => Slot::BinarySi(add_si),
        M::Sub => Slot::Binary(sub),
        M::SubUi => Slot::BinaryUi(sub_ui),
        M::SubSi => Slot::BinarySi(sub_si),
        M::MulUi => Slot::BinaryUi(mul_ui),
        M::MulSi => Slot::BinarySi(mul_si),
        M::Sqr => Slot::Unary(sqr),
        M::Div => Slot::Binary(div),
        M::DivUi => Slot::BinaryUi(div_ui),
        M::DivSi => Slot::BinarySi(div_si),
        M::IsInvertible => Slot::Predicate(is_invertible),
        M::Inv => Slot::Unary(inv),

        M::PowUi => Slot::BinaryUi(pow_ui),
        M::PowSi => Slot::BinarySi(pow_si),
        M::PowFmpz => Slot::BinaryFmpz(pow_fmpz),
        M::PowFmpq => Slot::BinaryFmpq(pow_fmpq),
        M::IsSquare => Slot::Predicate(unary_unknown),
        M::Sqrt => Slot::Unary(sqrt),
        M::Rsqrt => Slot::Unary(rsqrt),

        M::Floor | M::Ceil | M::Trunc | M::Nint => Slot::Unary(unable_unary),
        M::I | M::Pi => Slot::Constant(unable_constant),
        M::Abs => Slot::Unary(abs),
        M::Conj | M::Re => Slot::Unary(set_self),
        M::Im => Slot::Unary(im),
        M::Sgn => Slot::Unary(sgn),
        M::Csgn => Slot::Unary(csgn),
        M::Cmp => Slot::Cmp(unable_cmp),
        M::Cmpabs => Slot::Cmp(cmpabs),

        M::Exp => Slot::Unary(exp),
        M::Log => Slot::Unary(log),

        M::PolyMullow => Slot::PolyMullow(poly_mullow),
        M::MatMul => Slot::MatMul(mat_mul),
        M::MatDet => Slot::MatDet(mat_det),
    }
}

// ============================================================================
// Stubs
// ============================================================================

fn ctx_write(out: &mut GrStream, ctx: &GrCtx) -> Status {
    out.write_str("Generic ring (");
    out.write_display(&ctx.which_ring());
    out.write_str(")");
    Status::SUCCESS
}

fn ctx_unknown(_: &GrCtx) -> Truth {
    Truth::Unknown
}

fn missing_init(ctx: &GrCtx) -> Elem {
    panic!("{} context has no init hook", ctx.which_ring())
}

fn clear(x: Elem, _: &GrCtx) {
    drop(x);
}

fn swap(x: &mut Elem, y: &mut Elem, _: &GrCtx) {
    x.swap(y);
}

fn unable_randtest(_: &mut Elem, _: &mut RandState, _: &GrCtx) -> Status {
    Status::UNABLE
}

fn unable_write(out: &mut GrStream, _: &Elem, _: &GrCtx) -> Status {
    out.write_str("?");
    Status::UNABLE
}

fn unable_constant(_: &mut Elem, _: &GrCtx) -> Status {
    Status::UNABLE
}

fn unable_unary(_: &mut Elem, _: &Elem, _: &GrCtx) -> Status {
    Status::UNABLE
}

fn unable_binary(_: &mut Elem, _: &Elem, _: &Elem, _: &GrCtx) -> Status {
    Status::UNABLE
}

fn unable_set_si(_: &mut Elem, _: i64, _: &GrCtx) -> Status {
    Status::UNABLE
}

fn unable_get_fmpq(_: &mut BigRational, _: &Elem, _: &GrCtx) -> Status {
    Status::UNABLE
}

fn unable_cmp(_: &mut Ordering, _: &Elem, _: &Elem, _: &GrCtx) -> Status {
    Status::UNABLE
}

fn unary_unknown(_: &Elem, _: &GrCtx) -> Truth {
    Truth::Unknown
}

fn binary_unknown(_: &Elem, _: &Elem, _: &GrCtx) -> Truth {
    Truth::Unknown
}

// ============================================================================
// Constants and predicates
// ============================================================================

fn zero(res: &mut Elem, ctx: &GrCtx) -> Status {
    ctx.set_si(res, 0)
}

fn one(res: &mut Elem, ctx: &GrCtx) -> Status {
    ctx.set_si(res, 1)
}

fn equal_si(x: &Elem, c: i64, ctx: &GrCtx) -> Truth {
    let mut t = ctx.init();
    if ctx.set_si(&mut t, c).is_success() {
        ctx.equal(x, &t)
    } else {
        Truth::Unknown
    }
}

fn is_zero(x: &Elem, ctx: &GrCtx) -> Truth {
    equal_si(x, 0, ctx)
}

fn is_one(x: &Elem, ctx: &GrCtx) -> Truth {
    equal_si(x, 1, ctx)
}

fn is_neg_one(x: &Elem, ctx: &GrCtx) -> Truth {
    equal_si(x, -1, ctx)
}

// ============================================================================
// Conversions
// ============================================================================

fn set_self(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    ctx.set(res, x)
}

fn set_ui(res: &mut Elem, c: u64, ctx: &GrCtx) -> Status {
    match i64::try_from(c) {
        Ok(v) => ctx.set_si(res, v),
        Err(_) => ctx.set_fmpz(res, &BigInt::from(c)),
    }
}

fn set_fmpz(res: &mut Elem, c: &BigInt, ctx: &GrCtx) -> Status {
    match c.to_i64() {
        Some(v) => ctx.set_si(res, v),
        None => Status::UNABLE,
    }
}

fn set_fmpq(res: &mut Elem, c: &BigRational, ctx: &GrCtx) -> Status {
    if c.is_integer() {
        return ctx.set_fmpz(res, c.numer());
    }
    let mut den = ctx.init();
    let mut status = ctx.set_fmpz(res, c.numer());
    status |= ctx.set_fmpz(&mut den, c.denom());
    if !status.is_success() {
        return status;
    }
    let num = core::mem::replace(res, ctx.init());
    ctx.div(res, &num, &den)
}

fn set_other(res: &mut Elem, x: &Elem, x_ctx: &GrCtx, ctx: &GrCtx) -> Status {
    if x_ctx.same_domain(ctx) {
        return ctx.set(res, x);
    }
    trace!(from = %x_ctx.which_ring(), to = %ctx.which_ring(), "set_other via rationals");
    let mut q = BigRational::zero();
    if !x_ctx.get_fmpq(&mut q, x).is_success() {
        return Status::UNABLE;
    }
    ctx.set_fmpq(res, &q)
}

fn get_si(res: &mut i64, x: &Elem, ctx: &GrCtx) -> Status {
    let mut v = BigInt::zero();
    let status = ctx.get_fmpz(&mut v, x);
    if !status.is_success() {
        return status;
    }
    match v.to_i64() {
        Some(v) => {
            *res = v;
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn get_ui(res: &mut u64, x: &Elem, ctx: &GrCtx) -> Status {
    let mut v = BigInt::zero();
    let status = ctx.get_fmpz(&mut v, x);
    if !status.is_success() {
        return status;
    }
    match v.to_u64() {
        Some(v) => {
            *res = v;
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn get_fmpz(res: &mut BigInt, x: &Elem, ctx: &GrCtx) -> Status {
    let mut q = BigRational::zero();
    let status = ctx.get_fmpq(&mut q, x);
    if !status.is_success() {
        return status;
    }
    if !q.is_integer() {
        return Status::DOMAIN;
    }
    *res = q.to_integer();
    Status::SUCCESS
}

fn get_d(res: &mut f64, x: &Elem, ctx: &GrCtx) -> Status {
    let mut q = BigRational::zero();
    let status = ctx.get_fmpq(&mut q, x);
    if !status.is_success() {
        return status;
    }
    *res = q.to_f64().unwrap_or(f64::NAN);
    Status::SUCCESS
}

// ============================================================================
// Arithmetic
// ============================================================================

fn neg(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    ctx.mul_si(res, x, -1)
}

fn sub(res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status {
    let mut t = ctx.init();
    let status = ctx.neg(&mut t, y);
    if !status.is_success() {
        return status;
    }
    ctx.add(res, x, &t)
}

fn with_si(
    res: &mut Elem,
    x: &Elem,
    c: i64,
    op: fn(&GrCtx, &mut Elem, &Elem, &Elem) -> Status,
    ctx: &GrCtx,
) -> Status {
    let mut t = ctx.init();
    let status = ctx.set_si(&mut t, c);
    if !status.is_success() {
        return status;
    }
    op(ctx, res, x, &t)
}

fn with_ui(
    res: &mut Elem,
    x: &Elem,
    c: u64,
    op: fn(&GrCtx, &mut Elem, &Elem, &Elem) -> Status,
    ctx: &GrCtx,
) -> Status {
    let mut t = ctx.init();
    let status = ctx.set_ui(&mut t, c);
    if !status.is_success() {
        return status;
    }
    op(ctx, res, x, &t)
}

fn add_si(res: &mut Elem, x: &Elem, c: i64, ctx: &GrCtx) -> Status {
    with_si(res, x, c, GrCtx::add, ctx)
}

fn add_ui(res: &mut Elem, x: &Elem, c: u64, ctx: &GrCtx) -> Status {
    with_ui(res, x, c, GrCtx::add, ctx)
}

fn sub_si(res: &mut Elem, x: &Elem, c: i64, ctx: &GrCtx) -> Status {
    with_si(res, x, c, GrCtx::sub, ctx)
}

fn sub_ui(res: &mut Elem, x: &Elem, c: u64, ctx: &GrCtx) -> Status {
    with_ui(res, x, c, GrCtx::sub, ctx)
}

fn mul_si(res: &mut Elem, x: &Elem, c: i64, ctx: &GrCtx) -> Status {
    with_si(res, x, c, GrCtx::mul, ctx)
}

fn mul_ui(res: &mut Elem, x: &Elem, c: u64, ctx: &GrCtx) -> Status {
    with_ui(res, x, c, GrCtx::mul, ctx)
}

fn div_si(res: &mut Elem, x: &Elem, c: i64, ctx: &GrCtx) -> Status {
    with_si(res, x, c, GrCtx::div, ctx)
}

fn div_ui(res: &mut Elem, x: &Elem, c: u64, ctx: &GrCtx) -> Status {
    with_ui(res, x, c, GrCtx::div, ctx)
}

fn sqr(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    ctx.mul(res, x, x)
}

fn div(res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status {
    let mut t = ctx.init();
    let status = ctx.inv(&mut t, y);
    if !status.is_success() {
        return status;
    }
    ctx.mul(res, x, &t)
}

fn inv(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    if ctx.is_one(x).is_true() || ctx.is_neg_one(x).is_true() {
        return ctx.set(res, x);
    }
    if ctx.is_zero(x).is_true() {
        return Status::DOMAIN;
    }
    Status::UNABLE
}

fn is_invertible(x: &Elem, ctx: &GrCtx) -> Truth {
    let mut t = ctx.init();
    let status = ctx.inv(&mut t, x);
    if status.is_success() {
        Truth::True
    } else if status == Status::DOMAIN {
        Truth::False
    } else {
        Truth::Unknown
    }
}

// ============================================================================
// Powers and roots
// ============================================================================

fn pow_ui(res: &mut Elem, x: &Elem, e: u64, ctx: &GrCtx) -> Status {
    if e >= ctx.size_limit() {
        return Status::UNABLE;
    }
    trace!(ring = %ctx.which_ring(), e, "generic pow_ui");
    let mut status = ctx.one(res);
    let mut base = ctx.elem_clone(x);
    let mut t = ctx.init();
    let mut e = e;
    while e > 0 {
        if e & 1 == 1 {
            status |= ctx.mul(&mut t, res, &base);
            res.swap(&mut t);
        }
        e >>= 1;
        if e > 0 {
            status |= ctx.sqr(&mut t, &base);
            base.swap(&mut t);
        }
        if !status.is_success() {
            return status;
        }
    }
    status
}

fn pow_si(res: &mut Elem, x: &Elem, e: i64, ctx: &GrCtx) -> Status {
    if e >= 0 {
        return ctx.pow_ui(res, x, e.unsigned_abs());
    }
    let mut t = ctx.init();
    let status = ctx.inv(&mut t, x);
    if !status.is_success() {
        return status;
    }
    ctx.pow_ui(res, &t, e.unsigned_abs())
}

fn pow_fmpz(res: &mut Elem, x: &Elem, e: &BigInt, ctx: &GrCtx) -> Status {
    if let Some(e) = e.to_i64() {
        return ctx.pow_si(res, x, e);
    }
    if let Some(e) = e.to_u64() {
        return ctx.pow_ui(res, x, e);
    }
    if ctx.is_one(x).is_true() {
        return ctx.one(res);
    }
    if ctx.is_zero(x).is_true() {
        return if e.is_positive() {
            ctx.zero(res)
        } else {
            Status::DOMAIN
        };
    }
    if ctx.is_neg_one(x).is_true() {
        return if e.is_even() {
            ctx.one(res)
        } else {
            ctx.set(res, x)
        };
    }
    Status::UNABLE
}

fn pow_fmpq(res: &mut Elem, x: &Elem, e: &BigRational, ctx: &GrCtx) -> Status {
    if e.is_integer() {
        ctx.pow_fmpz(res, x, e.numer())
    } else {
        Status::UNABLE
    }
}

fn pow(res: &mut Elem, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status {
    let mut n = BigInt::zero();
    if ctx.get_fmpz(&mut n, y).is_success() {
        return ctx.pow_fmpz(res, x, &n);
    }
    let mut q = BigRational::zero();
    if ctx.get_fmpq(&mut q, y).is_success() {
        return ctx.pow_fmpq(res, x, &q);
    }
    Status::UNABLE
}

fn sqrt(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    if ctx.is_zero(x).is_true() || ctx.is_one(x).is_true() {
        return ctx.set(res, x);
    }
    Status::UNABLE
}

fn rsqrt(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    let mut t = ctx.init();
    let status = ctx.sqrt(&mut t, x);
    if !status.is_success() {
        return status;
    }
    ctx.inv(res, &t)
}

// ============================================================================
// Signs, parts, comparison, elementary functions
// ============================================================================

fn cmp_zero(x: &Elem, ctx: &GrCtx) -> Result<Ordering, Status> {
    let mut z = ctx.init();
    let mut ord = Ordering::Equal;
    let status = ctx.zero(&mut z) | ctx.cmp(&mut ord, x, &z);
    if status.is_success() {
        Ok(ord)
    } else {
        Err(status)
    }
}

fn abs(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    match cmp_zero(x, ctx) {
        Ok(Ordering::Less) => ctx.neg(res, x),
        Ok(_) => ctx.set(res, x),
        Err(status) => status,
    }
}

fn sgn(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    match cmp_zero(x, ctx) {
        Ok(ord) => ctx.set_si(res, ord as i64),
        Err(status) => status,
    }
}

fn csgn(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    ctx.sgn(res, x)
}

fn im(res: &mut Elem, _: &Elem, ctx: &GrCtx) -> Status {
    ctx.zero(res)
}

fn cmpabs(res: &mut Ordering, x: &Elem, y: &Elem, ctx: &GrCtx) -> Status {
    let mut ax = ctx.init();
    let mut ay = ctx.init();
    let status = ctx.abs(&mut ax, x) | ctx.abs(&mut ay, y);
    if !status.is_success() {
        return status;
    }
    ctx.cmp(res, &ax, &ay)
}

fn exp(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    if ctx.is_zero(x).is_true() {
        ctx.one(res)
    } else {
        Status::UNABLE
    }
}

fn log(res: &mut Elem, x: &Elem, ctx: &GrCtx) -> Status {
    if ctx.is_one(x).is_true() {
        ctx.zero(res)
    } else if ctx.is_zero(x).is_true() {
        Status::DOMAIN
    } else {
        Status::UNABLE
    }
}

// ============================================================================
// Polynomials and matrices
// ============================================================================

/// Schoolbook truncated product.
fn poly_mullow(res: &mut [Elem], a: &[Elem], b: &[Elem], len: usize, ctx: &GrCtx) -> Status {
    trace!(ring = %ctx.which_ring(), len, "generic poly_mullow");
    let mut status = Status::SUCCESS;
    let mut t = ctx.init();
    let mut acc = ctx.init();
    for (i, out) in res.iter_mut().take(len).enumerate() {
        status |= ctx.zero(out);
        let lo = (i + 1).saturating_sub(b.len());
        for j in lo..a.len().min(i + 1) {
            status |= ctx.mul(&mut t, &a[j], &b[i - j]);
            status |= ctx.add(&mut acc, out, &t);
            out.swap(&mut acc);
        }
    }
    status
}

/// Classical triple loop; `DOMAIN` when the shapes do not chain.
fn mat_mul(res: &mut GrMat, a: &GrMat, b: &GrMat, ctx: &GrCtx) -> Status {
    if a.cols() != b.rows() || res.rows() != a.rows() || res.cols() != b.cols() {
        return Status::DOMAIN;
    }
    trace!(ring = %ctx.which_ring(), rows = a.rows(), inner = a.cols(), cols = b.cols(), "generic mat_mul");
    let mut t = ctx.init();
    let mut acc = ctx.init();
    res.fill(|out, i, j| {
        let mut status = ctx.zero(out);
        for k in 0..a.cols() {
            status |= ctx.mul(&mut t, a.entry(i, k), b.entry(k, j));
            status |= ctx.add(&mut acc, out, &t);
            out.swap(&mut acc);
        }
        status
    })
}

/// Index of the first row at or below `k` whose column-`k` entry is
/// nonzero; `Err` when zero-ness cannot be decided.
fn find_pivot(m: &GrMat, k: usize, ctx: &GrCtx) -> Result<Option<usize>, Status> {
    for r in k..m.rows() {
        match ctx.is_zero(m.entry(r, k)) {
            Truth::False => return Ok(Some(r)),
            Truth::Unknown => return Err(Status::UNABLE),
            Truth::True => {}
        }
    }
    Ok(None)
}

/// Replaces entry `(i, j)` with `f(entry)`.
fn update(
    m: &mut GrMat,
    i: usize,
    j: usize,
    ctx: &GrCtx,
    f: impl FnOnce(&mut Elem, &Elem) -> Status,
) -> Status {
    let mut t = ctx.init();
    let status = f(&mut t, m.entry(i, j));
    m.entry_mut(i, j).swap(&mut t);
    status
}

fn det_gauss(res: &mut Elem, a: &GrMat, ctx: &GrCtx) -> Status {
    let n = a.rows();
    let mut m = a.duplicate(ctx);
    let mut status = ctx.one(res);
    let mut negate = false;
    let mut factor = ctx.init();
    let mut t = ctx.init();
    for k in 0..n {
        let pivot = match find_pivot(&m, k, ctx) {
            Ok(Some(r)) => r,
            Ok(None) => return status | ctx.zero(res),
            Err(s) => return status | s,
        };
        if pivot != k {
            m.swap_rows(pivot, k);
            negate = !negate;
        }
        for i in k + 1..n {
            status |= ctx.div(&mut factor, m.entry(i, k), m.entry(k, k));
            for j in k + 1..n {
                status |= ctx.mul(&mut t, &factor, m.entry(k, j));
                status |= update(&mut m, i, j, ctx, |out, e| ctx.sub(out, e, &t));
            }
        }
        status |= ctx.mul(&mut t, res, m.entry(k, k));
        res.swap(&mut t);
        if !status.is_success() {
            return status;
        }
    }
    if negate {
        status |= ctx.neg(&mut t, res);
        res.swap(&mut t);
    }
    status
}

/// Fraction-free elimination; every division is exact.
fn det_bareiss(res: &mut Elem, a: &GrMat, ctx: &GrCtx) -> Status {
    let n = a.rows();
    let mut m = a.duplicate(ctx);
    let mut prev = ctx.init();
    let mut status = ctx.one(&mut prev);
    let mut negate = false;
    let mut t = ctx.init();
    let mut u = ctx.init();
    for k in 0..n - 1 {
        let pivot = match find_pivot(&m, k, ctx) {
            Ok(Some(r)) => r,
            Ok(None) => return status | ctx.zero(res),
            Err(s) => return status | s,
        };
        if pivot != k {
            m.swap_rows(pivot, k);
            negate = !negate;
        }
        for i in k + 1..n {
            for j in k + 1..n {
                status |= ctx.mul(&mut t, m.entry(i, j), m.entry(k, k));
                status |= ctx.mul(&mut u, m.entry(i, k), m.entry(k, j));
                status |= update(&mut m, i, j, ctx, |out, _| {
                    let mut d = ctx.init();
                    ctx.sub(&mut d, &t, &u) | ctx.div(out, &d, &prev)
                });
            }
        }
        status |= ctx.set(&mut prev, m.entry(k, k));
        if !status.is_success() {
            return status;
        }
    }
    status |= ctx.set(res, m.entry(n - 1, n - 1));
    if negate {
        status |= ctx.neg(&mut t, res);
        res.swap(&mut t);
    }
    status
}

/// Determinant by elimination: Gaussian over fields, Bareiss over exact
/// integral domains, `UNABLE` elsewhere.
fn mat_det(res: &mut Elem, a: &GrMat, ctx: &GrCtx) -> Status {
    if !a.is_square() {
        return Status::DOMAIN;
    }
    if a.rows() == 0 {
        return ctx.one(res);
    }
    trace!(ring = %ctx.which_ring(), n = a.rows(), "generic mat_det");
    if ctx.is_field().is_true() {
        det_gauss(res, a, ctx)
    } else if ctx.is_integral_domain().is_true() && ctx.is_exact().is_true() {
        det_bareiss(res, a, ctx)
    } else {
        Status::UNABLE
    }
}

/// The generic fallback for [`Method::PolyMullow`], callable directly so
/// optimized domain routines can be checked against it.
pub fn poly_mullow_classical(
    res: &mut [Elem],
    a: &[Elem],
    b: &[Elem],
    len: usize,
    ctx: &GrCtx,
) -> Status {
    poly_mullow(res, a, b, len, ctx)
}

/// The generic fallback for [`Method::MatMul`].
pub fn mat_mul_classical(res: &mut GrMat, a: &GrMat, b: &GrMat, ctx: &GrCtx) -> Status {
    mat_mul(res, a, b, ctx)
}

/// The generic fallback for [`Method::MatDet`].
pub fn mat_det_elimination(res: &mut Elem, a: &GrMat, ctx: &GrCtx) -> Status {
    mat_det(res, a, ctx)
}
