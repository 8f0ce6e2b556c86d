//! p-adic numbers to a fixed absolute precision.
//!
//! An element is `unit * p^val` with `p` not dividing `unit`, known
//! modulo `p^N` where `N` is the context precision. The unit is stored
//! reduced into `[0, p^(N - val))`. Anything of valuation `N` or more is
//! indistinguishable from zero and is stored as zero.
//!
//! Elements carry truncation error, so the context is not exact, and
//! the ring is not ordered.

use core::cmp::Ordering;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::core::{GrStream, RandState, Status, Truth};
use crate::error::{GrError, GrResult};
use crate::gr::slot::typed_slot;
use crate::gr::{CtxParams, Elem, GrCtx, Method, MethodTable, RingTag, Slot};
use crate::nt::{is_prime_u64, mod_inverse};

/// `unit * p^val`; zero is `unit == 0, val == 0`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Padic {
    unit: BigInt,
    val: i64,
}

impl Padic {
    #[inline]
    #[must_use]
    pub fn unit(&self) -> &BigInt {
        &self.unit
    }

    #[inline]
    #[must_use]
    pub fn val(&self) -> i64 {
        self.val
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.unit.is_zero()
    }

    /// Brings `unit * p^val` into normal form at absolute precision `prec`.
    fn canonical(mut unit: BigInt, mut val: i64, p: &BigInt, prec: i64) -> Self {
        if unit.is_zero() {
            return Self::default();
        }
        val += remove_factor(&mut unit, p);
        if val >= prec {
            return Self::default();
        }
        let modulus = p_pow(p, prec - val);
        Self {
            unit: unit.mod_floor(&modulus),
            val,
        }
    }

    /// The integer `unit * p^val`, or zero when the valuation is negative.
    #[must_use]
    pub fn to_fmpz_lossy(&self, p: &BigInt) -> BigInt {
        if self.val < 0 {
            return BigInt::zero();
        }
        &self.unit * p_pow(p, self.val)
    }

    #[must_use]
    pub fn to_rational(&self, p: &BigInt) -> BigRational {
        let scale = p_pow(p, self.val.abs());
        if self.val >= 0 {
            BigRational::from_integer(&self.unit * scale)
        } else {
            BigRational::new(self.unit.clone(), scale)
        }
    }
}

/// Divides `p` out of `x` as often as it goes, returning the count.
fn remove_factor(x: &mut BigInt, p: &BigInt) -> i64 {
    let mut v = 0;
    loop {
        let (q, r) = x.div_rem(p);
        if !r.is_zero() {
            return v;
        }
        *x = q;
        v += 1;
    }
}

fn p_pow(p: &BigInt, k: i64) -> BigInt {
    num_traits::pow(p.clone(), usize::try_from(k).unwrap_or(0))
}

// ============================================================================
// Context
// ============================================================================

static METHODS: OnceLock<MethodTable> = OnceLock::new();

fn methods() -> &'static MethodTable {
    METHODS.get_or_init(|| {
        use Method as M;
        MethodTable::build(
            RingTag::Padic,
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
                (M::CtxIsOrderedRing, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsExact, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsCanonical, Slot::CtxPredicate(|_| Truth::False)),
                (M::Init, Slot::Init(|_| Elem::new(Padic::default()))),
                (M::Randtest, typed_slot!(Randtest, Padic, randtest)),
                (M::Write, typed_slot!(Write, Padic, write)),
                (M::Zero, typed_slot!(Constant, Padic, zero)),
                (M::One, typed_slot!(Constant, Padic, one)),
                (M::IsZero, typed_slot!(Predicate, Padic, is_zero)),
                (M::IsOne, typed_slot!(Predicate, Padic, is_one)),
                (M::Equal, typed_slot!(BinaryPredicate, Padic, equal)),
                (M::Set, typed_slot!(Unary, Padic, set)),
                (M::SetSi, typed_slot!(SetSi, Padic, set_si)),
                (M::SetFmpz, typed_slot!(SetFmpz, Padic, set_fmpz)),
                (M::SetFmpq, typed_slot!(SetFmpq, Padic, set_fmpq)),
                (M::GetFmpz, typed_slot!(GetFmpz, Padic, get_fmpz)),
                (M::GetFmpq, typed_slot!(GetFmpq, Padic, get_fmpq)),
                (M::Neg, typed_slot!(Unary, Padic, neg)),
                (M::Add, typed_slot!(Binary, Padic, add)),
                (M::Sub, typed_slot!(Binary, Padic, sub)),
                (M::Mul, typed_slot!(Binary, Padic, mul)),
                (M::Inv, typed_slot!(Unary, Padic, inv)),
                (M::Div, typed_slot!(Binary, Padic, div)),
                (M::Floor, typed_slot!(Unary, Padic, unordered)),
                (M::Ceil, typed_slot!(Unary, Padic, unordered)),
                (M::Trunc, typed_slot!(Unary, Padic, unordered)),
                (M::Nint, typed_slot!(Unary, Padic, unordered)),
                (M::Abs, typed_slot!(Unary, Padic, unordered)),
                (M::Sgn, typed_slot!(Unary, Padic, unordered)),
                (M::Csgn, typed_slot!(Unary, Padic, unordered)),
                (M::I, typed_slot!(Constant, Padic, not_in_domain)),
                (M::Pi, typed_slot!(Constant, Padic, not_in_domain)),
                (M::Cmp, typed_slot!(Cmp, Padic, cmp)),
                (M::Cmpabs, typed_slot!(Cmp, Padic, cmp)),
            ],
        )
    })
}

/// `Q_p` to absolute precision `prec`.
///
/// `DOMAIN` unless `p` is a word-size prime and `prec >= 1`.
pub(crate) fn ctx(p: &BigInt, prec: i64) -> GrResult<GrCtx> {
    let word_prime = u64::try_from(p).map(is_prime_u64).unwrap_or(false);
    if !word_prime || prec < 1 {
        return Err(GrError::Domain);
    }
    Ok(GrCtx::from_parts(
        RingTag::Padic,
        core::mem::size_of::<Padic>(),
        methods(),
        CtxParams::Padic {
            p: p.clone(),
            prec,
        },
    ))
}

#[cold]
#[inline(never)]
fn not_padic(params: &CtxParams) -> ! {
    panic!("padic operation on a context with parameters {params:?}")
}

fn params(ctx: &GrCtx) -> (&BigInt, i64) {
    match ctx.params() {
        CtxParams::Padic { p, prec } => (p, *prec),
        other => not_padic(other),
    }
}

fn canonical(unit: BigInt, val: i64, ctx: &GrCtx) -> Padic {
    let (p, prec) = params(ctx);
    Padic::canonical(unit, val, p, prec)
}

fn ctx_write(out: &mut GrStream, ctx: &GrCtx) -> Status {
    let (p, prec) = params(ctx);
    out.write_str("p-adic numbers Q_");
    out.write_display(p);
    out.write_str(" (prec ");
    out.write_display(&prec);
    out.write_str(")");
    Status::SUCCESS
}

fn randtest(res: &mut Padic, state: &mut RandState, ctx: &GrCtx) -> Status {
    let (p, prec) = params(ctx);
    let unit = state.randm(&p_pow(p, prec));
    // Valuations spread over [-prec/2, prec/2].
    let val = state.randint(prec as u64 + 1) as i64 - prec / 2;
    *res = canonical(unit, val, ctx);
    Status::SUCCESS
}

fn write(out: &mut GrStream, x: &Padic, ctx: &GrCtx) -> Status {
    let (p, _) = params(ctx);
    out.write_display(&x.unit);
    if x.val != 0 {
        out.write_str("*");
        out.write_display(p);
        out.write_str("^");
        out.write_display(&x.val);
    }
    Status::SUCCESS
}

fn zero(res: &mut Padic, _: &GrCtx) -> Status {
    *res = Padic::default();
    Status::SUCCESS
}

fn one(res: &mut Padic, ctx: &GrCtx) -> Status {
    *res = canonical(BigInt::one(), 0, ctx);
    Status::SUCCESS
}

fn not_in_domain(_: &mut Padic, _: &GrCtx) -> Status {
    Status::DOMAIN
}

fn is_zero(x: &Padic, _: &GrCtx) -> Truth {
    Truth::from_bool(x.is_zero())
}

fn is_one(x: &Padic, _: &GrCtx) -> Truth {
    Truth::from_bool(x.val == 0 && x.unit.is_one())
}

fn equal(x: &Padic, y: &Padic, _: &GrCtx) -> Truth {
    Truth::from_bool(x == y)
}

// ============================================================================
// Conversions
// ============================================================================

fn set(res: &mut Padic, x: &Padic, _: &GrCtx) -> Status {
    res.clone_from(x);
    Status::SUCCESS
}

fn set_si(res: &mut Padic, c: i64, ctx: &GrCtx) -> Status {
    *res = canonical(BigInt::from(c), 0, ctx);
    Status::SUCCESS
}

fn set_fmpz(res: &mut Padic, c: &BigInt, ctx: &GrCtx) -> Status {
    *res = canonical(c.clone(), 0, ctx);
    Status::SUCCESS
}

/// Powers of `p` in the denominator become a negative valuation.
fn set_fmpq(res: &mut Padic, c: &BigRational, ctx: &GrCtx) -> Status {
    let (p, prec) = params(ctx);
    if c.numer().is_zero() {
        *res = Padic::default();
        return Status::SUCCESS;
    }
    let mut num = c.numer().clone();
    let mut den = c.denom().clone();
    let val = remove_factor(&mut num, p) - remove_factor(&mut den, p);
    if val >= prec {
        *res = Padic::default();
        return Status::SUCCESS;
    }
    let modulus = p_pow(p, prec - val);
    match mod_inverse(&den, &modulus) {
        Some(d) => {
            *res = Padic::canonical(num * d, val, p, prec);
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

/// The representative in `[0, p^N)`; `DOMAIN` for negative valuation.
fn get_fmpz(res: &mut BigInt, x: &Padic, ctx: &GrCtx) -> Status {
    if x.val < 0 {
        return Status::DOMAIN;
    }
    *res = x.to_fmpz_lossy(params(ctx).0);
    Status::SUCCESS
}

fn get_fmpq(res: &mut BigRational, x: &Padic, ctx: &GrCtx) -> Status {
    *res = x.to_rational(params(ctx).0);
    Status::SUCCESS
}

// ============================================================================
// Arithmetic
// ============================================================================

fn neg(res: &mut Padic, x: &Padic, ctx: &GrCtx) -> Status {
    *res = canonical(-&x.unit, x.val, ctx);
    Status::SUCCESS
}

fn add(res: &mut Padic, x: &Padic, y: &Padic, ctx: &GrCtx) -> Status {
    if x.is_zero() {
        res.clone_from(y);
        return Status::SUCCESS;
    }
    if y.is_zero() {
        res.clone_from(x);
        return Status::SUCCESS;
    }
    let p = params(ctx).0;
    let val = x.val.min(y.val);
    let sum = &x.unit * p_pow(p, x.val - val) + &y.unit * p_pow(p, y.val - val);
    *res = canonical(sum, val, ctx);
    Status::SUCCESS
}

fn sub(res: &mut Padic, x: &Padic, y: &Padic, ctx: &GrCtx) -> Status {
    let t = canonical(-&y.unit, y.val, ctx);
    add(res, x, &t, ctx)
}

fn mul(res: &mut Padic, x: &Padic, y: &Padic, ctx: &GrCtx) -> Status {
    if x.is_zero() || y.is_zero() {
        *res = Padic::default();
        return Status::SUCCESS;
    }
    *res = canonical(&x.unit * &y.unit, x.val + y.val, ctx);
    Status::SUCCESS
}

fn inv(res: &mut Padic, x: &Padic, ctx: &GrCtx) -> Status {
    if x.is_zero() {
        return Status::DOMAIN;
    }
    let (p, prec) = params(ctx);
    let val = -x.val;
    if val >= prec {
        *res = Padic::default();
        return Status::SUCCESS;
    }
    match mod_inverse(&x.unit, &p_pow(p, prec - val)) {
        Some(u) => {
            *res = Padic::canonical(u, val, p, prec);
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn div(res: &mut Padic, x: &Padic, y: &Padic, ctx: &GrCtx) -> Status {
    let mut t = Padic::default();
    let status = inv(&mut t, y, ctx);
    if !status.is_success() {
        return status;
    }
    mul(res, x, &t, ctx)
}

fn unordered(_: &mut Padic, _: &Padic, _: &GrCtx) -> Status {
    Status::DOMAIN
}

fn cmp(_: &mut Ordering, _: &Padic, _: &Padic, _: &GrCtx) -> Status {
    Status::DOMAIN
}
