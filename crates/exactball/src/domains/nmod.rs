//! Integers modulo a word-size `n`.
//!
//! Elements are `u64` residues in `[0, n)`. Products go through 128-bit
//! intermediates. The ring is a field exactly when `n` is prime, which
//! the context decides once at construction. `Z/nZ` carries no order,
//! so comparison, sign and rounding are `DOMAIN` errors.

use core::cmp::Ordering;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

use crate::core::{GrStream, RandState, Status, Truth};
use crate::error::{GrError, GrResult};
use crate::gr::slot::typed_slot;
use crate::gr::{CtxParams, Elem, GrCtx, Method, MethodTable, RingTag, Slot};
use crate::nt::{is_prime_u64, mod_inverse_u64, mul_mod, pow_mod, sqrt_mod_prime};

static METHODS: OnceLock<MethodTable> = OnceLock::new();

fn prime_predicate(ctx: &GrCtx) -> Truth {
    Truth::from_bool(is_prime(ctx))
}

fn methods() -> &'static MethodTable {
    METHODS.get_or_init(|| {
        use Method as M;
        MethodTable::build(
            RingTag::Nmod,
            &[
                (M::CtxWrite, Slot::CtxWrite(ctx_write)),
                (M::CtxIsRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsCommutativeRing, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsIntegralDomain, Slot::CtxPredicate(prime_predicate)),
                (M::CtxIsField, Slot::CtxPredicate(prime_predicate)),
                (M::CtxIsUniqueFactorizationDomain, Slot::CtxPredicate(prime_predicate)),
                (M::CtxIsFinite, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsFiniteCharacteristic, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsAlgebraicallyClosed, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsOrderedRing, Slot::CtxPredicate(|_| Truth::False)),
                (M::CtxIsExact, Slot::CtxPredicate(|_| Truth::True)),
                (M::CtxIsCanonical, Slot::CtxPredicate(|_| Truth::True)),
                (M::Init, Slot::Init(|_| Elem::new(0u64))),
                (M::Randtest, typed_slot!(Randtest, u64, randtest)),
                (M::Write, typed_slot!(Write, u64, write)),
                (M::Zero, typed_slot!(Constant, u64, zero)),
                (M::One, typed_slot!(Constant, u64, one)),
                (M::IsZero, typed_slot!(Predicate, u64, is_zero)),
                (M::IsOne, typed_slot!(Predicate, u64, is_one)),
                (M::IsNegOne, typed_slot!(Predicate, u64, is_neg_one)),
                (M::Equal, typed_slot!(BinaryPredicate, u64, equal)),
                (M::Set, typed_slot!(Unary, u64, set)),
                (M::SetSi, typed_slot!(SetSi, u64, set_si)),
                (M::SetUi, typed_slot!(SetUi, u64, set_ui)),
                (M::SetFmpz, typed_slot!(SetFmpz, u64, set_fmpz)),
                (M::SetFmpq, typed_slot!(SetFmpq, u64, set_fmpq)),
                (M::SetOther, typed_slot!(SetOther, u64, set_other)),
                (M::GetUi, typed_slot!(GetUi, u64, get_ui)),
                (M::GetFmpz, typed_slot!(GetFmpz, u64, get_fmpz)),
                (M::GetFmpq, typed_slot!(GetFmpq, u64, get_fmpq)),
                (M::Neg, typed_slot!(Unary, u64, neg)),
                (M::Add, typed_slot!(Binary, u64, add)),
                (M::Sub, typed_slot!(Binary, u64, sub)),
                (M::Mul, typed_slot!(Binary, u64, mul)),
                (M::MulSi, typed_slot!(BinarySi, u64, mul_si)),
                (M::Div, typed_slot!(Binary, u64, div)),
                (M::IsInvertible, typed_slot!(Predicate, u64, is_invertible)),
                (M::Inv, typed_slot!(Unary, u64, inv)),
                (M::PowUi, typed_slot!(BinaryUi, u64, pow_ui)),
                (M::PowSi, typed_slot!(BinarySi, u64, pow_si)),
                (M::PowFmpz, typed_slot!(BinaryFmpz, u64, pow_fmpz)),
                (M::IsSquare, typed_slot!(Predicate, u64, is_square)),
                (M::Sqrt, typed_slot!(Unary, u64, sqrt)),
                (M::Floor, typed_slot!(Unary, u64, unordered)),
                (M::Ceil, typed_slot!(Unary, u64, unordered)),
                (M::Trunc, typed_slot!(Unary, u64, unordered)),
                (M::Nint, typed_slot!(Unary, u64, unordered)),
                (M::Abs, typed_slot!(Unary, u64, unordered)),
                (M::Sgn, typed_slot!(Unary, u64, unordered)),
                (M::Csgn, typed_slot!(Unary, u64, unordered)),
                (M::I, typed_slot!(Constant, u64, not_in_domain)),
                (M::Pi, typed_slot!(Constant, u64, not_in_domain)),
                (M::Cmp, typed_slot!(Cmp, u64, cmp)),
                (M::Cmpabs, typed_slot!(Cmp, u64, cmp)),
            ],
        )
    })
}

pub(crate) fn ctx(n: u64) -> GrResult<GrCtx> {
    if n == 0 {
        return Err(GrError::Domain);
    }
    Ok(GrCtx::from_parts(
        RingTag::Nmod,
        core::mem::size_of::<u64>(),
        methods(),
        CtxParams::Nmod {
            n,
            is_prime: is_prime_u64(n),
        },
    ))
}

#[cold]
#[inline(never)]
fn not_nmod(params: &CtxParams) -> ! {
    panic!("nmod operation on a context with parameters {params:?}")
}

fn modulus(ctx: &GrCtx) -> u64 {
    match ctx.params() {
        CtxParams::Nmod { n, .. } => *n,
        other => not_nmod(other),
    }
}

fn is_prime(ctx: &GrCtx) -> bool {
    match ctx.params() {
        CtxParams::Nmod { is_prime, .. } => *is_prime,
        other => not_nmod(other),
    }
}

fn ctx_write(out: &mut GrStream, ctx: &GrCtx) -> Status {
    out.write_str("Integers mod ");
    out.write_display(&modulus(ctx));
    out.write_str(" (nmod)");
    Status::SUCCESS
}

fn randtest(res: &mut u64, state: &mut RandState, ctx: &GrCtx) -> Status {
    let n = modulus(ctx);
    *res = match state.randint(4) {
        0 => 0,
        1 => n - 1,
        _ => state.randint(n),
    };
    Status::SUCCESS
}

fn write(out: &mut GrStream, x: &u64, _: &GrCtx) -> Status {
    out.write_display(x);
    Status::SUCCESS
}

fn zero(res: &mut u64, _: &GrCtx) -> Status {
    *res = 0;
    Status::SUCCESS
}

fn one(res: &mut u64, ctx: &GrCtx) -> Status {
    *res = 1 % modulus(ctx);
    Status::SUCCESS
}

fn not_in_domain(_: &mut u64, _: &GrCtx) -> Status {
    Status::DOMAIN
}

fn is_zero(x: &u64, _: &GrCtx) -> Truth {
    Truth::from_bool(*x == 0)
}

fn is_one(x: &u64, ctx: &GrCtx) -> Truth {
    Truth::from_bool(*x == 1 % modulus(ctx))
}

fn is_neg_one(x: &u64, ctx: &GrCtx) -> Truth {
    Truth::from_bool(*x == modulus(ctx) - 1)
}

fn equal(x: &u64, y: &u64, _: &GrCtx) -> Truth {
    Truth::from_bool(x == y)
}

// ============================================================================
// Conversions
// ============================================================================

fn reduce(c: &BigInt, n: u64) -> u64 {
    // The residue is below `n`, so it fits.
    c.mod_floor(&BigInt::from(n)).to_u64().unwrap_or(0)
}

fn set(res: &mut u64, x: &u64, _: &GrCtx) -> Status {
    *res = *x;
    Status::SUCCESS
}

fn set_si(res: &mut u64, c: i64, ctx: &GrCtx) -> Status {
    *res = i128::from(c).rem_euclid(i128::from(modulus(ctx))) as u64;
    Status::SUCCESS
}

fn set_ui(res: &mut u64, c: u64, ctx: &GrCtx) -> Status {
    *res = c % modulus(ctx);
    Status::SUCCESS
}

fn set_fmpz(res: &mut u64, c: &BigInt, ctx: &GrCtx) -> Status {
    *res = reduce(c, modulus(ctx));
    Status::SUCCESS
}

/// `DOMAIN` when the denominator is not a unit mod `n`.
fn set_fmpq(res: &mut u64, c: &BigRational, ctx: &GrCtx) -> Status {
    let n = modulus(ctx);
    match mod_inverse_u64(reduce(c.denom(), n), n) {
        Some(d) => {
            *res = mul_mod(reduce(c.numer(), n), d, n);
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

/// Reduction from integers, rationals, and `Z/mZ` when `n` divides `m`.
fn set_other(res: &mut u64, x: &Elem, x_ctx: &GrCtx, ctx: &GrCtx) -> Status {
    match x_ctx.which_ring() {
        RingTag::Fmpz => set_fmpz(res, x.get::<BigInt>(), ctx),
        RingTag::Fmpq => set_fmpq(res, x.get::<BigRational>(), ctx),
        RingTag::Nmod => {
            if modulus(x_ctx) % modulus(ctx) == 0 {
                *res = *x.get::<u64>() % modulus(ctx);
                Status::SUCCESS
            } else {
                Status::DOMAIN
            }
        }
        _ => {
            let mut q = BigRational::default();
            let status = x_ctx.get_fmpq(&mut q, x);
            if status.is_success() {
                set_fmpq(res, &q, ctx)
            } else {
                status
            }
        }
    }
}

/// Residues lift to their representative in `[0, n)`.
fn get_ui(res: &mut u64, x: &u64, _: &GrCtx) -> Status {
    *res = *x;
    Status::SUCCESS
}

fn get_fmpz(res: &mut BigInt, x: &u64, _: &GrCtx) -> Status {
    *res = BigInt::from(*x);
    Status::SUCCESS
}

fn get_fmpq(res: &mut BigRational, x: &u64, _: &GrCtx) -> Status {
    *res = BigRational::from_integer(BigInt::from(*x));
    Status::SUCCESS
}

// ============================================================================
// Arithmetic
// ============================================================================

fn neg(res: &mut u64, x: &u64, ctx: &GrCtx) -> Status {
    *res = if *x == 0 { 0 } else { modulus(ctx) - x };
    Status::SUCCESS
}

fn add(res: &mut u64, x: &u64, y: &u64, ctx: &GrCtx) -> Status {
    let n = modulus(ctx);
    *res = ((u128::from(*x) + u128::from(*y)) % u128::from(n)) as u64;
    Status::SUCCESS
}

fn sub(res: &mut u64, x: &u64, y: &u64, ctx: &GrCtx) -> Status {
    let n = modulus(ctx);
    *res = if x >= y { x - y } else { n - (y - x) };
    Status::SUCCESS
}

fn mul(res: &mut u64, x: &u64, y: &u64, ctx: &GrCtx) -> Status {
    *res = mul_mod(*x, *y, modulus(ctx));
    Status::SUCCESS
}

fn mul_si(res: &mut u64, x: &u64, c: i64, ctx: &GrCtx) -> Status {
    let n = modulus(ctx);
    let c = i128::from(c).rem_euclid(i128::from(n)) as u64;
    *res = mul_mod(*x, c, n);
    Status::SUCCESS
}

fn inverse(x: u64, n: u64) -> Option<u64> {
    if n == 1 {
        Some(0)
    } else {
        mod_inverse_u64(x, n)
    }
}

fn is_invertible(x: &u64, ctx: &GrCtx) -> Truth {
    Truth::from_bool(inverse(*x, modulus(ctx)).is_some())
}

fn inv(res: &mut u64, x: &u64, ctx: &GrCtx) -> Status {
    match inverse(*x, modulus(ctx)) {
        Some(v) => {
            *res = v;
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn div(res: &mut u64, x: &u64, y: &u64, ctx: &GrCtx) -> Status {
    let n = modulus(ctx);
    match inverse(*y, n) {
        Some(v) => {
            *res = mul_mod(*x, v, n);
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn pow_ui(res: &mut u64, x: &u64, e: u64, ctx: &GrCtx) -> Status {
    *res = pow_mod(*x, e, modulus(ctx));
    Status::SUCCESS
}

fn pow_si(res: &mut u64, x: &u64, e: i64, ctx: &GrCtx) -> Status {
    let n = modulus(ctx);
    let base = if e < 0 {
        match inverse(*x, n) {
            Some(v) => v,
            None => return Status::DOMAIN,
        }
    } else {
        *x
    };
    *res = pow_mod(base, e.unsigned_abs(), n);
    Status::SUCCESS
}

fn pow_fmpz(res: &mut u64, x: &u64, e: &BigInt, ctx: &GrCtx) -> Status {
    let n = modulus(ctx);
    let mut base = if e.is_negative() {
        match inverse(*x, n) {
            Some(v) => v,
            None => return Status::DOMAIN,
        }
    } else {
        *x
    };
    let e = e.magnitude();
    let mut acc = 1 % n;
    for i in 0..e.bits() {
        if e.bit(i) {
            acc = mul_mod(acc, base, n);
        }
        base = mul_mod(base, base, n);
    }
    *res = acc;
    Status::SUCCESS
}

/// Decided by Euler's criterion for prime moduli only.
fn is_square(x: &u64, ctx: &GrCtx) -> Truth {
    if !is_prime(ctx) {
        return Truth::Unknown;
    }
    Truth::from_bool(sqrt_mod_prime(*x, modulus(ctx)).is_some())
}

fn sqrt(res: &mut u64, x: &u64, ctx: &GrCtx) -> Status {
    if *x == 0 || *x == 1 % modulus(ctx) {
        *res = *x;
        return Status::SUCCESS;
    }
    if !is_prime(ctx) {
        return Status::UNABLE;
    }
    match sqrt_mod_prime(*x, modulus(ctx)) {
        Some(r) => {
            *res = r;
            Status::SUCCESS
        }
        None => Status::DOMAIN,
    }
}

fn unordered(_: &mut u64, _: &u64, _: &GrCtx) -> Status {
    Status::DOMAIN
}

fn cmp(_: &mut Ordering, _: &u64, _: &u64, _: &GrCtx) -> Status {
    Status::DOMAIN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elem(ctx: &GrCtx, v: i64) -> Elem {
        ctx.elem_si(v).unwrap()
    }

    fn value(ctx: &GrCtx, x: &Elem) -> u64 {
        let mut v = 0;
        assert!(ctx.get_ui(&mut v, x).is_success());
        v
    }

    #[test]
    fn test_arithmetic_wraps() {
        let ctx = GrCtx::nmod(u64::MAX - 58).unwrap();
        let a = elem(&ctx, -1);
        let mut r = ctx.init();
        assert!(ctx.add(&mut r, &a, &a).is_success());
        assert_eq!(value(&ctx, &r), u64::MAX - 60);
        assert!(ctx.mul(&mut r, &a, &a).is_success());
        assert!(ctx.is_one(&r).is_true());
    }

    #[test]
    fn test_inverse_and_division() {
        let ctx = GrCtx::nmod(12).unwrap();
        let five = elem(&ctx, 5);
        let four = elem(&ctx, 4);
        let mut r = ctx.init();
        assert!(ctx.inv(&mut r, &five).is_success());
        assert_eq!(value(&ctx, &r), 5);
        assert_eq!(ctx.inv(&mut r, &four), Status::DOMAIN);
        assert_eq!(ctx.is_invertible(&four), Truth::False);
        assert_eq!(ctx.div(&mut r, &five, &four), Status::DOMAIN);
    }

    #[test]
    fn test_field_predicates() {
        assert!(GrCtx::nmod(13).unwrap().is_field().is_true());
        assert!(GrCtx::nmod(15).unwrap().is_field().is_false());
        let ctx = GrCtx::nmod(15).unwrap();
        assert!(ctx.is_finite().is_true());
        assert!(ctx.is_ordered_ring().is_false());
        assert_eq!(ctx.ctx_to_string(), "Integers mod 15 (nmod)");
    }

    #[test]
    fn test_rational_images() {
        let ctx = GrCtx::nmod(7).unwrap();
        let mut r = ctx.init();
        assert!(ctx.set_fmpq(&mut r, &BigRational::new(3.into(), 2.into())).is_success());
        assert_eq!(value(&ctx, &r), 5);
        assert_eq!(
            ctx.set_fmpq(&mut r, &BigRational::new(1.into(), 14.into())),
            Status::DOMAIN
        );
        assert!(ctx.set_fmpz(&mut r, &BigInt::from(-15)).is_success());
        assert_eq!(value(&ctx, &r), 6);
    }

    #[test]
    fn test_powers() {
        let ctx = GrCtx::nmod(101).unwrap();
        let three = elem(&ctx, 3);
        let mut r = ctx.init();
        assert!(ctx.pow_si(&mut r, &three, -1).is_success());
        assert_eq!(value(&ctx, &r), 34);
        let big = (BigInt::from(1) << 200) * 100;
        assert!(ctx.pow_fmpz(&mut r, &three, &big).is_success());
        assert!(ctx.is_one(&r).is_true());
        let zero = elem(&ctx, 0);
        assert!(ctx.pow_ui(&mut r, &zero, 0).is_success());
        assert!(ctx.is_one(&r).is_true());
    }

    #[test]
    fn test_square_roots() {
        let ctx = GrCtx::nmod(41).unwrap();
        let two = elem(&ctx, 2);
        let three = elem(&ctx, 3);
        let mut r = ctx.init();
        assert!(ctx.sqrt(&mut r, &two).is_success());
        let mut sq = ctx.init();
        assert!(ctx.sqr(&mut sq, &r).is_success());
        assert!(ctx.equal(&sq, &two).is_true());
        assert_eq!(ctx.sqrt(&mut r, &three), Status::DOMAIN);
        let composite = GrCtx::nmod(15).unwrap();
        let four = elem(&composite, 4);
        assert_eq!(composite.sqrt(&mut r, &four), Status::UNABLE);
        assert_eq!(composite.is_square(&four), Truth::Unknown);
    }

    #[test]
    fn test_unordered() {
        let ctx = GrCtx::nmod(7).unwrap();
        let a = elem(&ctx, 1);
        let mut ord = Ordering::Equal;
        assert_eq!(ctx.cmp(&mut ord, &a, &a), Status::DOMAIN);
        let mut r = ctx.init();
        assert_eq!(ctx.floor(&mut r, &a), Status::DOMAIN);
        assert_eq!(ctx.abs(&mut r, &a), Status::DOMAIN);
    }

    #[test]
    fn test_set_other_between_moduli() {
        let big = GrCtx::nmod(35).unwrap();
        let small = GrCtx::nmod(7).unwrap();
        let x = elem(&big, 30);
        let mut r = small.init();
        assert!(small.set_other(&mut r, &x, &big).is_success());
        assert_eq!(value(&small, &r), 2);
        let other = GrCtx::nmod(11).unwrap();
        assert_eq!(other.set_other(&mut r, &x, &big), Status::DOMAIN);
    }

    #[test]
    fn test_zero_ring() {
        let ctx = GrCtx::nmod(1).unwrap();
        let z = elem(&ctx, 5);
        assert!(ctx.is_zero(&z).is_true());
        assert!(ctx.is_one(&z).is_true());
        let mut r = ctx.init();
        assert!(ctx.inv(&mut r, &z).is_success());
    }
}
