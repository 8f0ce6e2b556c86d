//! Element-wise vector operations.
//!
//! Each helper walks the shortest of its operands and returns the OR of
//! the per-entry statuses.

use super::ctx::GrCtx;
use super::elem::Elem;
use crate::core::{Status, Truth};

pub fn vec_set(res: &mut [Elem], a: &[Elem], ctx: &GrCtx) -> Status {
    res.iter_mut()
        .zip(a)
        .fold(Status::SUCCESS, |s, (r, x)| s | ctx.set(r, x))
}

pub fn vec_add(res: &mut [Elem], a: &[Elem], b: &[Elem], ctx: &GrCtx) -> Status {
    res.iter_mut()
        .zip(a.iter().zip(b))
        .fold(Status::SUCCESS, |s, (r, (x, y))| s | ctx.add(r, x, y))
}

pub fn vec_sub(res: &mut [Elem], a: &[Elem], b: &[Elem], ctx: &GrCtx) -> Status {
    res.iter_mut()
        .zip(a.iter().zip(b))
        .fold(Status::SUCCESS, |s, (r, (x, y))| s | ctx.sub(r, x, y))
}

/// `res[i] = a[i] * c`.
pub fn vec_scalar_mul(res: &mut [Elem], a: &[Elem], c: &Elem, ctx: &GrCtx) -> Status {
    res.iter_mut()
        .zip(a)
        .fold(Status::SUCCESS, |s, (r, x)| s | ctx.mul(r, x, c))
}

/// `res = sum a[i] * b[i]`; zero for empty input.
pub fn vec_dot(res: &mut Elem, a: &[Elem], b: &[Elem], ctx: &GrCtx) -> Status {
    let mut status = ctx.zero(res);
    let mut t = ctx.init();
    let mut acc = ctx.init();
    for (x, y) in a.iter().zip(b) {
        status |= ctx.mul(&mut t, x, y);
        status |= ctx.add(&mut acc, res, &t);
        res.swap(&mut acc);
    }
    status
}

/// Kleene conjunction of `is_zero` over the entries.
#[must_use]
pub fn vec_is_zero(a: &[Elem], ctx: &GrCtx) -> Truth {
    a.iter()
        .fold(Truth::True, |acc, x| acc.and(ctx.is_zero(x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn ints(ctx: &GrCtx, vals: &[i64]) -> Vec<Elem> {
        vals.iter().map(|&v| ctx.elem_si(v).unwrap()).collect()
    }

    #[test]
    fn test_add_sub_dot() {
        let ctx = GrCtx::fmpz();
        let a = ints(&ctx, &[1, 2, 3]);
        let b = ints(&ctx, &[4, 5, 6]);
        let mut r = ctx.vec_init(3);
        assert!(vec_add(&mut r, &a, &b, &ctx).is_success());
        assert_eq!(ctx.to_fmpz(&r[2]).unwrap(), BigInt::from(9));
        assert!(vec_sub(&mut r, &a, &b, &ctx).is_success());
        assert_eq!(ctx.to_fmpz(&r[0]).unwrap(), BigInt::from(-3));
        let mut d = ctx.init();
        assert!(vec_dot(&mut d, &a, &b, &ctx).is_success());
        assert_eq!(ctx.to_fmpz(&d).unwrap(), BigInt::from(32));
    }

    #[test]
    fn test_scalar_mul_and_zero_test() {
        let ctx = GrCtx::fmpq();
        let a = ints(&ctx, &[1, -2]);
        let zero = ctx.elem_si(0).unwrap();
        let mut r = ctx.vec_init(2);
        assert!(vec_scalar_mul(&mut r, &a, &zero, &ctx).is_success());
        assert_eq!(vec_is_zero(&r, &ctx), Truth::True);
        assert!(vec_set(&mut r, &a, &ctx).is_success());
        assert_eq!(vec_is_zero(&r, &ctx), Truth::False);
    }

    #[test]
    fn test_failures_accumulate() {
        let ctx = GrCtx::fmpz();
        let a = ints(&ctx, &[1, 2]);
        let b = ints(&ctx, &[0, 1]);
        let mut r = ctx.vec_init(2);
        let status = a
            .iter()
            .zip(&b)
            .zip(r.iter_mut())
            .fold(Status::SUCCESS, |s, ((x, y), out)| s | ctx.div(out, x, y));
        assert_eq!(status, Status::DOMAIN);
    }

    #[test]
    fn test_uncertain_zero_test() {
        let ctx = GrCtx::real_ball(64);
        let mut x = ctx.init();
        assert!(ctx.pi(&mut x).is_success());
        let mut y = ctx.init();
        assert!(ctx.sub(&mut y, &x, &x).is_success());
        assert_eq!(vec_is_zero(&[y], &ctx), Truth::Unknown);
    }
}
