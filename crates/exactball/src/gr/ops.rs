//! Dispatch entry points.
//!
//! Every [`Method`] is reachable as a method on [`GrCtx`], which looks the
//! slot up in the context's table and calls it with the context appended.
//! The `Result`-returning helpers at the bottom wrap the common
//! create-then-set patterns.
//!
//! # Example
//!
//! ```
//! use exactball::gr::GrCtx;
//!
//! let ctx = GrCtx::fmpq();
//! let a = ctx.elem_si(3).unwrap();
//! let b = ctx.elem_si(4).unwrap();
//! let mut c = ctx.init();
//! assert!(ctx.div(&mut c, &a, &b).is_success());
//! assert_eq!(ctx.elem_to_string(&c), "3/4");
//! ```

use core::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;

use super::ctx::GrCtx;
use super::elem::Elem;
use super::mat::GrMat;
use super::method::Method;
use crate::core::{GrStream, RandState, Status, Truth};
use crate::error::{GrError, GrResult};

#[cold]
#[inline(never)]
fn slot_kind_mismatch(method: Method) -> ! {
    panic!("method table slot for {} has the wrong kind", method.name())
}

macro_rules! slot_fn {
    ($ctx:expr, $method:ident, $accessor:ident) => {
        match $ctx.methods().slot(Method::$method).$accessor() {
            Some(f) => f,
            None => slot_kind_mismatch(Method::$method),
        }
    };
}

macro_rules! dispatch {
    ($(
        $(#[$doc:meta])*
        fn $name:ident($($arg:ident: $ty:ty),*) -> $ret:ty => $method:ident via $accessor:ident;
    )*) => {
        impl GrCtx {
            $(
                $(#[$doc])*
                #[inline]
                pub fn $name(&self, $($arg: $ty),*) -> $ret {
                    (slot_fn!(self, $method, $accessor))($($arg,)* self)
                }
            )*
        }
    };
}

// ============================================================================
// Context description and predicates
// ============================================================================

dispatch! {
    /// Appends a description of the domain.
    fn write_ctx(out: &mut GrStream) -> Status => CtxWrite via as_ctx_write;
    fn is_ring() -> Truth => CtxIsRing via as_ctx_predicate;
    fn is_commutative_ring() -> Truth => CtxIsCommutativeRing via as_ctx_predicate;
    fn is_integral_domain() -> Truth => CtxIsIntegralDomain via as_ctx_predicate;
    fn is_field() -> Truth => CtxIsField via as_ctx_predicate;
    fn is_unique_factorization_domain() -> Truth => CtxIsUniqueFactorizationDomain via as_ctx_predicate;
    fn is_finite() -> Truth => CtxIsFinite via as_ctx_predicate;
    fn is_finite_characteristic() -> Truth => CtxIsFiniteCharacteristic via as_ctx_predicate;
    fn is_algebraically_closed() -> Truth => CtxIsAlgebraicallyClosed via as_ctx_predicate;
    fn is_ordered_ring() -> Truth => CtxIsOrderedRing via as_ctx_predicate;
    /// Elements are exact, so equality is decidable.
    fn is_exact() -> Truth => CtxIsExact via as_ctx_predicate;
    /// Equal values are stored identically.
    fn is_canonical() -> Truth => CtxIsCanonical via as_ctx_predicate;
}

// ============================================================================
// Element lifecycle
// ============================================================================

dispatch! {
    /// A fresh element holding zero.
    fn init() -> Elem => Init via as_init;
    fn clear(x: Elem) -> () => Clear via as_clear;
    fn swap(x: &mut Elem, y: &mut Elem) -> () => Swap via as_swap;
    /// Sets `x` to a random test value, biased towards edge cases.
    fn randtest(x: &mut Elem, state: &mut RandState) -> Status => Randtest via as_randtest;
    fn write(out: &mut GrStream, x: &Elem) -> Status => Write via as_write;
}

// ============================================================================
// Constants, predicates, conversions
// ============================================================================

dispatch! {
    fn zero(res: &mut Elem) -> Status => Zero via as_constant;
    fn one(res: &mut Elem) -> Status => One via as_constant;
    fn is_zero(x: &Elem) -> Truth => IsZero via as_predicate;
    fn is_one(x: &Elem) -> Truth => IsOne via as_predicate;
    fn is_neg_one(x: &Elem) -> Truth => IsNegOne via as_predicate;
    fn equal(x: &Elem, y: &Elem) -> Truth => Equal via as_binary_predicate;

    fn set(res: &mut Elem, x: &Elem) -> Status => Set via as_unary;
    fn set_si(res: &mut Elem, c: i64) -> Status => SetSi via as_set_si;
    fn set_ui(res: &mut Elem, c: u64) -> Status => SetUi via as_set_ui;
    fn set_fmpz(res: &mut Elem, c: &BigInt) -> Status => SetFmpz via as_set_fmpz;
    fn set_fmpq(res: &mut Elem, c: &BigRational) -> Status => SetFmpq via as_set_fmpq;
    /// Converts `x`, an element of `x_ctx`, into this context.
    fn set_other(res: &mut Elem, x: &Elem, x_ctx: &GrCtx) -> Status => SetOther via as_set_other;
    fn get_si(res: &mut i64, x: &Elem) -> Status => GetSi via as_get_si;
    fn get_ui(res: &mut u64, x: &Elem) -> Status => GetUi via as_get_ui;
    fn get_fmpz(res: &mut BigInt, x: &Elem) -> Status => GetFmpz via as_get_fmpz;
    fn get_fmpq(res: &mut BigRational, x: &Elem) -> Status => GetFmpq via as_get_fmpq;
    fn get_d(res: &mut f64, x: &Elem) -> Status => GetD via as_get_d;
}

// ============================================================================
// Arithmetic
// ============================================================================

dispatch! {
    fn neg(res: &mut Elem, x: &Elem) -> Status => Neg via as_unary;
    fn add(res: &mut Elem, x: &Elem, y: &Elem) -> Status => Add via as_binary;
    fn add_ui(res: &mut Elem, x: &Elem, c: u64) -> Status => AddUi via as_binary_ui;
    fn add_si(res: &mut Elem, x: &Elem, c: i64) -> Status => AddSi via as_binary_si;
    fn sub(res: &mut Elem, x: &Elem, y: &Elem) -> Status => Sub via as_binary;
    fn sub_ui(res: &mut Elem, x: &Elem, c: u64) -> Status => SubUi via as_binary_ui;
    fn sub_si(res: &mut Elem, x: &Elem, c: i64) -> Status => SubSi via as_binary_si;
    fn mul(res: &mut Elem, x: &Elem, y: &Elem) -> Status => Mul via as_binary;
    fn mul_ui(res: &mut Elem, x: &Elem, c: u64) -> Status => MulUi via as_binary_ui;
    fn mul_si(res: &mut Elem, x: &Elem, c: i64) -> Status => MulSi via as_binary_si;
    fn sqr(res: &mut Elem, x: &Elem) -> Status => Sqr via as_unary;
    fn div(res: &mut Elem, x: &Elem, y: &Elem) -> Status => Div via as_binary;
    fn div_ui(res: &mut Elem, x: &Elem, c: u64) -> Status => DivUi via as_binary_ui;
    fn div_si(res: &mut Elem, x: &Elem, c: i64) -> Status => DivSi via as_binary_si;
    fn is_invertible(x: &Elem) -> Truth => IsInvertible via as_predicate;
    fn inv(res: &mut Elem, x: &Elem) -> Status => Inv via as_unary;
}

// ============================================================================
// Powers, roots, rounding
// ============================================================================

dispatch! {
    fn pow_ui(res: &mut Elem, x: &Elem, e: u64) -> Status => PowUi via as_binary_ui;
    fn pow_si(res: &mut Elem, x: &Elem, e: i64) -> Status => PowSi via as_binary_si;
    fn pow_fmpz(res: &mut Elem, x: &Elem, e: &BigInt) -> Status => PowFmpz via as_binary_fmpz;
    fn pow_fmpq(res: &mut Elem, x: &Elem, e: &BigRational) -> Status => PowFmpq via as_binary_fmpq;
    /// `x^y` with the exponent taken from the same domain.
    fn pow(res: &mut Elem, x: &Elem, y: &Elem) -> Status => Pow via as_binary;
    fn is_square(x: &Elem) -> Truth => IsSquare via as_predicate;
    fn sqrt(res: &mut Elem, x: &Elem) -> Status => Sqrt via as_unary;
    fn rsqrt(res: &mut Elem, x: &Elem) -> Status => Rsqrt via as_unary;

    fn floor(res: &mut Elem, x: &Elem) -> Status => Floor via as_unary;
    fn ceil(res: &mut Elem, x: &Elem) -> Status => Ceil via as_unary;
    fn trunc(res: &mut Elem, x: &Elem) -> Status => Trunc via as_unary;
    /// Nearest integer, ties to even.
    fn nint(res: &mut Elem, x: &Elem) -> Status => Nint via as_unary;
}

// ============================================================================
// Constants, parts, comparison, elementary functions
// ============================================================================

dispatch! {
    fn i(res: &mut Elem) -> Status => I via as_constant;
    fn pi(res: &mut Elem) -> Status => Pi via as_constant;
    fn abs(res: &mut Elem, x: &Elem) -> Status => Abs via as_unary;
    fn conj(res: &mut Elem, x: &Elem) -> Status => Conj via as_unary;
    fn re(res: &mut Elem, x: &Elem) -> Status => Re via as_unary;
    fn im(res: &mut Elem, x: &Elem) -> Status => Im via as_unary;
    fn sgn(res: &mut Elem, x: &Elem) -> Status => Sgn via as_unary;
    fn csgn(res: &mut Elem, x: &Elem) -> Status => Csgn via as_unary;
    fn cmp(res: &mut Ordering, x: &Elem, y: &Elem) -> Status => Cmp via as_cmp;
    fn cmpabs(res: &mut Ordering, x: &Elem, y: &Elem) -> Status => Cmpabs via as_cmp;
    fn exp(res: &mut Elem, x: &Elem) -> Status => Exp via as_unary;
    fn log(res: &mut Elem, x: &Elem) -> Status => Log via as_unary;
}

// ============================================================================
// Polynomials and matrices
// ============================================================================

dispatch! {
    /// First `len` coefficients of `a * b`; `res` must hold `len` elements.
    fn poly_mullow(res: &mut [Elem], a: &[Elem], b: &[Elem], len: usize) -> Status => PolyMullow via as_poly_mullow;
    /// `res = a * b`; `res` must already have the product's shape.
    fn mat_mul(res: &mut GrMat, a: &GrMat, b: &GrMat) -> Status => MatMul via as_mat_mul;
    fn mat_det(res: &mut Elem, a: &GrMat) -> Status => MatDet via as_mat_det;
}

// ============================================================================
// Convenience wrappers
// ============================================================================

impl GrCtx {
    /// `len` fresh zero elements.
    #[must_use]
    pub fn vec_init(&self, len: usize) -> Vec<Elem> {
        (0..len).map(|_| self.init()).collect()
    }

    /// An element holding `c`.
    ///
    /// # Errors
    ///
    /// The failure of the underlying `set_si`.
    pub fn elem_si(&self, c: i64) -> GrResult<Elem> {
        let mut x = self.init();
        self.set_si(&mut x, c).check()?;
        Ok(x)
    }

    /// An element holding the integer `c`.
    ///
    /// # Errors
    ///
    /// The failure of the underlying `set_fmpz`.
    pub fn elem_fmpz(&self, c: &BigInt) -> GrResult<Elem> {
        let mut x = self.init();
        self.set_fmpz(&mut x, c).check()?;
        Ok(x)
    }

    /// An element holding the rational `c`.
    ///
    /// # Errors
    ///
    /// [`GrError::Domain`] when `c` has no image, e.g. a denominator
    /// divisible by the modulus.
    pub fn elem_fmpq(&self, c: &BigRational) -> GrResult<Elem> {
        let mut x = self.init();
        self.set_fmpq(&mut x, c).check()?;
        Ok(x)
    }

    /// A copy of `x`.
    #[must_use]
    pub fn elem_clone(&self, x: &Elem) -> Elem {
        let mut res = self.init();
        // Set within one context cannot fail.
        let _ = self.set(&mut res, x);
        res
    }

    /// The integer value of `x`.
    ///
    /// # Errors
    ///
    /// [`GrError::Domain`] when `x` is not an integer.
    pub fn to_fmpz(&self, x: &Elem) -> GrResult<BigInt> {
        let mut v = BigInt::default();
        self.get_fmpz(&mut v, x).check()?;
        Ok(v)
    }

    /// The rational value of `x`.
    ///
    /// # Errors
    ///
    /// [`GrError::Domain`] when `x` has no rational value.
    pub fn to_fmpq(&self, x: &Elem) -> GrResult<BigRational> {
        let mut v = BigRational::default();
        self.get_fmpq(&mut v, x).check()?;
        Ok(v)
    }

    /// Orders `x` and `y`.
    ///
    /// # Errors
    ///
    /// [`GrError::Domain`] on unordered domains, [`GrError::Unable`] when
    /// the order cannot be decided.
    pub fn compare(&self, x: &Elem, y: &Elem) -> GrResult<Ordering> {
        let mut ord = Ordering::Equal;
        self.cmp(&mut ord, x, y).check()?;
        Ok(ord)
    }

    /// Textual form of `x`.
    #[must_use]
    pub fn elem_to_string(&self, x: &Elem) -> String {
        let mut out = GrStream::new();
        let _ = self.write(&mut out, x);
        out.into_string()
    }

    /// Textual description of the domain.
    #[must_use]
    pub fn ctx_to_string(&self) -> String {
        let mut out = GrStream::new();
        let _ = self.write_ctx(&mut out);
        out.into_string()
    }

    /// Applies a binary operation, returning a new element.
    ///
    /// # Errors
    ///
    /// The failure reported by `op`.
    pub fn apply2(
        &self,
        op: fn(&Self, &mut Elem, &Elem, &Elem) -> Status,
        x: &Elem,
        y: &Elem,
    ) -> GrResult<Elem> {
        let mut res = self.init();
        match GrError::from_status(op(self, &mut res, x, y)) {
            None => Ok(res),
            Some(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_domain() {
        let ctx = GrCtx::fmpz();
        let a = ctx.elem_si(6).unwrap();
        let b = ctx.elem_si(7).unwrap();
        let c = ctx.apply2(GrCtx::mul, &a, &b).unwrap();
        assert_eq!(ctx.to_fmpz(&c).unwrap(), BigInt::from(42));
        assert_eq!(ctx.elem_to_string(&c), "42");
    }

    #[test]
    fn test_errors_surface_through_wrappers() {
        let ctx = GrCtx::fmpz();
        let a = ctx.elem_si(1).unwrap();
        let z = ctx.elem_si(0).unwrap();
        assert_eq!(ctx.apply2(GrCtx::div, &a, &z).unwrap_err(), GrError::Domain);
    }

    #[test]
    fn test_vec_init_and_clone() {
        let ctx = GrCtx::fmpq();
        let v = ctx.vec_init(3);
        assert_eq!(v.len(), 3);
        assert!(v.iter().all(|x| ctx.is_zero(x).is_true()));
        let x = ctx.elem_si(-5).unwrap();
        let y = ctx.elem_clone(&x);
        assert!(ctx.equal(&x, &y).is_true());
    }

    #[test]
    fn test_swap_and_clear() {
        let ctx = GrCtx::fmpz();
        let mut a = ctx.elem_si(1).unwrap();
        let mut b = ctx.elem_si(2).unwrap();
        ctx.swap(&mut a, &mut b);
        assert_eq!(ctx.to_fmpz(&a).unwrap(), BigInt::from(2));
        ctx.clear(a);
        ctx.clear(b);
    }
}
