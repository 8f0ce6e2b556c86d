//! Method table entries.
//!
//! A [`Slot`] is a tagged function pointer. Implementations operate on
//! type-erased [`Elem`]s; domains write typed functions over their own
//! payload and wrap them with `typed_slot!`, which downcasts on the way
//! in.

use core::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;

use super::ctx::GrCtx;
use super::elem::Elem;
use super::mat::GrMat;
use crate::core::{GrStream, RandState, Status, Truth};

pub type CtxWriteFn = fn(&mut GrStream, &GrCtx) -> Status;
pub type CtxPredicateFn = fn(&GrCtx) -> Truth;
pub type InitFn = fn(&GrCtx) -> Elem;
pub type ClearFn = fn(Elem, &GrCtx);
pub type SwapFn = fn(&mut Elem, &mut Elem, &GrCtx);
pub type RandtestFn = fn(&mut Elem, &mut RandState, &GrCtx) -> Status;
pub type WriteFn = fn(&mut GrStream, &Elem, &GrCtx) -> Status;
pub type ConstantFn = fn(&mut Elem, &GrCtx) -> Status;
pub type PredicateFn = fn(&Elem, &GrCtx) -> Truth;
pub type BinaryPredicateFn = fn(&Elem, &Elem, &GrCtx) -> Truth;
pub type UnaryFn = fn(&mut Elem, &Elem, &GrCtx) -> Status;
pub type BinaryFn = fn(&mut Elem, &Elem, &Elem, &GrCtx) -> Status;
pub type BinarySiFn = fn(&mut Elem, &Elem, i64, &GrCtx) -> Status;
pub type BinaryUiFn = fn(&mut Elem, &Elem, u64, &GrCtx) -> Status;
pub type BinaryFmpzFn = fn(&mut Elem, &Elem, &BigInt, &GrCtx) -> Status;
pub type BinaryFmpqFn = fn(&mut Elem, &Elem, &BigRational, &GrCtx) -> Status;
pub type SetSiFn = fn(&mut Elem, i64, &GrCtx) -> Status;
pub type SetUiFn = fn(&mut Elem, u64, &GrCtx) -> Status;
pub type SetFmpzFn = fn(&mut Elem, &BigInt, &GrCtx) -> Status;
pub type SetFmpqFn = fn(&mut Elem, &BigRational, &GrCtx) -> Status;
/// `(res, x, x_ctx, ctx)`: convert `x`, owned by `x_ctx`, into `ctx`.
pub type SetOtherFn = fn(&mut Elem, &Elem, &GrCtx, &GrCtx) -> Status;
pub type GetSiFn = fn(&mut i64, &Elem, &GrCtx) -> Status;
pub type GetUiFn = fn(&mut u64, &Elem, &GrCtx) -> Status;
pub type GetFmpzFn = fn(&mut BigInt, &Elem, &GrCtx) -> Status;
pub type GetFmpqFn = fn(&mut BigRational, &Elem, &GrCtx) -> Status;
pub type GetDFn = fn(&mut f64, &Elem, &GrCtx) -> Status;
pub type CmpFn = fn(&mut Ordering, &Elem, &Elem, &GrCtx) -> Status;
/// `(res, a, b, len, ctx)`: the first `len` coefficients of `a * b`.
pub type PolyMullowFn = fn(&mut [Elem], &[Elem], &[Elem], usize, &GrCtx) -> Status;
pub type MatMulFn = fn(&mut GrMat, &GrMat, &GrMat, &GrCtx) -> Status;
pub type MatDetFn = fn(&mut Elem, &GrMat, &GrCtx) -> Status;

macro_rules! slots {
    ($($kind:ident($fn_ty:ty) => $accessor:ident,)*) => {
        /// Signature class of a slot.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SlotKind {
            $($kind,)*
        }

        /// A method implementation.
        #[derive(Clone, Copy)]
        pub enum Slot {
            $($kind($fn_ty),)*
        }

        impl Slot {
            #[must_use]
            pub const fn kind(self) -> SlotKind {
                match self {
                    $(Slot::$kind(_) => SlotKind::$kind,)*
                }
            }

            $(
                #[inline]
                pub(crate) fn $accessor(self) -> Option<$fn_ty> {
                    match self {
                        Slot::$kind(f) => Some(f),
                        _ => None,
                    }
                }
            )*
        }
    };
}

slots! {
    CtxWrite(CtxWriteFn) => as_ctx_write,
    CtxPredicate(CtxPredicateFn) => as_ctx_predicate,
    Init(InitFn) => as_init,
    Clear(ClearFn) => as_clear,
    Swap(SwapFn) => as_swap,
    Randtest(RandtestFn) => as_randtest,
    Write(WriteFn) => as_write,
    Constant(ConstantFn) => as_constant,
    Predicate(PredicateFn) => as_predicate,
    BinaryPredicate(BinaryPredicateFn) => as_binary_predicate,
    Unary(UnaryFn) => as_unary,
    Binary(BinaryFn) => as_binary,
    BinarySi(BinarySiFn) => as_binary_si,
    BinaryUi(BinaryUiFn) => as_binary_ui,
    BinaryFmpz(BinaryFmpzFn) => as_binary_fmpz,
    BinaryFmpq(BinaryFmpqFn) => as_binary_fmpq,
    SetSi(SetSiFn) => as_set_si,
    SetUi(SetUiFn) => as_set_ui,
    SetFmpz(SetFmpzFn) => as_set_fmpz,
    SetFmpq(SetFmpqFn) => as_set_fmpq,
    SetOther(SetOtherFn) => as_set_other,
    GetSi(GetSiFn) => as_get_si,
    GetUi(GetUiFn) => as_get_ui,
    GetFmpz(GetFmpzFn) => as_get_fmpz,
    GetFmpq(GetFmpqFn) => as_get_fmpq,
    GetD(GetDFn) => as_get_d,
    Cmp(CmpFn) => as_cmp,
    PolyMullow(PolyMullowFn) => as_poly_mullow,
    MatMul(MatMulFn) => as_mat_mul,
    MatDet(MatDetFn) => as_mat_det,
}

impl core::fmt::Debug for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Slot::{:?}", self.kind())
    }
}

/// Wraps a function over a domain's payload type as an erased [`Slot`].
///
/// ```ignore
/// typed_slot!(Binary, BigRational, add)
/// ```
macro_rules! typed_slot {
    (Randtest, $t:ty, $f:path) => {
        $crate::gr::Slot::Randtest({
            fn shim(
                res: &mut $crate::gr::Elem,
                state: &mut $crate::core::RandState,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(res.get_mut::<$t>(), state, ctx)
            }
            shim
        })
    };
    (Write, $t:ty, $f:path) => {
        $crate::gr::Slot::Write({
            fn shim(
                out: &mut $crate::core::GrStream,
                x: &$crate::gr::Elem,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(out, x.get::<$t>(), ctx)
            }
            shim
        })
    };
    (Constant, $t:ty, $f:path) => {
        $crate::gr::Slot::Constant({
            fn shim(res: &mut $crate::gr::Elem, ctx: &$crate::gr::GrCtx) -> $crate::core::Status {
                $f(res.get_mut::<$t>(), ctx)
            }
            shim
        })
    };
    (Predicate, $t:ty, $f:path) => {
        $crate::gr::Slot::Predicate({
            fn shim(x: &$crate::gr::Elem, ctx: &$crate::gr::GrCtx) -> $crate::core::Truth {
                $f(x.get::<$t>(), ctx)
            }
            shim
        })
    };
    (BinaryPredicate, $t:ty, $f:path) => {
        $crate::gr::Slot::BinaryPredicate({
            fn shim(
                x: &$crate::gr::Elem,
                y: &$crate::gr::Elem,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Truth {
                $f(x.get::<$t>(), y.get::<$t>(), ctx)
            }
            shim
        })
    };
    (Unary, $t:ty, $f:path) => {
        $crate::gr::Slot::Unary({
            fn shim(
                res: &mut $crate::gr::Elem,
                x: &$crate::gr::Elem,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(res.get_mut::<$t>(), x.get::<$t>(), ctx)
            }
            shim
        })
    };
    (Binary, $t:ty, $f:path) => {
        $crate::gr::Slot::Binary({
            fn shim(
                res: &mut $crate::gr::Elem,
                x: &$crate::gr::Elem,
                y: &$crate::gr::Elem,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(res.get_mut::<$t>(), x.get::<$t>(), y.get::<$t>(), ctx)
            }
            shim
        })
    };
    ($kind:ident, $t:ty, $f:path, scalar $s:ty) => {
        $crate::gr::Slot::$kind({
            fn shim(
                res: &mut $crate::gr::Elem,
                x: &$crate::gr::Elem,
                c: $s,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(res.get_mut::<$t>(), x.get::<$t>(), c, ctx)
            }
            shim
        })
    };
    (BinarySi, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(BinarySi, $t, $f, scalar i64)
    };
    (BinaryUi, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(BinaryUi, $t, $f, scalar u64)
    };
    (BinaryFmpz, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(BinaryFmpz, $t, $f, scalar &::num_bigint::BigInt)
    };
    (BinaryFmpq, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(BinaryFmpq, $t, $f, scalar &::num_rational::BigRational)
    };
    (set $kind:ident, $t:ty, $f:path, $s:ty) => {
        $crate::gr::Slot::$kind({
            fn shim(
                res: &mut $crate::gr::Elem,
                c: $s,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(res.get_mut::<$t>(), c, ctx)
            }
            shim
        })
    };
    (SetSi, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(set SetSi, $t, $f, i64)
    };
    (SetUi, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(set SetUi, $t, $f, u64)
    };
    (SetFmpz, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(set SetFmpz, $t, $f, &::num_bigint::BigInt)
    };
    (SetFmpq, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(set SetFmpq, $t, $f, &::num_rational::BigRational)
    };
    (SetOther, $t:ty, $f:path) => {
        $crate::gr::Slot::SetOther({
            fn shim(
                res: &mut $crate::gr::Elem,
                x: &$crate::gr::Elem,
                x_ctx: &$crate::gr::GrCtx,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(res.get_mut::<$t>(), x, x_ctx, ctx)
            }
            shim
        })
    };
    (get $kind:ident, $t:ty, $f:path, $out:ty) => {
        $crate::gr::Slot::$kind({
            fn shim(
                res: &mut $out,
                x: &$crate::gr::Elem,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(res, x.get::<$t>(), ctx)
            }
            shim
        })
    };
    (GetSi, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(get GetSi, $t, $f, i64)
    };
    (GetUi, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(get GetUi, $t, $f, u64)
    };
    (GetFmpz, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(get GetFmpz, $t, $f, ::num_bigint::BigInt)
    };
    (GetFmpq, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(get GetFmpq, $t, $f, ::num_rational::BigRational)
    };
    (GetD, $t:ty, $f:path) => {
        $crate::gr::slot::typed_slot!(get GetD, $t, $f, f64)
    };
    (Cmp, $t:ty, $f:path) => {
        $crate::gr::Slot::Cmp({
            fn shim(
                res: &mut ::core::cmp::Ordering,
                x: &$crate::gr::Elem,
                y: &$crate::gr::Elem,
                ctx: &$crate::gr::GrCtx,
            ) -> $crate::core::Status {
                $f(res, x.get::<$t>(), y.get::<$t>(), ctx)
            }
            shim
        })
    };
}

pub(crate) use typed_slot;

#[cfg(test)]
mod tests {
    use super::*;

    fn unary_success(_res: &mut Elem, _x: &Elem, _ctx: &GrCtx) -> Status {
        Status::SUCCESS
    }

    #[test]
    fn test_kind_and_accessors() {
        let slot = Slot::Unary(unary_success);
        assert_eq!(slot.kind(), SlotKind::Unary);
        assert!(slot.as_unary().is_some());
        assert!(slot.as_binary().is_none());
        assert_eq!(format!("{slot:?}"), "Slot::Unary");
    }
}
