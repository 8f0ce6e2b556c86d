//! Operation identifiers.
//!
//! Every operation the dispatch layer knows has a [`Method`] variant and
//! a fixed [`SlotKind`] describing the signature its implementation must
//! have. The variant's discriminant is its index in a
//! [`MethodTable`](super::MethodTable).

use super::slot::SlotKind;

macro_rules! methods {
    ($($(#[$doc:meta])* $name:ident => $kind:ident,)*) => {
        /// Abstract operation identifier.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Method {
            $($(#[$doc])* $name,)*
        }

        impl Method {
            /// Every method, in slot order.
            pub const ALL: &'static [Method] = &[$(Method::$name,)*];

            /// Number of slots in a method table.
            pub const COUNT: usize = Self::ALL.len();

            /// Signature an implementation of this method must have.
            #[must_use]
            pub const fn kind(self) -> SlotKind {
                match self {
                    $(Method::$name => SlotKind::$kind,)*
                }
            }

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Method::$name => stringify!($name),)*
                }
            }
        }
    };
}

methods! {
    /// Describe the domain.
    CtxWrite => CtxWrite,
    CtxIsRing => CtxPredicate,
    CtxIsCommutativeRing => CtxPredicate,
    CtxIsIntegralDomain => CtxPredicate,
    CtxIsField => CtxPredicate,
    CtxIsUniqueFactorizationDomain => CtxPredicate,
    CtxIsFinite => CtxPredicate,
    CtxIsFiniteCharacteristic => CtxPredicate,
    CtxIsAlgebraicallyClosed => CtxPredicate,
    CtxIsOrderedRing => CtxPredicate,
    /// Elements are exact values, so equality is decidable.
    CtxIsExact => CtxPredicate,
    /// Equal values have equal representations.
    CtxIsCanonical => CtxPredicate,

    Init => Init,
    Clear => Clear,
    Swap => Swap,
    Randtest => Randtest,
    Write => Write,

    Zero => Constant,
    One => Constant,
    IsZero => Predicate,
    IsOne => Predicate,
    IsNegOne => Predicate,
    Equal => BinaryPredicate,

    Set => Unary,
    SetSi => SetSi,
    SetUi => SetUi,
    SetFmpz => SetFmpz,
    SetFmpq => SetFmpq,
    /// Convert from an element of another context.
    SetOther => SetOther,
    GetSi => GetSi,
    GetUi => GetUi,
    GetFmpz => GetFmpz,
    GetFmpq => GetFmpq,
    GetD => GetD,

    Neg => Unary,
    Add => Binary,
    AddUi => BinaryUi,
    AddSi => BinarySi,
    Sub => Binary,
    SubUi => BinaryUi,
    SubSi => BinarySi,
    Mul => Binary,
    MulUi => BinaryUi,
    MulSi => BinarySi,
    Sqr => Unary,
    Div => Binary,
    DivUi => BinaryUi,
    DivSi => BinarySi,
    IsInvertible => Predicate,
    Inv => Unary,

    PowUi => BinaryUi,
    PowSi => BinarySi,
    PowFmpz => BinaryFmpz,
    PowFmpq => BinaryFmpq,
    /// Power with an exponent from the same domain.
    Pow => Binary,
    IsSquare => Predicate,
    Sqrt => Unary,
    Rsqrt => Unary,

    Floor => Unary,
    Ceil => Unary,
    Trunc => Unary,
    /// Nearest integer, ties to even.
    Nint => Unary,

    I => Constant,
    Pi => Constant,
    Abs => Unary,
    Conj => Unary,
    Re => Unary,
    Im => Unary,
    Sgn => Unary,
    Csgn => Unary,
    Cmp => Cmp,
    Cmpabs => Cmp,

    Exp => Unary,
    Log => Unary,

    /// Product of two polynomials truncated to a length.
    PolyMullow => PolyMullow,
    MatMul => MatMul,
    MatDet => MatDet,
}

impl Method {
    /// Slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}
