//! Ring contexts.
//!
//! A [`GrCtx`] describes one concrete domain: which ring it is, the
//! runtime parameters the ring needs (a modulus, a prime and precision,
//! a working precision) and the shared [`MethodTable`] operations are
//! dispatched through.
//!
//! | Constructor | Domain | Parameters |
//! |-------------|--------|------------|
//! | [`GrCtx::fmpz`] | integers | none |
//! | [`GrCtx::fmpq`] | rationals | none |
//! | [`GrCtx::nmod`] | `Z/nZ` | modulus `n >= 1` |
//! | [`GrCtx::padic`] | `Q_p` | prime `p`, precision `N` |
//! | [`GrCtx::real_ball`] | real balls | precision in bits |
//! | [`GrCtx::complex_ball`] | complex balls | precision in bits |
//!
//! # Example
//!
//! ```
//! use exactball::gr::GrCtx;
//!
//! let mut ctx = GrCtx::real_ball(53);
//! assert_eq!(ctx.prec(), Some(53));
//! assert!(ctx.set_prec(128).is_success());
//! assert!(GrCtx::fmpq().set_prec(128).has_unable());
//! ```

use core::fmt;

use num_bigint::BigInt;

use super::table::MethodTable;
use crate::core::constants::{DEFAULT_PREC, DEFAULT_SIZE_LIMIT};
use crate::core::Status;
use crate::domains;
use crate::error::GrResult;

/// Identifies the concrete ring behind a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingTag {
    Fmpz,
    Fmpq,
    Nmod,
    Padic,
    RealBall,
    ComplexBall,
}

impl RingTag {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fmpz => "fmpz",
            Self::Fmpq => "fmpq",
            Self::Nmod => "nmod",
            Self::Padic => "padic",
            Self::RealBall => "arb",
            Self::ComplexBall => "acb",
        }
    }
}

impl fmt::Display for RingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime parameters of a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtxParams {
    None,
    Nmod { n: u64, is_prime: bool },
    Padic { p: BigInt, prec: i64 },
    Ball { prec: u64 },
}

/// A concrete domain plus its dispatch table.
#[derive(Clone)]
pub struct GrCtx {
    which_ring: RingTag,
    sizeof_elem: usize,
    size_limit: u64,
    methods: &'static MethodTable,
    params: CtxParams,
}

impl GrCtx {
    pub(crate) fn from_parts(
        which_ring: RingTag,
        sizeof_elem: usize,
        methods: &'static MethodTable,
        params: CtxParams,
    ) -> Self {
        Self {
            which_ring,
            sizeof_elem,
            size_limit: DEFAULT_SIZE_LIMIT,
            methods,
            params,
        }
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// The ring of integers.
    #[must_use]
    pub fn fmpz() -> Self {
        domains::fmpz::ctx()
    }

    /// The field of rationals.
    #[must_use]
    pub fn fmpq() -> Self {
        domains::fmpq::ctx()
    }

    /// Integers modulo `n`.
    ///
    /// # Errors
    ///
    /// [`GrError::Domain`](crate::GrError::Domain) when `n == 0`.
    pub fn nmod(n: u64) -> GrResult<Self> {
        domains::nmod::ctx(n)
    }

    /// p-adic numbers modulo `p^prec`.
    ///
    /// # Errors
    ///
    /// [`GrError::Domain`](crate::GrError::Domain) when `p` is not a
    /// prime or `prec < 1`.
    pub fn padic(p: &BigInt, prec: i64) -> GrResult<Self> {
        domains::padic::ctx(p, prec)
    }

    /// Real balls at `prec` bits.
    #[must_use]
    pub fn real_ball(prec: u64) -> Self {
        domains::arb::ctx(prec)
    }

    /// Complex balls at `prec` bits.
    #[must_use]
    pub fn complex_ball(prec: u64) -> Self {
        domains::acb::ctx(prec)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn which_ring(&self) -> RingTag {
        self.which_ring
    }

    /// Payload size of one element, in bytes.
    #[inline]
    #[must_use]
    pub fn sizeof_elem(&self) -> usize {
        self.sizeof_elem
    }

    /// Upper bound on generated sizes such as exponents.
    #[inline]
    #[must_use]
    pub fn size_limit(&self) -> u64 {
        self.size_limit
    }

    pub fn set_size_limit(&mut self, limit: u64) {
        self.size_limit = limit;
    }

    #[must_use]
    pub fn with_size_limit(mut self, limit: u64) -> Self {
        self.size_limit = limit;
        self
    }

    #[inline]
    #[must_use]
    pub fn methods(&self) -> &'static MethodTable {
        self.methods
    }

    #[must_use]
    pub fn params(&self) -> &CtxParams {
        &self.params
    }

    /// Working precision of a ball context.
    #[must_use]
    pub fn prec(&self) -> Option<u64> {
        match self.params {
            CtxParams::Ball { prec } => Some(prec),
            _ => None,
        }
    }

    /// Changes the working precision; `UNABLE` for exact domains.
    pub fn set_prec(&mut self, prec: u64) -> Status {
        match &mut self.params {
            CtxParams::Ball { prec: p } => {
                *p = prec.max(2);
                Status::SUCCESS
            }
            _ => Status::UNABLE,
        }
    }

    /// True when elements of `self` and `other` share a representation.
    #[must_use]
    pub fn same_domain(&self, other: &Self) -> bool {
        self.which_ring == other.which_ring && self.params == other.params
    }

    pub(crate) fn ball_prec(&self) -> u64 {
        self.prec().unwrap_or(DEFAULT_PREC)
    }
}

impl fmt::Debug for GrCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrCtx")
            .field("which_ring", &self.which_ring)
            .field("params", &self.params)
            .field("size_limit", &self.size_limit)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for GrCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ctx_to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_and_same_domain() {
        let a = GrCtx::nmod(7).unwrap();
        let b = GrCtx::nmod(7).unwrap();
        let c = GrCtx::nmod(11).unwrap();
        assert!(a.same_domain(&b));
        assert!(!a.same_domain(&c));
        assert_eq!(a.params(), &CtxParams::Nmod { n: 7, is_prime: true });
        assert!(GrCtx::nmod(0).is_err());
    }

    #[test]
    fn test_prec_only_on_balls() {
        let mut r = GrCtx::real_ball(100);
        assert_eq!(r.prec(), Some(100));
        assert!(r.set_prec(200).is_success());
        assert_eq!(r.prec(), Some(200));
        let mut z = GrCtx::fmpz();
        assert_eq!(z.prec(), None);
        assert_eq!(z.set_prec(10), Status::UNABLE);
    }

    #[test]
    fn test_size_limit() {
        let ctx = GrCtx::fmpq().with_size_limit(1000);
        assert_eq!(ctx.size_limit(), 1000);
        assert_eq!(GrCtx::fmpq().size_limit(), DEFAULT_SIZE_LIMIT);
    }

    #[test]
    fn test_ring_tags() {
        assert_eq!(GrCtx::fmpz().which_ring(), RingTag::Fmpz);
        assert_eq!(GrCtx::complex_ball(64).which_ring().to_string(), "acb");
    }
}
