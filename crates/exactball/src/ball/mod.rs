//! Ball arithmetic.
//!
//! A ball is a midpoint with a radius. Every operation guarantees that
//! the true result lies inside the output whenever the true inputs lie
//! inside the input balls, at any requested precision. Precision only
//! bounds how many midpoint bits are kept, and so how cheap and how
//! tight the result is.
//!
//! | Type | Role |
//! |------|------|
//! | [`Arf`] | arbitrary-precision binary float, midpoints |
//! | [`Mag`] | low-precision upper bound, radii |
//! | [`Arb`] | real ball |
//! | [`Acb`] | complex ball |
//!
//! # Example
//!
//! ```
//! use exactball::ball::{const_log2, Arb};
//!
//! let x = Arb::from_i64(2).log(128);
//! assert!(x.overlaps(&const_log2(128)));
//! ```

pub mod acb;
pub mod arb;
pub mod arf;
pub mod consts;
pub mod exp;
pub mod log;
pub mod mag;

pub use acb::Acb;
pub use arb::Arb;
pub use arf::{Arf, Round};
pub use consts::{const_log2, const_pi, log2_cached_prec};
pub use exp::exp_taylor_naive;
pub use mag::Mag;
