//! Concrete domains.
//!
//! Each module defines a payload type, typed implementations of the
//! operations it supports natively, and a method table built once on
//! first use. Everything a domain leaves out is served by the generic
//! fallbacks.
//!
//! | Module | Domain | Payload | Exact |
//! |--------|--------|---------|-------|
//! | [`fmpz`] | `Z` | `BigInt` | yes |
//! | [`fmpq`] | `Q` | `BigRational` | yes |
//! | [`nmod`] | `Z/nZ`, word-size `n` | `u64` | yes |
//! | [`padic`] | `Q_p` mod `p^N` | [`padic::Padic`] | no |
//! | [`arb`] | real balls | [`Arb`](crate::ball::Arb) | no |
//! | [`acb`] | complex balls | [`Acb`](crate::ball::Acb) | no |

pub mod acb;
pub mod arb;
pub mod fmpq;
pub mod fmpz;
pub mod nmod;
pub mod padic;

use crate::core::constants::{RANDTEST_BITS, RANDTEST_BITS_LARGE};
use crate::core::RandState;

/// Size of random test values: usually small, large one time in four.
pub(crate) fn randtest_bits(state: &mut RandState) -> u64 {
    if state.randint(4) == 0 {
        RANDTEST_BITS_LARGE
    } else {
        RANDTEST_BITS
    }
}
