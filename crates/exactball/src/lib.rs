//! exactball - exact and ball arithmetic behind one generic ring interface
//!
//! Every domain is a [`GrCtx`]: a context value carrying a table of method
//! implementations. Generic algorithms (powers, polynomial and matrix
//! products, determinants) are written once against the context and run
//! over every domain. Domains override the methods they can do better and
//! inherit the rest.
//!
//! # Outcomes
//!
//! Operations write into an output element and return a [`Status`]:
//!
//! | Status | Meaning |
//! |--------|---------|
//! | `SUCCESS` | the output holds the result |
//! | `DOMAIN` | the result is mathematically undefined (division by zero, `sqrt(2)` in `Q`) |
//! | `UNABLE` | defined, but not computable here (size limit, ball too wide) |
//!
//! Statuses are bit flags and combine with `|`, so a composite algorithm
//! reports every failure class it encountered. Predicates return a
//! three-valued [`Truth`]; inexact domains answer `Unknown` rather than
//! guess.
//!
//! # Domains
//!
//! | Constructor | Domain | Exact |
//! |-------------|--------|-------|
//! | [`GrCtx::fmpz`] | integers | yes |
//! | [`GrCtx::fmpq`] | rationals | yes |
//! | [`GrCtx::nmod`] | integers mod a word-size `n` | yes |
//! | [`GrCtx::padic`] | p-adic numbers to fixed precision | no |
//! | [`GrCtx::real_ball`] | real balls | no |
//! | [`GrCtx::complex_ball`] | complex balls | no |
//!
//! # Example: Generic Code
//!
//! ```
//! use exactball::gr::GrCtx;
//! use exactball::Status;
//!
//! // x^10 + 1 over any domain
//! fn bump(ctx: &GrCtx, x: i64) -> String {
//!     let x = ctx.elem_si(x).unwrap();
//!     let mut y = ctx.init();
//!     let mut status = ctx.pow_ui(&mut y, &x, 10);
//!     let y0 = ctx.elem_clone(&y);
//!     status |= ctx.add_si(&mut y, &y0, 1);
//!     assert_eq!(status, Status::SUCCESS);
//!     ctx.elem_to_string(&y)
//! }
//!
//! assert_eq!(bump(&GrCtx::fmpz(), 2), "1025");
//! assert_eq!(bump(&GrCtx::nmod(11).unwrap(), 2), "2");
//! ```
//!
//! # Example: Ball Enclosures
//!
//! ```
//! use exactball::ball::{const_log2, Arb};
//!
//! let two = Arb::from_i64(2);
//! let ln2 = two.log(200);
//! assert!(ln2.overlaps(&const_log2(200)));
//! assert!(ln2.exp(200).overlaps(&two));
//! ```

// Status codes, three-valued logic, randomness, output streams
pub mod core;

// Result-based error type
pub mod error;

// Number-theoretic helpers
pub mod nt;

// Ball arithmetic and constants
pub mod ball;

// Generic ring dispatch
pub mod gr;

// Concrete domains
pub mod domains;

// Re-export core types at crate root
pub use crate::core::{GrStream, RandState, Status, Truth};
pub use crate::error::{GrError, GrResult};
pub use crate::gr::{Elem, GrCtx};
