//! Generic ring layer.
//!
//! A caller picks a domain by creating a [`GrCtx`], creates elements with
//! [`GrCtx::init`], and calls operations on the context. Each call looks
//! up a [`Slot`] in the context's [`MethodTable`] by its [`Method`] and
//! runs either the domain's own implementation or the generic fallback
//! from [`generic`].
//!
//! Every operation returns a [`Status`](crate::Status): `SUCCESS`,
//! `DOMAIN` when the result is mathematically undefined, `UNABLE` when
//! this implementation cannot produce it. Predicates return a
//! [`Truth`](crate::Truth), which may be `Unknown` for inexact domains.
//!
//! # Example
//!
//! ```
//! use exactball::gr::GrCtx;
//! use exactball::Status;
//!
//! let ctx = GrCtx::fmpq();
//! let two = ctx.elem_si(2).unwrap();
//! let mut r = ctx.init();
//! assert_eq!(ctx.sqrt(&mut r, &two), Status::DOMAIN);
//! assert!(ctx.is_field().is_true());
//! ```

pub mod ctx;
pub mod elem;
pub mod generic;
pub mod mat;
pub mod method;
mod ops;
pub mod registry;
pub mod slot;
pub mod table;
pub mod vec;

pub use ctx::{CtxParams, GrCtx, RingTag};
pub use elem::Elem;
pub use mat::GrMat;
pub use method::Method;
pub use registry::{fmpq_ctx, fmpz_ctx};
pub use slot::{Slot, SlotKind};
pub use table::MethodTable;
