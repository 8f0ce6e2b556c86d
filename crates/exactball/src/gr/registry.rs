//! Process-wide shared contexts.
//!
//! The parameterless domains need only one context each. These are
//! built on first use and never mutated afterwards, so they can be
//! shared freely between threads.

use std::sync::OnceLock;

use super::ctx::GrCtx;

static FMPZ: OnceLock<GrCtx> = OnceLock::new();
static FMPQ: OnceLock<GrCtx> = OnceLock::new();

/// The shared integer context.
pub fn fmpz_ctx() -> &'static GrCtx {
    FMPZ.get_or_init(GrCtx::fmpz)
}

/// The shared rational context.
pub fn fmpq_ctx() -> &'static GrCtx {
    FMPQ.get_or_init(GrCtx::fmpq)
}
