//! Compile-time configuration.
//!
//! Every tunable of the kernel lives here. Runtime settings (working
//! precision, modulus, size limit) are carried by each context instead.

/// Default cap on the size of generated results (exponents, degrees).
pub const DEFAULT_SIZE_LIMIT: u64 = i64::MAX as u64;

/// Working precision, in bits, of a freshly created ball context.
pub const DEFAULT_PREC: u64 = 64;

/// Mantissa width of a [`Mag`](crate::ball::Mag) radius bound.
pub const MAG_BITS: u64 = 30;

/// Number of 64-bit limbs in the stored binary expansion of `log(2)`.
pub const LOG2_TAB_LIMBS: usize = 16;

/// Bits of `log(2)` available in the stored table.
pub const LOG2_TAB_BITS: u64 = 64 * LOG2_TAB_LIMBS as u64;

/// Precisions strictly below this are served from the stored table.
pub const LOG2_TAB_THRESHOLD: u64 = LOG2_TAB_BITS - 16;

/// Guard bits used by the fixed-point exponential series.
pub const EXP_GUARD_BITS: u64 = 64;

/// Bit size of random rationals in the common case of `randtest`.
pub const RANDTEST_BITS: u64 = 10;

/// Bit size of random rationals in the rare case of `randtest`.
pub const RANDTEST_BITS_LARGE: u64 = 100;

/// Inner block length of Brent's cycle search.
pub const POLLARD_BRENT_BLOCK: u64 = 100;

/// Witnesses making Miller-Rabin deterministic for all 64-bit inputs.
pub const MILLER_RABIN_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
