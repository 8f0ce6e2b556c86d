//! Smooth primes: primes `p` where `p - 1` factors over the primes up
//! to 23.
//!
//! Such primes admit fast number-theoretic transforms of many lengths.
//! The table stores each entry as its exponent vector over
//! `[2, 5, 7, 11, 13, 17, 19, 23]`; entries are sorted, strictly
//! increasing, and materialized to integers once on first use.
//!
//! # Example
//!
//! ```
//! use exactball::nt::next_smooth_prime;
//! use num_bigint::BigInt;
//!
//! assert_eq!(next_smooth_prime(&BigInt::from(0)), Some(BigInt::from(33857)));
//! assert_eq!(next_smooth_prime(&BigInt::from(33857)), Some(BigInt::from(35153)));
//! ```

use std::sync::OnceLock;

use num_bigint::BigInt;
use num_traits::One;

/// Prime bases of the exponent vectors.
pub const SMOOTH_BASES: [u32; 8] = [2, 5, 7, 11, 13, 17, 19, 23];

/// Exponents of `p - 1` over [`SMOOTH_BASES`], in increasing order of `p`.
#[rustfmt::skip]
static SMOOTH_PRIME_EXPONENTS: [[u8; 8]; 334] = [
    [6, 0, 0, 0, 0, 0, 0, 2],
    [4, 0, 0, 0, 3, 0, 0, 0],
    [4, 0, 1, 0, 0, 0, 2, 0],
    [3, 0, 3, 0, 0, 1, 0, 0],
    [2, 2, 0, 0, 0, 0, 0, 2],
    [4, 2, 0, 0, 2, 0, 0, 0],
    [1, 3, 0, 0, 0, 2, 0, 0],
    [1, 0, 0, 0, 3, 1, 0, 0],
    [6, 2, 2, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 2, 0, 0],
    [6, 0, 0, 2, 0, 0, 1, 0],
    [5, 0, 0, 0, 0, 3, 0, 0],
    [4, 0, 0, 0, 0, 0, 1, 2],
    [2, 0, 0, 0, 3, 0, 1, 0],
    [7, 0, 0, 3, 0, 0, 0, 0],
    [3, 0, 1, 0, 0, 3, 0, 0],
    [3, 3, 0, 0, 0, 2, 0, 0],
    [3, 3, 0, 0, 0, 0, 2, 0],
    [4, 0, 2, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 2, 2, 0],
    [2, 0, 0, 1, 0, 0, 0, 3],
    [6, 2, 0, 0, 0, 0, 2, 0],
    [2, 0, 3, 0, 0, 0, 0, 2],
    [3, 0, 0, 0, 0, 3, 1, 0],
    [6, 2, 0, 0, 0, 0, 0, 2],
    [5, 0, 1, 0, 0, 3, 0, 0],
    [1, 0, 0, 2, 0, 3, 0, 0],
    [5, 0, 0, 0, 3, 1, 0, 0],
    [4, 0, 0, 0, 0, 4, 0, 0],
    [7, 0, 0, 0, 0, 0, 0, 3],
    [8, 0, 2, 0, 2, 0, 0, 0],
    [3, 2, 0, 0, 0, 0, 0, 3],
    [4, 0, 0, 0, 0, 2, 0, 2],
    [4, 4, 0, 0, 0, 2, 0, 0],
    [3, 0, 0, 3, 0, 2, 0, 0],
    [4, 0, 0, 2, 3, 0, 0, 0],
    [4, 0, 0, 0, 0, 0, 0, 4],
    [7, 0, 0, 0, 3, 1, 0, 0],
    [5, 0, 0, 0, 1, 0, 0, 3],
    [8, 0, 2, 0, 0, 0, 0, 2],
    [6, 0, 2, 0, 3, 0, 0, 0],
    [4, 3, 0, 0, 0, 3, 0, 0],
    [2, 0, 0, 0, 0, 0, 5, 0],
    [8, 0, 0, 0, 3, 0, 1, 0],
    [7, 0, 1, 0, 0, 0, 0, 3],
    [8, 0, 0, 0, 2, 2, 0, 0],
    [1, 0, 0, 0, 0, 0, 0, 5],
    [2, 0, 0, 4, 0, 2, 0, 0],
    [6, 4, 0, 0, 0, 0, 0, 2],
    [1, 0, 0, 0, 3, 3, 0, 0],
    [8, 0, 0, 0, 2, 0, 0, 2],
    [8, 0, 3, 0, 0, 2, 0, 0],
    [7, 0, 2, 0, 0, 3, 0, 0],
    [2, 0, 0, 4, 0, 0, 0, 2],
    [3, 0, 0, 0, 0, 0, 2, 3],
    [7, 3, 0, 0, 3, 0, 0, 0],
    [4, 0, 3, 0, 0, 0, 3, 0],
    [6, 0, 0, 0, 3, 2, 0, 0],
    [1, 0, 0, 0, 3, 0, 0, 3],
    [2, 0, 0, 0, 3, 0, 3, 0],
    [2, 0, 0, 0, 4, 0, 0, 2],
    [6, 0, 0, 0, 1, 4, 0, 0],
    [4, 0, 3, 4, 0, 0, 0, 0],
    [6, 0, 4, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 2, 0, 4, 0],
    [7, 0, 0, 3, 0, 0, 0, 2],
    [5, 0, 4, 3, 0, 0, 0, 0],
    [7, 0, 0, 0, 2, 3, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 4],
    [8, 3, 0, 0, 0, 3, 0, 0],
    [4, 0, 0, 0, 4, 0, 2, 0],
    [3, 5, 0, 0, 0, 0, 3, 0],
    [2, 0, 0, 0, 2, 0, 0, 4],
    [6, 0, 0, 0, 1, 0, 0, 4],
    [3, 0, 4, 0, 0, 0, 0, 3],
    [4, 0, 0, 3, 0, 0, 0, 3],
    [6, 0, 2, 0, 0, 4, 0, 0],
    [1, 0, 0, 0, 4, 3, 0, 0],
    [5, 0, 0, 3, 0, 0, 3, 0],
    [8, 0, 0, 0, 2, 0, 3, 0],
    [3, 0, 0, 3, 4, 0, 0, 0],
    [2, 0, 0, 0, 0, 2, 0, 4],
    [6, 0, 0, 0, 0, 0, 1, 4],
    [7, 0, 0, 3, 3, 0, 0, 0],
    [4, 0, 0, 0, 0, 4, 2, 0],
    [4, 0, 4, 4, 0, 0, 0, 0],
    [6, 0, 5, 0, 0, 0, 0, 2],
    [7, 0, 0, 0, 0, 1, 0, 4],
    [4, 0, 3, 0, 0, 0, 4, 0],
    [5, 0, 0, 0, 3, 0, 0, 3],
    [6, 0, 2, 0, 0, 0, 0, 4],
    [9, 0, 0, 0, 0, 3, 2, 0],
    [6, 0, 0, 0, 4, 0, 0, 2],
    [9, 0, 0, 0, 2, 0, 0, 3],
    [5, 0, 0, 0, 0, 1, 5, 0],
    [3, 0, 0, 2, 0, 5, 0, 0],
    [6, 0, 0, 0, 2, 0, 4, 0],
    [5, 0, 0, 5, 0, 2, 0, 0],
    [8, 0, 5, 0, 0, 0, 2, 0],
    [9, 4, 0, 0, 0, 3, 0, 0],
    [9, 0, 0, 1, 0, 0, 0, 4],
    [6, 0, 0, 4, 3, 0, 0, 0],
    [3, 5, 0, 0, 0, 4, 0, 0],
    [5, 0, 0, 4, 0, 3, 0, 0],
    [7, 5, 0, 0, 0, 0, 3, 0],
    [3, 0, 0, 0, 4, 0, 0, 3],
    [6, 0, 3, 0, 0, 0, 4, 0],
    [3, 0, 0, 3, 0, 0, 0, 4],
    [4, 0, 4, 0, 0, 4, 0, 0],
    [7, 0, 0, 0, 3, 0, 0, 3],
    [8, 0, 0, 0, 3, 0, 3, 0],
    [8, 0, 0, 3, 0, 0, 0, 3],
    [6, 0, 0, 0, 0, 0, 4, 2],
    [4, 0, 4, 0, 0, 0, 4, 0],
    [5, 0, 0, 3, 0, 0, 4, 0],
    [6, 0, 0, 4, 0, 0, 3, 0],
    [5, 3, 0, 0, 0, 0, 5, 0],
    [6, 3, 0, 0, 0, 5, 0, 0],
    [8, 4, 0, 0, 0, 4, 0, 0],
    [7, 0, 0, 3, 0, 4, 0, 0],
    [4, 0, 0, 4, 0, 4, 0, 0],
    [4, 0, 0, 0, 0, 0, 5, 2],
    [11, 0, 0, 0, 3, 3, 0, 0],
    [3, 0, 0, 0, 3, 5, 0, 0],
    [6, 0, 0, 0, 0, 4, 3, 0],
    [4, 0, 0, 0, 4, 4, 0, 0],
    [10, 0, 0, 0, 0, 4, 0, 2],
    [4, 0, 0, 0, 4, 0, 4, 0],
    [11, 0, 0, 0, 0, 3, 3, 0],
    [10, 0, 0, 0, 0, 0, 4, 2],
    [6, 0, 0, 3, 0, 5, 0, 0],
    [7, 0, 0, 0, 0, 4, 0, 3],
    [5, 0, 0, 5, 4, 0, 0, 0],
    [10, 0, 0, 0, 0, 0, 0, 6],
    [5, 0, 0, 0, 2, 3, 3, 0],
    [8, 0, 0, 0, 0, 2, 5, 0],
    [4, 0, 0, 0, 0, 6, 0, 2],
    [2, 0, 0, 0, 4, 0, 5, 0],
    [3, 0, 0, 4, 0, 3, 0, 2],
    [8, 0, 0, 4, 0, 4, 0, 0],
    [3, 0, 0, 0, 0, 0, 3, 5],
    [6, 0, 4, 0, 0, 0, 5, 0],
    [5, 0, 0, 0, 0, 3, 3, 2],
    [4, 0, 0, 0, 0, 0, 4, 4],
    [11, 0, 0, 3, 0, 0, 0, 4],
    [4, 0, 0, 0, 5, 0, 4, 0],
    [9, 0, 0, 0, 5, 3, 0, 0],
    [8, 5, 0, 0, 0, 5, 0, 0],
    [12, 0, 0, 0, 3, 0, 4, 0],
    [10, 0, 0, 0, 0, 0, 3, 4],
    [6, 0, 0, 0, 0, 3, 0, 5],
    [8, 0, 0, 3, 0, 0, 0, 5],
    [4, 0, 0, 0, 0, 6, 3, 0],
    [7, 0, 0, 6, 0, 0, 0, 3],
    [6, 0, 0, 0, 5, 0, 4, 0],
    [3, 0, 0, 0, 0, 5, 0, 4],
    [12, 0, 0, 4, 0, 4, 0, 0],
    [2, 0, 0, 0, 6, 0, 0, 4],
    [5, 0, 0, 3, 0, 0, 0, 6],
    [6, 0, 0, 0, 5, 0, 0, 4],
    [9, 0, 4, 0, 0, 0, 0, 5],
    [14, 0, 0, 0, 0, 4, 3, 0],
    [8, 0, 0, 3, 0, 3, 3, 0],
    [9, 0, 5, 0, 0, 5, 0, 0],
    [2, 0, 0, 0, 0, 6, 4, 0],
    [6, 0, 0, 0, 0, 4, 5, 0],
    [3, 0, 0, 0, 3, 4, 0, 3],
    [12, 6, 0, 0, 0, 0, 0, 4],
    [13, 0, 0, 0, 0, 0, 2, 5],
    [7, 0, 0, 0, 3, 0, 3, 3],
    [3, 0, 0, 0, 3, 3, 0, 4],
    [7, 0, 0, 0, 7, 3, 0, 0],
    [9, 0, 0, 2, 0, 3, 4, 0],
    [3, 0, 0, 0, 3, 0, 2, 5],
    [6, 0, 3, 0, 0, 0, 3, 4],
    [12, 0, 0, 0, 0, 6, 0, 2],
    [8, 0, 0, 6, 0, 0, 4, 0],
    [6, 4, 0, 3, 0, 5, 0, 0],
    [6, 0, 0, 0, 3, 4, 3, 0],
    [9, 0, 0, 2, 0, 3, 0, 4],
    [12, 0, 0, 0, 0, 4, 0, 4],
    [7, 0, 0, 0, 4, 3, 3, 0],
    [9, 0, 0, 0, 2, 0, 4, 3],
    [5, 0, 0, 7, 0, 0, 0, 4],
    [12, 0, 0, 0, 5, 0, 4, 0],
    [10, 0, 0, 0, 0, 4, 5, 0],
    [8, 0, 0, 0, 5, 0, 5, 0],
    [8, 0, 0, 5, 0, 0, 0, 5],
    [6, 0, 0, 0, 4, 0, 0, 6],
    [7, 0, 0, 6, 0, 5, 0, 0],
    [5, 0, 0, 3, 4, 0, 0, 4],
    [5, 0, 0, 4, 0, 5, 0, 2],
    [11, 0, 0, 0, 3, 0, 3, 3],
    [7, 0, 0, 0, 3, 3, 0, 4],
    [9, 0, 0, 3, 0, 4, 3, 0],
    [10, 0, 0, 4, 0, 2, 4, 0],
    [6, 0, 0, 0, 0, 2, 4, 4],
    [5, 0, 0, 0, 4, 5, 0, 2],
    [13, 0, 0, 4, 0, 0, 0, 5],
    [8, 0, 0, 0, 0, 4, 6, 0],
    [11, 0, 0, 0, 5, 5, 0, 0],
    [4, 0, 3, 0, 0, 4, 5, 0],
    [10, 0, 0, 4, 0, 2, 0, 4],
    [4, 0, 0, 6, 0, 0, 6, 0],
    [8, 0, 0, 0, 7, 4, 0, 0],
    [13, 0, 0, 0, 4, 0, 0, 5],
    [9, 0, 0, 5, 0, 6, 0, 0],
    [8, 0, 0, 4, 3, 0, 0, 4],
    [9, 0, 0, 0, 6, 5, 0, 0],
    [7, 0, 0, 0, 4, 4, 0, 3],
    [7, 0, 0, 0, 6, 0, 0, 5],
    [13, 0, 0, 0, 5, 5, 0, 0],
    [10, 0, 0, 0, 4, 0, 0, 6],
    [10, 0, 0, 3, 0, 0, 0, 7],
    [10, 0, 4, 0, 0, 0, 3, 4],
    [6, 0, 0, 0, 3, 0, 4, 4],
    [9, 0, 0, 4, 0, 5, 0, 2],
    [4, 0, 0, 0, 4, 6, 0, 2],
    [5, 0, 3, 0, 0, 4, 0, 5],
    [10, 0, 0, 0, 0, 6, 0, 4],
    [2, 0, 0, 0, 0, 5, 4, 3],
    [10, 0, 0, 0, 5, 6, 0, 0],
    [14, 0, 0, 0, 4, 6, 0, 0],
    [9, 0, 0, 0, 0, 0, 3, 7],
    [15, 0, 0, 0, 0, 5, 0, 4],
    [8, 0, 4, 0, 0, 4, 0, 4],
    [14, 0, 0, 0, 5, 0, 5, 0],
    [10, 0, 0, 0, 7, 0, 0, 4],
    [3, 0, 0, 4, 0, 5, 4, 0],
    [8, 0, 4, 0, 0, 0, 4, 4],
    [6, 6, 0, 0, 0, 4, 0, 4],
    [7, 0, 3, 0, 0, 4, 0, 5],
    [4, 0, 0, 4, 5, 0, 0, 4],
    [13, 0, 0, 0, 0, 5, 5, 0],
    [5, 3, 0, 0, 0, 5, 0, 5],
    [9, 0, 4, 0, 0, 0, 5, 3],
    [5, 0, 0, 0, 0, 5, 7, 0],
    [7, 0, 0, 0, 4, 3, 5, 0],
    [11, 0, 0, 5, 0, 0, 0, 6],
    [9, 0, 0, 0, 3, 0, 3, 5],
    [13, 0, 0, 0, 6, 5, 0, 0],
    [10, 0, 3, 0, 0, 4, 5, 0],
    [9, 0, 0, 5, 0, 0, 7, 0],
    [4, 0, 0, 0, 4, 6, 3, 0],
    [6, 5, 0, 0, 0, 5, 0, 4],
    [5, 0, 0, 0, 0, 5, 3, 4],
    [6, 0, 0, 0, 3, 0, 5, 4],
    [8, 0, 0, 3, 0, 5, 0, 4],
    [8, 6, 0, 0, 0, 0, 4, 4],
    [4, 0, 0, 0, 7, 0, 0, 6],
    [5, 0, 0, 5, 0, 3, 0, 5],
    [11, 0, 0, 0, 0, 8, 0, 3],
    [8, 0, 0, 0, 0, 8, 4, 0],
    [4, 0, 0, 0, 3, 6, 0, 4],
    [7, 0, 0, 0, 0, 6, 3, 3],
    [11, 0, 0, 0, 0, 4, 4, 3],
    [5, 0, 5, 0, 0, 4, 0, 5],
    [10, 0, 5, 0, 0, 5, 0, 3],
    [7, 0, 0, 4, 0, 5, 4, 0],
    [6, 0, 0, 0, 4, 4, 5, 0],
    [3, 0, 0, 0, 0, 4, 6, 3],
    [8, 0, 0, 4, 5, 0, 0, 4],
    [10, 0, 0, 4, 0, 3, 0, 5],
    [12, 0, 0, 7, 0, 0, 0, 5],
    [11, 0, 0, 5, 0, 0, 3, 4],
    [9, 0, 0, 0, 5, 0, 0, 7],
    [8, 5, 0, 0, 0, 0, 4, 5],
    [6, 0, 0, 0, 5, 3, 0, 5],
    [2, 0, 0, 0, 4, 6, 0, 4],
    [11, 0, 0, 0, 0, 0, 4, 7],
    [8, 0, 0, 0, 5, 4, 4, 0],
    [5, 0, 0, 5, 0, 4, 5, 0],
    [8, 0, 0, 0, 0, 0, 8, 4],
    [4, 0, 0, 0, 0, 3, 5, 5],
    [6, 0, 0, 0, 8, 6, 0, 0],
    [4, 0, 0, 6, 5, 0, 4, 0],
    [9, 0, 0, 7, 0, 0, 0, 6],
    [3, 0, 0, 0, 5, 4, 0, 5],
    [10, 0, 4, 0, 0, 0, 5, 4],
    [4, 0, 0, 5, 0, 0, 4, 5],
    [9, 0, 0, 4, 0, 6, 0, 3],
    [9, 0, 6, 0, 4, 5, 0, 0],
    [9, 0, 0, 0, 8, 0, 0, 5],
    [10, 0, 6, 0, 0, 4, 0, 4],
    [10, 0, 0, 4, 0, 4, 5, 0],
    [10, 0, 3, 0, 0, 5, 0, 5],
    [4, 0, 0, 3, 0, 6, 0, 5],
    [5, 0, 0, 0, 5, 6, 0, 3],
    [4, 0, 0, 0, 4, 5, 0, 5],
    [12, 0, 0, 0, 4, 0, 4, 4],
    [8, 0, 7, 0, 0, 4, 0, 4],
    [10, 0, 0, 5, 0, 0, 5, 3],
    [3, 0, 0, 0, 0, 6, 5, 3],
    [9, 0, 0, 4, 0, 0, 4, 5],
    [11, 0, 5, 0, 0, 5, 4, 0],
    [7, 0, 0, 0, 0, 5, 4, 4],
    [8, 0, 0, 5, 4, 0, 0, 5],
    [10, 0, 0, 0, 5, 4, 0, 4],
    [7, 0, 0, 6, 4, 5, 0, 0],
    [7, 0, 3, 0, 0, 5, 0, 6],
    [7, 0, 0, 3, 5, 0, 0, 6],
    [10, 0, 0, 5, 6, 0, 0, 3],
    [11, 0, 5, 0, 0, 6, 0, 3],
    [2, 0, 0, 5, 0, 0, 5, 5],
    [10, 0, 0, 4, 4, 6, 0, 0],
    [5, 0, 7, 0, 0, 5, 0, 4],
    [10, 0, 5, 0, 4, 6, 0, 0],
    [5, 0, 4, 0, 0, 5, 0, 6],
    [8, 0, 0, 5, 0, 5, 0, 4],
    [8, 0, 0, 6, 0, 0, 4, 4],
    [13, 0, 0, 8, 6, 8, 0, 7],
    [3, 0, 0, 0, 7, 8, 8, 7],
    [14, 0, 0, 0, 5, 7, 6, 9],
    [8, 7, 0, 0, 0, 8, 7, 9],
    [8, 0, 0, 0, 9, 6, 6, 8],
    [20, 0, 0, 0, 0, 7, 9, 9],
    [9, 0, 0, 7, 0, 8, 6, 8],
    [11, 0, 0, 8, 9, 7, 0, 6],
    [12, 0, 0, 0, 7, 6, 9, 6],
    [14, 0, 0, 8, 0, 6, 6, 8],
    [10, 0, 0, 7, 0, 9, 7, 6],
    [14, 0, 0, 7, 0, 7, 8, 6],
    [23, 0, 0, 0, 13, 11, 7, 10],
    [28, 0, 0, 0, 7, 11, 10, 11],
    [23, 0, 0, 0, 7, 11, 8, 14],
    [28, 0, 0, 10, 0, 10, 10, 10],
    [26, 0, 0, 0, 11, 7, 13, 9],
    [24, 0, 0, 9, 10, 6, 8, 9],
    [24, 0, 0, 10, 10, 12, 11, 0],
    [27, 0, 0, 13, 0, 10, 10, 8],
    [24, 0, 0, 0, 9, 8, 9, 14],
    [25, 0, 0, 9, 10, 8, 7, 8],
    [26, 0, 0, 7, 0, 10, 12, 11],
    [23, 0, 0, 13, 0, 11, 9, 9],
];

static SMOOTH_PRIMES: OnceLock<Vec<BigInt>> = OnceLock::new();

fn table() -> &'static [BigInt] {
    SMOOTH_PRIMES.get_or_init(|| {
        SMOOTH_PRIME_EXPONENTS
            .iter()
            .map(|exps| {
                let mut p = BigInt::one();
                for (&base, &e) in SMOOTH_BASES.iter().zip(exps) {
                    p *= BigInt::from(base).pow(u32::from(e));
                }
                p + 1
            })
            .collect()
    })
}

/// Number of stored smooth primes.
#[must_use]
pub fn smooth_prime_count() -> usize {
    SMOOTH_PRIME_EXPONENTS.len()
}

/// Largest stored smooth prime.
#[must_use]
pub fn smooth_prime_max() -> &'static BigInt {
    &table()[table().len() - 1]
}

/// All stored smooth primes in increasing order.
pub fn smooth_primes() -> impl Iterator<Item = &'static BigInt> {
    table().iter()
}

/// Smallest stored smooth prime strictly greater than `b`.
///
/// Returns the first entry for any `b` below it, and `None` once `b`
/// reaches the largest entry.
#[must_use]
pub fn next_smooth_prime(b: &BigInt) -> Option<BigInt> {
    let primes = table();
    let idx = primes.partition_point(|p| p <= b);
    primes.get(idx).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nt::is_prime_u64;

    #[test]
    fn test_table_is_strictly_increasing() {
        let primes = table();
        assert_eq!(primes.len(), 334);
        for w in primes.windows(2) {
            assert!(w[0] < w[1], "{} !< {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(table()[0], BigInt::from(33857));
        let max: BigInt = "5768539558722921348436763195702825422099259762366866259969"
            .parse()
            .unwrap();
        assert_eq!(*smooth_prime_max(), max);
    }

    #[test]
    fn test_word_size_entries_are_prime() {
        for p in smooth_primes() {
            if let Ok(v) = u64::try_from(p) {
                assert!(is_prime_u64(v), "{v} is not prime");
            }
        }
    }

    #[test]
    fn test_below_first_and_at_max() {
        assert_eq!(next_smooth_prime(&BigInt::from(-5)), Some(BigInt::from(33857)));
        assert_eq!(next_smooth_prime(smooth_prime_max()), None);
        assert_eq!(next_smooth_prime(&(smooth_prime_max() + 1)), None);
    }
}
