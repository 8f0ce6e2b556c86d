//! Number-theoretic collaborators: exact roots, primality, factor search
//! and smooth-prime lookup.

pub mod factor;
pub mod prime;
pub mod root;
pub mod smooth_prime;

pub use factor::{pollard_brent, pollard_brent_single};
pub use prime::{is_prime_u64, mod_inverse, mod_inverse_u64, mul_mod, pow_mod, sqrt_mod_prime};
pub use root::{exact_root, is_square};
pub use smooth_prime::{next_smooth_prime, smooth_prime_count, smooth_prime_max, smooth_primes};
