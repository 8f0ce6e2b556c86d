//! Core value types shared by every layer of the kernel.
//!
//! - [`Status`]: the OR-able success/domain/unable code every generic
//!   operation returns
//! - [`Truth`]: three-valued predicate answers
//! - [`RandState`]: explicitly threaded, seedable randomness
//! - [`GrStream`]: the text sink used by `write` methods
//! - [`constants`]: compile-time configuration

pub mod constants;
pub mod rand;
pub mod status;
pub mod stream;
pub mod truth;

pub use self::rand::RandState;
pub use status::Status;
pub use stream::GrStream;
pub use truth::Truth;
