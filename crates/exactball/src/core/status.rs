//! Status codes returned by generic ring operations.
//!
//! A status is a small bit set. Operations that combine several
//! sub-operations OR their statuses together, so a composite result
//! reports every failure class that occurred along the way.
//!
//! | Code | Bits | Meaning |
//! |------|------|---------|
//! | `SUCCESS` | `00` | result is valid |
//! | `DOMAIN` | `01` | mathematically undefined for these inputs |
//! | `UNABLE` | `10` | defined, but this implementation cannot produce it |
//!
//! # Example
//!
//! ```
//! use exactball::Status;
//!
//! let mut status = Status::SUCCESS;
//! status |= Status::DOMAIN;
//! status |= Status::UNABLE;
//! assert!(status.has_domain() && status.has_unable());
//! assert!(status.check().is_err());
//! ```

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use crate::error::{GrError, GrResult};

/// Outcome of a generic ring operation.
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status(u8);

impl Status {
    /// The operation succeeded and the output is valid.
    pub const SUCCESS: Self = Self(0);
    /// The operation is mathematically undefined for the given inputs.
    pub const DOMAIN: Self = Self(1);
    /// The operation is defined but could not be carried out.
    pub const UNABLE: Self = Self(2);

    /// Raw bit pattern.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn has_domain(self) -> bool {
        self.0 & Self::DOMAIN.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn has_unable(self) -> bool {
        self.0 & Self::UNABLE.0 != 0
    }

    /// Converts the status into a `Result`, mapping any failure bits to
    /// a [`GrError`].
    #[inline]
    pub fn check(self) -> GrResult<()> {
        match GrError::from_status(self) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

impl BitOr for Status {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Status {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.has_domain(), self.has_unable()) {
            (false, false) => f.write_str("SUCCESS"),
            (true, false) => f.write_str("DOMAIN"),
            (false, true) => f.write_str("UNABLE"),
            (true, true) => f.write_str("DOMAIN | UNABLE"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_identity_for_or() {
        for s in [Status::SUCCESS, Status::DOMAIN, Status::UNABLE] {
            assert_eq!(s | Status::SUCCESS, s);
            assert_eq!(Status::SUCCESS | s, s);
        }
    }

    #[test]
    fn test_or_accumulates() {
        let mut s = Status::DOMAIN;
        s |= Status::UNABLE;
        assert!(s.has_domain());
        assert!(s.has_unable());
        assert!(!s.is_success());
        assert_eq!(s.bits(), 3);
    }

    #[test]
    fn test_check_maps_errors() {
        assert_eq!(Status::SUCCESS.check(), Ok(()));
        assert_eq!(Status::DOMAIN.check(), Err(GrError::Domain));
        assert_eq!(Status::UNABLE.check(), Err(GrError::Unable));
        assert_eq!(
            (Status::DOMAIN | Status::UNABLE).check(),
            Err(GrError::DomainAndUnable)
        );
    }

    #[test]
    fn test_debug_names() {
        assert_eq!(format!("{:?}", Status::SUCCESS), "SUCCESS");
        assert_eq!(format!("{}", Status::DOMAIN | Status::UNABLE), "DOMAIN | UNABLE");
    }
}
