//! Error type for `Result`-based wrappers over status-returning operations.

use thiserror::Error;

use crate::core::Status;

/// Failure classes of a generic ring operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GrError {
    /// The operation is mathematically undefined for the inputs.
    #[error("operation undefined for the given inputs")]
    Domain,

    /// The operation is defined but could not be carried out, for example
    /// because a ball was too wide or a size limit was exceeded.
    #[error("operation could not be carried out by this implementation")]
    Unable,

    /// A composite operation hit both failure classes.
    #[error("operation both undefined and not carried out")]
    DomainAndUnable,
}

impl GrError {
    /// Maps failure bits to an error; `None` for success.
    #[must_use]
    pub fn from_status(status: Status) -> Option<Self> {
        match (status.has_domain(), status.has_unable()) {
            (false, false) => None,
            (true, false) => Some(Self::Domain),
            (false, true) => Some(Self::Unable),
            (true, true) => Some(Self::DomainAndUnable),
        }
    }

    /// The status bits this error stands for.
    #[must_use]
    pub fn status(self) -> Status {
        match self {
            Self::Domain => Status::DOMAIN,
            Self::Unable => Status::UNABLE,
            Self::DomainAndUnable => Status::DOMAIN | Status::UNABLE,
        }
    }
}

/// Result type of the `Result`-returning convenience API.
pub type GrResult<T> = Result<T, GrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for err in [GrError::Domain, GrError::Unable, GrError::DomainAndUnable] {
            assert_eq!(GrError::from_status(err.status()), Some(err));
        }
        assert_eq!(GrError::from_status(Status::SUCCESS), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            GrError::Domain.to_string(),
            "operation undefined for the given inputs"
        );
    }
}
