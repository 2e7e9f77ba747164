//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueObjectError {
    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// Token validation error
    #[error("Token cannot be empty")]
    TokenEmpty,

    /// TeamId validation error
    #[error("TeamId cannot be empty")]
    TeamIdEmpty,

    /// TeamId too long error
    #[error("TeamId cannot exceed {max} characters (got {actual})")]
    TeamIdTooLong { max: usize, actual: usize },

    /// Latitude outside [-90, 90]
    #[error("Latitude must be within [-90, 90] (got {0})")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180]
    #[error("Longitude must be within [-180, 180] (got {0})")]
    LongitudeOutOfRange(f64),
}

/// Errors raised by a persistent key/value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded or decoded
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other backend-specific failure
    #[error("storage backend error: {0}")]
    Backend(String),
}
