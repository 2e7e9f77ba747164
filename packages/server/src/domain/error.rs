//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to received locations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("Latitude must be within [-90, 90] (got {0})")]
    LatitudeOutOfRange(f64),

    #[error("Longitude must be within [-180, 180] (got {0})")]
    LongitudeOutOfRange(f64),
}
