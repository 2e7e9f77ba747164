//! Domain layer for the location receiver.

pub mod entity;
pub mod error;

pub use entity::{ConnectionId, DEFAULT_LOCATION_CAPACITY, LocationLog, LocationRecord};
pub use error::LocationError;
