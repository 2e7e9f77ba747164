//! Core domain models for the location receiver.

use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};

use super::error::LocationError;

/// Default number of locations kept by a [`LocationLog`]
pub const DEFAULT_LOCATION_CAPACITY: usize = 1000;

/// Identifier assigned to each WebSocket connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Generate a new random ConnectionId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A location received from a client
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub connection_id: ConnectionId,
    pub latitude: f64,
    pub longitude: f64,
    /// Unix timestamp (milliseconds, UTC)
    pub received_at: i64,
}

impl LocationRecord {
    /// Create a record, validating the coordinate ranges
    ///
    /// # Errors
    ///
    /// Returns `LocationError` if a coordinate is out of range or not finite
    pub fn new(
        connection_id: ConnectionId,
        latitude: f64,
        longitude: f64,
        received_at: i64,
    ) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            connection_id,
            latitude,
            longitude,
            received_at,
        })
    }
}

/// Most recent locations, oldest first
#[derive(Debug, Clone)]
pub struct LocationLog {
    records: VecDeque<LocationRecord>,
    capacity: usize,
}

impl LocationLog {
    /// Create an empty log holding at most `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_LOCATION_CAPACITY)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one when full
    pub fn record(&mut self, record: LocationRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Records, oldest first
    pub fn records(&self) -> impl Iterator<Item = &LocationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for LocationLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOCATION_CAPACITY)
    }
}
