//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use cityrunners_shared::time::timestamp_to_rfc3339;

use crate::domain::LocationRecord;

/// Received location for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecordDto {
    pub connection_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub received_at: String, // RFC 3339
}

impl From<&LocationRecord> for LocationRecordDto {
    fn from(record: &LocationRecord) -> Self {
        Self {
            connection_id: record.connection_id.to_string(),
            latitude: record.latitude,
            longitude: record.longitude,
            received_at: timestamp_to_rfc3339(record.received_at),
        }
    }
}
