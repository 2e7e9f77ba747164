//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};

/// Location payload sent by clients: `{"latitude": number, "longitude": number}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationPayload {
    pub latitude: f64,
    pub longitude: f64,
}
