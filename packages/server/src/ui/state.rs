//! Server state.

use tokio::sync::Mutex;

use crate::domain::LocationLog;

/// Shared application state
pub struct AppState {
    /// Recently received locations
    pub locations: Mutex<LocationLog>,
}

impl AppState {
    pub fn new(location_capacity: usize) -> Self {
        Self {
            locations: Mutex::new(LocationLog::with_capacity(location_capacity)),
        }
    }
}
