//! Shared utilities for the City Runners client and location server.

pub mod logger;
pub mod time;
