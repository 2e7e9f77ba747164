//! Location receiver for City Runners.
//!
//! Accepts WebSocket connections on `/ws`, logs every inbound frame, and keeps
//! the most recent location payloads for inspection over HTTP.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-export entry points
pub use ui::{router, run_server, serve};
