//! WebSocket and HTTP surface of the location receiver.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{router, run_server, serve};
