//! City Runners client library.
//!
//! Provides the observable application store, its persistence to a
//! key/value store, and the WebSocket location channel.

pub mod channel;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod event_bus;
pub mod infrastructure;
pub mod persistence;
pub mod store;
pub mod ui;

// Re-export entry points
pub use context::AppContext;
pub use error::ClientError;
pub use store::{ObservableStore, StoreChange};
