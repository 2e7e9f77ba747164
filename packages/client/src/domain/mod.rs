//! Domain layer for the City Runners client.
//!
//! Holds the application state snapshot, the value objects it is built from,
//! and the storage abstraction the persistence layer is written against.

pub mod entity;
pub mod error;
pub mod factory;
pub mod storage;
pub mod value_object;

pub use entity::{AppState, Team, TrackedField, View};
pub use error::{StorageError, ValueObjectError};
pub use factory::TeamIdFactory;
pub use storage::KeyValueStore;
#[cfg(test)]
pub use storage::MockKeyValueStore;
pub use value_object::{Location, TeamId, Token, Username};
