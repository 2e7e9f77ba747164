//! Key/value store backends.
//!
//! Both implement the domain's `KeyValueStore` trait; the persistence layer
//! never depends on them directly.

pub mod file;
pub mod inmemory;

pub use file::FileKeyValueStore;
pub use inmemory::InMemoryKeyValueStore;
