//! Persistence layer: mirrors the observable store into a key/value store.

mod codec;
pub mod error;
pub mod synchronizer;
pub mod worker;

pub use error::SyncError;
pub use synchronizer::PersistenceSynchronizer;
pub use worker::{SyncHandle, SyncWorker};
