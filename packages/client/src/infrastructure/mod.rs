//! Infrastructure layer: concrete backends for the domain's abstractions.

pub mod storage;
