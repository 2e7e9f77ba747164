//! Server error definitions.

use thiserror::Error;

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// The server loop failed
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
