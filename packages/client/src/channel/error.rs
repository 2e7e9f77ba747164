//! Location channel error definitions.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors returned by [`LocationChannel::connect`](super::LocationChannel::connect).
///
/// Sending is never an error; see [`LocationChannel::send`](super::LocationChannel::send).
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The WebSocket handshake failed
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        source: tungstenite::Error,
    },
}
