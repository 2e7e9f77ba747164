//! Connection states and lifecycle events.

/// Connection state of the location channel.
///
/// `Disconnected -> Connecting -> Open -> Disconnected`, or
/// `Connecting -> Disconnected` when the handshake fails. There is no
/// automatic reconnection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelState {
    #[default]
    Disconnected,
    Connecting,
    Open,
}

/// Lifecycle events published by the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The handshake completed
    Opened,
    /// An inbound text frame, as opaque text
    Message(String),
    /// The connection was closed by either side
    Closed,
    /// The handshake or the transport failed
    Failed(String),
}
