//! WebSocket location channel.
//!
//! `connect` opens the socket and spawns a writer task and a reader task. The
//! reader only logs what the server sends; nothing flows back into the
//! application store. `send` enqueues a frame for the writer when the channel
//! is open and silently drops the location otherwise.

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicU64, Ordering},
};

use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    watch,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{domain::Location, event_bus::EventBus};

use super::{
    error::ChannelError,
    state::{ChannelEvent, ChannelState},
};

/// Endpoint used when none is configured
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:3000/ws";

/// Sender half of an open connection, tagged so stale tasks can be ignored
struct Outbound {
    connection: u64,
    sender: UnboundedSender<Message>,
}

struct Shared {
    url: String,
    state: watch::Sender<ChannelState>,
    outbound: Mutex<Option<Outbound>>,
    events: EventBus<ChannelEvent>,
    next_connection: AtomicU64,
}

impl Shared {
    fn outbound(&self) -> MutexGuard<'_, Option<Outbound>> {
        self.outbound
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Tear down `connection` if it is still the current one.
    fn disconnect(&self, connection: u64, event: ChannelEvent) -> bool {
        {
            let mut outbound = self.outbound();
            match outbound.as_ref() {
                Some(current) if current.connection == connection => {
                    outbound.take();
                }
                _ => return false,
            }
        }
        self.state.send_replace(ChannelState::Disconnected);
        self.events.emit(event);
        true
    }
}

/// Returns a `Connecting` channel to `Disconnected` if `connect` is dropped
/// before the handshake settles.
struct ConnectingGuard<'a> {
    state: &'a watch::Sender<ChannelState>,
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        let reset = self.state.send_if_modified(|state| {
            if *state == ChannelState::Connecting {
                *state = ChannelState::Disconnected;
                true
            } else {
                false
            }
        });
        if reset {
            tracing::warn!("Connect cancelled before the handshake finished");
        }
    }
}

/// Best-effort telemetry connection to a fixed endpoint.
pub struct LocationChannel {
    shared: Arc<Shared>,
}

impl LocationChannel {
    /// Create a disconnected channel for `url`
    pub fn new(url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ChannelState::Disconnected);
        Self {
            shared: Arc::new(Shared {
                url: url.into(),
                state,
                outbound: Mutex::new(None),
                events: EventBus::new(),
                next_connection: AtomicU64::new(0),
            }),
        }
    }

    /// Endpoint this channel connects to
    pub fn url(&self) -> &str {
        &self.shared.url
    }

    /// Current connection state
    pub fn state(&self) -> ChannelState {
        *self.shared.state.borrow()
    }

    /// Receiver that observes every state transition
    pub fn watch_state(&self) -> watch::Receiver<ChannelState> {
        self.shared.state.subscribe()
    }

    /// Subscribe to lifecycle events
    pub fn events(&self) -> UnboundedReceiver<ChannelEvent> {
        self.shared.events.subscribe()
    }

    /// Open the connection.
    ///
    /// Does nothing if the channel is already connecting or open. Dropping
    /// the returned future mid-handshake leaves the channel `Disconnected`.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Connect` if the handshake fails; the channel is
    /// then `Disconnected` again.
    pub async fn connect(&self) -> Result<(), ChannelError> {
        let claimed = self.shared.state.send_if_modified(|state| {
            if *state == ChannelState::Disconnected {
                *state = ChannelState::Connecting;
                true
            } else {
                false
            }
        });
        if !claimed {
            tracing::debug!("Channel already {:?}, ignoring connect", self.state());
            return Ok(());
        }

        let _guard = ConnectingGuard {
            state: &self.shared.state,
        };

        tracing::info!("Connecting to {}", self.shared.url);
        let (socket, _response) = match connect_async(self.shared.url.as_str()).await {
            Ok(connected) => connected,
            Err(e) => {
                tracing::error!("Failed to connect to {}: {}", self.shared.url, e);
                self.shared.state.send_replace(ChannelState::Disconnected);
                self.shared.events.emit(ChannelEvent::Failed(e.to_string()));
                return Err(ChannelError::Connect {
                    url: self.shared.url.clone(),
                    source: e,
                });
            }
        };

        let connection = self.shared.next_connection.fetch_add(1, Ordering::Relaxed) + 1;
        let (mut sink, mut stream) = socket.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

        *self.shared.outbound() = Some(Outbound {
            connection,
            sender: tx,
        });
        self.shared.state.send_replace(ChannelState::Open);
        self.shared.events.emit(ChannelEvent::Opened);
        tracing::info!("Connected to server");

        // Writer: drains the outbound queue into the socket
        let shared = self.shared.clone();
        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let closing = matches!(message, Message::Close(_));
                if let Err(e) = sink.send(message).await {
                    tracing::error!("Error occurred: {}", e);
                    shared.disconnect(connection, ChannelEvent::Failed(e.to_string()));
                    break;
                }
                if closing {
                    break;
                }
            }
        });

        // Reader: logs inbound frames until the connection ends
        let shared = self.shared.clone();
        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        tracing::info!("Received message from server: {}", text.as_str());
                        shared
                            .events
                            .emit(ChannelEvent::Message(text.as_str().to_owned()));
                    }
                    Ok(Message::Binary(bytes)) => {
                        tracing::info!("Received {} binary bytes from server", bytes.len());
                    }
                    Ok(Message::Close(frame)) => {
                        tracing::info!("Server closed the connection: {:?}", frame);
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("Error occurred: {}", e);
                        shared.disconnect(connection, ChannelEvent::Failed(e.to_string()));
                        return;
                    }
                }
            }
            if shared.disconnect(connection, ChannelEvent::Closed) {
                tracing::info!("Disconnected from server");
            }
        });

        Ok(())
    }

    /// Send a location if the channel is open.
    ///
    /// Never blocks and never fails: when the channel is not `Open` the
    /// location is dropped.
    ///
    /// # Returns
    ///
    /// `true` if a frame was queued for the writer
    pub fn send(&self, location: Location) -> bool {
        tracing::info!(
            "Sending location to server: {}, {}",
            location.latitude,
            location.longitude
        );
        if self.state() != ChannelState::Open {
            tracing::debug!("Channel not open, location dropped");
            return false;
        }

        let outbound = self.shared.outbound();
        let Some(outbound) = outbound.as_ref() else {
            return false;
        };
        let payload = match serde_json::to_string(&location) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Failed to encode location: {}", e);
                return false;
            }
        };
        outbound.sender.send(Message::Text(payload.into())).is_ok()
    }

    /// Close the connection, if open.
    ///
    /// The channel is `Disconnected` when this returns.
    pub fn close(&self) {
        let outbound = self.shared.outbound().take();
        if let Some(outbound) = outbound {
            let _ = outbound.sender.send(Message::Close(None));
            self.shared.state.send_replace(ChannelState::Disconnected);
            self.shared.events.emit(ChannelEvent::Closed);
            tracing::info!("Disconnected from server");
        }
    }
}

impl Drop for LocationChannel {
    fn drop(&mut self) {
        self.close();
    }
}
