//! Location channel: one WebSocket connection used for fire-and-forget
//! coordinate telemetry.

pub mod error;
pub mod location;
pub mod state;

pub use error::ChannelError;
pub use location::{DEFAULT_SERVER_URL, LocationChannel};
pub use state::{ChannelEvent, ChannelState};
