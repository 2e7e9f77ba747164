//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};

use cityrunners_shared::time::get_utc_timestamp;

use crate::{
    domain::{ConnectionId, LocationRecord},
    infrastructure::dto::websocket::LocationPayload,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::generate();
    tracing::info!("Connection '{}' upgrading", connection_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, who: ConnectionId) {
    // Make sure the socket works before reading from it
    if socket.send(Message::Ping(vec![1].into())).await.is_err() {
        tracing::error!("Could not send ping to '{}'", who);
        return;
    }
    tracing::info!("Pinged '{}'", who);

    while let Some(message) = socket.recv().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("WebSocket error from '{}': {}", who, e);
                break;
            }
        };

        match message {
            Message::Text(text) => {
                tracing::info!("Received text message from '{}': {}", who, text.as_str());
                record_location(&state, who, text.as_str()).await;
            }
            Message::Binary(bytes) => {
                tracing::info!("Received {} binary bytes from '{}'", bytes.len(), who);
            }
            Message::Ping(_) | Message::Pong(_) => {
                tracing::debug!("Received ping/pong from '{}'", who);
            }
            Message::Close(reason) => {
                tracing::info!("Received close from '{}': {:?}", who, reason);
                break;
            }
        }
    }

    tracing::info!("Connection with '{}' closed", who);
}

async fn record_location(state: &AppState, who: ConnectionId, text: &str) {
    let payload = match serde_json::from_str::<LocationPayload>(text) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Ignoring non-location message from '{}': {}", who, e);
            return;
        }
    };

    match LocationRecord::new(
        who,
        payload.latitude,
        payload.longitude,
        get_utc_timestamp(),
    ) {
        Ok(record) => {
            tracing::info!(
                "Location from '{}': {}, {}",
                who,
                record.latitude,
                record.longitude
            );
            state.locations.lock().await.record(record);
        }
        Err(e) => tracing::warn!("Rejected location from '{}': {}", who, e),
    }
}
