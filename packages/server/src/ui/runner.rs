//! Router construction and server loop.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, error::ServerError};

use super::{
    handler::{get_locations, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/locations", get(get_locations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind according to `config` and serve until Ctrl+C.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let state = Arc::new(AppState::new(config.location_capacity));
    serve(listener, state).await
}

/// Serve on an already bound listener until Ctrl+C.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), ServerError> {
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}
