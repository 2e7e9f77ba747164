//! Shutdown signal handling.

/// Resolve when Ctrl+C is received.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Never resolve: without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
