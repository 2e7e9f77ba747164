//! City Runners location receiver.
//!
//! Logs the locations clients send over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin cityrunners-server -- --port 3000
//! ```

use clap::Parser;

use cityrunners_server::config::ServerConfig;
use cityrunners_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = cityrunners_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
