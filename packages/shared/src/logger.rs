//! Logger initialisation shared by every binary in the workspace.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the global tracing subscriber.
///
/// # Arguments
///
/// * `app_name` - Name of the running binary, logged once at start-up
/// * `default_level` - Filter used when `RUST_LOG` is not set (e.g. `"info"`)
///
/// Calling this more than once is harmless: later calls keep the first subscriber.
pub fn setup_logger(app_name: &str, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();

    if result.is_ok() {
        tracing::info!("{} logger initialised (default level: {})", app_name, default_level);
    }
}
