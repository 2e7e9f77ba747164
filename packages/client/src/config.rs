//! Command-line configuration for the client binary.

use std::path::PathBuf;

use clap::Parser;

use crate::channel::DEFAULT_SERVER_URL;

/// City Runners client
#[derive(Debug, Clone, Parser)]
#[command(name = "cityrunners-client", version, about)]
pub struct ClientConfig {
    /// File the application state is persisted to
    #[arg(long, default_value = "store.json")]
    pub store_path: PathBuf,

    /// WebSocket endpoint for location telemetry
    #[arg(long, default_value = DEFAULT_SERVER_URL, value_parser = parse_ws_url)]
    pub server_url: String,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn parse_ws_url(value: &str) -> Result<String, String> {
    if value.starts_with("ws://") || value.starts_with("wss://") {
        Ok(value.to_string())
    } else {
        Err(format!("'{}' is not a ws:// or wss:// URL", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしで既定値が使われる
        // when (操作):
        let config = ClientConfig::try_parse_from(["cityrunners-client"]).unwrap();

        // then (期待する結果):
        assert_eq!(config.store_path, PathBuf::from("store.json"));
        assert_eq!(config.server_url, "ws://localhost:3000/ws");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        // テスト項目: 引数で上書きできる
        // when (操作):
        let config = ClientConfig::try_parse_from([
            "cityrunners-client",
            "--store-path",
            "/tmp/state.json",
            "--server-url",
            "wss://example.com/ws",
        ])
        .unwrap();

        // then (期待する結果):
        assert_eq!(config.store_path, PathBuf::from("/tmp/state.json"));
        assert_eq!(config.server_url, "wss://example.com/ws");
    }

    #[test]
    fn test_rejects_http_url() {
        // テスト項目: ws/wss 以外の URL は拒否される
        // when (操作):
        let result = ClientConfig::try_parse_from([
            "cityrunners-client",
            "--server-url",
            "https://example.com",
        ]);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
