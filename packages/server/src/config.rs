//! Command-line configuration for the server binary.

use clap::Parser;

use crate::domain::DEFAULT_LOCATION_CAPACITY;

/// City Runners location receiver
#[derive(Debug, Clone, Parser)]
#[command(name = "cityrunners-server", version, about)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "debug")]
    pub log_level: String,

    /// Number of locations kept in memory
    #[arg(long, default_value_t = DEFAULT_LOCATION_CAPACITY)]
    pub location_capacity: usize,
}

impl ServerConfig {
    /// `host:port` string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしで既定値が使われる
        // when (操作):
        let config = ServerConfig::try_parse_from(["cityrunners-server"]).unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.location_capacity, 1000);
    }

    #[test]
    fn test_port_override() {
        // テスト項目: ポートを上書きできる
        // when (操作):
        let config =
            ServerConfig::try_parse_from(["cityrunners-server", "--port", "8080"]).unwrap();

        // then (期待する結果):
        assert_eq!(config.port, 8080);
    }
}
