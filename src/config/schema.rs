//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::net::{Network, Request};

/// Defaults for a send, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SendConfig {
    /// Socket kind (tcp, tcp4, tcp6, udp, udp4, udp6), any case.
    pub network: Network,

    /// Wrap the connection in TLS (no certificate verification).
    pub tls: bool,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Stop reading once more than this many bytes have arrived.
    pub max_response_size: usize,

    /// Optional HTTP CONNECT proxy (`host:port`).
    pub proxy: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for SendConfig {
    fn default() -> Self {
        Self {
            network: Network::Tcp,
            tls: false,
            connect_timeout_secs: 5,
            max_response_size: 4096,
            proxy: None,
            log_level: "info".to_string(),
        }
    }
}

impl SendConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Build a request for `address` carrying `payload` with these settings.
    pub fn to_request(&self, address: impl Into<String>, payload: impl Into<Vec<u8>>) -> Request {
        Request {
            network: self.network,
            tls: self.tls,
            address: address.into(),
            payload: payload.into(),
            connect_timeout: self.connect_timeout(),
            max_response_size: self.max_response_size,
            proxy: self.proxy.clone(),
        }
    }
}
