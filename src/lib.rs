//! Send raw bytes over TCP, UDP, or TLS, optionally through an HTTP CONNECT
//! proxy, and read back a bounded response.

pub mod config;
pub mod net;
pub mod observability;

pub use config::SendConfig;
pub use net::{send, send_str, ErrorKind, Network, Request, SendError};
