//! Network layer: the whole send path.
//!
//! # Data Flow
//! ```text
//! Request
//!     → connection.rs (dial target, proxy, or TLS target)
//!     → proxy.rs (CONNECT request, when tunnelling)
//!     → write payload once
//!     → read.rs (bounded read loop)
//!     → response text, or a step-tagged SendError
//!
//! Failure steps:
//!     STEP1:CONNECT → STEP2:WRITE / STEP2:SEND_CONNECT → STEP3:READ
//! ```
//!
//! # Design Decisions
//! - One connection per call, owned by the call, closed on drop
//! - No retries; the first failure is the result
//! - TLS never verifies the peer

pub mod connection;
pub mod error;
pub mod network;
pub mod proxy;
pub mod read;
pub mod sender;
pub mod tls;

pub use connection::Connection;
pub use error::{ErrorKind, SendError};
pub use network::{Network, UnknownNetwork};
pub use sender::{send, send_str, Request};
