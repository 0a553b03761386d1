//! Step-tagged error taxonomy for a single send.
//!
//! Every variant renders as the underlying transport message followed by a
//! step tag, so callers that only see the text can still tell where a call
//! failed. [`SendError::kind`] gives the same answer without string matching.

use std::io;

use thiserror::Error;

/// Which stage of a send failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Dialing the proxy or the target failed.
    Connect,
    /// Writing the payload or the CONNECT request failed.
    Write,
    /// Reading the response failed for a reason other than end-of-stream.
    Read,
    /// The peer closed without sending anything.
    EmptyResponse,
}

impl ErrorKind {
    /// Label used for the `outcome` metric.
    pub fn as_label(&self) -> &'static str {
        match self {
            ErrorKind::Connect => "connect",
            ErrorKind::Write => "write",
            ErrorKind::Read => "read",
            ErrorKind::EmptyResponse => "empty",
        }
    }
}

/// Errors returned by [`send`](crate::net::send).
#[derive(Debug, Error)]
pub enum SendError {
    /// Dial to proxy or target failed (including the TLS handshake).
    #[error("{0} STEP1:CONNECT")]
    Connect(#[source] io::Error),

    /// Writing the payload failed.
    #[error("{0} STEP2:WRITE")]
    Write(#[source] io::Error),

    /// Writing the CONNECT request to the proxy failed.
    #[error("{0} STEP2:SEND_CONNECT")]
    SendConnect(#[source] io::Error),

    /// Reading the response failed.
    #[error("{0} STEP3:READ")]
    Read(#[source] io::Error),

    /// Nothing was read before the peer stopped sending.
    #[error("STEP3:response is empty")]
    EmptyResponse,
}

impl SendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SendError::Connect(_) => ErrorKind::Connect,
            SendError::Write(_) | SendError::SendConnect(_) => ErrorKind::Write,
            SendError::Read(_) => ErrorKind::Read,
            SendError::EmptyResponse => ErrorKind::EmptyResponse,
        }
    }

    /// The step tag carried at the end of the message.
    pub fn step(&self) -> &'static str {
        match self {
            SendError::Connect(_) => "STEP1:CONNECT",
            SendError::Write(_) => "STEP2:WRITE",
            SendError::SendConnect(_) => "STEP2:SEND_CONNECT",
            SendError::Read(_) => "STEP3:READ",
            SendError::EmptyResponse => "STEP3:response is empty",
        }
    }
}

/// The error a deadline expiry surfaces as.
pub(crate) fn timed_out() -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, "i/o timeout")
}
