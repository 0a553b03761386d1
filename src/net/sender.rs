//! The send operation: one connection, one write, one bounded read.

use std::time::Duration;

use super::connection::Connection;
use super::error::SendError;
use super::network::Network;
use super::proxy;
use super::read::read_bounded;
use crate::observability::metrics;

/// Everything a single send needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub network: Network,
    /// Wrap the connection in TLS. Certificates are never verified.
    pub tls: bool,
    /// Target `host:port`.
    pub address: String,
    pub payload: Vec<u8>,
    /// Bound on dialing; the TLS connect stage gets twice this overall.
    pub connect_timeout: Duration,
    /// Reading stops once more than this many bytes have arrived.
    pub max_response_size: usize,
    /// HTTP CONNECT proxy to tunnel through. Ignored when `tls` is set.
    pub proxy: Option<String>,
}

impl Request {
    /// A plaintext TCP request with a 5 second connect timeout and a 4 KiB cap.
    pub fn new(address: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            network: Network::Tcp,
            tls: false,
            address: address.into(),
            payload: payload.into(),
            connect_timeout: Duration::from_secs(5),
            max_response_size: 4096,
            proxy: None,
        }
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn max_response_size(mut self, size: usize) -> Self {
        self.max_response_size = size;
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Send `request.payload` and return whatever the peer answers, as text.
///
/// Invalid UTF-8 in the response is replaced rather than rejected.
pub async fn send(request: &Request) -> Result<String, SendError> {
    tracing::debug!(
        network = %request.network,
        address = %request.address,
        tls = request.tls,
        proxy = ?request.proxy,
        "send starting"
    );
    let result = exchange(request).await;
    match &result {
        Ok(bytes) => metrics::record_send_ok(bytes.len()),
        Err(e) => metrics::record_send_error(e.kind()),
    }
    result.map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Flat form of [`send`] taking the network kind as a string.
///
/// An unrecognised network fails the same way a dial would.
pub async fn send_str(
    protocol: &str,
    tls: bool,
    address: &str,
    payload: &str,
    connect_timeout: Duration,
    max_response_size: usize,
    proxy: Option<&str>,
) -> Result<String, SendError> {
    let network: Network = protocol
        .parse()
        .map_err(|e| SendError::Connect(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;
    let request = Request {
        network,
        tls,
        address: address.to_string(),
        payload: payload.as_bytes().to_vec(),
        connect_timeout,
        max_response_size,
        proxy: proxy.map(str::to_string),
    };
    send(&request).await
}

async fn exchange(request: &Request) -> Result<Vec<u8>, SendError> {
    if request.tls {
        if request.proxy.is_some() {
            tracing::debug!("proxy ignored for tls requests");
        }
        let mut conn = Connection::dial_tls(request.network, &request.address, request.connect_timeout)
            .await
            .map_err(SendError::Connect)?;
        conn.write_all(&request.payload).await.map_err(SendError::Write)?;
        tracing::trace!(bytes = request.payload.len(), "payload written");
        return read_bounded(&mut conn, request.max_response_size).await;
    }

    match &request.proxy {
        Some(proxy_address) => {
            let mut conn = Connection::dial(request.network, proxy_address, request.connect_timeout)
                .await
                .map_err(SendError::Connect)?;
            let connect = proxy::connect_request(&request.address);
            conn.write_all(connect.as_bytes())
                .await
                .map_err(SendError::SendConnect)?;
            tracing::trace!(proxy = %proxy_address, "connect request written");
            read_bounded(&mut conn, request.max_response_size).await
        }
        None => {
            let mut conn = Connection::dial(request.network, &request.address, request.connect_timeout)
                .await
                .map_err(SendError::Connect)?;
            conn.write_all(&request.payload).await.map_err(SendError::Write)?;
            tracing::trace!(bytes = request.payload.len(), "payload written");
            read_bounded(&mut conn, request.max_response_size).await
        }
    }
}
