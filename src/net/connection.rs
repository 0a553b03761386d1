//! Exclusively-owned connections and how they are dialed.
//!
//! # Responsibilities
//! - Resolve the address and pick candidates matching the network family
//! - Dial plain TCP, TLS over TCP, or a connected UDP socket
//! - Bound dialing by the caller's connect timeout
//!
//! A [`Connection`] belongs to exactly one send. It is closed when dropped,
//! which happens on every exit path of the call that created it.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;

use super::error::timed_out;
use super::network::Network;
use super::tls;

/// An open socket, plaintext or TLS-wrapped.
#[derive(Debug)]
pub enum Connection {
    /// Plain TCP stream.
    Plain(TcpStream),
    /// TLS over TCP.
    Tls(Box<TlsStream<TcpStream>>),
    /// Connected UDP socket; each write is one datagram.
    Datagram(UdpSocket),
}

impl Connection {
    /// Open a plaintext connection to `address` within `connect_timeout`.
    pub async fn dial(network: Network, address: &str, connect_timeout: Duration) -> io::Result<Self> {
        tracing::debug!(%network, %address, "dialing");
        within(connect_timeout, async {
            if network.is_stream() {
                dial_tcp(network, address).await.map(Connection::Plain)
            } else {
                dial_udp(network, address).await.map(Connection::Datagram)
            }
        })
        .await
    }

    /// Open a TLS connection to `address` without verifying the peer.
    ///
    /// The TCP dial and the handshake each get `connect_timeout`; the two
    /// together must finish within twice that.
    pub async fn dial_tls(network: Network, address: &str, connect_timeout: Duration) -> io::Result<Self> {
        if !network.is_stream() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("tls requires a stream network, got {network}"),
            ));
        }
        let config = tls::insecure_client_config().map_err(io::Error::other)?;
        let server_name = tls::server_name(address)?;

        tracing::debug!(%network, %address, "dialing tls");
        within(connect_timeout.saturating_mul(2), async {
            let tcp = within(connect_timeout, dial_tcp(network, address)).await?;
            let stream = within(
                connect_timeout,
                TlsConnector::from(config).connect(server_name, tcp),
            )
            .await?;
            Ok(Connection::Tls(Box::new(stream)))
        })
        .await
    }

    /// Write all of `buf`. No timeout applies; the OS socket buffer provides
    /// backpressure.
    pub async fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Connection::Plain(stream) => stream.write_all(buf).await,
            Connection::Tls(stream) => {
                stream.write_all(buf).await?;
                stream.flush().await
            }
            Connection::Datagram(socket) => {
                let sent = socket.send(buf).await?;
                if sent < buf.len() {
                    return Err(io::Error::new(io::ErrorKind::WriteZero, "short datagram write"));
                }
                Ok(())
            }
        }
    }

    /// Read whatever is available into `buf`. `Ok(0)` means end-of-stream.
    pub async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Connection::Plain(stream) => stream.read(buf).await,
            Connection::Tls(stream) => stream.read(buf).await,
            Connection::Datagram(socket) => socket.recv(buf).await,
        }
    }
}

/// Run `fut` with a deadline of `limit` from now. A zero limit means no
/// deadline.
pub(crate) async fn within<T, F>(limit: Duration, fut: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    if limit.is_zero() {
        return fut.await;
    }
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(timed_out()),
    }
}

async fn resolve(network: Network, address: &str) -> io::Result<Vec<SocketAddr>> {
    let candidates: Vec<SocketAddr> = tokio::net::lookup_host(address)
        .await?
        .filter(|addr| network.accepts(addr))
        .collect();
    if candidates.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no suitable address found for {address}"),
        ));
    }
    Ok(candidates)
}

async fn dial_tcp(network: Network, address: &str) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in resolve(network, address).await? {
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                tracing::trace!(peer = %addr, "tcp connected");
                return Ok(stream);
            }
            Err(e) => {
                tracing::trace!(peer = %addr, error = %e, "tcp connect attempt failed");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::from(io::ErrorKind::AddrNotAvailable)))
}

async fn dial_udp(network: Network, address: &str) -> io::Result<UdpSocket> {
    let mut last_err = None;
    for addr in resolve(network, address).await? {
        let local: SocketAddr = if addr.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let attempt = async {
            let socket = UdpSocket::bind(local).await?;
            socket.connect(addr).await?;
            Ok::<_, io::Error>(socket)
        };
        match attempt.await {
            Ok(socket) => return Ok(socket),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::from(io::ErrorKind::AddrNotAvailable)))
}
