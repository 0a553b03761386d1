//! Mock peers for integration tests.
//!
//! Every helper binds an ephemeral port on 127.0.0.1, serves exactly one
//! connection in a background task, and returns the bound address.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Echo back the first read, then close.
pub async fn start_echo_server() -> SocketAddr {
    let (listener, addr) = bind().await;
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let n = socket.read(&mut buf).await.unwrap();
        let _ = socket.write_all(&buf[..n]).await;
        let _ = socket.shutdown().await;
    });
    addr
}

/// Read what the client sends first, then close without answering.
///
/// Draining the request keeps the close a FIN rather than a reset.
pub async fn start_closing_server() -> SocketAddr {
    let (listener, addr) = bind().await;
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket.shutdown().await;
    });
    addr
}

/// Read the request and then say nothing for `hold`.
pub async fn start_silent_server(hold: Duration) -> SocketAddr {
    let (listener, addr) = bind().await;
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        tokio::time::sleep(hold).await;
    });
    addr
}

/// Answer with `total` bytes and keep the connection open.
///
/// The request is read first, then the server waits a moment so the client
/// is already blocked in its first read. The whole answer goes out in one
/// write, so every client read comes back full.
pub async fn start_flooding_server(total: usize) -> SocketAddr {
    let (listener, addr) = bind().await;
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = socket.write_all(&vec![b'x'; total]).await;
        tokio::time::sleep(Duration::from_secs(10)).await;
    });
    addr
}

/// A UDP socket that receives nothing in particular; it only gives sends a
/// live destination.
pub async fn start_udp_sink() -> (UdpSocket, SocketAddr) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    (socket, addr)
}

/// Act as a CONNECT proxy: capture the request head, reply with `reply`.
pub async fn start_capturing_proxy(
    reply: &'static str,
) -> (SocketAddr, oneshot::Receiver<Vec<u8>>) {
    let (listener, addr) = bind().await;
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut captured = Vec::new();
        let mut buf = [0u8; 256];
        while !captured.ends_with(b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            captured.extend_from_slice(&buf[..n]);
        }
        let _ = tx.send(captured);
        let _ = socket.write_all(reply.as_bytes()).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
    });
    (addr, rx)
}

/// Echo one UDP datagram back to its sender.
pub async fn start_udp_echo() -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        let (n, peer) = socket.recv_from(&mut buf).await.unwrap();
        let _ = socket.send_to(&buf[..n], peer).await;
    });
    addr
}

/// TLS echo server presenting a self-signed certificate for a name that
/// does not match the address clients dial.
pub async fn start_tls_echo_server() -> SocketAddr {
    start_tls_echo_server_with_versions(rustls::ALL_VERSIONS).await
}

/// Like [`start_tls_echo_server`], restricted to `versions`.
pub async fn start_tls_echo_server_with_versions(
    versions: &[&'static rustls::SupportedProtocolVersion],
) -> SocketAddr {
    let certified =
        rcgen::generate_simple_self_signed(vec!["not-this-host.invalid".to_string()]).unwrap();
    let cert = rustls::pki_types::CertificateDer::from(certified.cert.der().to_vec());
    let key = rustls::pki_types::PrivateKeyDer::Pkcs8(
        rustls::pki_types::PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()),
    );
    let server_config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_protocol_versions(versions)
    .unwrap()
    .with_no_client_auth()
    .with_single_cert(vec![cert], key)
    .unwrap();
    let acceptor = tokio_rustls::TlsAcceptor::from(Arc::new(server_config));

    let (listener, addr) = bind().await;
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut stream = acceptor.accept(socket).await.unwrap();
        let mut buf = [0u8; 1024];
        let n = stream.read(&mut buf).await.unwrap();
        let _ = stream.write_all(&buf[..n]).await;
        let _ = stream.shutdown().await;
    });
    addr
}

/// An address with nothing listening on it.
pub async fn refused_address() -> SocketAddr {
    let (listener, addr) = bind().await;
    drop(listener);
    addr
}
