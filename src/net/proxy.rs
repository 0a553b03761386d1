//! HTTP CONNECT tunnel request.

/// Format the request asking a proxy to open a tunnel to `address`.
///
/// No authentication headers are sent and the proxy's reply is not parsed;
/// whatever it sends back is the caller's response.
pub fn connect_request(address: &str) -> String {
    format!("CONNECT {address} HTTP/1.1\r\nHost: {address}\r\n\r\n")
}
