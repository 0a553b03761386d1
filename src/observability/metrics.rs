//! Send metrics.
//!
//! # Metrics
//! - `simplenet_sends_total` (counter): sends by `outcome`
//!   (`ok`, `connect`, `write`, `read`, `empty`)
//! - `simplenet_response_bytes_total` (counter): bytes returned to callers
//!
//! Recording is a no-op until the embedding program installs a recorder.

use metrics::counter;

use crate::net::ErrorKind;

pub fn record_send_ok(bytes: usize) {
    counter!("simplenet_sends_total", "outcome" => "ok").increment(1);
    counter!("simplenet_response_bytes_total").increment(bytes as u64);
}

pub fn record_send_error(kind: ErrorKind) {
    counter!("simplenet_sends_total", "outcome" => kind.as_label()).increment(1);
}
