//! Bounded read loop.
//!
//! Reads in fixed-size chunks with a rolling idle deadline, stopping at the
//! first short read, the first error, or once the accumulated bytes exceed
//! the caller's cap. A short read is taken to mean the peer has nothing more
//! to send right now.

use std::io;
use std::time::Duration;

use super::connection::{within, Connection};
use super::error::SendError;

/// Size of each read.
pub const CHUNK_SIZE: usize = 256;

/// Deadline for each individual read, reset before every attempt.
pub const IDLE_READ_TIMEOUT: Duration = Duration::from_secs(3);

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    ShortRead,
    EndOfStream,
    SizeCap,
}

/// Read from `conn` until it goes quiet, ends, or `max_size` is exceeded.
///
/// The cap is checked after each full chunk, so the result may be up to one
/// chunk larger than `max_size`.
pub async fn read_bounded(conn: &mut Connection, max_size: usize) -> Result<Vec<u8>, SendError> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    let stop = loop {
        let n = match within(IDLE_READ_TIMEOUT, conn.read(&mut chunk)).await {
            Ok(n) => n,
            Err(e) if is_end_of_stream(&e) => break Stop::EndOfStream,
            Err(e) => return Err(SendError::Read(e)),
        };
        buf.extend_from_slice(&chunk[..n]);
        if n == 0 {
            break Stop::EndOfStream;
        }
        if n < CHUNK_SIZE {
            break Stop::ShortRead;
        }
        if buf.len() > max_size {
            break Stop::SizeCap;
        }
    };

    tracing::debug!(bytes = buf.len(), reason = ?stop, "read loop finished");

    if buf.is_empty() {
        return Err(SendError::EmptyResponse);
    }
    Ok(buf)
}

// A TLS peer that closes without close_notify surfaces as UnexpectedEof.
fn is_end_of_stream(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::UnexpectedEof
}
