//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! net::send produces:
//!     → tracing events (dial, write, read loop outcome)
//!     → metrics.rs (send outcome counters, response bytes)
//!
//! Consumers:
//!     → logging.rs subscriber (CLI), or the embedding program's own
//!     → whatever metrics recorder the embedding program installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or recorder itself
//! - Errors are returned, not logged, by the library

pub mod logging;
pub mod metrics;
