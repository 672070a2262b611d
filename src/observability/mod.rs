//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! client, broadcaster, decoder, provider produce:
//!     → tracing events (logging.rs installs the subscriber)
//!     → metrics.rs (counters)
//! ```
//!
//! # Design Decisions
//! - Secrets (client secret, access token) are never logged
//! - Metrics are cheap counter increments

pub mod logging;
pub mod metrics;
