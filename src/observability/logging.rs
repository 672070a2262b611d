//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate; the library only emits events
//! - Binaries opt in to output by calling [`init`]
//! - `RUST_LOG` wins over the level passed in

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `steemconnect=<level>`.
pub fn init(level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

fn default_filter(level: &str) -> String {
    format!("steemconnect={level},sc2_cli={level}")
}
