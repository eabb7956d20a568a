//! Log setup for applications embedding the toaster
//!
//! The library itself only emits `tracing` events. Hosts that do not install
//! their own subscriber can call [`init`] once at startup.

use crate::constants::DEFAULT_LOG_FILTER;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};

/// Install a global subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// With the `systemd` feature, events are also sent to the journal when it is reachable.
/// Fails if a global subscriber is already set.
pub fn init() -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    #[cfg(feature = "systemd")]
    let journald = match tracing_journald::layer() {
        Ok(layer) => Some(layer),
        Err(err) => {
            eprintln!("Failed to connect to journald: {err}");
            None
        }
    };
    #[cfg(not(feature = "systemd"))]
    let journald: Option<tracing_subscriber::layer::Identity> = None;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(journald)
        .try_init()
}
