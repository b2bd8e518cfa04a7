//! Diagnostics for debugging menu sessions.
//!
//! Tracing output goes to stderr so it never interleaves with the menu
//! itself, which owns stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Level used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber for the `termenu` binary.
///
/// Honors `RUST_LOG`; rejected inputs and menu dispatch are logged at
/// `debug`, so `RUST_LOG=termenu=debug termenu run` shows every attempt.
/// Call once, before the first menu is performed.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
