//! Diagnostic logging.
//!
//! `tracing` events go to stderr through a `fmt` subscriber. The level comes
//! from `RUST_LOG` when set, otherwise `info` (or `debug` with `--verbose`).
//! Run summaries are not logged; they are printed to stdout by
//! [`output`](crate::output).

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Call once, at startup.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
