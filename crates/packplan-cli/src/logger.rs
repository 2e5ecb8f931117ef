//! Logging setup for the CLI.
//!
//! Library crates only emit tracing events; the subscriber is
//! installed here, once, at process start.

use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Level precedence: `--verbose` (debug), `--quiet` (error), the
/// `RUST_LOG` environment variable, then info.
pub fn init_logger(verbose: bool, quiet: bool) {
    INIT.call_once(|| {
        let filter = if verbose {
            EnvFilter::new("debug")
        } else if quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).without_time())
            .init();
    });
}
