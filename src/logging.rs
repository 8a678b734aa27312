//! Logging initialization.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence when set. Otherwise the baseline is `info`;
/// `verbose` widens this crate to `debug`, which is where per-failure log
/// lines are emitted.
pub fn init(verbose: bool) {
    let default = if verbose { "info,wsflood=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).init();
}
