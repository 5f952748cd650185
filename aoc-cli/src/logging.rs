//! Logging initialization

use crate::config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count. Logs go to stderr so
/// stdout carries only results.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(config.verbosity >= 2)
        .with_thread_names(config.verbosity >= 3)
        .init();

    debug!(verbosity = config.verbosity, "logging initialized");
}
