// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up the crate's own diagnostics using tracing_subscriber.
/// Reads log level filters from the `RUST_LOG` environment variable.
/// Defaults to "warn" if `RUST_LOG` is not set, and writes to stderr so the
/// internal diagnostics never interleave with the logger's stdout lines.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init(); // A host application may already own the global subscriber

    tracing::debug!("Logging setup complete.");
}
