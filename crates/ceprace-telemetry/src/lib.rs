//! Logging for ceprace
//!
//! Installs a `tracing` subscriber that writes to stderr, keeping stdout
//! free for the lookup report

use tracing_subscriber::EnvFilter;

/// Filter used when the requested one does not parse
pub const FALLBACK_FILTER: &str = "warn";

/// Initialize logging with an `EnvFilter` directive such as `"debug"` or
/// `"ceprace_lookup=debug,warn"`
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(log_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter(log_filter))
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

fn filter(log_filter: &str) -> EnvFilter {
    EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}
