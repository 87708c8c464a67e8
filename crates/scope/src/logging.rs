//! Tracing subscriber setup for binaries built on the registry.

use raii_core::{DEFAULT_LOG_FILTER, RAII_LOG_VAR};
use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize the tracing system
///
/// Reads the filter from `RAII_LOG`, falling back to `warn`, and writes
/// compact lines to stderr so they never mix with program output.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    init_with_default(DEFAULT_LOG_FILTER)
}

/// Initialize the tracing system with an explicit fallback filter
pub fn init_with_default(
    default_filter: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter(default_filter)?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Filter from `RAII_LOG`, or `default_filter` when it is unset or invalid
fn env_filter(default_filter: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_from_env(RAII_LOG_VAR).or_else(|_| EnvFilter::try_new(default_filter))
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
