//! Process-wide `tracing` subscriber.
//!
//! Context-scoped loggers write records themselves; this subscriber covers
//! everything emitted through the `tracing` macros (including this crate's
//! own diagnostics, such as dropped records). It follows the same
//! configuration mapping as the logger factory so both streams look alike.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggerConfig};

/// Initialize tracing for the process.
///
/// `RUST_LOG` overrides the configured level when set. Safe to call multiple
/// times (subsequent calls are no-ops).
pub fn init(config: &LoggerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level().as_directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format() {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
