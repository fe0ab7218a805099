//! Structured, trace-aware logging carried on the call context.
//!
//! - [`build`] turns a [`LoggerConfig`] into a [`Logger`]
//! - [`attach`] puts a logger on a [`CallContext`](tracelog_core::CallContext)
//! - [`resolve`] gets it back, enriched with `trace_id` / `span_id`
//! - [`debug`], [`info`], [`warn`], [`error`] do resolve + emit in one call

pub mod config;
pub mod emit;
pub mod encoder;
pub mod factory;
pub mod field;
pub mod logger;
pub mod registry;
pub mod sink;

/// Tracing subscriber bootstrap.
pub mod tracing;

pub use config::{LogFormat, LogLevel, LoggerConfig, ParseLevelError};
pub use emit::{ERROR_KEY, debug, error, error_with, info, log, log_with, warn};
pub use factory::{build, build_with_sink};
pub use field::Field;
pub use logger::Logger;
pub use registry::{
    SPAN_ID_KEY, TRACE_ID_KEY, attach, default_logger, reset_default, resolve, resolve_with,
    set_default,
};
pub use sink::{CapturedRecord, MemorySink, Sink, StdoutSink};

/// Initialize process-wide observability (tracing subscriber).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &LoggerConfig) {
    tracing::init(config);
}
