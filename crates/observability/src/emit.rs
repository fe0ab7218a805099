//! Level-tagged entry points: resolve the context's logger and emit.
//!
//! ```
//! use tracelog_core::{CallContext, SpanContext, SpanId, TraceFlags, TraceId, TraceState};
//! use tracelog_observability::{self as log, fields, LoggerConfig};
//!
//! let span = SpanContext::new(
//!     TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
//!     SpanId::from_hex("00f067aa0ba902b7").unwrap(),
//!     TraceFlags::SAMPLED,
//!     true,
//!     TraceState::default(),
//! );
//!
//! let logger = log::build(&LoggerConfig::new("debug", "json"));
//! let ctx = log::attach(&CallContext::background(), logger).with_span(span);
//!
//! log::info(&ctx, "order accepted", &fields!["order_id" => "o-17"]);
//!
//! let err = std::io::Error::other("disk full");
//! log::error(&ctx, "order failed", &err, &fields!["order_id" => "o-17"]);
//! ```

use std::error::Error;

use tracelog_core::{AmbientTrace, CallContext, TraceContext};

use crate::config::LogLevel;
use crate::field::Field;
use crate::registry;

/// Field key of the error value prepended by [`error`].
pub const ERROR_KEY: &str = "error";

pub fn debug(ctx: &CallContext, message: &str, fields: &[Field]) {
    log(ctx, LogLevel::Debug, message, fields);
}

pub fn info(ctx: &CallContext, message: &str, fields: &[Field]) {
    log(ctx, LogLevel::Info, message, fields);
}

pub fn warn(ctx: &CallContext, message: &str, fields: &[Field]) {
    log(ctx, LogLevel::Warn, message, fields);
}

/// Emit at error level with `err` as the first field.
///
/// The record always starts with `error=<err>` followed by `fields`, even
/// when `err` renders as an empty string.
pub fn error(ctx: &CallContext, message: &str, err: &dyn Error, fields: &[Field]) {
    error_with(ctx, &AmbientTrace, message, err, fields);
}

/// [`error`] against a caller-supplied trace collaborator.
pub fn error_with(
    ctx: &CallContext,
    trace: &dyn TraceContext,
    message: &str,
    err: &dyn Error,
    fields: &[Field],
) {
    let mut all = Vec::with_capacity(fields.len() + 1);
    all.push(Field::display(ERROR_KEY, err));
    all.extend_from_slice(fields);
    log_with(ctx, trace, LogLevel::Error, message, &all);
}

/// Resolve the logger for `ctx` and emit one record at `level`.
///
/// Trace fields come from [`AmbientTrace`].
pub fn log(ctx: &CallContext, level: LogLevel, message: &str, fields: &[Field]) {
    log_with(ctx, &AmbientTrace, level, message, fields);
}

/// [`log`] with trace fields read from `trace`.
///
/// Disabled levels return before any trace lookup.
pub fn log_with(
    ctx: &CallContext,
    trace: &dyn TraceContext,
    level: LogLevel,
    message: &str,
    fields: &[Field],
) {
    let logger = registry::select(ctx);
    if !logger.enabled(level) {
        return;
    }

    registry::enrich(logger, ctx, trace).log_context(ctx, level, message, fields);
}
