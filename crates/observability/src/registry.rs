//! Context-scoped logger registry.
//!
//! A logger travels with the call through its [`CallContext`]. Downstream
//! code never receives a logger parameter; it asks the registry to
//! [`resolve`] one from the context it was handed.
//!
//! ## Resolution
//!
//! 1. The nearest logger attached along the context's ancestry, or the
//!    process-wide default when none was attached.
//! 2. If the trace context reports an active trace, a derived logger with
//!    `trace_id` and `span_id` bound after the selected logger's own fields.
//!
//! Every call starts again from step 1, so resolving repeatedly never stacks
//! trace fields. Without an active trace the selected handle is returned as
//! is (an `Arc` clone, no allocation).
//!
//! ## Default logger
//!
//! Built lazily from [`LoggerConfig::from_env`] on first use. Initialisation
//! runs under the write lock with a re-check, so concurrent first callers
//! share a single instance. [`set_default`] replaces it.

use std::sync::{PoisonError, RwLock};

use tracelog_core::{AmbientTrace, CallContext, ContextKey, TraceContext};

use crate::config::LoggerConfig;
use crate::factory;
use crate::field::Field;
use crate::logger::Logger;

/// Field key carrying the hex trace id on enriched records.
pub const TRACE_ID_KEY: &str = "trace_id";

/// Field key carrying the hex span id on enriched records.
pub const SPAN_ID_KEY: &str = "span_id";

struct LoggerKey;

impl ContextKey for LoggerKey {
    type Value = Logger;
}

static DEFAULT_LOGGER: RwLock<Option<Logger>> = RwLock::new(None);

/// Derive a context carrying `logger`. `ctx` itself is left untouched.
pub fn attach(ctx: &CallContext, logger: Logger) -> CallContext {
    ctx.with_value::<LoggerKey>(logger)
}

/// The logger for `ctx`, enriched with the ambient trace identity.
pub fn resolve(ctx: &CallContext) -> Logger {
    resolve_with(ctx, &AmbientTrace)
}

/// [`resolve`] against an explicit trace collaborator.
pub fn resolve_with(ctx: &CallContext, trace: &dyn TraceContext) -> Logger {
    enrich(select(ctx), ctx, trace)
}

pub(crate) fn select(ctx: &CallContext) -> Logger {
    match ctx.value::<LoggerKey>() {
        Some(logger) => logger.clone(),
        None => default_logger(),
    }
}

pub(crate) fn enrich(logger: Logger, ctx: &CallContext, trace: &dyn TraceContext) -> Logger {
    if !trace.is_valid(ctx) {
        return logger;
    }

    logger.with([
        Field::new(TRACE_ID_KEY, trace.trace_id(ctx)),
        Field::new(SPAN_ID_KEY, trace.span_id(ctx)),
    ])
}

/// The process-wide fallback logger, initialising it on first use.
pub fn default_logger() -> Logger {
    if let Some(logger) = DEFAULT_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return logger.clone();
    }

    let mut slot = DEFAULT_LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    slot.get_or_insert_with(|| factory::build(&LoggerConfig::from_env()))
        .clone()
}

/// Replace the process-wide fallback logger.
pub fn set_default(logger: Logger) {
    *DEFAULT_LOGGER.write().unwrap_or_else(PoisonError::into_inner) = Some(logger);
}

/// Drop the fallback logger so the next use initialises it again.
#[doc(hidden)]
pub fn reset_default() {
    *DEFAULT_LOGGER.write().unwrap_or_else(PoisonError::into_inner) = None;
}
