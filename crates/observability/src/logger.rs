//! The structured logger handle.
//!
//! A [`Logger`] is two `Arc`s: the shared handler (threshold, format, sink)
//! and the fields bound to this particular handle. Cloning is a refcount
//! bump; [`Logger::with`] builds a new field list and keeps the handler, so
//! the original handle never observes fields added to a derived one.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracelog_core::CallContext;

use crate::config::{LogFormat, LogLevel};
use crate::encoder::{self, Record};
use crate::field::Field;
use crate::sink::Sink;

struct Handler {
    level: LogLevel,
    format: LogFormat,
    sink: Arc<dyn Sink>,
}

/// Immutable, cheaply clonable structured logger.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<Handler>,
    bound: Arc<[Field]>,
}

impl Logger {
    pub fn new(level: LogLevel, format: LogFormat, sink: Arc<dyn Sink>) -> Self {
        Self {
            handler: Arc::new(Handler {
                level,
                format,
                sink,
            }),
            bound: Arc::from(Vec::new()),
        }
    }

    /// Minimum level this logger emits.
    pub fn level(&self) -> LogLevel {
        self.handler.level
    }

    pub fn format(&self) -> LogFormat {
        self.handler.format
    }

    /// Fields bound by [`Logger::with`], oldest first.
    pub fn fields(&self) -> &[Field] {
        &self.bound
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.handler.level
    }

    /// Whether both handles write through the same handler.
    pub fn shares_handler(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    /// Derive a logger that also carries `fields` on every record.
    ///
    /// New fields go after the ones already bound. An empty iterator returns
    /// a plain clone.
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Logger {
        let mut fields = fields.into_iter().peekable();
        if fields.peek().is_none() {
            return self.clone();
        }

        Logger {
            handler: Arc::clone(&self.handler),
            bound: self.bound.iter().cloned().chain(fields).collect(),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field]) {
        self.emit(None, level, message, fields);
    }

    /// Like [`Logger::log`], handing `ctx` to the sink.
    ///
    /// The record is written even when `ctx` is already cancelled or expired.
    pub fn log_context(&self, ctx: &CallContext, level: LogLevel, message: &str, fields: &[Field]) {
        self.emit(Some(ctx), level, message, fields);
    }

    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Debug, message, fields);
    }

    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Info, message, fields);
    }

    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Warn, message, fields);
    }

    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Error, message, fields);
    }

    fn emit(&self, ctx: Option<&CallContext>, level: LogLevel, message: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }

        let record = Record {
            time: Utc::now(),
            level,
            message,
            bound: &self.bound,
            fields,
        };

        // Fire-and-forget: a failing sink drops the record.
        let written = encoder::encode(self.handler.format, &record)
            .and_then(|line| self.handler.sink.write_record(ctx, &line));
        if let Err(err) = written {
            tracing::warn!(error = %err, level = %level, "dropping log record");
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.handler.level)
            .field("format", &self.handler.format)
            .field("fields", &self.bound)
            .finish_non_exhaustive()
    }
}
