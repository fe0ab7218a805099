//! `tracelog-core` — per-call context and trace identity primitives.
//!
//! This crate contains typed context values, deadlines, cancellation and the
//! active span (no logging concerns).

pub mod context;
pub mod error;
pub mod trace;

pub use context::{CallContext, CancelHandle, ContextKey};
pub use error::ContextError;
pub use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};
pub use trace::{AmbientTrace, TraceContext};
