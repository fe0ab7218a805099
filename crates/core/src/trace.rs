//! Distributed-trace identity visible from a [`CallContext`].
//!
//! Span lifecycle (creation, sampling, export) belongs to OpenTelemetry. This
//! module only carries the [`SpanContext`] that system hands over, and the
//! read-only [`TraceContext`] view the logging layer uses to correlate records
//! with it.

use opentelemetry::Context as OtelContext;
use opentelemetry::trace::{SpanContext, TraceContextExt};

use crate::context::{CallContext, ContextKey};

struct SpanKey;

impl ContextKey for SpanKey {
    type Value = SpanContext;
}

impl CallContext {
    /// Derive a child context whose active span is `span`.
    pub fn with_span(&self, span: SpanContext) -> Self {
        self.with_value::<SpanKey>(span)
    }

    /// Derive a child carrying the span active in an OpenTelemetry context.
    pub fn with_otel_context(&self, cx: &OtelContext) -> Self {
        self.with_span(cx.span().span_context().clone())
    }

    /// The nearest span set along this context's ancestry.
    pub fn span_context(&self) -> Option<&SpanContext> {
        self.value::<SpanKey>()
    }
}

/// Read-only view of the trace active for a call.
///
/// This is the seam to the tracing system: the logging layer only ever asks
/// whether a trace is active and, if so, for its hex ids. `trace_id` and
/// `span_id` are only meaningful when `is_valid` returns `true`.
pub trait TraceContext: Send + Sync {
    fn is_valid(&self, ctx: &CallContext) -> bool;

    fn trace_id(&self, ctx: &CallContext) -> String;

    fn span_id(&self, ctx: &CallContext) -> String;
}

/// [`TraceContext`] backed by OpenTelemetry.
///
/// A span carried on the call context wins. Otherwise the span of the
/// thread's current OpenTelemetry context is used.
#[derive(Debug, Default, Copy, Clone)]
pub struct AmbientTrace;

impl AmbientTrace {
    fn with_active<R>(ctx: &CallContext, f: impl FnOnce(&SpanContext) -> R) -> R {
        match ctx.span_context() {
            Some(span) => f(span),
            None => {
                let current = OtelContext::current();
                f(current.span().span_context())
            }
        }
    }
}

impl TraceContext for AmbientTrace {
    fn is_valid(&self, ctx: &CallContext) -> bool {
        Self::with_active(ctx, SpanContext::is_valid)
    }

    fn trace_id(&self, ctx: &CallContext) -> String {
        Self::with_active(ctx, |span| span.trace_id().to_string())
    }

    fn span_id(&self, ctx: &CallContext) -> String {
        Self::with_active(ctx, |span| span.span_id().to_string())
    }
}
