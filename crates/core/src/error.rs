//! Error model for context primitives.

use thiserror::Error;

/// Why a [`CallContext`](crate::CallContext) is done.
///
/// Returned by [`CallContext::err`](crate::CallContext::err). A context that
/// is neither cancelled nor past its deadline reports no error.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The context (or one of its ancestors) was cancelled explicitly.
    #[error("context cancelled")]
    Cancelled,

    /// The nearest deadline along the context chain has passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}
