//! Immutable, chainable per-call context.
//!
//! A [`CallContext`] is a persistent linked list of typed values. Every
//! derivation (`with_value`, `with_deadline`, `with_cancel`, ...) allocates one
//! new node pointing at its parent; the parent is never touched. Lookups walk
//! from the newest node towards the root, so the nearest value wins.
//!
//! ## Slot keys
//!
//! Values are stored under a [`ContextKey`] type rather than a string. The
//! key's `TypeId` is the slot identity, so a module that keeps its key type
//! private owns that slot outright: nothing outside the module can read or
//! shadow it. Modules are expected to expose typed helpers (`attach`,
//! `resolve`, ...) instead of their key.
//!
//! ```ignore
//! struct RequestIdKey;
//! impl ContextKey for RequestIdKey {
//!     type Value = String;
//! }
//!
//! let root = CallContext::background();
//! let ctx = root.with_value::<RequestIdKey>("req-42".to_string());
//! assert_eq!(ctx.value::<RequestIdKey>().map(String::as_str), Some("req-42"));
//! assert!(root.value::<RequestIdKey>().is_none());
//! ```
//!
//! ## Thread safety
//!
//! Nodes are immutable and shared through `Arc`, so contexts can be cloned
//! and handed to other threads freely. The only interior mutability is the
//! cancellation flag, which is an atomic.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::ContextError;

/// Typed slot identity for values carried on a [`CallContext`].
pub trait ContextKey: 'static {
    type Value: Send + Sync + 'static;
}

struct Node {
    parent: Option<Arc<Node>>,
    key: TypeId,
    value: Box<dyn Any + Send + Sync>,
}

impl Drop for Node {
    // Unlink uniquely owned ancestors one at a time so that dropping a long
    // chain does not recurse once per level.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Arc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Per-call context carrying typed values, a deadline and cancellation.
#[derive(Clone, Default)]
pub struct CallContext {
    head: Option<Arc<Node>>,
}

impl CallContext {
    /// The empty root context: no values, no deadline, never cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a child context carrying `value` in the `K` slot.
    pub fn with_value<K: ContextKey>(&self, value: K::Value) -> Self {
        Self {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                key: TypeId::of::<K>(),
                value: Box::new(value),
            })),
        }
    }

    /// Nearest value stored in the `K` slot along this context's ancestry.
    pub fn value<K: ContextKey>(&self) -> Option<&K::Value> {
        self.values::<K>().next()
    }

    /// Every value stored in the `K` slot, nearest first.
    pub fn values<K: ContextKey>(&self) -> impl Iterator<Item = &K::Value> {
        let key = TypeId::of::<K>();
        self.nodes()
            .filter(move |node| node.key == key)
            .filter_map(|node| node.value.downcast_ref::<K::Value>())
    }

    /// Number of derivations between this context and the root.
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        let mut cursor = self.head.as_deref();
        std::iter::from_fn(move || {
            let node = cursor?;
            cursor = node.parent.as_deref();
            Some(node)
        })
    }

    /// Derive a child that expires at `deadline`.
    ///
    /// A child can only tighten the deadline it inherits: if an ancestor
    /// already expires earlier, that earlier instant is kept.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let effective = match self.deadline() {
            Some(inherited) => inherited.min(deadline),
            None => deadline,
        };
        self.with_value::<DeadlineKey>(effective)
    }

    /// Derive a child that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an `Instant` sets no deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.clone(),
        }
    }

    /// The effective deadline, if any ancestor set one.
    pub fn deadline(&self) -> Option<Instant> {
        self.value::<DeadlineKey>().copied()
    }

    /// Derive a cancellable child and return the handle that cancels it.
    ///
    /// Cancelling the handle cancels the child and every context derived
    /// from it afterwards; the parent is unaffected.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let handle = CancelHandle::new();
        (self.with_value::<CancelKey>(handle.clone()), handle)
    }

    /// Whether this context or any ancestor has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.values::<CancelKey>().any(CancelHandle::is_cancelled)
    }

    /// Why this context is done, or `None` while it is still live.
    ///
    /// Cancellation takes precedence over an expired deadline.
    pub fn err(&self) -> Option<ContextError> {
        if self.is_cancelled() {
            return Some(ContextError::Cancelled);
        }

        match self.deadline() {
            Some(deadline) if deadline <= Instant::now() => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("depth", &self.depth())
            .field("deadline", &self.deadline())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

struct DeadlineKey;

impl ContextKey for DeadlineKey {
    type Value = Instant;
}

struct CancelKey;

impl ContextKey for CancelKey {
    type Value = CancelHandle;
}

/// Cancels the context returned alongside it by [`CallContext::with_cancel`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
