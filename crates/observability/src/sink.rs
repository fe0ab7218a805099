//! Output sinks for encoded records.
//!
//! A sink receives one complete, newline-terminated line per record and
//! must write it atomically with respect to other records. Sinks also get
//! the emitting [`CallContext`] (when there is one) so transports that can
//! honour deadlines or cancellation may do so; sinks that cannot simply
//! ignore it.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracelog_core::{CallContext, ContextError};

/// Destination for encoded records.
pub trait Sink: Send + Sync {
    fn write_record(&self, ctx: Option<&CallContext>, line: &[u8]) -> io::Result<()>;
}

/// Process standard output.
///
/// Holds the stdout lock for the whole line, so concurrent records never
/// interleave.
#[derive(Debug, Default, Copy, Clone)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_record(&self, _ctx: Option<&CallContext>, line: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line)?;
        out.flush()
    }
}

/// A record captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// The encoded line without its trailing newline.
    pub line: String,
    /// State of the emitting context at write time (`None` if live or absent).
    pub context_err: Option<ContextError>,
}

/// In-memory sink for tests and embedders that collect output themselves.
///
/// Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.line.clone()).collect()
    }

    /// Every captured line parsed as JSON; lines that are not JSON are skipped.
    pub fn json(&self) -> Vec<serde_json::Value> {
        self.lock()
            .iter()
            .filter_map(|r| serde_json::from_str(&r.line).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CapturedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for MemorySink {
    fn write_record(&self, ctx: Option<&CallContext>, line: &[u8]) -> io::Result<()> {
        let line = String::from_utf8_lossy(line).trim_end_matches('\n').to_string();
        self.lock().push(CapturedRecord {
            line,
            context_err: ctx.and_then(CallContext::err),
        });
        Ok(())
    }
}
