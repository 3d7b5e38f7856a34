//! Activity log shared between the core and the display layer.
//!
//! [`ActivityLog`] is an explicitly owned diagnostics sink: every record is
//! forwarded to `tracing` and also kept in a bounded in-memory ring so the
//! console can show what happened recently. Components receive a handle at
//! construction instead of reaching for a process-wide logger.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use tracing::Level;

use crate::time::{Clock, SystemClock};

/// Default number of entries retained by [`ActivityLog::new`].
pub const DEFAULT_CAPACITY: usize = 200;

/// One retained log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// When the record was made, in local time.
    pub at: DateTime<Local>,
    /// Severity.
    pub level: Level,
    /// Rendered message.
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} {}",
            self.at.format("%H:%M:%S"),
            self.level.as_str(),
            self.message
        )
    }
}

struct Inner {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    clock: Box<dyn Clock>,
}

/// Cloneable handle to a bounded activity log.
///
/// Clones share the same buffer.
///
/// # Example
///
/// ```
/// use scan_selector::diagnostics::ActivityLog;
///
/// let log = ActivityLog::new();
/// log.info("Loaded 3 presets");
/// log.warn("Preset 'Lab' has invalid address '999.1.1.1', skipped");
///
/// let recent = log.recent(1);
/// assert_eq!(recent[0].message, "Preset 'Lab' has invalid address '999.1.1.1', skipped");
/// ```
#[derive(Clone)]
pub struct ActivityLog {
    inner: Arc<Inner>,
}

impl fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityLog")
            .field("capacity", &self.inner.capacity)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    /// Creates a log retaining [`DEFAULT_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a log retaining at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_clock(capacity, SystemClock)
    }

    /// Creates a log with a custom clock for timestamps.
    #[must_use]
    pub fn with_clock(capacity: usize, clock: impl Clock + 'static) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(VecDeque::with_capacity(capacity)),
                capacity,
                clock: Box::new(clock),
            }),
        }
    }

    /// Records an informational message.
    pub fn info(&self, message: impl Into<String>) {
        self.record(Level::INFO, message.into());
    }

    /// Records a warning.
    pub fn warn(&self, message: impl Into<String>) {
        self.record(Level::WARN, message.into());
    }

    /// Records an error.
    pub fn error(&self, message: impl Into<String>) {
        self.record(Level::ERROR, message.into());
    }

    /// Records a debug message.
    ///
    /// Debug records go to `tracing` only and are not retained.
    pub fn debug(&self, message: impl AsRef<str>) {
        tracing::debug!("{}", message.as_ref());
    }

    fn record(&self, level: Level, message: String) {
        if level == Level::ERROR {
            tracing::error!("{message}");
        } else if level == Level::WARN {
            tracing::warn!("{message}");
        } else {
            tracing::info!("{message}");
        }

        let entry = LogEntry {
            at: self.inner.clock.now(),
            level,
            message,
        };

        let mut entries = self.lock();
        if entries.len() == self.inner.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns up to `count` most recent entries, oldest first.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Returns all retained entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    /// Returns the number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been retained yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns `true` if any retained entry contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|entry| entry.message.contains(needle))
    }

    // A panic while holding the lock leaves the ring in a consistent state,
    // so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
