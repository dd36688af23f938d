//! Sink trait for log destinations

use super::{
    entry::Entry,
    error::{Result, RouterError},
    field::Field,
    severity::Severity,
};
use std::sync::Arc;

/// A log destination.
///
/// Sinks are immutable once built: [`Sink::with`] returns a new sink
/// carrying the extra context, so handles sharing a parent never observe
/// each other's additions.
///
/// `enabled` must be monotonic: a sink that accepts a severity accepts every
/// more important one (see [`Severity::admits`]).
///
/// # Example
///
/// ```
/// use rust_log_router::core::{CheckedEntry, Entry, Field, Result, Severity, Sink};
/// use std::sync::Arc;
///
/// struct Stderr {
///     minimum: Severity,
/// }
///
/// impl Sink for Stderr {
///     fn enabled(&self, severity: Severity) -> bool {
///         self.minimum.admits(severity)
///     }
///
///     fn with(&self, _fields: &[Field]) -> Arc<dyn Sink> {
///         Arc::new(Stderr { minimum: self.minimum })
///     }
///
///     fn check<'a>(&'a self, entry: &Entry, checked: CheckedEntry<'a>) -> CheckedEntry<'a> {
///         if self.enabled(entry.severity) {
///             checked.add_sink(self)
///         } else {
///             checked
///         }
///     }
///
///     fn write(&self, entry: &Entry, _fields: &[Field]) -> Result<()> {
///         eprintln!("{} {}", entry.severity, entry.message);
///         Ok(())
///     }
///
///     fn flush(&self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Sink: Send + Sync {
    /// Whether an event at `severity` could be written by this sink
    fn enabled(&self, severity: Severity) -> bool;

    /// A new sink with `fields` added to the accumulated context
    fn with(&self, fields: &[Field]) -> Arc<dyn Sink>;

    /// Register this sink on `checked` if it accepts `entry`
    fn check<'a>(&'a self, entry: &Entry, checked: CheckedEntry<'a>) -> CheckedEntry<'a>;

    /// Write an accepted entry and its fields
    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<()>;

    /// Flush anything the sink or its backend has buffered
    fn flush(&self) -> Result<()>;
}

/// An entry together with the sinks that accepted it during `check`.
///
/// Callers build the field list once and hand it to [`CheckedEntry::write`],
/// which delivers it to every registered sink.
pub struct CheckedEntry<'a> {
    entry: Entry,
    sinks: Vec<&'a dyn Sink>,
}

impl<'a> CheckedEntry<'a> {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            sinks: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_sink(mut self, sink: &'a dyn Sink) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// True if at least one sink accepted the entry
    pub fn is_accepted(&self) -> bool {
        !self.sinks.is_empty()
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Write to every registered sink.
    ///
    /// A failing sink does not stop delivery to the rest; all failures are
    /// returned together.
    pub fn write(self, fields: &[Field]) -> Result<()> {
        let mut errors = Vec::new();
        for sink in &self.sinks {
            if let Err(e) = sink.write(&self.entry, fields) {
                errors.push(e);
            }
        }
        RouterError::combine(errors)
    }
}

/// Most permissive severity `sink` accepts, probing from `Debug` toward
/// `Fatal`; `None` when it accepts nothing.
pub fn min_enabled_severity(sink: &dyn Sink) -> Severity {
    Severity::PROBE_ORDER
        .into_iter()
        .find(|s| sink.enabled(*s))
        .unwrap_or(Severity::None)
}
