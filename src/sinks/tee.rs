//! Tee combinator: one sink broadcasting to many

use super::payload::{BackendClient, PayloadSink};
use crate::core::{
    min_enabled_severity, CheckedEntry, Entry, Field, Result, RouterError, Severity, Sink,
};
use std::sync::Arc;

/// A sink that fans every event out to an ordered list of members
///
/// # Example
///
/// ```
/// use rust_log_router::prelude::*;
/// use std::sync::Arc;
///
/// let audit = Arc::new(MemoryClient::new());
/// let debug = Arc::new(MemoryClient::new());
/// let tee = Tee::new(vec![
///     Arc::new(PayloadSink::new(audit.clone(), Severity::Warn)),
///     Arc::new(PayloadSink::new(debug.clone(), Severity::Debug)),
/// ]);
///
/// let logger = Logger::new(Arc::new(tee));
/// logger.info("cache warmed", &[]);
/// logger.error("cache lost", &[]);
///
/// assert_eq!(audit.len(), 1);
/// assert_eq!(debug.len(), 2);
/// ```
pub struct Tee {
    members: Vec<Arc<dyn Sink>>,
    min_severity: Severity,
}

impl Tee {
    pub fn new(members: Vec<Arc<dyn Sink>>) -> Self {
        let min_severity = members
            .iter()
            .map(|m| min_enabled_severity(m.as_ref()))
            .max()
            .unwrap_or(Severity::None);
        Self {
            members,
            min_severity,
        }
    }

    /// Tee `base` with a payload sink for `client`.
    ///
    /// The payload sink's minimum is the most permissive level `base`
    /// accepts, so the backend sees what the base sees.
    pub fn with_backend(base: Arc<dyn Sink>, client: Arc<dyn BackendClient>) -> Self {
        let minimum = min_enabled_severity(base.as_ref());
        let backend: Arc<dyn Sink> = Arc::new(PayloadSink::new(client, minimum));
        Self::new(vec![base, backend])
    }

    /// Most permissive minimum among the members, computed at construction.
    ///
    /// For display only; admission always asks each member.
    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Sink for Tee {
    fn enabled(&self, severity: Severity) -> bool {
        self.members.iter().any(|m| m.enabled(severity))
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Sink> {
        Arc::new(Tee::new(
            self.members.iter().map(|m| m.with(fields)).collect(),
        ))
    }

    fn check<'a>(&'a self, entry: &Entry, mut checked: CheckedEntry<'a>) -> CheckedEntry<'a> {
        for member in &self.members {
            checked = member.check(entry, checked);
        }
        checked
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<()> {
        let mut errors = Vec::new();
        for member in &self.members {
            if !member.enabled(entry.severity) {
                continue;
            }
            if let Err(e) = member.write(entry, fields) {
                errors.push(e);
            }
        }
        RouterError::combine(errors)
    }

    fn flush(&self) -> Result<()> {
        let errors: Vec<RouterError> = self
            .members
            .iter()
            .filter_map(|m| m.flush().err())
            .collect();
        RouterError::combine(errors)
    }
}
