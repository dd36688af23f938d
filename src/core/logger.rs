//! Logger handle

use super::{
    entry::Entry,
    error::Result,
    field::Field,
    gate::LevelEnabler,
    metrics::RouterMetrics,
    severity::Severity,
    sink::{CheckedEntry, Sink},
};
use std::sync::Arc;

/// An explicit logging handle over a sink.
///
/// Handles are cheap to clone and derive: [`Logger::named`] and
/// [`Logger::with`] return new handles, leaving the parent untouched.
/// Derived handles share the parent's metrics and level enabler.
///
/// An event is admitted only when the level enabler (if one is installed)
/// and at least one sink both accept it. Installing a shared
/// [`SeverityGate`](crate::SeverityGate) lets configuration reloads change
/// what is emitted at runtime.
///
/// Write failures never reach the caller; they are counted in
/// [`Logger::metrics`] and reported on stderr. Flush failures are returned
/// so that shutdown code can detect undelivered logs.
#[derive(Clone)]
pub struct Logger {
    name: String,
    sink: Arc<dyn Sink>,
    enabler: Option<Arc<dyn LevelEnabler>>,
    metrics: Arc<RouterMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            name: String::new(),
            sink,
            enabler: None,
            metrics: Arc::new(RouterMetrics::new()),
        }
    }

    /// Consult `enabler` on every admission check, ahead of the sinks
    #[must_use]
    pub fn with_enabler(mut self, enabler: Arc<dyn LevelEnabler>) -> Self {
        self.enabler = Some(enabler);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// A child handle whose name is this name and `name` joined by a dot
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let name = match (self.name.is_empty(), name.is_empty()) {
            (_, true) => self.name.clone(),
            (true, false) => name.to_string(),
            (false, false) => format!("{}.{}", self.name, name),
        };
        Self {
            name,
            sink: Arc::clone(&self.sink),
            enabler: self.enabler.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// A child handle with `fields` added to every event's context
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Self {
        if fields.is_empty() {
            return self.clone();
        }
        Self {
            name: self.name.clone(),
            sink: self.sink.with(fields),
            enabler: self.enabler.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        let admitted = match &self.enabler {
            Some(enabler) => enabler.enabled(severity),
            None => true,
        };
        admitted && self.sink.enabled(severity)
    }

    /// First phase of a write: returns the entry with its accepting sinks,
    /// or `None` when the level enabler or every sink rejects it.
    pub fn check(&self, severity: Severity, message: impl Into<String>) -> Option<CheckedEntry<'_>> {
        if !self.enabled(severity) {
            self.metrics.record_rejected();
            return None;
        }
        let entry = Entry::new(severity, message).with_logger_name(self.name.clone());
        let checked = self.sink.check(&entry, CheckedEntry::new(entry.clone()));
        if checked.is_accepted() {
            Some(checked)
        } else {
            self.metrics.record_rejected();
            None
        }
    }

    pub fn log(&self, severity: Severity, message: impl Into<String>, fields: &[Field]) {
        if let Some(checked) = self.check(severity, message) {
            self.write_checked(checked, fields);
        }
    }

    /// Second phase of a write
    pub fn write_checked(&self, checked: CheckedEntry<'_>, fields: &[Field]) {
        match checked.write(fields) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(e) => {
                self.metrics.record_write_failure();
                eprintln!("[ROUTER ERROR] Logger '{}' write failed: {}", self.name, e);
            }
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Severity::Debug, message, fields);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Severity::Info, message, fields);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Severity::Warn, message, fields);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Severity::Error, message, fields);
    }

    /// Logs at `Fatal`. The process keeps running; exiting is up to the
    /// caller.
    #[inline]
    pub fn fatal(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Severity::Fatal, message, fields);
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush().inspect_err(|_| {
            self.metrics.record_flush_failure();
        })
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SeverityGate;
    use crate::sinks::{MemoryClient, NopSink, PayloadSink};

    fn memory_logger(minimum: Severity) -> (Logger, Arc<MemoryClient>) {
        let client = Arc::new(MemoryClient::new());
        let sink = Arc::new(PayloadSink::new(client.clone(), minimum));
        (Logger::new(sink), client)
    }

    #[test]
    fn test_named() {
        let (logger, client) = memory_logger(Severity::Debug);
        let child = logger.named("http").named("server");
        assert_eq!(logger.name(), "");
        assert_eq!(child.name(), "http.server");
        assert_eq!(child.named("").name(), "http.server");

        child.info("listening", &[]);
        let doc = &client.documents()[0];
        assert_eq!(doc.get("@logger").and_then(|v| v.as_str()), Some("http.server"));
    }

    #[test]
    fn test_levels_filtered_by_sink() {
        let (logger, client) = memory_logger(Severity::Warn);
        logger.debug("d", &[]);
        logger.info("i", &[]);
        logger.warn("w", &[]);
        logger.error("e", &[]);
        logger.fatal("f", &[]);

        assert_eq!(client.len(), 3);
        assert_eq!(logger.metrics().written_count(), 3);
        assert_eq!(logger.metrics().rejected_count(), 2);
    }

    #[test]
    fn test_with_fields() {
        let (logger, client) = memory_logger(Severity::Debug);
        let scoped = logger.with(&[Field::string("request_id", "abc-123")]);

        scoped.info("handled", &[Field::u16("status", 200)]);
        logger.info("idle", &[]);

        let docs = client.documents();
        assert_eq!(docs[0].get("request_id").and_then(|v| v.as_str()), Some("abc-123"));
        assert_eq!(docs[0].get("status").and_then(|v| v.as_u64()), Some(200));
        assert!(!docs[1].contains_key("request_id"));
    }

    #[test]
    fn test_check_then_write() {
        let (logger, client) = memory_logger(Severity::Info);
        assert!(logger.check(Severity::Debug, "skipped").is_none());

        let checked = logger.check(Severity::Info, "kept").unwrap();
        assert_eq!(checked.entry().message, "kept");
        logger.write_checked(checked, &[Field::bool("late", true)]);

        let doc = &client.documents()[0];
        assert_eq!(doc.get("late").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn test_gate_controls_admission() {
        let gate = SeverityGate::at(Severity::Debug);
        let (logger, client) = memory_logger(Severity::Debug);
        let logger = logger.with_enabler(Arc::new(gate.clone()));

        logger.info("hidden", &[]);
        logger.debug("shown", &[]);
        assert_eq!(client.len(), 1);
        assert_eq!(logger.metrics().rejected_count(), 1);

        gate.store(Severity::Info);
        let scoped = logger.with(&[Field::i64("id", 7)]).named("worker");
        scoped.info("now shown", &[]);
        scoped.warn("still hidden", &[]);
        assert_eq!(client.len(), 2);
        assert!(logger.check(Severity::Error, "x").is_none());
    }

    #[test]
    fn test_enabler_and_sink_must_both_accept() {
        let (logger, client) = memory_logger(Severity::Warn);
        let logger = logger.with_enabler(Arc::new(|s: Severity| s != Severity::Error));

        logger.error("blocked by enabler", &[]);
        logger.debug("blocked by sink", &[]);
        logger.warn("accepted", &[]);

        assert!(!logger.enabled(Severity::Error));
        assert!(!logger.enabled(Severity::Debug));
        assert_eq!(client.len(), 1);
        assert_eq!(logger.metrics().rejected_count(), 2);
    }

    #[test]
    fn test_nop_logger() {
        let logger = Logger::new(Arc::new(NopSink));
        logger.fatal("nobody listens", &[]);
        assert!(!logger.enabled(Severity::Fatal));
        assert_eq!(logger.metrics().rejected_count(), 1);
        assert!(logger.flush().is_ok());
    }
}
