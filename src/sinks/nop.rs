//! Sink that accepts nothing

use crate::core::{CheckedEntry, Entry, Field, Result, Severity, Sink};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct NopSink;

impl Sink for NopSink {
    fn enabled(&self, _severity: Severity) -> bool {
        false
    }

    fn with(&self, _fields: &[Field]) -> Arc<dyn Sink> {
        Arc::new(NopSink)
    }

    fn check<'a>(&'a self, _entry: &Entry, checked: CheckedEntry<'a>) -> CheckedEntry<'a> {
        checked
    }

    fn write(&self, _entry: &Entry, _fields: &[Field]) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
