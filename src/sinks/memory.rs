//! In-process backend client that records every document

use super::payload::BackendClient;
use crate::core::{BoxError, Document};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// A document and the event time it was logged with
pub type Record = (Document, Option<DateTime<Utc>>);

/// Backend client that keeps documents in memory
#[derive(Debug, Default)]
pub struct MemoryClient {
    records: Mutex<Vec<Record>>,
    flushes: AtomicU64,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn documents(&self) -> Vec<Document> {
        self.records.lock().iter().map(|(d, _)| d.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl BackendClient for MemoryClient {
    fn log(&self, document: Document, timestamp: Option<DateTime<Utc>>) -> Result<(), BoxError> {
        self.records.lock().push((document, timestamp));
        Ok(())
    }

    fn flush(&self) -> Result<(), BoxError> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
