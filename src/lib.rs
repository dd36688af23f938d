//! # Rust Log Router
//!
//! A runtime log-routing core: decides whether an event is emitted and what
//! shape each backend receives.
//!
//! ## Features
//!
//! - **Dynamic Threshold**: `SeverityGate` can be changed at runtime from any thread
//! - **Multiple Sinks**: `Tee` broadcasts events to any number of sinks
//! - **Structured Payloads**: `PayloadSink` turns typed fields into flat documents
//! - **Immutable Context**: derived handles never see each other's fields

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CheckedEntry, Document, DocumentKeys, Entry, Field, FieldKind, FieldPayload,
        LevelEnabler, Logger, Result, RouterConfig, RouterError, RouterMetrics, Severity,
        SeverityGate, Sink, Value,
    };
    pub use crate::sinks::{BackendClient, MemoryClient, NopSink, PayloadSink, Tee};
}

pub use core::{
    min_enabled_severity, BoxError, CheckedEntry, Document, DocumentKeys, Entry, Field,
    FieldKind, FieldPayload, LevelEnabler, Logger, Result, RouterConfig, RouterError,
    RouterMetrics, Severity, SeverityGate, Sink, Value, LOGGER_NAME_KEY, MESSAGE_KEY,
    OUTPUT_LEVEL_ENV,
};
pub use sinks::{BackendClient, MemoryClient, NopSink, PayloadSink, Tee};
