//! Core routing types and traits

pub mod config;
pub mod document;
pub mod entry;
pub mod error;
pub mod field;
pub mod gate;
pub mod logger;
pub mod metrics;
pub mod severity;
pub mod sink;

pub use config::{RouterConfig, OUTPUT_LEVEL_ENV};
pub use document::{Document, DocumentKeys, Value, LOGGER_NAME_KEY, MESSAGE_KEY};
pub use entry::Entry;
pub use error::{BoxError, Result, RouterError, FLUSH_FAILED_CONTEXT, LOG_FAILED_CONTEXT};
pub use field::{Field, FieldKind, FieldPayload};
pub use gate::{LevelEnabler, SeverityGate};
pub use logger::Logger;
pub use metrics::RouterMetrics;
pub use severity::Severity;
pub use sink::{min_enabled_severity, CheckedEntry, Sink};
