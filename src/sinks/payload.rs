//! Payload adapter sink for non-native backends
//!
//! Converts structured fields into a flat [`Document`] and hands it to a
//! [`BackendClient`] such as a remote logging API or a local log relay.

use crate::core::field::format_complex;
use crate::core::{
    BoxError, CheckedEntry, Document, DocumentKeys, Entry, Field, FieldKind, FieldPayload,
    Result, RouterError, RouterMetrics, Severity, Sink, Value, FLUSH_FAILED_CONTEXT,
    LOG_FAILED_CONTEXT,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Client of a backend that accepts flat documents
pub trait BackendClient: Send + Sync {
    /// Hand one document to the backend. `timestamp` is the event time.
    fn log(
        &self,
        document: Document,
        timestamp: Option<DateTime<Utc>>,
    ) -> std::result::Result<(), BoxError>;

    fn flush(&self) -> std::result::Result<(), BoxError>;
}

/// Leaf sink that converts fields into documents for a [`BackendClient`]
///
/// # Example
///
/// ```
/// use rust_log_router::prelude::*;
/// use std::sync::Arc;
///
/// let client = Arc::new(MemoryClient::new());
/// let sink = PayloadSink::new(client.clone(), Severity::Info)
///     .with(&[Field::string("service", "billing")]);
///
/// let entry = Entry::new(Severity::Warn, "quota low").with_logger_name("api");
/// sink.write(&entry, &[Field::i64("remaining", 3)]).unwrap();
///
/// let doc = &client.documents()[0];
/// assert_eq!(doc.get("service").and_then(|v| v.as_str()), Some("billing"));
/// assert_eq!(doc.get("@message").and_then(|v| v.as_str()), Some("quota low"));
/// ```
pub struct PayloadSink {
    client: Arc<dyn BackendClient>,
    minimum: Severity,
    keys: Arc<DocumentKeys>,
    context: Arc<Document>,
    metrics: Arc<RouterMetrics>,
}

impl PayloadSink {
    pub fn new(client: Arc<dyn BackendClient>, minimum: Severity) -> Self {
        Self {
            client,
            minimum,
            keys: Arc::new(DocumentKeys::default()),
            context: Arc::new(Document::new()),
            metrics: Arc::new(RouterMetrics::new()),
        }
    }

    /// Rename the reserved logger-name and message keys
    #[must_use]
    pub fn with_keys(mut self, keys: DocumentKeys) -> Self {
        self.keys = Arc::new(keys);
        self
    }

    /// Counters shared by this sink and every sink derived from it with `with`
    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    /// Build the document for one entry.
    ///
    /// Context or caller fields under a reserved key are replaced; each
    /// replacement is counted and reported on stderr.
    pub fn document(&self, entry: &Entry, fields: &[Field]) -> Document {
        let mut document = merge_fields(&self.context, fields);
        for (key, _) in document.iter().filter(|(k, _)| self.keys.is_reserved(k)) {
            self.metrics.record_key_collision();
            eprintln!(
                "[ROUTER WARN] Field '{}' collides with a reserved key and was replaced",
                key
            );
        }
        document.insert(self.keys.logger_name.clone(), entry.logger_name.clone());
        document.insert(self.keys.message.clone(), entry.message.clone());
        document
    }
}

impl Sink for PayloadSink {
    fn enabled(&self, severity: Severity) -> bool {
        self.minimum.admits(severity)
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Sink> {
        Arc::new(PayloadSink {
            client: Arc::clone(&self.client),
            minimum: self.minimum,
            keys: Arc::clone(&self.keys),
            context: Arc::new(merge_fields(&self.context, fields)),
            metrics: Arc::clone(&self.metrics),
        })
    }

    fn check<'a>(&'a self, entry: &Entry, checked: CheckedEntry<'a>) -> CheckedEntry<'a> {
        if self.enabled(entry.severity) {
            checked.add_sink(self)
        } else {
            checked
        }
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<()> {
        let document = self.document(entry, fields);
        self.client
            .log(document, Some(entry.time))
            .map_err(|e| RouterError::backend(LOG_FAILED_CONTEXT, e))
    }

    fn flush(&self) -> Result<()> {
        self.client
            .flush()
            .map_err(|e| RouterError::backend(FLUSH_FAILED_CONTEXT, e))
    }
}

/// Copy `base` and overlay `fields` converted one by one.
///
/// Later fields replace earlier ones with the same key.
pub fn merge_fields(base: &Document, fields: &[Field]) -> Document {
    let mut document = base.clone();
    for field in fields {
        if let Some(value) = field_value(field) {
            document.insert(field.key.clone(), value);
        }
    }
    document
}

/// Convert a single field; `None` for kinds that contribute nothing.
pub fn field_value(field: &Field) -> Option<Value> {
    let value = match field.kind {
        FieldKind::Skip => return None,
        FieldKind::String => Value::String(field.string.clone()),
        FieldKind::ByteString => match &field.payload {
            Some(FieldPayload::Bytes(b)) => Value::String(String::from_utf8_lossy(b).into_owned()),
            _ => Value::String(field.string.clone()),
        },
        FieldKind::Int64 => Value::from(field.integer),
        FieldKind::Int32 => Value::from(i64::from(field.integer as i32)),
        FieldKind::Int16 => Value::from(i64::from(field.integer as i16)),
        FieldKind::Int8 => Value::from(i64::from(field.integer as i8)),
        FieldKind::Uint64 | FieldKind::Uintptr => Value::from(field.integer as u64),
        FieldKind::Uint32 => Value::from(u64::from(field.integer as u32)),
        FieldKind::Uint16 => Value::from(u64::from(field.integer as u16)),
        FieldKind::Uint8 => Value::from(u64::from(field.integer as u8)),
        FieldKind::Float64 => float_value(f64::from_bits(field.integer as u64)),
        FieldKind::Float32 => float_value(f64::from(f32::from_bits(field.integer as u32))),
        FieldKind::Bool => Value::Bool(field.integer == 1),
        FieldKind::Duration => Value::String(format_duration(field.integer)),
        FieldKind::Time => match &field.payload {
            Some(FieldPayload::Time(t)) => Value::Time(*t),
            _ => Value::Time(DateTime::from_timestamp_nanos(field.integer)),
        },
        FieldKind::Complex128 | FieldKind::Complex64 => match &field.payload {
            Some(FieldPayload::Complex { re, im }) if field.kind == FieldKind::Complex64 => {
                Value::String(format_complex(f64::from(*re as f32), f64::from(*im as f32)))
            }
            Some(payload) => Value::String(payload.render()),
            None => Value::Null,
        },
        FieldKind::Error | FieldKind::Stringer => match &field.payload {
            Some(payload) => Value::String(payload.render()),
            None => Value::Null,
        },
        FieldKind::Binary
        | FieldKind::Array
        | FieldKind::Object
        | FieldKind::Reflect
        | FieldKind::Other(_) => raw_value(field),
    };
    Some(value)
}

fn raw_value(field: &Field) -> Value {
    field.payload.clone().map_or(Value::Null, Value::Raw)
}

fn float_value(f: f64) -> Value {
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(f.to_string()))
}

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;

/// Render signed nanoseconds as `72h3m0.5s`, `1.5s`, `250ms`, `1.2µs`,
/// `42ns` or `0s`.
pub fn format_duration(nanos: i64) -> String {
    let neg = nanos < 0;
    let u = nanos.unsigned_abs();

    let mut out = String::new();
    if neg {
        out.push('-');
    }

    if u < SECOND {
        let (unit, prec) = match u {
            0 => return "0s".to_string(),
            u if u < MICROSECOND => ("ns", 0),
            u if u < MILLISECOND => ("µs", 3),
            _ => ("ms", 6),
        };
        let (whole, frac) = split_fraction(u, prec);
        out.push_str(&whole.to_string());
        out.push_str(&frac);
        out.push_str(unit);
        return out;
    }

    let (secs, frac) = split_fraction(u, 9);
    let mins = secs / 60;
    if mins > 0 {
        let hours = mins / 60;
        if hours > 0 {
            out.push_str(&format!("{}h", hours));
        }
        out.push_str(&format!("{}m", mins % 60));
    }
    out.push_str(&format!("{}{}s", secs % 60, frac));
    out
}

/// Split `v` into `v / 10^prec` and the fractional digits, trailing zeros
/// dropped (empty when the fraction is zero).
fn split_fraction(v: u64, prec: u32) -> (u64, String) {
    let pow = 10u64.pow(prec);
    let frac = v % pow;
    if frac == 0 {
        return (v / pow, String::new());
    }
    let digits = format!("{:0width$}", frac, width = prec as usize);
    (v / pow, format!(".{}", digits.trim_end_matches('0')))
}
