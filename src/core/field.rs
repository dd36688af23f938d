//! Structured fields attached to log events
//!
//! A [`Field`] is a key, a [`FieldKind`] tag and a payload laid out across
//! three slots: an integer (numbers, bools, durations, timestamps and float
//! bit patterns), a string, and an optional dynamic [`FieldPayload`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Kind tag of a [`Field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    ByteString,
    Int64,
    Int32,
    Int16,
    Int8,
    Uint64,
    Uint32,
    Uint16,
    Uint8,
    Uintptr,
    Float64,
    Float32,
    Bool,
    Duration,
    Time,
    Complex128,
    Complex64,
    Error,
    Stringer,
    Binary,
    Array,
    Object,
    Reflect,
    /// Contributes nothing to a converted document
    Skip,
    /// A kind this crate does not know about
    Other(u16),
}

/// Dynamic payload carried by a field
#[derive(Clone)]
pub enum FieldPayload {
    Json(serde_json::Value),
    Time(DateTime<Utc>),
    Bytes(Vec<u8>),
    Complex { re: f64, im: f64 },
    Error(Arc<dyn StdError + Send + Sync>),
    Stringer(Arc<dyn fmt::Display + Send + Sync>),
}

impl FieldPayload {
    /// Text rendering of the payload
    pub fn render(&self) -> String {
        match self {
            FieldPayload::Json(serde_json::Value::String(s)) => s.clone(),
            FieldPayload::Json(v) => v.to_string(),
            FieldPayload::Time(t) => format_time(t),
            FieldPayload::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            FieldPayload::Complex { re, im } => format_complex(*re, *im),
            FieldPayload::Error(e) => e.to_string(),
            FieldPayload::Stringer(s) => s.to_string(),
        }
    }
}

pub(crate) fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn format_complex(re: f64, im: f64) -> String {
    format!("({}{:+}i)", re, im)
}

impl fmt::Debug for FieldPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPayload::Json(v) => f.debug_tuple("Json").field(v).finish(),
            FieldPayload::Time(t) => f.debug_tuple("Time").field(t).finish(),
            FieldPayload::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            FieldPayload::Complex { re, im } => f
                .debug_struct("Complex")
                .field("re", re)
                .field("im", im)
                .finish(),
            FieldPayload::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
            FieldPayload::Stringer(s) => f.debug_tuple("Stringer").field(&s.to_string()).finish(),
        }
    }
}

impl PartialEq for FieldPayload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldPayload::Json(a), FieldPayload::Json(b)) => a == b,
            (FieldPayload::Time(a), FieldPayload::Time(b)) => a == b,
            (FieldPayload::Bytes(a), FieldPayload::Bytes(b)) => a == b,
            (
                FieldPayload::Complex { re: ar, im: ai },
                FieldPayload::Complex { re: br, im: bi },
            ) => ar == br && ai == bi,
            (FieldPayload::Error(_), FieldPayload::Error(_))
            | (FieldPayload::Stringer(_), FieldPayload::Stringer(_)) => {
                self.render() == other.render()
            }
            _ => false,
        }
    }
}

impl Serialize for FieldPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldPayload::Json(v) => v.serialize(serializer),
            FieldPayload::Time(t) => t.serialize(serializer),
            FieldPayload::Bytes(b) => b.serialize(serializer),
            other => serializer.serialize_str(&other.render()),
        }
    }
}

/// A single tagged key/value emitted alongside a log event
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub kind: FieldKind,
    pub integer: i64,
    pub string: String,
    pub payload: Option<FieldPayload>,
}

impl Field {
    /// Build a field from raw slots, e.g. for kinds without a constructor
    pub fn new(
        key: impl Into<String>,
        kind: FieldKind,
        integer: i64,
        string: impl Into<String>,
        payload: Option<FieldPayload>,
    ) -> Self {
        Self {
            key: key.into(),
            kind,
            integer,
            string: string.into(),
            payload,
        }
    }

    fn integer(key: impl Into<String>, kind: FieldKind, integer: i64) -> Self {
        Self::new(key, kind, integer, String::new(), None)
    }

    fn with_payload(key: impl Into<String>, kind: FieldKind, payload: FieldPayload) -> Self {
        Self::new(key, kind, 0, String::new(), Some(payload))
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldKind::String, 0, value, None)
    }

    pub fn byte_string(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::with_payload(key, FieldKind::ByteString, FieldPayload::Bytes(value.into()))
    }

    pub fn i64(key: impl Into<String>, value: i64) -> Self {
        Self::integer(key, FieldKind::Int64, value)
    }

    pub fn i32(key: impl Into<String>, value: i32) -> Self {
        Self::integer(key, FieldKind::Int32, i64::from(value))
    }

    pub fn i16(key: impl Into<String>, value: i16) -> Self {
        Self::integer(key, FieldKind::Int16, i64::from(value))
    }

    pub fn i8(key: impl Into<String>, value: i8) -> Self {
        Self::integer(key, FieldKind::Int8, i64::from(value))
    }

    pub fn u64(key: impl Into<String>, value: u64) -> Self {
        Self::integer(key, FieldKind::Uint64, value as i64)
    }

    pub fn u32(key: impl Into<String>, value: u32) -> Self {
        Self::integer(key, FieldKind::Uint32, i64::from(value))
    }

    pub fn u16(key: impl Into<String>, value: u16) -> Self {
        Self::integer(key, FieldKind::Uint16, i64::from(value))
    }

    pub fn u8(key: impl Into<String>, value: u8) -> Self {
        Self::integer(key, FieldKind::Uint8, i64::from(value))
    }

    pub fn uintptr(key: impl Into<String>, value: usize) -> Self {
        Self::integer(key, FieldKind::Uintptr, value as i64)
    }

    /// Stores the IEEE-754 bit pattern in the integer slot
    pub fn f64(key: impl Into<String>, value: f64) -> Self {
        Self::integer(key, FieldKind::Float64, value.to_bits() as i64)
    }

    pub fn f32(key: impl Into<String>, value: f32) -> Self {
        Self::integer(key, FieldKind::Float32, i64::from(value.to_bits()))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::integer(key, FieldKind::Bool, i64::from(value))
    }

    /// Stores whole nanoseconds, saturating at `i64::MAX`
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        let nanos = i64::try_from(value.as_nanos()).unwrap_or(i64::MAX);
        Self::integer(key, FieldKind::Duration, nanos)
    }

    /// A duration given as signed nanoseconds
    pub fn duration_nanos(key: impl Into<String>, nanos: i64) -> Self {
        Self::integer(key, FieldKind::Duration, nanos)
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::with_payload(key, FieldKind::Time, FieldPayload::Time(value))
    }

    pub fn complex128(key: impl Into<String>, re: f64, im: f64) -> Self {
        Self::with_payload(key, FieldKind::Complex128, FieldPayload::Complex { re, im })
    }

    pub fn complex64(key: impl Into<String>, re: f32, im: f32) -> Self {
        let payload = FieldPayload::Complex {
            re: f64::from(re),
            im: f64::from(im),
        };
        Self::with_payload(key, FieldKind::Complex64, payload)
    }

    /// An error under the conventional `error` key
    pub fn error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::named_error("error", err)
    }

    pub fn named_error<E>(key: impl Into<String>, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_payload(key, FieldKind::Error, FieldPayload::Error(Arc::new(err)))
    }

    pub fn stringer<T>(key: impl Into<String>, value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self::with_payload(key, FieldKind::Stringer, FieldPayload::Stringer(Arc::new(value)))
    }

    pub fn binary(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::with_payload(key, FieldKind::Binary, FieldPayload::Bytes(value.into()))
    }

    pub fn array(key: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        let payload = FieldPayload::Json(serde_json::Value::Array(values));
        Self::with_payload(key, FieldKind::Array, payload)
    }

    pub fn object(key: impl Into<String>, value: serde_json::Map<String, serde_json::Value>) -> Self {
        let payload = FieldPayload::Json(serde_json::Value::Object(value));
        Self::with_payload(key, FieldKind::Object, payload)
    }

    /// Any serializable value, captured as JSON
    pub fn reflect<T: Serialize>(key: impl Into<String>, value: &T) -> serde_json::Result<Self> {
        let json = serde_json::to_value(value)?;
        Ok(Self::with_payload(key, FieldKind::Reflect, FieldPayload::Json(json)))
    }

    /// A field that converts to nothing
    pub fn skip() -> Self {
        Self::integer("", FieldKind::Skip, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_integer_slots() {
        assert_eq!(Field::i8("k", -3).integer, -3);
        assert_eq!(Field::u64("k", u64::MAX).integer as u64, u64::MAX);
        assert_eq!(Field::bool("k", true).integer, 1);
        assert_eq!(Field::bool("k", false).integer, 0);
        assert_eq!(f64::from_bits(Field::f64("k", 2.5).integer as u64), 2.5);
        assert_eq!(f32::from_bits(Field::f32("k", 0.25).integer as u32), 0.25);
    }

    #[test]
    fn test_duration_saturates() {
        let field = Field::duration("elapsed", Duration::from_millis(1500));
        assert_eq!(field.integer, 1_500_000_000);

        let field = Field::duration("forever", Duration::MAX);
        assert_eq!(field.integer, i64::MAX);
    }

    #[test]
    fn test_payload_render() {
        let err = io::Error::new(io::ErrorKind::NotFound, "no such relay");
        let field = Field::error(err);
        assert_eq!(field.key, "error");
        assert_eq!(field.payload.as_ref().map(FieldPayload::render).as_deref(), Some("no such relay"));

        assert_eq!(format_complex(1.0, 2.0), "(1+2i)");
        assert_eq!(format_complex(1.5, -0.5), "(1.5-0.5i)");
    }

    #[test]
    fn test_reflect_captures_json() {
        #[derive(Serialize)]
        struct Peer {
            host: &'static str,
            port: u16,
        }

        let field = Field::reflect("peer", &Peer { host: "relay", port: 514 }).unwrap();
        assert_eq!(field.kind, FieldKind::Reflect);
        assert_eq!(
            field.payload,
            Some(FieldPayload::Json(serde_json::json!({"host": "relay", "port": 514})))
        );
    }
}
