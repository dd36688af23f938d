//! Flat key/value payloads handed to backend clients

use super::field::{format_time, FieldPayload};
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Default key carrying the originating logger's name
pub const LOGGER_NAME_KEY: &str = "@logger";

/// Default key carrying the event message
pub const MESSAGE_KEY: &str = "@message";

/// Names of the two reserved keys injected into every document.
///
/// Reserved keys are written after the caller's fields, so a caller field
/// with the same key is replaced. [`PayloadSink`](crate::PayloadSink) counts
/// each replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentKeys {
    pub logger_name: String,
    pub message: String,
}

impl Default for DocumentKeys {
    fn default() -> Self {
        Self {
            logger_name: LOGGER_NAME_KEY.to_string(),
            message: MESSAGE_KEY.to_string(),
        }
    }
}

impl DocumentKeys {
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.logger_name || key == self.message
    }
}

/// Value type of a converted document
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Time(DateTime<Utc>),
    /// Payload passed through without conversion
    Raw(FieldPayload),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Convert to serde_json::Value; times become RFC 3339 strings
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Time(t) => serde_json::Value::String(format_time(t)),
            Value::Raw(FieldPayload::Json(v)) => v.clone(),
            Value::Raw(FieldPayload::Time(t)) => serde_json::Value::String(format_time(t)),
            Value::Raw(FieldPayload::Bytes(b)) => serde_json::Value::Array(
                b.iter().map(|byte| serde_json::Value::from(*byte)).collect(),
            ),
            Value::Raw(other) => serde_json::Value::String(other.render()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Time(t) => write!(f, "{}", format_time(t)),
            Value::Raw(p) => write!(f, "{}", p.render()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Time(t) => t.serialize(serializer),
            Value::Raw(p) => p.serialize(serializer),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(i.into())
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Number(u.into())
    }
}

/// The flattened key/value result handed to a backend client.
///
/// Keys iterate and serialize in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: BTreeMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Convert to a JSON object
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json_value()))
                .collect(),
        )
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_keys_default() {
        let keys = DocumentKeys::default();
        assert_eq!(keys.logger_name, "@logger");
        assert_eq!(keys.message, "@message");
        assert!(keys.is_reserved("@message"));
        assert!(!keys.is_reserved("message"));
    }

    #[test]
    fn test_document_serialize() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut doc = Document::new();
        doc.insert("user", "alice");
        doc.insert("attempts", 3i64);
        doc.insert("ok", true);
        doc.insert("at", Value::Time(time));
        doc.insert("tags", Value::Raw(FieldPayload::Json(serde_json::json!(["a", "b"]))));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user": "alice",
                "attempts": 3,
                "ok": true,
                "at": "2024-05-01T12:00:00Z",
                "tags": ["a", "b"],
            })
        );
        assert_eq!(doc.to_json_value()["attempts"], serde_json::json!(3));
    }

    #[test]
    fn test_document_key_order_is_stable() {
        let mut doc = Document::new();
        doc.insert("zone", "eu");
        doc.insert("@message", "hi");
        doc.insert("attempt", 2i64);

        let keys: Vec<&str> = doc.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["@message", "attempt", "zone"]);
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"@message":"hi","attempt":2,"zone":"eu"}"#
        );
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(-7i64).as_i64(), Some(-7));
        assert_eq!(Value::from(7u64).as_u64(), Some(7));
        assert_eq!(Value::Null.as_str(), None);
        assert_eq!(Value::Null.to_string(), "null");
    }
}
