//! Dynamic payload value model.
//!
//! Category payloads are schemaless: a balance sheet is a dated mapping of
//! line items, `info` is a flat field mapping, `news` is a list of item
//! mappings, `isin` is a bare string. [`Value`] covers all of these shapes
//! while keeping two guarantees the JSON output depends on:
//!
//! - mappings preserve insertion order, so serialized documents are stable
//!   and diffable across runs;
//! - date/time scalars are kept as real values until serialization, where
//!   they become ISO-8601 text.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Insertion-ordered mapping used for all object-shaped payloads.
pub type Map = IndexMap<String, Value>;

/// A single payload value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Explicit missing-value marker; serializes to JSON null.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar. May be non-finite before normalization.
    Float(f64),
    /// Text scalar.
    Text(String),
    /// Date/time scalar; serializes to ISO-8601 text.
    DateTime(NaiveDateTime),
    /// Sequence of values.
    List(Vec<Value>),
    /// Insertion-ordered mapping with text keys.
    Map(Map),
}

impl Value {
    /// Replaces every non-finite numeric leaf with [`Value::Null`],
    /// depth-first through nested mappings and sequences.
    ///
    /// Idempotent: normalizing an already-normalized value is a no-op.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Float(f) if !f.is_finite() => Self::Null,
            Self::List(items) => Self::List(items.into_iter().map(Self::normalized).collect()),
            Self::Map(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, v.normalized()))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Returns true for an empty mapping, an empty sequence, or null.
    ///
    /// Used by provider adapters to decide "no data" before a payload is
    /// admitted into a document; downstream code never inspects shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Converts a parsed JSON value into a [`Value`].
    ///
    /// Integral numbers become [`Value::Int`]; everything else maps directly.
    /// Object key order is preserved.
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            // Non-finite floats cannot be represented in JSON; the lossy
            // fallback matches what normalization would have produced.
            Self::Float(_) => serializer.serialize_unit(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::DateTime(dt) => {
                serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Value, E> {
        Ok(Value::Int(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Value, E> {
        Ok(i64::try_from(u).map_or(Value::Float(u as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Float(f))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::Text(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::Text(s))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut entries = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            entries.insert(key, value);
        }
        Ok(Value::Map(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn nested_with_nan() -> Value {
        let mut inner = Map::new();
        inner.insert("good".to_string(), Value::Float(1.5));
        inner.insert("bad".to_string(), Value::Float(f64::NAN));
        let mut outer = Map::new();
        outer.insert(
            "items".to_string(),
            Value::List(vec![Value::Float(f64::INFINITY), Value::Int(3)]),
        );
        outer.insert("inner".to_string(), Value::Map(inner));
        Value::Map(outer)
    }

    #[test]
    fn test_normalize_scrubs_non_finite_recursively() {
        let normalized = nested_with_nan().normalized();
        let Value::Map(outer) = &normalized else {
            panic!("expected map");
        };
        assert_eq!(
            outer["items"],
            Value::List(vec![Value::Null, Value::Int(3)])
        );
        let Value::Map(inner) = &outer["inner"] else {
            panic!("expected map");
        };
        assert_eq!(inner["good"], Value::Float(1.5));
        assert_eq!(inner["bad"], Value::Null);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = nested_with_nan().normalized();
        assert_eq!(once.clone().normalized(), once);
    }

    #[test]
    fn test_datetime_serializes_iso8601() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let json = serde_json::to_string(&Value::DateTime(dt)).unwrap();
        assert_eq!(json, "\"2023-12-31T00:00:00\"");
    }

    #[test]
    fn test_serialize_preserves_insertion_order() {
        let mut entries = Map::new();
        entries.insert("zebra".to_string(), Value::Int(1));
        entries.insert("apple".to_string(), Value::Int(2));
        let json = serde_json::to_string(&Value::Map(entries)).unwrap();
        assert_eq!(json, r#"{"zebra":1,"apple":2}"#);
    }

    #[test]
    fn test_round_trip_for_primitives_and_containers() {
        let original = nested_with_nan().normalized();
        let json = serde_json::to_string(&original).unwrap();
        let reparsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_integral_numbers_deserialize_as_int() {
        let value: Value = serde_json::from_str("[42, 1.25, null, true]").unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::Int(42),
                Value::Float(1.25),
                Value::Null,
                Value::Bool(true),
            ])
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::Map(Map::new()).is_empty());
        assert!(Value::List(Vec::new()).is_empty());
        assert!(!Value::Int(0).is_empty());
        assert!(!Value::Text(String::new()).is_empty());
    }
}
