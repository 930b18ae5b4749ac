//! Record representation for validation.
//!
//! A [`Record`] is the set of field values a ruleset is checked against. Host
//! types hand their values over through [`ToRecord`] instead of exposing them
//! through reflection.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::RecordError;

/// A value held by a single record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Null/missing value
    Null,
    /// Text value
    Text(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Point in time, always normalized to UTC
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns true if this value is the zero value of its type.
    ///
    /// `Null`, `""`, `0`, `0.0` and `false` are empty. Timestamps are never
    /// empty; an unset timestamp is represented as `Null`.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Int(i) => *i == 0,
            FieldValue::Float(f) => *f == 0.0,
            FieldValue::Bool(b) => !b,
            FieldValue::Timestamp(_) => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Text(_) => "text",
            FieldValue::Int(_) => "int64",
            FieldValue::Float(_) => "float64",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Timestamp(_) => "timestamp",
        }
    }

    /// Attempts to get this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a timestamp.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Converts a JSON scalar into a field value.
    ///
    /// Strings that parse as RFC 3339 become timestamps. Arrays and objects
    /// have no field representation and are rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FieldValue::Null),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float)),
            Value::String(s) => Some(match DateTime::parse_from_rfc3339(s) {
                Ok(ts) => FieldValue::Timestamp(ts.with_timezone(&Utc)),
                Err(_) => FieldValue::Text(s.clone()),
            }),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

static NULL_VALUE: FieldValue = FieldValue::Null;

/// The field values of a single record.
///
/// Missing fields read as [`FieldValue::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: HashMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, builder style.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field value, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Gets a field value if the field was set.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Gets a field value, reading missing fields as null.
    pub fn value(&self, field: &str) -> &FieldValue {
        self.values.get(field).unwrap_or(&NULL_VALUE)
    }

    /// Returns the number of set fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over the set fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Builds a record from a JSON object.
    pub fn from_json(value: &Value) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;

        let mut record = Record::new();
        for (field, raw) in object {
            let value = FieldValue::from_json(raw).ok_or_else(|| RecordError::UnsupportedValue {
                field: field.clone(),
            })?;
            record.insert(field.clone(), value);
        }

        Ok(record)
    }

    /// Parses a record from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_json(&value)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Conversion from a host type into a validatable record.
///
/// # Example
///
/// ```rust
/// use rules_core::{Record, ToRecord};
///
/// struct Loan {
///     copies: i64,
/// }
///
/// impl ToRecord for Loan {
///     fn to_record(&self) -> Record {
///         Record::new().with("copies", self.copies)
///     }
/// }
///
/// assert_eq!(Loan { copies: 2 }.to_record().value("copies").as_int(), Some(2));
/// ```
pub trait ToRecord {
    /// Snapshots the fields of `self` into a record.
    fn to_record(&self) -> Record;
}

impl ToRecord for Record {
    fn to_record(&self) -> Record {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_field_value_types() {
        assert_eq!(FieldValue::Null.type_name(), "null");
        assert_eq!(FieldValue::Text("red".into()).type_name(), "text");
        assert_eq!(FieldValue::Int(42).type_name(), "int64");
        assert_eq!(FieldValue::Float(3.5).type_name(), "float64");
        assert_eq!(FieldValue::Bool(true).type_name(), "boolean");
        assert_eq!(FieldValue::Timestamp(Utc::now()).type_name(), "timestamp");
    }

    #[test]
    fn test_zero_values_are_empty() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::Int(0).is_empty());
        assert!(FieldValue::Float(0.0).is_empty());
        assert!(FieldValue::Bool(false).is_empty());

        assert!(!FieldValue::Text("red".into()).is_empty());
        assert!(!FieldValue::Int(-1).is_empty());
        assert!(!FieldValue::Bool(true).is_empty());
        assert!(!FieldValue::Timestamp(Utc::now()).is_empty());
    }

    #[test]
    fn test_field_value_conversions() {
        let val = FieldValue::Int(42);
        assert_eq!(val.as_int(), Some(42));
        assert_eq!(val.as_float(), Some(42.0));
        assert_eq!(val.as_text(), None);

        let none: Option<i64> = None;
        assert_eq!(FieldValue::from(none), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("red")), FieldValue::Text("red".into()));
    }

    #[test]
    fn test_missing_field_reads_as_null() {
        let record = Record::new().with("Color_Bar", "red");
        assert_eq!(record.value("Color_Bar"), &FieldValue::Text("red".into()));
        assert!(record.value("Book_Frequency").is_null());
        assert_eq!(record.get("Book_Frequency"), None);
    }

    #[test]
    fn test_record_from_json() {
        let record = Record::from_json(&json!({
            "Borb_Day": "2024-03-01T10:00:00Z",
            "Color_Bar": "red",
            "Book_Frequency": 12,
            "Weight": 1.5,
            "Returned": false,
            "Note": null
        }))
        .unwrap();

        assert_eq!(record.len(), 6);
        assert_eq!(
            record.value("Borb_Day").as_timestamp(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(record.value("Color_Bar").as_text(), Some("red"));
        assert_eq!(record.value("Book_Frequency").as_int(), Some(12));
        assert_eq!(record.value("Weight").as_float(), Some(1.5));
        assert_eq!(record.value("Returned").as_bool(), Some(false));
        assert!(record.value("Note").is_null());
    }

    #[test]
    fn test_record_from_json_offset_normalized_to_utc() {
        let record = Record::from_json_str(r#"{"Borb_Day": "2024-03-01T17:00:00+07:00"}"#).unwrap();
        assert_eq!(
            record.value("Borb_Day").as_timestamp(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_record_from_json_rejects_nested_values() {
        let err = Record::from_json(&json!({"tags": ["a", "b"]})).unwrap_err();
        assert!(matches!(err, RecordError::UnsupportedValue { ref field } if field == "tags"));

        let err = Record::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, RecordError::NotAnObject));
    }
}
