//! The Document type - a tree-shaped value that jsondb decomposes and rebuilds.
//!
//! Containers (`Object`, `Array`) become Directories in the flat store, every
//! other variant becomes a single Leaf.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A hierarchical, JSON-like document.
///
/// # Design Notes
///
/// - `Object` uses `BTreeMap`: a Directory listing is read back in sorted
///   order anyway, so keeping objects sorted makes round trips compare equal.
/// - `Number` keeps serde_json's number so integers and floats keep their
///   literal form through a leaf write.
/// - `Date` is separate from `String` even though both are stored quoted.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Document {
    /// Absence of a value. Also what reading a missing path yields.
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// A point in time, stored as an RFC 3339 string.
    Date(DateTime<FixedOffset>),
    /// Ordered sequence of documents.
    Array(Vec<Document>),
    /// Named children.
    Object(BTreeMap<String, Document>),
}

impl Document {
    /// Create an empty object.
    pub fn object() -> Self {
        Document::Object(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Document::Array(Vec::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Document::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Document::Object(_))
    }

    /// True for every variant that is stored as a single Leaf.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Document::Array(_) | Document::Object(_))
    }

    /// Look up a named child of an object.
    pub fn get(&self, name: &str) -> Option<&Document> {
        match self {
            Document::Object(map) => map.get(name),
            _ => None,
        }
    }

    /// Look up an element of an array.
    pub fn index(&self, i: usize) -> Option<&Document> {
        match self {
            Document::Array(items) => items.get(i),
            _ => None,
        }
    }

    /// Convert into a plain JSON value. Dates become RFC 3339 strings.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Document::Null => JsonValue::Null,
            Document::Bool(b) => JsonValue::Bool(*b),
            Document::Number(n) => JsonValue::Number(n.clone()),
            Document::String(s) => JsonValue::String(s.clone()),
            Document::Date(d) => JsonValue::String(format_date(d)),
            Document::Array(items) => JsonValue::Array(items.iter().map(Document::to_json).collect()),
            Document::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Like `From<JsonValue>`, but strings that parse as RFC 3339 become `Date`.
    ///
    /// This is how stored leaves are read back: a quoted date and a quoted
    /// string are indistinguishable in the flat store.
    pub fn from_json_detecting_dates(value: JsonValue) -> Self {
        match value {
            JsonValue::String(s) => match parse_date(&s) {
                Some(date) => Document::Date(date),
                None => Document::String(s),
            },
            JsonValue::Array(items) => Document::Array(
                items
                    .into_iter()
                    .map(Document::from_json_detecting_dates)
                    .collect(),
            ),
            JsonValue::Object(map) => Document::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Document::from_json_detecting_dates(v)))
                    .collect(),
            ),
            other => Document::from(other),
        }
    }
}

/// Format a date the way leaves store it.
pub(crate) fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

// Conversion from common types

impl From<JsonValue> for Document {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Document::Null,
            JsonValue::Bool(b) => Document::Bool(b),
            JsonValue::Number(n) => Document::Number(n),
            JsonValue::String(s) => Document::String(s),
            JsonValue::Array(items) => {
                Document::Array(items.into_iter().map(Document::from).collect())
            }
            JsonValue::Object(map) => Document::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Document::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Document> for JsonValue {
    fn from(doc: &Document) -> Self {
        doc.to_json()
    }
}

impl From<bool> for Document {
    fn from(v: bool) -> Self {
        Document::Bool(v)
    }
}

impl From<i64> for Document {
    fn from(v: i64) -> Self {
        Document::Number(v.into())
    }
}

impl From<i32> for Document {
    fn from(v: i32) -> Self {
        Document::Number(v.into())
    }
}

impl From<u64> for Document {
    fn from(v: u64) -> Self {
        Document::Number(v.into())
    }
}

/// Non-finite floats have no JSON literal and become `Null`.
impl From<f64> for Document {
    fn from(v: f64) -> Self {
        serde_json::Number::from_f64(v)
            .map(Document::Number)
            .unwrap_or(Document::Null)
    }
}

impl From<String> for Document {
    fn from(v: String) -> Self {
        Document::String(v)
    }
}

impl From<&str> for Document {
    fn from(v: &str) -> Self {
        Document::String(v.to_string())
    }
}

impl From<DateTime<FixedOffset>> for Document {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Document::Date(v)
    }
}

impl From<DateTime<Utc>> for Document {
    fn from(v: DateTime<Utc>) -> Self {
        Document::Date(v.fixed_offset())
    }
}

impl<T: Into<Document>> From<Vec<T>> for Document {
    fn from(v: Vec<T>) -> Self {
        Document::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Document>> From<Option<T>> for Document {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Document::Null)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(b) => serializer.serialize_bool(*b),
            Document::Number(n) => n.serialize(serializer),
            Document::String(s) => serializer.serialize_str(s),
            Document::Date(d) => serializer.serialize_str(&format_date(d)),
            Document::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Document, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: JsonValue = Deserialize::deserialize(deserializer)?;
        Ok(Document::from(value))
    }
}
