//! Generic document tree.
//!
//! A [`Document`] is what callers hand to the population engine and what the
//! extraction engine hands back: scalars, ordered objects and arrays. Numbers,
//! booleans and nulls coming from JSON are folded into scalars because the
//! typed message only ever stores text.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Ordered key/value map used for [`Document::Object`].
pub type DocumentMap = IndexMap<String, Document>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum Document {
    Scalar(String),
    Object(DocumentMap),
    Array(Vec<Document>),
}

impl Document {
    pub fn scalar(value: impl Into<String>) -> Self {
        Document::Scalar(value.into())
    }

    pub fn empty_object() -> Self {
        Document::Object(DocumentMap::new())
    }

    /// Build an object from `(key, value)` pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Document)>,
    {
        Document::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Parse JSON text into a document.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: JsonValue = serde_json::from_str(text)?;
        Ok(Document::from(value))
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::from(self.clone())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Document::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DocumentMap> {
        match self {
            Document::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key when this document is an object.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// True for an empty scalar, object or array.
    pub fn is_empty(&self) -> bool {
        match self {
            Document::Scalar(value) => value.is_empty(),
            Document::Object(map) => map.is_empty(),
            Document::Array(items) => items.is_empty(),
        }
    }

    /// Human-readable node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Scalar(_) => "scalar",
            Document::Object(_) => "object",
            Document::Array(_) => "array",
        }
    }
}

impl From<JsonValue> for Document {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Document::Scalar(String::new()),
            JsonValue::Bool(flag) => Document::Scalar(flag.to_string()),
            JsonValue::Number(number) => Document::Scalar(number.to_string()),
            JsonValue::String(text) => Document::Scalar(text),
            JsonValue::Array(items) => {
                Document::Array(items.into_iter().map(Document::from).collect())
            }
            JsonValue::Object(map) => Document::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Document::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Document> for JsonValue {
    fn from(document: Document) -> Self {
        match document {
            Document::Scalar(text) => JsonValue::String(text),
            Document::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            Document::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::Scalar(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::Scalar(value)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
