//! Shape normalization.
//!
//! Turns one raw document value into the ordered sequence of element
//! documents a destination expects. Scalars may carry JSON text: a scalar
//! whose trimmed content starts with `[` or `{` is decoded before the policy is
//! applied, so `"[{\"a\":\"1\"}]"` and the already-typed array behave the same.
//! `ObjectOrScalar` only decodes `{`, and `SingleScalar` never decodes.

use hl7_model::{Document, DocumentMap, PRIMARY_VALUE_KEY, ShapePolicy};

use crate::error::ArgumentError;

/// A raw value after JSON text has been decoded.
enum Decoded {
    Scalar(String),
    Object(DocumentMap),
    Array(Vec<Document>),
}

/// Normalize `raw` under `shape`.
///
/// `path` is the dotted document path of `raw`, used in errors.
pub fn normalize(
    raw: &Document,
    shape: ShapePolicy,
    path: &str,
) -> Result<Vec<Document>, ArgumentError> {
    let malformed = |reason: String| ArgumentError::MalformedShape {
        path: path.to_string(),
        shape,
        reason,
    };

    if shape == ShapePolicy::SingleScalar {
        return match raw {
            Document::Scalar(_) => Ok(vec![raw.clone()]),
            other => Err(malformed(format!("found {}", described(other)))),
        };
    }

    let decode_arrays = shape != ShapePolicy::ObjectOrScalar;
    match decode(raw, decode_arrays).map_err(malformed)? {
        Decoded::Object(map) => match shape {
            ShapePolicy::FlexibleArray
            | ShapePolicy::MultipleObjects
            | ShapePolicy::SingleObject
            | ShapePolicy::ObjectOrScalar => Ok(vec![Document::Object(map)]),
            ShapePolicy::SingleScalar => Err(malformed("found an object".to_string())),
        },
        Decoded::Scalar(text) => match shape {
            ShapePolicy::FlexibleArray | ShapePolicy::ObjectOrScalar => Ok(vec![wrap(text)]),
            ShapePolicy::MultipleObjects
            | ShapePolicy::SingleObject
            | ShapePolicy::SingleScalar => Err(malformed("found a scalar".to_string())),
        },
        Decoded::Array(items) => match shape {
            ShapePolicy::FlexibleArray => flexible_elements(items).map_err(malformed),
            ShapePolicy::MultipleObjects => object_elements(items).map_err(malformed),
            ShapePolicy::SingleObject
            | ShapePolicy::ObjectOrScalar
            | ShapePolicy::SingleScalar => Err(malformed("found an array".to_string())),
        },
    }
}

fn decode(raw: &Document, decode_arrays: bool) -> Result<Decoded, String> {
    match raw {
        Document::Object(map) => Ok(Decoded::Object(map.clone())),
        Document::Array(items) => Ok(Decoded::Array(items.clone())),
        Document::Scalar(text) => {
            let trimmed = text.trim_start();
            let looks_encoded =
                trimmed.starts_with('{') || (decode_arrays && trimmed.starts_with('['));
            if !looks_encoded {
                return Ok(Decoded::Scalar(text.clone()));
            }
            match Document::parse(text) {
                Ok(Document::Object(map)) => Ok(Decoded::Object(map)),
                Ok(Document::Array(items)) => Ok(Decoded::Array(items)),
                Ok(Document::Scalar(_)) => Err("encoded value is not an object or array".into()),
                Err(error) => Err(format!("invalid JSON: {error}")),
            }
        }
    }
}

fn described(document: &Document) -> &'static str {
    match document {
        Document::Scalar(_) => "a scalar",
        Document::Object(_) => "an object",
        Document::Array(_) => "an array",
    }
}

/// Wrap a plain scalar as `{"mainValue": scalar}`.
fn wrap(text: String) -> Document {
    Document::object([(PRIMARY_VALUE_KEY, Document::Scalar(text))])
}

fn flexible_elements(items: Vec<Document>) -> Result<Vec<Document>, String> {
    match items.first() {
        None => Ok(Vec::new()),
        Some(Document::Object(_)) => object_elements(items),
        Some(_) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Document::Scalar(text) => Ok(wrap(text)),
                other => Err(format!(
                    "element {index} is {}, expected a scalar like the first element",
                    described(&other)
                )),
            })
            .collect(),
    }
}

fn object_elements(items: Vec<Document>) -> Result<Vec<Document>, String> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Document::Object(_) => Ok(item),
            other => Err(format!("element {index} is {}", described(&other))),
        })
        .collect()
}
