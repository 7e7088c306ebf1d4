//! Component value lookup with the primary-value fallback.

use hl7_model::{Document, DocumentMap, PRIMARY_VALUE_KEY};

use crate::error::ArgumentError;

/// Value of the identifying (first) component of a composite.
///
/// `doc[key]`, else `doc["mainValue"]`, else the empty string.
pub fn resolve_identifying<'a>(
    doc: &'a DocumentMap,
    key: &str,
    path: &str,
) -> Result<&'a str, ArgumentError> {
    match doc.get(key) {
        Some(value) => scalar_at(value, path, key),
        None => resolve_explicit(doc, PRIMARY_VALUE_KEY, path),
    }
}

/// Value of any other component: `doc[key]`, else the empty string.
pub fn resolve_explicit<'a>(
    doc: &'a DocumentMap,
    key: &str,
    path: &str,
) -> Result<&'a str, ArgumentError> {
    doc.get(key)
        .map_or(Ok(""), |value| scalar_at(value, path, key))
}

fn scalar_at<'a>(value: &'a Document, path: &str, key: &str) -> Result<&'a str, ArgumentError> {
    value
        .as_scalar()
        .ok_or_else(|| ArgumentError::UnexpectedValue {
            path: crate::populate::join(path, key),
            expected: "a scalar",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> DocumentMap {
        Document::parse(json)
            .ok()
            .and_then(|doc| doc.as_object().cloned())
            .unwrap()
    }

    #[test]
    fn identifying_falls_back_to_main_value_then_empty() {
        let explicit = doc(r#"{"identifier": "F", "mainValue": "ignored"}"#);
        assert_eq!(resolve_identifying(&explicit, "identifier", "sex").unwrap(), "F");

        let primary = doc(r#"{"mainValue": "F"}"#);
        assert_eq!(resolve_identifying(&primary, "identifier", "sex").unwrap(), "F");

        let empty = doc("{}");
        assert_eq!(resolve_identifying(&empty, "identifier", "sex").unwrap(), "");
    }

    #[test]
    fn explicit_never_uses_main_value() {
        let primary = doc(r#"{"mainValue": "F"}"#);
        assert_eq!(resolve_explicit(&primary, "text", "sex").unwrap(), "");
    }

    #[test]
    fn nested_values_are_rejected_with_their_path() {
        let nested = doc(r#"{"text": {"a": "b"}}"#);
        let error = resolve_explicit(&nested, "text", "patientIdentification.administrativeSex")
            .unwrap_err();
        assert_eq!(error.path(), "patientIdentification.administrativeSex.text");
    }
}
