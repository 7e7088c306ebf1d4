//! Population of fields whose type is named by a sibling field (OBX-5).

use hl7_model::{Document, DocumentMap, Segment, ShapePolicy, ValueKind};
use hl7_standards::ValueType;
use tracing::warn;

use crate::config::{TranscodeConfig, UnknownValueTypePolicy};
use crate::error::ArgumentError;
use crate::populate::datum;
use crate::resolve::resolve_explicit;
use crate::shape::normalize;

/// Resolve a discriminator value to the concrete type it selects.
pub fn resolve_variant(tag: &str) -> Option<ValueKind> {
    ValueType::from_code(tag).map(|value_type| value_type.value_kind())
}

/// Write the variant field at `position` of `segment`.
///
/// The discriminator is read from the segment's document first and from the
/// segment itself second. An unknown discriminator writes nothing; under
/// [`UnknownValueTypePolicy::Reject`] it is an error instead.
pub(crate) fn populate_variant(
    segment: &mut Segment,
    position: usize,
    discriminator: &str,
    doc: &DocumentMap,
    value: &Document,
    path: &str,
    config: &TranscodeConfig,
) -> Result<(), ArgumentError> {
    let tag = match doc.get(discriminator) {
        Some(_) => resolve_explicit(doc, discriminator, parent(path))?.to_string(),
        None => segment
            .def()
            .field(discriminator)
            .map(|(sibling, _)| segment.value(sibling, 0, &[]).to_string())
            .unwrap_or_default(),
    };

    let Some(kind) = resolve_variant(&tag) else {
        return match config.unknown_value_type {
            UnknownValueTypePolicy::Reject => Err(ArgumentError::UnknownValueType {
                path: path.to_string(),
                tag,
            }),
            UnknownValueTypePolicy::Drop => {
                warn!(path, value_type = %tag, "dropping value with unknown value type");
                Ok(())
            }
        };
    };

    let repeatable = segment
        .def()
        .field_at(position)
        .is_some_and(|field| field.repeatable);
    let shape = match (repeatable, kind.is_composite()) {
        (true, _) => ShapePolicy::FlexibleArray,
        (false, true) => ShapePolicy::ObjectOrScalar,
        (false, false) => ShapePolicy::SingleScalar,
    };

    let elements = normalize(value, shape, path)?;
    let data = elements
        .iter()
        .enumerate()
        .map(|(repetition, element)| {
            let element_path = if repeatable {
                format!("{path}[{repetition}]")
            } else {
                path.to_string()
            };
            datum(kind, element, &element_path)
        })
        .collect::<Result<Vec<_>, _>>()?;
    segment
        .set_all(position, data)
        .map_err(|source| ArgumentError::address(path, source))
}

/// Path of the object holding the key at `path`.
fn parent(path: &str) -> &str {
    path.rsplit_once('.').map_or("", |(parent, _)| parent)
}
