//! Population engine: generic document to typed message.
//!
//! One recursive walk over the structure's [`GroupDef`] tree. Every document
//! key is resolved against the definitions of the node it appears in before
//! anything is written, values are shaped by [`normalize`], and composites are
//! filled component by component from the catalog. The first error aborts the
//! walk; whatever was written before it stays written.

use hl7_model::{
    DataType, Datum, Document, DocumentMap, FieldDef, FieldType, Group, GroupDef, Node,
    PRIMARY_VALUE_KEY, Segment, ShapePolicy, TypedMessage, ValueKind,
};
use tracing::{debug, debug_span};

use crate::config::TranscodeConfig;
use crate::error::ArgumentError;
use crate::resolve::{resolve_explicit, resolve_identifying};
use crate::shape::normalize;
use crate::variant::populate_variant;

/// Populate `message` from `document` without touching MSH defaults.
///
/// Most callers want [`crate::populate_message`], which also fills the header.
pub fn populate(
    message: &mut TypedMessage,
    document: &Document,
    config: &TranscodeConfig,
) -> Result<(), ArgumentError> {
    let span = debug_span!("populate", structure = message.structure().id);
    let _guard = span.enter();

    if document.is_empty() {
        return Err(ArgumentError::EmptyBody);
    }
    let root = normalize(document, ShapePolicy::SingleObject, "")?;
    let Some(Document::Object(map)) = root.first() else {
        return Err(ArgumentError::EmptyBody);
    };
    if map.is_empty() {
        return Err(ArgumentError::EmptyBody);
    }

    Populator { config }.group(message.root_mut(), map, "")
}

/// Append `key` to a dotted path.
pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Path of repetition `index` of a destination at `path`.
fn element_path(path: &str, repeatable: bool, index: usize) -> String {
    if repeatable {
        format!("{path}[{index}]")
    } else {
        path.to_string()
    }
}

/// Shape policy of a fixed-type field.
pub(crate) fn field_shape(field: &FieldDef, kind: ValueKind) -> ShapePolicy {
    if field.repeatable {
        ShapePolicy::FlexibleArray
    } else if kind.is_composite() {
        ShapePolicy::ObjectOrScalar
    } else {
        ShapePolicy::SingleScalar
    }
}

struct Populator<'c> {
    config: &'c TranscodeConfig,
}

impl Populator<'_> {
    /// Write every key of `doc` into `group` (bundle form).
    fn group(&self, group: &mut Group, doc: &DocumentMap, path: &str) -> Result<(), ArgumentError> {
        let def: &'static GroupDef = group.def();
        for (key, value) in doc {
            let node_path = join(path, key);
            let (index, node) = def.child(key).ok_or_else(|| ArgumentError::UnknownKey {
                path: node_path.clone(),
                host: def.name,
            })?;
            debug!(path = %node_path, node = node.type_name(), "populating node");

            let elements = normalize(value, node.shape, &node_path)?;
            for (repetition, element) in elements.iter().enumerate() {
                let item_path = element_path(&node_path, node.repeatable, repetition);
                let map = expect_object(element, &item_path)?;
                let child = group
                    .acquire(index, repetition)
                    .map_err(|source| ArgumentError::address(item_path.clone(), source))?;
                match child {
                    Node::Segment(segment) => self.segment(segment, map, &item_path)?,
                    Node::Group(nested) => self.group_element(nested, map, &item_path)?,
                }
            }
        }
        Ok(())
    }

    /// Write one element of a nested group, choosing bundle or shorthand form
    /// from the group's marker key.
    fn group_element(
        &self,
        group: &mut Group,
        doc: &DocumentMap,
        path: &str,
    ) -> Result<(), ArgumentError> {
        let def: &'static GroupDef = group.def();
        match def.marker {
            Some(marker) if !doc.contains_key(marker) => {
                let (index, _) = def.child(marker).ok_or_else(|| ArgumentError::UnknownKey {
                    path: join(path, marker),
                    host: def.name,
                })?;
                let node = group
                    .acquire(index, 0)
                    .map_err(|source| ArgumentError::address(path, source))?;
                match node {
                    Node::Segment(segment) => self.segment(segment, doc, path),
                    Node::Group(nested) => self.group_element(nested, doc, path),
                }
            }
            _ => self.group(group, doc, path),
        }
    }

    fn segment(
        &self,
        segment: &mut Segment,
        doc: &DocumentMap,
        path: &str,
    ) -> Result<(), ArgumentError> {
        let def = segment.def();
        for (key, value) in doc {
            let field_path = join(path, key);
            let (position, field) = def.field(key).ok_or_else(|| ArgumentError::UnknownKey {
                path: field_path.clone(),
                host: def.id,
            })?;

            match field.field_type {
                FieldType::Fixed(kind) => {
                    let elements = normalize(value, field_shape(field, kind), &field_path)?;
                    let data = elements
                        .iter()
                        .enumerate()
                        .map(|(repetition, element)| {
                            datum(
                                kind,
                                element,
                                &element_path(&field_path, field.repeatable, repetition),
                            )
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    segment
                        .set_all(position, data)
                        .map_err(|source| ArgumentError::address(field_path.clone(), source))?;
                }
                FieldType::Varies { discriminator } => populate_variant(
                    segment,
                    position,
                    discriminator,
                    doc,
                    value,
                    &field_path,
                    self.config,
                )?,
            }
        }
        Ok(())
    }
}

fn expect_object<'a>(element: &'a Document, path: &str) -> Result<&'a DocumentMap, ArgumentError> {
    element
        .as_object()
        .ok_or_else(|| ArgumentError::UnexpectedValue {
            path: path.to_string(),
            expected: "an object",
        })
}

/// Build the value of one field repetition from a normalized element.
pub(crate) fn datum(kind: ValueKind, element: &Document, path: &str) -> Result<Datum, ArgumentError> {
    match (kind, element) {
        (ValueKind::Primitive(_), Document::Scalar(text)) => Ok(Datum::primitive(text.as_str())),
        (ValueKind::Primitive(primitive), Document::Object(map)) => {
            if let Some(key) = map.keys().find(|key| key.as_str() != PRIMARY_VALUE_KEY) {
                return Err(ArgumentError::UnknownKey {
                    path: join(path, key),
                    host: primitive.code(),
                });
            }
            Ok(Datum::primitive(resolve_explicit(
                map,
                PRIMARY_VALUE_KEY,
                path,
            )?))
        }
        (ValueKind::Composite(data_type), Document::Object(map)) => {
            composite(data_type, map, path)
        }
        (ValueKind::Composite(data_type), Document::Scalar(text)) => {
            let wrapped = DocumentMap::from([(
                PRIMARY_VALUE_KEY.to_string(),
                Document::scalar(text.as_str()),
            )]);
            composite(data_type, &wrapped, path)
        }
        (_, Document::Array(_)) => Err(ArgumentError::UnexpectedValue {
            path: path.to_string(),
            expected: "an object or scalar",
        }),
    }
}

/// Fill a composite of `data_type` from its document.
///
/// The first component resolves through the primary-value fallback, the rest
/// by explicit key only. Composite components are shaped as object-or-scalar
/// and filled recursively.
pub fn composite(
    data_type: &'static DataType,
    doc: &DocumentMap,
    path: &str,
) -> Result<Datum, ArgumentError> {
    if let Some(key) = doc
        .keys()
        .find(|key| key.as_str() != PRIMARY_VALUE_KEY && data_type.component(key).is_none())
    {
        return Err(ArgumentError::UnknownKey {
            path: join(path, key),
            host: data_type.code,
        });
    }

    let mut components = Vec::with_capacity(data_type.components.len());
    for (index, component) in data_type.components.iter().enumerate() {
        let value = match component.kind {
            ValueKind::Primitive(_) => {
                let text = if index == 0 {
                    resolve_identifying(doc, component.key, path)?
                } else {
                    resolve_explicit(doc, component.key, path)?
                };
                Datum::primitive(text)
            }
            ValueKind::Composite(nested) => {
                let raw = match doc.get(component.key) {
                    Some(raw) => Some(raw),
                    None if index == 0 => doc.get(PRIMARY_VALUE_KEY),
                    None => None,
                };
                match raw {
                    None => Datum::empty_for(component.kind),
                    Some(raw) => {
                        let component_path = join(path, component.key);
                        let elements =
                            normalize(raw, ShapePolicy::ObjectOrScalar, &component_path)?;
                        match elements.first() {
                            Some(element) => composite(
                                nested,
                                expect_object(element, &component_path)?,
                                &component_path,
                            )?,
                            None => Datum::empty_for(component.kind),
                        }
                    }
                }
            }
        };
        components.push(value);
    }
    Ok(Datum::Composite(components))
}
