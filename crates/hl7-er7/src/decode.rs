//! ER7 reader.
//!
//! Decoding runs in two passes. Each line is first parsed into a [`Segment`]
//! using the catalog definition for its ID, so composites are padded to their
//! declared length and OBX-5 is typed through its value type. The segments
//! are then placed into the structure resolved from MSH-9: walking the group
//! definitions in order, a child takes the next segment when that segment can
//! start it.

use std::iter::Peekable;
use std::vec::IntoIter;

use hl7_model::{
    Datum, FieldType, Group, GroupDef, Node, NodeDef, NodeKind, Primitive, Segment,
    TypedMessage, ValueKind,
};
use hl7_standards::{ValueType, resolve_codes, segments};
use tracing::{debug, debug_span};

use crate::error::{Er7Error, Result};
use crate::escape::Delimiters;

const MESSAGE_TYPE: usize = 9;

type Queue = Peekable<IntoIter<(usize, Segment)>>;

pub(crate) fn decode_message(text: &str) -> Result<TypedMessage> {
    let span = debug_span!("decode");
    let _guard = span.enter();

    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .collect();
    let first = lines.first().ok_or(Er7Error::Empty)?;
    if !first.starts_with("MSH") {
        return Err(Er7Error::MissingHeader {
            found: first.chars().take(3).collect(),
        });
    }
    let delimiters = Delimiters::from_header(first)?;

    let segments = lines
        .iter()
        .enumerate()
        .map(|(index, line)| Ok((index + 1, parse_segment(line, index + 1, &delimiters)?)))
        .collect::<Result<Vec<_>>>()?;

    let header = &segments[0].1;
    let message_code = header.value(MESSAGE_TYPE, 0, &[1]);
    let trigger_code = header.value(MESSAGE_TYPE, 0, &[2]);
    if message_code.is_empty() {
        return Err(Er7Error::MalformedHeader {
            reason: "MSH-9 message type is empty".to_string(),
        });
    }
    let (message_type, trigger_event, structure) = resolve_codes(message_code, trigger_code)?;
    debug!(
        structure = structure.id,
        segments = segments.len(),
        "resolved structure"
    );

    let mut message = TypedMessage::new(message_type, trigger_event, structure);
    let mut queue: Queue = segments.into_iter().peekable();
    place(message.root_mut(), &mut queue)?;
    if let Some((index, segment)) = queue.next() {
        return Err(Er7Error::UnexpectedSegment {
            segment: segment.id().to_string(),
            index,
        });
    }
    Ok(message)
}

fn parse_segment(line: &str, index: usize, delimiters: &Delimiters) -> Result<Segment> {
    let mut parts = line.split(delimiters.field);
    let id = parts.next().unwrap_or_default();
    let def = segments::segment(id).ok_or_else(|| Er7Error::UnexpectedSegment {
        segment: id.to_string(),
        index,
    })?;
    let mut segment = Segment::new(def);

    let first = if id == "MSH" {
        segment.set(1, 0, Datum::primitive(delimiters.field))?;
        let encoding = parts.next().unwrap_or_default();
        segment.set(2, 0, Datum::primitive(encoding))?;
        3
    } else {
        1
    };

    let mut deferred = Vec::new();
    for (position, raw) in (first..).zip(parts) {
        let Some(field) = def.field_at(position) else {
            debug!(segment = id, position, "ignoring field beyond definition");
            continue;
        };
        match field.field_type {
            FieldType::Fixed(kind) => {
                let repetitions = decode_field(raw, kind, field.repeatable, delimiters);
                segment.set_all(position, repetitions)?;
            }
            FieldType::Varies { discriminator } => deferred.push((position, raw, discriminator)),
        }
    }

    for (position, raw, discriminator) in deferred {
        let tag = def
            .field(discriminator)
            .map_or("", |(at, _)| segment.value(at, 0, &[]));
        let kind = ValueType::from_code(tag)
            .map_or(ValueKind::Primitive(Primitive::St), |value_type| {
                value_type.value_kind()
            });
        let repeatable = def.field_at(position).is_some_and(|field| field.repeatable);
        let repetitions = decode_field(raw, kind, repeatable, delimiters);
        segment.set_all(position, repetitions)?;
    }
    Ok(segment)
}

fn decode_field(
    raw: &str,
    kind: ValueKind,
    repeatable: bool,
    delimiters: &Delimiters,
) -> Vec<Datum> {
    if raw.is_empty() {
        return Vec::new();
    }
    let mut repetitions = raw.split(delimiters.repetition);
    if !repeatable {
        return repetitions
            .next()
            .map(|first| decode_datum(first, kind, 0, delimiters))
            .into_iter()
            .collect();
    }
    repetitions
        .map(|repetition| decode_datum(repetition, kind, 0, delimiters))
        .collect()
}

fn decode_datum(text: &str, kind: ValueKind, depth: usize, delimiters: &Delimiters) -> Datum {
    let separator = match depth {
        0 => Some(delimiters.component),
        1 => Some(delimiters.subcomponent),
        _ => None,
    };
    match (kind, separator) {
        (ValueKind::Primitive(_), Some(separator)) => {
            let head = text.split(separator).next().unwrap_or_default();
            Datum::primitive(delimiters.unescape(head))
        }
        (ValueKind::Primitive(_), None) => Datum::primitive(delimiters.unescape(text)),
        (ValueKind::Composite(data_type), Some(separator)) => {
            let mut datum = Datum::empty_for(kind);
            if let Datum::Composite(slots) = &mut datum {
                for ((slot, component), part) in slots
                    .iter_mut()
                    .zip(data_type.components)
                    .zip(text.split(separator))
                {
                    *slot = decode_datum(part, component.kind, depth + 1, delimiters);
                }
            }
            datum
        }
        (ValueKind::Composite(data_type), None) => {
            Datum::composite_of(data_type, &[delimiters.unescape(text).as_str()])
        }
    }
}

/// Can a segment with `id` start an instance of `node`?
fn starts(node: &NodeDef, id: &str) -> bool {
    match node.kind {
        NodeKind::Segment(segment) => segment.id == id,
        NodeKind::Group(group) => group_starts(group, id),
    }
}

/// A group's first set: its children up to and including the first one that
/// must be present (a required child or the marker).
fn group_starts(group: &GroupDef, id: &str) -> bool {
    for child in group.children {
        if starts(child, id) {
            return true;
        }
        if child.required || group.marker == Some(child.key) {
            return false;
        }
    }
    false
}

fn place(group: &mut Group, queue: &mut Queue) -> Result<()> {
    let def: &'static GroupDef = group.def();
    for (index, child) in def.children.iter().enumerate() {
        let mut repetition = 0;
        while queue
            .peek()
            .is_some_and(|(_, next)| starts(child, next.id()))
        {
            match group.acquire(index, repetition)? {
                Node::Segment(slot) => {
                    if let Some((_, segment)) = queue.next() {
                        *slot = segment;
                    }
                }
                Node::Group(inner) => place(inner, queue)?,
            }
            repetition += 1;
            if !child.repeatable {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7_standards::structures::{ORM_O01, ORU_R01};

    #[test]
    fn test_first_sets() {
        let order = ORU_R01
            .root
            .child("patientResult")
            .map(|(_, node)| node)
            .unwrap();
        assert!(starts(order, "PID"));
        assert!(starts(order, "ORC"));
        assert!(starts(order, "OBR"));
        assert!(!starts(order, "OBX"));

        let (_, orm_order) = ORM_O01.root.child("order").unwrap();
        assert!(starts(orm_order, "ORC"));
        assert!(!starts(orm_order, "OBR"));
    }

    #[test]
    fn test_decode_datum_pads_and_types() {
        let d = Delimiters::default();
        let datum = decode_datum(
            "Doe&van^Jane",
            ValueKind::Composite(&hl7_standards::datatypes::XPN),
            0,
            &d,
        );
        assert_eq!(datum.text(&[1, 1]), "Doe");
        assert_eq!(datum.text(&[1, 2]), "van");
        assert_eq!(datum.text(&[2]), "Jane");
        let Datum::Composite(components) = &datum else {
            panic!("expected composite");
        };
        assert_eq!(components.len(), hl7_standards::datatypes::XPN.components.len());

        let primitive = decode_datum("7.2^ignored", ValueKind::Primitive(Primitive::Nm), 0, &d);
        assert_eq!(primitive, Datum::primitive("7.2"));
    }
}
