//! ER7 writer.

use hl7_model::{Datum, Group, Node, Segment, TypedMessage};

use crate::escape::Delimiters;

pub(crate) const SEGMENT_TERMINATOR: char = '\r';

/// Serialize every segment of `message` in structure order.
pub(crate) fn encode_message(message: &TypedMessage, delimiters: &Delimiters) -> String {
    let mut segments = Vec::new();
    collect_segments(message.root(), &mut segments);

    let mut out = String::new();
    for segment in segments {
        out.push_str(&encode_segment(segment, delimiters));
        out.push(SEGMENT_TERMINATOR);
    }
    out
}

fn collect_segments<'a>(group: &'a Group, out: &mut Vec<&'a Segment>) {
    for (_, nodes) in group.children() {
        for node in nodes {
            match node {
                Node::Segment(segment) => out.push(segment),
                Node::Group(inner) => collect_segments(inner, out),
            }
        }
    }
}

pub(crate) fn encode_segment(segment: &Segment, delimiters: &Delimiters) -> String {
    let is_header = segment.id() == "MSH";
    // MSH-1 and MSH-2 are the delimiters themselves.
    let first = if is_header { 3 } else { 1 };
    let mut fields: Vec<String> = (first..=segment.def().fields.len())
        .map(|position| encode_field(segment.field(position), delimiters))
        .collect();
    trim_trailing_empty(&mut fields);

    let separator = delimiters.field.to_string();
    let mut line = segment.id().to_string();
    if is_header {
        line.push(delimiters.field);
        line.push_str(&delimiters.encoding_characters());
    }
    for field in fields {
        line.push_str(&separator);
        line.push_str(&field);
    }
    line
}

fn encode_field(repetitions: &[Datum], delimiters: &Delimiters) -> String {
    let mut parts: Vec<String> = repetitions
        .iter()
        .map(|datum| encode_datum(datum, 0, delimiters))
        .collect();
    trim_trailing_empty(&mut parts);
    parts.join(&delimiters.repetition.to_string())
}

fn encode_datum(datum: &Datum, depth: usize, delimiters: &Delimiters) -> String {
    match datum {
        Datum::Primitive(value) => delimiters.escape(value),
        Datum::Composite(components) if depth < 2 => {
            let separator = if depth == 0 {
                delimiters.component
            } else {
                delimiters.subcomponent
            };
            let mut parts: Vec<String> = components
                .iter()
                .map(|component| encode_datum(component, depth + 1, delimiters))
                .collect();
            trim_trailing_empty(&mut parts);
            parts.join(&separator.to_string())
        }
        Datum::Composite(_) => delimiters.escape(datum.as_str()),
    }
}

fn trim_trailing_empty(parts: &mut Vec<String>) {
    while parts.last().is_some_and(String::is_empty) {
        parts.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7_standards::datatypes::{CE, XPN};
    use hl7_standards::segments::{NTE, PID};

    #[test]
    fn test_trailing_empties_are_trimmed() {
        let mut pid = Segment::new(&PID);
        pid.set(5, 0, Datum::composite_of(&XPN, &["", "Jane", "", ""]))
            .unwrap();
        assert_eq!(encode_segment(&pid, &Delimiters::default()), "PID|||||^Jane");
        assert_eq!(
            encode_segment(&Segment::new(&PID), &Delimiters::default()),
            "PID"
        );
    }

    #[test]
    fn test_repetitions_and_escapes() {
        let mut nte = Segment::new(&NTE);
        nte.set_all(
            3,
            vec![Datum::primitive("a|b"), Datum::primitive("c")],
        )
        .unwrap();
        nte.set(4, 0, Datum::composite_of(&CE, &["RE", "x^y"])).unwrap();
        assert_eq!(
            encode_segment(&nte, &Delimiters::default()),
            "NTE|||a\\F\\b~c|RE^x\\S\\y"
        );
    }
}
