//! HL7 v2 message model.
//!
//! - **document**: the loosely-typed [`Document`] tree exchanged with callers
//! - **definition**: static schema types (data types, segments, groups, structures)
//! - **message**: the strictly-typed [`TypedMessage`] instance tree
//! - **enums**: message type, trigger event and acknowledgement codes
//! - **codec**: the [`WireCodec`] seam implemented by wire-format crates

#![deny(unsafe_code)]

pub mod codec;
pub mod definition;
pub mod document;
pub mod enums;
pub mod error;
pub mod message;

pub use codec::WireCodec;
pub use definition::{
    ComponentDef, DataType, FieldDef, FieldType, GroupDef, HEADER_KEY, MessageStructure, NodeDef,
    NodeKind, PRIMARY_VALUE_KEY, Primitive, SegmentDef, ShapePolicy, ValueKind,
};
pub use document::{Document, DocumentMap};
pub use enums::{AckCode, MessageType, TriggerEvent};
pub use error::{ModelError, Result};
pub use message::{Datum, Group, Node, Segment, TypedMessage};
