//! Static schema definitions.
//!
//! Data types, segments, groups and message structures are declared once as
//! `static` tables (see the `hl7-standards` crate) and referenced by the
//! instance tree in [`crate::message`]. Every table entry carries the
//! camelCase document key used by the population engine.

use std::fmt;

/// Key a synthetic object uses for its single "primary value".
///
/// Plain scalars are wrapped as `{"mainValue": scalar}` and the first
/// component of every composite falls back to this key.
pub const PRIMARY_VALUE_KEY: &str = "mainValue";

/// Document key of the MSH segment in every message structure.
pub const HEADER_KEY: &str = "messageHeader";

/// Primitive HL7 data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// String data.
    St,
    /// Text data.
    Tx,
    /// Formatted text.
    Ft,
    /// Coded value for HL7-defined tables.
    Id,
    /// Coded value for user-defined tables.
    Is,
    /// Numeric.
    Nm,
    /// Sequence ID.
    Si,
    /// Date.
    Dt,
    /// Date/time.
    Dtm,
    /// Time.
    Tm,
}

impl Primitive {
    pub fn code(&self) -> &'static str {
        match self {
            Primitive::St => "ST",
            Primitive::Tx => "TX",
            Primitive::Ft => "FT",
            Primitive::Id => "ID",
            Primitive::Is => "IS",
            Primitive::Nm => "NM",
            Primitive::Si => "SI",
            Primitive::Dt => "DT",
            Primitive::Dtm => "DTM",
            Primitive::Tm => "TM",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A composite data type: an ordered list of named components.
#[derive(Debug)]
pub struct DataType {
    pub code: &'static str,
    pub description: &'static str,
    pub components: &'static [ComponentDef],
}

impl DataType {
    /// Find a component by document key, returning its zero-based index.
    pub fn component(&self, key: &str) -> Option<(usize, &'static ComponentDef)> {
        self.components
            .iter()
            .enumerate()
            .find(|(_, component)| component.key == key)
    }

    pub fn component_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.iter().map(|component| component.key)
    }
}

impl PartialEq for DataType {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for DataType {}

#[derive(Debug)]
pub struct ComponentDef {
    pub key: &'static str,
    pub kind: ValueKind,
}

impl ComponentDef {
    pub const fn primitive(key: &'static str, primitive: Primitive) -> Self {
        Self {
            key,
            kind: ValueKind::Primitive(primitive),
        }
    }

    pub const fn composite(key: &'static str, data_type: &'static DataType) -> Self {
        Self {
            key,
            kind: ValueKind::Composite(data_type),
        }
    }
}

/// Concrete type of a field or component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Primitive(Primitive),
    Composite(&'static DataType),
}

impl ValueKind {
    pub fn code(&self) -> &'static str {
        match self {
            ValueKind::Primitive(primitive) => primitive.code(),
            ValueKind::Composite(data_type) => data_type.code,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, ValueKind::Composite(_))
    }
}

/// Declared type of a segment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Always the same type.
    Fixed(ValueKind),
    /// Type chosen at runtime from the value of the sibling field `discriminator`.
    Varies { discriminator: &'static str },
}

#[derive(Debug)]
pub struct FieldDef {
    pub key: &'static str,
    pub field_type: FieldType,
    pub repeatable: bool,
}

impl FieldDef {
    pub const fn primitive(key: &'static str, primitive: Primitive) -> Self {
        Self {
            key,
            field_type: FieldType::Fixed(ValueKind::Primitive(primitive)),
            repeatable: false,
        }
    }

    pub const fn composite(key: &'static str, data_type: &'static DataType) -> Self {
        Self {
            key,
            field_type: FieldType::Fixed(ValueKind::Composite(data_type)),
            repeatable: false,
        }
    }

    pub const fn varies(key: &'static str, discriminator: &'static str) -> Self {
        Self {
            key,
            field_type: FieldType::Varies { discriminator },
            repeatable: false,
        }
    }

    pub const fn repeating(self) -> Self {
        Self {
            repeatable: true,
            ..self
        }
    }
}

/// A segment: a flat, ordered record of fields. Field positions are 1-based.
#[derive(Debug)]
pub struct SegmentDef {
    pub id: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldDef],
}

impl SegmentDef {
    /// Find a field by document key, returning its 1-based position.
    pub fn field(&self, key: &str) -> Option<(usize, &'static FieldDef)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.key == key)
            .map(|(index, field)| (index + 1, field))
    }

    /// Field definition at a 1-based position.
    pub fn field_at(&self, position: usize) -> Option<&'static FieldDef> {
        position
            .checked_sub(1)
            .and_then(|index| self.fields.get(index))
    }
}

impl PartialEq for SegmentDef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SegmentDef {}

/// How a raw document value is interpreted as one or many sub-documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapePolicy {
    /// Array of objects or array of scalars; a lone object or scalar is one element.
    FlexibleArray,
    /// Array of objects; a lone object is one element.
    MultipleObjects,
    /// Exactly one object.
    SingleObject,
    /// One object, or a scalar wrapped as a primary value.
    ObjectOrScalar,
    /// Exactly one plain scalar.
    SingleScalar,
}

impl ShapePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapePolicy::FlexibleArray => "array of objects or scalars",
            ShapePolicy::MultipleObjects => "array of objects",
            ShapePolicy::SingleObject => "single object",
            ShapePolicy::ObjectOrScalar => "object or scalar",
            ShapePolicy::SingleScalar => "single scalar",
        }
    }
}

impl fmt::Display for ShapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum NodeKind {
    Segment(&'static SegmentDef),
    Group(&'static GroupDef),
}

/// One child slot of a group.
#[derive(Debug)]
pub struct NodeDef {
    pub key: &'static str,
    pub kind: NodeKind,
    pub repeatable: bool,
    pub required: bool,
    pub shape: ShapePolicy,
}

impl NodeDef {
    pub const fn segment(key: &'static str, segment: &'static SegmentDef) -> Self {
        Self {
            key,
            kind: NodeKind::Segment(segment),
            repeatable: false,
            required: false,
            shape: ShapePolicy::SingleObject,
        }
    }

    pub const fn group(key: &'static str, group: &'static GroupDef) -> Self {
        Self {
            key,
            kind: NodeKind::Group(group),
            repeatable: false,
            required: false,
            shape: ShapePolicy::SingleObject,
        }
    }

    pub const fn repeating(self) -> Self {
        Self {
            repeatable: true,
            shape: ShapePolicy::MultipleObjects,
            ..self
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn with_shape(self, shape: ShapePolicy) -> Self {
        Self { shape, ..self }
    }

    /// Segment ID or group name, for messages and logs.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Segment(segment) => segment.id,
            NodeKind::Group(group) => group.name,
        }
    }
}

/// A group: an ordered set of segments and nested groups.
///
/// When `marker` is set, an element document containing that key is read as a
/// bundle of sibling keys; without it the whole element is the field map of
/// the marker's segment.
#[derive(Debug)]
pub struct GroupDef {
    pub name: &'static str,
    pub marker: Option<&'static str>,
    pub children: &'static [NodeDef],
}

impl GroupDef {
    pub fn child(&self, key: &str) -> Option<(usize, &'static NodeDef)> {
        self.children
            .iter()
            .enumerate()
            .find(|(_, child)| child.key == key)
    }

    pub fn child_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.children.iter().map(|child| child.key)
    }
}

impl PartialEq for GroupDef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for GroupDef {}

/// A complete message structure such as `ORU_R01`.
#[derive(Debug)]
pub struct MessageStructure {
    pub id: &'static str,
    pub description: &'static str,
    pub root: GroupDef,
}

impl PartialEq for MessageStructure {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MessageStructure {}
