//! Typed message instances.
//!
//! A [`TypedMessage`] owns a tree of [`Group`] and [`Segment`] instances that
//! mirrors its [`MessageStructure`]. All mutation goes through addressed
//! accessors that reject anything the definitions do not declare, and
//! repetitions are only ever appended in order.

use crate::definition::{
    DataType, GroupDef, HEADER_KEY, MessageStructure, NodeDef, NodeKind, SegmentDef, ValueKind,
};
use crate::enums::{MessageType, TriggerEvent};
use crate::error::{ModelError, Result};

/// Value of one field repetition, component or sub-component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datum {
    Primitive(String),
    /// One entry per declared component, in declaration order.
    Composite(Vec<Datum>),
}

impl Datum {
    pub fn primitive(value: impl Into<String>) -> Self {
        Datum::Primitive(value.into())
    }

    /// An empty value shaped like `kind`.
    pub fn empty_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Primitive(_) => Datum::Primitive(String::new()),
            ValueKind::Composite(data_type) => Datum::Composite(
                data_type
                    .components
                    .iter()
                    .map(|component| Datum::empty_for(component.kind))
                    .collect(),
            ),
        }
    }

    /// A composite of `data_type` whose leading components are `values`.
    pub fn composite_of(data_type: &'static DataType, values: &[&str]) -> Self {
        let mut datum = Datum::empty_for(ValueKind::Composite(data_type));
        if let Datum::Composite(components) = &mut datum {
            for (slot, value) in components.iter_mut().zip(values) {
                *slot = Datum::primitive(*value);
            }
        }
        datum
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Datum::Primitive(value) => value.is_empty(),
            Datum::Composite(components) => components.iter().all(Datum::is_empty),
        }
    }

    /// Component at a 1-based position.
    pub fn component(&self, position: usize) -> Option<&Datum> {
        match self {
            Datum::Composite(components) => position
                .checked_sub(1)
                .and_then(|index| components.get(index)),
            Datum::Primitive(_) if position == 1 => Some(self),
            Datum::Primitive(_) => None,
        }
    }

    /// Text of the primitive, or of the first component for composites.
    pub fn as_str(&self) -> &str {
        match self {
            Datum::Primitive(value) => value,
            Datum::Composite(components) => components.first().map_or("", Datum::as_str),
        }
    }

    /// Text at a path of 1-based component positions (empty when absent).
    pub fn text(&self, path: &[usize]) -> &str {
        let mut current = self;
        for position in path {
            match current.component(*position) {
                Some(next) => current = next,
                None => return "",
            }
        }
        current.as_str()
    }
}

/// Instance of a [`SegmentDef`]. Field positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    def: &'static SegmentDef,
    fields: Vec<Vec<Datum>>,
}

impl Segment {
    pub fn new(def: &'static SegmentDef) -> Self {
        Self {
            def,
            fields: vec![Vec::new(); def.fields.len()],
        }
    }

    pub fn def(&self) -> &'static SegmentDef {
        self.def
    }

    pub fn id(&self) -> &'static str {
        self.def.id
    }

    /// Repetitions of the field at `position` (empty when unset or out of range).
    pub fn field(&self, position: usize) -> &[Datum] {
        position
            .checked_sub(1)
            .and_then(|index| self.fields.get(index))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn repetition(&self, position: usize, repetition: usize) -> Option<&Datum> {
        self.field(position).get(repetition)
    }

    /// Text of `field[repetition]` at a component path; empty when absent.
    pub fn value(&self, position: usize, repetition: usize, components: &[usize]) -> &str {
        self.repetition(position, repetition)
            .map_or("", |datum| datum.text(components))
    }

    /// Write one repetition of a field.
    ///
    /// `repetition` may replace an existing repetition or append the next one.
    pub fn set(&mut self, position: usize, repetition: usize, datum: Datum) -> Result<()> {
        let def = self.def.field_at(position).ok_or(ModelError::UnknownField {
            segment: self.def.id,
            position,
        })?;
        let node = format!("{}-{}", self.def.id, position);
        if repetition > 0 && !def.repeatable {
            return Err(ModelError::NotRepeatable {
                node,
                requested: repetition,
            });
        }
        let repetitions = &mut self.fields[position - 1];
        if repetition > repetitions.len() {
            return Err(ModelError::NonContiguousRepetition {
                node,
                requested: repetition,
                available: repetitions.len(),
            });
        }
        if repetition == repetitions.len() {
            repetitions.push(datum);
        } else {
            repetitions[repetition] = datum;
        }
        Ok(())
    }

    /// Replace every repetition of a field.
    pub fn set_all(&mut self, position: usize, repetitions: Vec<Datum>) -> Result<()> {
        let def = self.def.field_at(position).ok_or(ModelError::UnknownField {
            segment: self.def.id,
            position,
        })?;
        if repetitions.len() > 1 && !def.repeatable {
            return Err(ModelError::NotRepeatable {
                node: format!("{}-{}", self.def.id, position),
                requested: repetitions.len() - 1,
            });
        }
        self.fields[position - 1] = repetitions;
        Ok(())
    }

    /// All fields, index 0 holding field 1.
    pub fn fields(&self) -> &[Vec<Datum>] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().flatten().all(Datum::is_empty)
    }
}

/// Instance of one child slot: a segment or a nested group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Segment(Segment),
    Group(Group),
}

impl Node {
    pub fn new(def: &'static NodeDef) -> Self {
        match def.kind {
            NodeKind::Segment(segment) => Node::Segment(Segment::new(segment)),
            NodeKind::Group(group) => Node::Group(Group::new(group)),
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Node::Segment(segment) => Some(segment),
            Node::Group(_) => None,
        }
    }

    pub fn as_segment_mut(&mut self) -> Option<&mut Segment> {
        match self {
            Node::Segment(segment) => Some(segment),
            Node::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Segment(_) => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Segment(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Segment(segment) => segment.is_empty(),
            Node::Group(group) => group.is_empty(),
        }
    }
}

/// Instance of a [`GroupDef`]: one repetition list per child definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    def: &'static GroupDef,
    children: Vec<Vec<Node>>,
}

impl Group {
    pub fn new(def: &'static GroupDef) -> Self {
        Self {
            def,
            children: vec![Vec::new(); def.children.len()],
        }
    }

    pub fn def(&self) -> &'static GroupDef {
        self.def
    }

    /// Repetitions of the child at `index` in the definition.
    pub fn repetitions_at(&self, index: usize) -> &[Node] {
        self.children
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Repetitions of the child named `key`.
    pub fn repetitions(&self, key: &str) -> &[Node] {
        self.def
            .child(key)
            .map(|(index, _)| self.repetitions_at(index))
            .unwrap_or_default()
    }

    /// Get repetition `repetition` of child `index`, creating it when it is
    /// the next one in sequence.
    pub fn acquire(&mut self, index: usize, repetition: usize) -> Result<&mut Node> {
        let group: &'static GroupDef = self.def;
        let def = group.children.get(index).ok_or(ModelError::UnknownNode {
            group: group.name,
            key: format!("#{index}"),
        })?;
        if repetition > 0 && !def.repeatable {
            return Err(ModelError::NotRepeatable {
                node: def.key.to_string(),
                requested: repetition,
            });
        }
        let slot = &mut self.children[index];
        if repetition > slot.len() {
            return Err(ModelError::NonContiguousRepetition {
                node: def.key.to_string(),
                requested: repetition,
                available: slot.len(),
            });
        }
        if repetition == slot.len() {
            slot.push(Node::new(def));
        }
        Ok(&mut slot[repetition])
    }

    pub fn acquire_by_key(&mut self, key: &str, repetition: usize) -> Result<&mut Node> {
        let (index, _) = self.def.child(key).ok_or_else(|| ModelError::UnknownNode {
            group: self.def.name,
            key: key.to_string(),
        })?;
        self.acquire(index, repetition)
    }

    pub fn segment(&self, key: &str, repetition: usize) -> Option<&Segment> {
        self.repetitions(key)
            .get(repetition)
            .and_then(Node::as_segment)
    }

    pub fn group(&self, key: &str, repetition: usize) -> Option<&Group> {
        self.repetitions(key).get(repetition).and_then(Node::as_group)
    }

    pub fn segments<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Segment> + use<'a> {
        self.repetitions(key).iter().filter_map(Node::as_segment)
    }

    pub fn groups<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Group> + use<'a> {
        self.repetitions(key).iter().filter_map(Node::as_group)
    }

    /// Child definitions paired with their instantiated repetitions.
    pub fn children(&self) -> impl Iterator<Item = (&'static NodeDef, &[Node])> + '_ {
        self.def
            .children
            .iter()
            .zip(self.children.iter().map(Vec::as_slice))
    }

    pub fn is_empty(&self) -> bool {
        self.children.iter().flatten().all(Node::is_empty)
    }
}

/// A message of exactly one (message type, trigger event) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedMessage {
    message_type: MessageType,
    trigger_event: TriggerEvent,
    structure: &'static MessageStructure,
    root: Group,
}

impl TypedMessage {
    pub fn new(
        message_type: MessageType,
        trigger_event: TriggerEvent,
        structure: &'static MessageStructure,
    ) -> Self {
        Self {
            message_type,
            trigger_event,
            structure,
            root: Group::new(&structure.root),
        }
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn trigger_event(&self) -> TriggerEvent {
        self.trigger_event
    }

    pub fn structure(&self) -> &'static MessageStructure {
        self.structure
    }

    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// The MSH segment, if it has been created.
    pub fn header(&self) -> Option<&Segment> {
        self.root.segment(HEADER_KEY, 0)
    }

    /// The MSH segment, created on first access.
    pub fn header_mut(&mut self) -> Result<&mut Segment> {
        let group = self.root.def.name;
        self.root
            .acquire_by_key(HEADER_KEY, 0)?
            .as_segment_mut()
            .ok_or_else(|| ModelError::UnknownNode {
                group,
                key: HEADER_KEY.to_string(),
            })
    }
}
