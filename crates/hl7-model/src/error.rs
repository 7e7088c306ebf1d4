use thiserror::Error;

/// Addressing errors raised by the typed message tree.
///
/// These guard the schema: a write can only land on a group, segment, field
/// or repetition the definitions actually declare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("group {group} has no child `{key}`")]
    UnknownNode { group: &'static str, key: String },

    #[error("segment {segment} has no field at position {position}")]
    UnknownField {
        segment: &'static str,
        position: usize,
    },

    #[error("`{node}` is not repeatable (requested repetition {requested})")]
    NotRepeatable { node: String, requested: usize },

    #[error(
        "repetition {requested} of `{node}` requested but only {available} exist; \
         repetitions must be acquired in order"
    )]
    NonContiguousRepetition {
        node: String,
        requested: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
