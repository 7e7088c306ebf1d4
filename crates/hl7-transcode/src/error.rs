use hl7_model::{ModelError, ShapePolicy, TriggerEvent};
use thiserror::Error;

/// Caller-input faults raised during population.
///
/// Every variant except [`ArgumentError::EmptyBody`] carries the dotted
/// document path of the offending value, e.g. `order[1].commonOrder.fooBar`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("body cannot be empty")]
    EmptyBody,

    #[error("unrecognized key `{path}` (not defined for {host})")]
    UnknownKey { path: String, host: &'static str },

    #[error("`{path}` must be {shape}: {reason}")]
    MalformedShape {
        path: String,
        shape: ShapePolicy,
        reason: String,
    },

    #[error("`{path}` must be {expected}")]
    UnexpectedValue {
        path: String,
        expected: &'static str,
    },

    #[error("`{path}` has unknown value type `{tag}`")]
    UnknownValueType { path: String, tag: String },

    #[error("`{path}` cannot be written: {source}")]
    Address {
        path: String,
        #[source]
        source: ModelError,
    },
}

impl ArgumentError {
    /// Dotted document path of the offending value (empty for the root).
    pub fn path(&self) -> &str {
        match self {
            Self::EmptyBody => "",
            Self::UnknownKey { path, .. }
            | Self::MalformedShape { path, .. }
            | Self::UnexpectedValue { path, .. }
            | Self::UnknownValueType { path, .. }
            | Self::Address { path, .. } => path,
        }
    }

    pub(crate) fn address(path: impl Into<String>, source: ModelError) -> Self {
        Self::Address {
            path: path.into(),
            source,
        }
    }
}

/// Data-consistency faults raised during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error(
        "{identifier} mismatch in order {repetition}: common order has `{order}`, \
         observation request has `{request}`"
    )]
    IdentifierMismatch {
        repetition: usize,
        identifier: &'static str,
        order: String,
        request: String,
    },

    #[error("no order extraction is defined for trigger event {trigger}")]
    UnsupportedTrigger { trigger: TriggerEvent },

    #[error("trigger event {trigger} expects a {expected} message but got {actual}")]
    StructureMismatch {
        trigger: TriggerEvent,
        expected: &'static str,
        actual: &'static str,
    },
}
