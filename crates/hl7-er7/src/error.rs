//! Error types for ER7 encoding and decoding.

use hl7_model::ModelError;
use hl7_standards::RegistryError;
use thiserror::Error;

/// Errors that can occur when reading or writing ER7 messages.
#[derive(Debug, Error)]
pub enum Er7Error {
    /// No segments at all.
    #[error("message is empty")]
    Empty,

    /// The first segment is not MSH.
    #[error("message must start with an MSH segment, found `{found}`")]
    MissingHeader { found: String },

    /// MSH is present but its delimiters or type cannot be read.
    #[error("malformed MSH segment: {reason}")]
    MalformedHeader { reason: String },

    /// MSH-9 names a message the registry does not support.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A segment that the structure has no place for at this point.
    #[error("unexpected segment {segment} at position {index}")]
    UnexpectedSegment { segment: String, index: usize },

    /// The typed message rejected a write.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Er7Error>;
