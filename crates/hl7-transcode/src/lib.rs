//! Transcoding between generic documents and typed HL7 v2 messages.
//!
//! - **shape**: raw value to element documents under a [`ShapePolicy`]
//! - **resolve**: component lookup with the `mainValue` fallback
//! - **populate**: the recursive population engine
//! - **variant**: OBX-5 population through the value-type table
//! - **header**: MSH defaults derived from the message and [`TranscodeConfig`]
//! - **extract**: orders read back out of ORM, OML and ORU messages
//!
//! Population is not transactional: when [`populate_message`] fails the
//! message is partially written and must be discarded.
//!
//! [`ShapePolicy`]: hl7_model::ShapePolicy

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod extract;
pub mod header;
pub mod populate;
pub mod resolve;
pub mod shape;
pub mod variant;

use chrono::Utc;
use hl7_model::{Document, MessageType, TriggerEvent, TypedMessage};
use hl7_standards::RegistryError;

pub use crate::config::{HierarchicDesignator, TranscodeConfig, UnknownValueTypePolicy};
pub use crate::error::{ArgumentError, ExtractionError};
pub use crate::extract::extract_orders;
pub use crate::populate::populate;
pub use crate::shape::normalize;

/// An empty message for a registered (type, trigger) pair.
pub fn new_message(
    message_type: MessageType,
    trigger_event: TriggerEvent,
) -> Result<TypedMessage, RegistryError> {
    let structure = hl7_standards::structure_for(message_type, trigger_event)?;
    Ok(TypedMessage::new(message_type, trigger_event, structure))
}

/// Populate `message` from `document`, then fill the MSH defaults.
pub fn populate_message(
    message: &mut TypedMessage,
    document: &Document,
    config: &TranscodeConfig,
) -> Result<(), ArgumentError> {
    populate(message, document, config)?;
    header::apply_header_defaults(message, config, Utc::now())
}
