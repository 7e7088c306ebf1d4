//! Message-type schema registry.
//!
//! Maps each supported (message type, trigger event) pair to the structure
//! that describes its document keys. The table is static; nothing is
//! computed at runtime.

use hl7_model::{MessageStructure, MessageType, TriggerEvent};
use serde::Serialize;

use crate::error::RegistryError;
use crate::structures::{ACK, ADT_A01, OML_O21, ORM_O01, ORU_R01};

/// One row of the registry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegistryEntry {
    pub message_type: MessageType,
    pub trigger_event: TriggerEvent,
    #[serde(serialize_with = "serialize_structure")]
    pub structure: &'static MessageStructure,
}

fn serialize_structure<S: serde::Serializer>(
    structure: &&'static MessageStructure,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(structure.id)
}

const fn entry(
    message_type: MessageType,
    trigger_event: TriggerEvent,
    structure: &'static MessageStructure,
) -> RegistryEntry {
    RegistryEntry {
        message_type,
        trigger_event,
        structure,
    }
}

static ENTRIES: &[RegistryEntry] = &[
    entry(MessageType::Adt, TriggerEvent::A01, &ADT_A01),
    entry(MessageType::Adt, TriggerEvent::A04, &ADT_A01),
    entry(MessageType::Adt, TriggerEvent::A08, &ADT_A01),
    entry(MessageType::Orm, TriggerEvent::O01, &ORM_O01),
    entry(MessageType::Oru, TriggerEvent::R01, &ORU_R01),
    entry(MessageType::Oml, TriggerEvent::O21, &OML_O21),
];

/// All explicit registry rows, in display order. ACK is accepted for any
/// trigger and is not listed per trigger.
pub fn entries() -> &'static [RegistryEntry] {
    ENTRIES
}

/// Structure for a (message type, trigger event) pair.
pub fn structure_for(
    message_type: MessageType,
    trigger_event: TriggerEvent,
) -> Result<&'static MessageStructure, RegistryError> {
    if message_type == MessageType::Ack {
        return Ok(&ACK);
    }
    ENTRIES
        .iter()
        .find(|entry| entry.message_type == message_type && entry.trigger_event == trigger_event)
        .map(|entry| entry.structure)
        .ok_or(RegistryError::Unsupported {
            message_type,
            trigger_event,
        })
}

/// Trigger recorded for an acknowledgement whose MSH-9 carries no trigger event.
pub const UNTRIGGERED_ACK_EVENT: TriggerEvent = TriggerEvent::A01;

/// Parse MSH-9 style codes and resolve their structure.
///
/// An `ACK` may omit the trigger code; it is then recorded as
/// [`UNTRIGGERED_ACK_EVENT`].
pub fn resolve_codes(
    message_code: &str,
    trigger_code: &str,
) -> Result<(MessageType, TriggerEvent, &'static MessageStructure), RegistryError> {
    let message_type: MessageType =
        message_code
            .parse()
            .map_err(|_| RegistryError::UnknownMessageType {
                code: message_code.to_string(),
            })?;
    let untriggered_ack = message_type == MessageType::Ack && trigger_code.is_empty();
    let trigger_event: TriggerEvent = if untriggered_ack {
        UNTRIGGERED_ACK_EVENT
    } else {
        trigger_code
            .parse()
            .map_err(|_| RegistryError::UnknownTriggerEvent {
                code: trigger_code.to_string(),
            })?
    };
    let structure = structure_for(message_type, trigger_event)?;
    Ok((message_type, trigger_event, structure))
}
