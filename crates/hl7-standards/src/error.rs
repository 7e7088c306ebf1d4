use hl7_model::{MessageType, TriggerEvent};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown message type: {code}")]
    UnknownMessageType { code: String },

    #[error("unknown trigger event: {code}")]
    UnknownTriggerEvent { code: String },

    #[error("unknown message structure: {id}")]
    UnknownStructure { id: String },

    #[error("no message structure registered for {message_type}^{trigger_event}")]
    Unsupported {
        message_type: MessageType,
        trigger_event: TriggerEvent,
    },
}
