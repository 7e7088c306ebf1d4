//! Closed enumerations for message identity.
//!
//! Only the message types and trigger events with a registered structure are
//! representable; anything else is rejected at parse time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HL7 message type (MSH-9.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    /// Admit/discharge/transfer.
    Adt,
    /// General order.
    Orm,
    /// Unsolicited observation result.
    Oru,
    /// Laboratory order.
    Oml,
    /// General acknowledgement.
    Ack,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::Adt,
        MessageType::Orm,
        MessageType::Oru,
        MessageType::Oml,
        MessageType::Ack,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            MessageType::Adt => "ADT",
            MessageType::Orm => "ORM",
            MessageType::Oru => "ORU",
            MessageType::Oml => "OML",
            MessageType::Ack => "ACK",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        MessageType::ALL
            .into_iter()
            .find(|candidate| candidate.code() == normalized)
            .ok_or_else(|| format!("Unknown message type: {s}"))
    }
}

/// HL7 trigger event (MSH-9.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TriggerEvent {
    /// Admit/visit notification.
    A01,
    /// Register a patient.
    A04,
    /// Update patient information.
    A08,
    /// Order message.
    O01,
    /// Laboratory order.
    O21,
    /// Unsolicited transmission of an observation.
    R01,
}

impl TriggerEvent {
    pub const ALL: [TriggerEvent; 6] = [
        TriggerEvent::A01,
        TriggerEvent::A04,
        TriggerEvent::A08,
        TriggerEvent::O01,
        TriggerEvent::O21,
        TriggerEvent::R01,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TriggerEvent::A01 => "A01",
            TriggerEvent::A04 => "A04",
            TriggerEvent::A08 => "A08",
            TriggerEvent::O01 => "O01",
            TriggerEvent::O21 => "O21",
            TriggerEvent::R01 => "R01",
        }
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TriggerEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        TriggerEvent::ALL
            .into_iter()
            .find(|candidate| candidate.code() == normalized)
            .ok_or_else(|| format!("Unknown trigger event: {s}"))
    }
}

/// Acknowledgement code (MSA-1, HL7 table 0008, original mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AckCode {
    /// Application accept.
    #[default]
    AA,
    /// Application error.
    AE,
    /// Application reject.
    AR,
}

impl AckCode {
    pub fn code(&self) -> &'static str {
        match self {
            AckCode::AA => "AA",
            AckCode::AE => "AE",
            AckCode::AR => "AR",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, AckCode::AA)
    }
}

impl fmt::Display for AckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AckCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AA" => Ok(AckCode::AA),
            "AE" => Ok(AckCode::AE),
            "AR" => Ok(AckCode::AR),
            _ => Err(format!("Unknown acknowledgement code: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_from_str() {
        assert_eq!("oru".parse::<MessageType>().unwrap(), MessageType::Oru);
        assert_eq!(" ADT ".parse::<MessageType>().unwrap(), MessageType::Adt);
        assert!("XYZ".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_trigger_event_from_str() {
        assert_eq!("r01".parse::<TriggerEvent>().unwrap(), TriggerEvent::R01);
        assert!("Z99".parse::<TriggerEvent>().is_err());
    }

    #[test]
    fn test_ack_code() {
        assert_eq!("ae".parse::<AckCode>().unwrap(), AckCode::AE);
        assert!(AckCode::AR.is_error());
        assert!(!AckCode::default().is_error());
    }
}
