//! Acknowledgement construction.

use chrono::{DateTime, Utc};
use hl7_model::{AckCode, Datum, Group, MessageType, ModelError, Segment, TypedMessage};
use hl7_standards::HL7_VERSION;
use hl7_standards::datatypes::{CWE, MSG, PT, TS, VID};
use hl7_standards::structure_for;

use crate::error::Result;
use crate::escape::Delimiters;

// MSH positions.
const SENDING_APPLICATION: usize = 3;
const SENDING_FACILITY: usize = 4;
const RECEIVING_APPLICATION: usize = 5;
const RECEIVING_FACILITY: usize = 6;
const DATE_TIME_OF_MESSAGE: usize = 7;
const MESSAGE_TYPE: usize = 9;
const MESSAGE_CONTROL_ID: usize = 10;
const PROCESSING_ID: usize = 11;
const VERSION_ID: usize = 12;

// MSA positions.
const ACKNOWLEDGMENT_CODE: usize = 1;
const ACKNOWLEDGED_CONTROL_ID: usize = 2;
const TEXT_MESSAGE: usize = 3;

// ERR positions.
const HL7_ERROR_CODE: usize = 3;
const SEVERITY: usize = 4;
const USER_MESSAGE: usize = 8;

/// HL7 table 0357 entry reported for an error acknowledgement.
fn error_condition(code: AckCode) -> Option<(&'static str, &'static str)> {
    match code {
        AckCode::AA => None,
        AckCode::AE => Some(("207", "Application internal error")),
        AckCode::AR => Some(("200", "Unsupported message type")),
    }
}

/// Build the ACK answering `message`.
///
/// Sender and receiver are swapped, MSA-2 echoes the original MSH-10, and
/// error codes add one ERR segment. `text` lands in MSA-3 and ERR-8.
pub fn acknowledgement(
    message: &TypedMessage,
    code: AckCode,
    text: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TypedMessage> {
    let trigger_event = message.trigger_event();
    let structure = structure_for(MessageType::Ack, trigger_event)?;
    let mut ack = TypedMessage::new(MessageType::Ack, trigger_event, structure);
    let original = message.header();
    let copied = |position: usize| original.map(|header| header.field(position).to_vec());

    let delimiters = Delimiters::default();
    let header = ack.header_mut()?;
    header.set(1, 0, Datum::primitive(delimiters.field))?;
    header.set(2, 0, Datum::primitive(delimiters.encoding_characters()))?;
    for (to, from) in [
        (SENDING_APPLICATION, RECEIVING_APPLICATION),
        (SENDING_FACILITY, RECEIVING_FACILITY),
        (RECEIVING_APPLICATION, SENDING_APPLICATION),
        (RECEIVING_FACILITY, SENDING_FACILITY),
    ] {
        header.set_all(to, copied(from).unwrap_or_default())?;
    }
    let stamp = now.format("%Y%m%d%H%M%S").to_string();
    header.set(DATE_TIME_OF_MESSAGE, 0, Datum::composite_of(&TS, &[stamp.as_str()]))?;
    header.set(
        MESSAGE_TYPE,
        0,
        Datum::composite_of(
            &MSG,
            &[
                MessageType::Ack.code(),
                trigger_event.code(),
                structure.id,
            ],
        ),
    )?;
    header.set(
        MESSAGE_CONTROL_ID,
        0,
        Datum::primitive(now.format("%Y%m%d%H%M%S%3f").to_string()),
    )?;
    match copied(PROCESSING_ID).filter(|field| !field.is_empty()) {
        Some(processing) => header.set_all(PROCESSING_ID, processing)?,
        None => header.set(PROCESSING_ID, 0, Datum::composite_of(&PT, &["P"]))?,
    }
    header.set(VERSION_ID, 0, Datum::composite_of(&VID, &[HL7_VERSION]))?;

    let control_id = original.map_or("", |header| header.value(MESSAGE_CONTROL_ID, 0, &[]));
    let msa = segment_mut(ack.root_mut(), "messageAcknowledgment")?;
    msa.set(ACKNOWLEDGMENT_CODE, 0, Datum::primitive(code.code()))?;
    msa.set(ACKNOWLEDGED_CONTROL_ID, 0, Datum::primitive(control_id))?;
    if let Some(text) = text {
        msa.set(TEXT_MESSAGE, 0, Datum::primitive(text))?;
    }

    if let Some((error_code, description)) = error_condition(code) {
        let err = segment_mut(ack.root_mut(), "error")?;
        err.set(
            HL7_ERROR_CODE,
            0,
            Datum::composite_of(&CWE, &[error_code, description, "HL70357"]),
        )?;
        err.set(SEVERITY, 0, Datum::primitive("E"))?;
        if let Some(text) = text {
            err.set(USER_MESSAGE, 0, Datum::primitive(text))?;
        }
    }
    Ok(ack)
}

fn segment_mut<'a>(root: &'a mut Group, key: &str) -> Result<&'a mut Segment> {
    let group = root.def().name;
    root.acquire_by_key(key, 0)?
        .as_segment_mut()
        .ok_or_else(|| {
            ModelError::UnknownNode {
                group,
                key: key.to_string(),
            }
            .into()
        })
}
