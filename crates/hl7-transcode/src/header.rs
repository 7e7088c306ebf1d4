//! MSH defaults applied after population.

use chrono::{DateTime, Utc};
use hl7_model::{Datum, Segment, TypedMessage};
use hl7_standards::HL7_VERSION;
use hl7_standards::datatypes::{HD, MSG, PT, TS, VID};

use crate::config::{HierarchicDesignator, TranscodeConfig};
use crate::error::ArgumentError;

pub const FIELD_SEPARATOR: &str = "|";
pub const ENCODING_CHARACTERS: &str = "^~\\&";

const SENDING_APPLICATION: usize = 3;
const SENDING_FACILITY: usize = 4;
const DATE_TIME_OF_MESSAGE: usize = 7;
const MESSAGE_TYPE: usize = 9;
const MESSAGE_CONTROL_ID: usize = 10;
const PROCESSING_ID: usize = 11;
const VERSION_ID: usize = 12;

/// Fill MSH from the message identity and `config`.
///
/// MSH-1, MSH-2, MSH-9 and MSH-12 are always derived from the message. The
/// remaining defaults only fill fields the document left empty.
pub fn apply_header_defaults(
    message: &mut TypedMessage,
    config: &TranscodeConfig,
    now: DateTime<Utc>,
) -> Result<(), ArgumentError> {
    let message_type = message.message_type().code();
    let trigger_event = message.trigger_event().code();
    let structure = message.structure().id;
    let header = message
        .header_mut()
        .map_err(|source| ArgumentError::address(hl7_model::HEADER_KEY, source))?;

    let address = |source| ArgumentError::address(hl7_model::HEADER_KEY, source);
    header
        .set(1, 0, Datum::primitive(FIELD_SEPARATOR))
        .map_err(address)?;
    header
        .set(2, 0, Datum::primitive(ENCODING_CHARACTERS))
        .map_err(address)?;
    header
        .set(
            MESSAGE_TYPE,
            0,
            Datum::composite_of(&MSG, &[message_type, trigger_event, structure]),
        )
        .map_err(address)?;
    header
        .set(VERSION_ID, 0, Datum::composite_of(&VID, &[HL7_VERSION]))
        .map_err(address)?;

    if let Some(application) = &config.sending_application {
        fill_designator(header, SENDING_APPLICATION, application).map_err(address)?;
    }
    if let Some(facility) = &config.sending_facility {
        fill_designator(header, SENDING_FACILITY, facility).map_err(address)?;
    }
    if is_unset(header, PROCESSING_ID) && !config.processing_id.is_empty() {
        header
            .set(
                PROCESSING_ID,
                0,
                Datum::composite_of(&PT, &[config.processing_id.as_str()]),
            )
            .map_err(address)?;
    }
    if config.stamp_header {
        if is_unset(header, DATE_TIME_OF_MESSAGE) {
            let stamp = now.format("%Y%m%d%H%M%S").to_string();
            header
                .set(DATE_TIME_OF_MESSAGE, 0, Datum::composite_of(&TS, &[stamp.as_str()]))
                .map_err(address)?;
        }
        if is_unset(header, MESSAGE_CONTROL_ID) {
            let control_id = now.format("%Y%m%d%H%M%S%3f").to_string();
            header
                .set(MESSAGE_CONTROL_ID, 0, Datum::primitive(control_id))
                .map_err(address)?;
        }
    }
    Ok(())
}

fn is_unset(header: &Segment, position: usize) -> bool {
    header.field(position).iter().all(Datum::is_empty)
}

fn fill_designator(
    header: &mut Segment,
    position: usize,
    designator: &HierarchicDesignator,
) -> hl7_model::Result<()> {
    if !is_unset(header, position) || designator.is_empty() {
        return Ok(());
    }
    header.set(
        position,
        0,
        Datum::composite_of(
            &HD,
            &[
                designator.namespace_id.as_str(),
                designator.universal_id.as_str(),
                designator.universal_id_type.as_str(),
            ],
        ),
    )
}
