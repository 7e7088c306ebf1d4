//! Extraction engine: orders out of a typed message.
//!
//! Each supported trigger has one fixed order shape. Every repetition of the
//! order group becomes one flat document; the placer and filler numbers carried
//! by both ORC and OBR must agree when both are present.

use hl7_model::{Document, Group, Segment, TriggerEvent, TypedMessage};
use tracing::{debug, debug_span};

use crate::error::ExtractionError;

/// Output keys, in output order.
pub mod keys {
    pub const PLACER_ORDER_NUMBER: &str = "placerOrderNumber";
    pub const FILLER_ORDER_NUMBER: &str = "fillerOrderNumber";
    pub const ORDER_CONTROL: &str = "orderControl";
    pub const ORDER_STATUS: &str = "orderStatus";
    pub const UNIVERSAL_SERVICE_IDENTIFIER: &str = "universalServiceIdentifier";
    pub const UNIVERSAL_SERVICE_TEXT: &str = "universalServiceText";
    pub const OBSERVATION_DATE_TIME: &str = "observationDateTime";
    pub const ORDERING_PROVIDER: &str = "orderingProvider";
    pub const PRIORITY: &str = "priority";
    pub const PATIENT_ID: &str = "patientId";
}

// ORC positions.
const ORC_ORDER_CONTROL: usize = 1;
const ORC_PLACER_ORDER_NUMBER: usize = 2;
const ORC_FILLER_ORDER_NUMBER: usize = 3;
const ORC_ORDER_STATUS: usize = 5;
const ORC_ORDERING_PROVIDER: usize = 12;

// OBR positions.
const OBR_PLACER_ORDER_NUMBER: usize = 2;
const OBR_FILLER_ORDER_NUMBER: usize = 3;
const OBR_UNIVERSAL_SERVICE_ID: usize = 4;
const OBR_PRIORITY: usize = 5;
const OBR_OBSERVATION_DATE_TIME: usize = 7;
const OBR_ORDERING_PROVIDER: usize = 16;

const PID_PATIENT_IDENTIFIER_LIST: usize = 3;

/// Where the orders of a message live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrderShape {
    /// `order[*]` with OBR under `orderDetail`.
    GeneralOrder,
    /// `order[*]` with OBR under `observationRequest`.
    LaboratoryOrder,
    /// `patientResult[*].orderObservation[*]`.
    ObservationResult,
}

impl OrderShape {
    fn for_trigger(trigger: TriggerEvent) -> Option<Self> {
        match trigger {
            TriggerEvent::O01 => Some(Self::GeneralOrder),
            TriggerEvent::O21 => Some(Self::LaboratoryOrder),
            TriggerEvent::R01 => Some(Self::ObservationResult),
            TriggerEvent::A01 | TriggerEvent::A04 | TriggerEvent::A08 => None,
        }
    }

    fn structure_id(self) -> &'static str {
        match self {
            Self::GeneralOrder => "ORM_O01",
            Self::LaboratoryOrder => "OML_O21",
            Self::ObservationResult => "ORU_R01",
        }
    }

    fn collect(self, root: &Group) -> Vec<OrderView<'_>> {
        match self {
            Self::GeneralOrder | Self::LaboratoryOrder => {
                let patient = patient_of(root);
                root.groups("order")
                    .map(|order| {
                        let request = match self {
                            Self::GeneralOrder => order.group("orderDetail", 0),
                            _ => order.group("observationRequest", 0),
                        };
                        OrderView {
                            common: order.segment("commonOrder", 0),
                            request: request.and_then(|group| group.segment("observationRequest", 0)),
                            patient,
                        }
                    })
                    .collect()
            }
            Self::ObservationResult => root
                .groups("patientResult")
                .flat_map(|result| {
                    let patient = patient_of(result);
                    result.groups("orderObservation").map(move |order| OrderView {
                        common: order.segment("commonOrder", 0),
                        request: order.segment("observationRequest", 0),
                        patient,
                    })
                })
                .collect(),
        }
    }
}

fn patient_of(group: &Group) -> Option<&Segment> {
    group
        .group("patient", 0)
        .and_then(|patient| patient.segment("patientIdentification", 0))
}

/// The segments one order is read from.
struct OrderView<'a> {
    common: Option<&'a Segment>,
    request: Option<&'a Segment>,
    patient: Option<&'a Segment>,
}

fn text<'a>(segment: Option<&'a Segment>, position: usize, components: &[usize]) -> &'a str {
    segment.map_or("", |segment| segment.value(position, 0, components))
}

fn first_non_empty<'a>(values: &[&'a str]) -> &'a str {
    values.iter().copied().find(|value| !value.is_empty()).unwrap_or("")
}

/// Pick the canonical identifier from the ORC / OBR pair.
fn reconcile(
    identifier: &'static str,
    repetition: usize,
    order: &str,
    request: &str,
) -> Result<String, ExtractionError> {
    match (order.is_empty(), request.is_empty()) {
        (false, false) if order != request => Err(ExtractionError::IdentifierMismatch {
            repetition,
            identifier,
            order: order.to_string(),
            request: request.to_string(),
        }),
        (false, _) => Ok(order.to_string()),
        (true, _) => Ok(request.to_string()),
    }
}

impl OrderView<'_> {
    fn project(&self, repetition: usize) -> Result<Document, ExtractionError> {
        let placer = reconcile(
            keys::PLACER_ORDER_NUMBER,
            repetition,
            text(self.common, ORC_PLACER_ORDER_NUMBER, &[1]),
            text(self.request, OBR_PLACER_ORDER_NUMBER, &[1]),
        )?;
        let filler = reconcile(
            keys::FILLER_ORDER_NUMBER,
            repetition,
            text(self.common, ORC_FILLER_ORDER_NUMBER, &[1]),
            text(self.request, OBR_FILLER_ORDER_NUMBER, &[1]),
        )?;
        let provider = first_non_empty(&[
            text(self.common, ORC_ORDERING_PROVIDER, &[1]),
            text(self.request, OBR_ORDERING_PROVIDER, &[1]),
        ]);

        Ok(Document::object([
            (keys::PLACER_ORDER_NUMBER, Document::Scalar(placer)),
            (keys::FILLER_ORDER_NUMBER, Document::Scalar(filler)),
            (
                keys::ORDER_CONTROL,
                text(self.common, ORC_ORDER_CONTROL, &[]).into(),
            ),
            (
                keys::ORDER_STATUS,
                text(self.common, ORC_ORDER_STATUS, &[]).into(),
            ),
            (
                keys::UNIVERSAL_SERVICE_IDENTIFIER,
                text(self.request, OBR_UNIVERSAL_SERVICE_ID, &[1]).into(),
            ),
            (
                keys::UNIVERSAL_SERVICE_TEXT,
                text(self.request, OBR_UNIVERSAL_SERVICE_ID, &[2]).into(),
            ),
            (
                keys::OBSERVATION_DATE_TIME,
                text(self.request, OBR_OBSERVATION_DATE_TIME, &[1]).into(),
            ),
            (keys::ORDERING_PROVIDER, provider.into()),
            (keys::PRIORITY, text(self.request, OBR_PRIORITY, &[]).into()),
            (
                keys::PATIENT_ID,
                text(self.patient, PID_PATIENT_IDENTIFIER_LIST, &[1]).into(),
            ),
        ]))
    }
}

/// Read every order of `message` for `trigger`, one flat document each.
pub fn extract_orders(
    message: &TypedMessage,
    trigger: TriggerEvent,
) -> Result<Vec<Document>, ExtractionError> {
    let span = debug_span!("extract", trigger = %trigger);
    let _guard = span.enter();

    let shape = OrderShape::for_trigger(trigger)
        .ok_or(ExtractionError::UnsupportedTrigger { trigger })?;
    let actual = message.structure().id;
    if actual != shape.structure_id() {
        return Err(ExtractionError::StructureMismatch {
            trigger,
            expected: shape.structure_id(),
            actual,
        });
    }

    let orders = shape
        .collect(message.root())
        .iter()
        .enumerate()
        .map(|(repetition, view)| view.project(repetition))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(orders = orders.len(), "extracted orders");
    Ok(orders)
}
