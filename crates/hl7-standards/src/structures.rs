//! Message structures (HL7 v2.5.1 chapter 3, 4 and 7 abstract message syntax).
//!
//! Each structure is a tree of [`GroupDef`]s whose children carry the
//! document key the population engine accepts for them. A group with a marker
//! accepts either the bundle form (an object containing the marker key plus
//! sibling keys) or the shorthand form (an object that is the field map of the
//! marker's segment).

use hl7_model::{GroupDef, MessageStructure, NodeDef};

use crate::segments::{
    AL1, DG1, ERR, EVN, IN1, MSA, MSH, NK1, NTE, OBR, OBX, ORC, PD1, PID, PV1, ROL, SPM, TQ1,
};

const fn header() -> NodeDef {
    NodeDef::segment("messageHeader", &MSH).required()
}

const fn notes() -> NodeDef {
    NodeDef::segment("notesAndComments", &NTE).repeating()
}

// ---------------------------------------------------------------------------
// Shared groups
// ---------------------------------------------------------------------------

pub static INSURANCE: GroupDef = GroupDef {
    name: "INSURANCE",
    marker: Some("insuranceInformation"),
    children: &[
        NodeDef::segment("insuranceInformation", &IN1).required(),
        NodeDef::segment("role", &ROL).repeating(),
    ],
};

pub static OBSERVATION: GroupDef = GroupDef {
    name: "OBSERVATION",
    marker: Some("observationResult"),
    children: &[
        NodeDef::segment("observationResult", &OBX).required(),
        notes(),
    ],
};

// ---------------------------------------------------------------------------
// ADT_A01
// ---------------------------------------------------------------------------

pub static ADT_A01: MessageStructure = MessageStructure {
    id: "ADT_A01",
    description: "Admit/visit notification",
    root: GroupDef {
        name: "ADT_A01",
        marker: None,
        children: &[
            header(),
            NodeDef::segment("eventType", &EVN).required(),
            NodeDef::segment("patientIdentification", &PID).required(),
            NodeDef::segment("patientAdditionalDemographic", &PD1),
            NodeDef::segment("role", &ROL).repeating(),
            NodeDef::segment("nextOfKin", &NK1).repeating(),
            NodeDef::segment("patientVisit", &PV1).required(),
            NodeDef::segment("observationResult", &OBX).repeating(),
            NodeDef::segment("allergyInformation", &AL1).repeating(),
            NodeDef::segment("diagnosis", &DG1).repeating(),
            NodeDef::group("insurance", &INSURANCE).repeating(),
        ],
    },
};

// ---------------------------------------------------------------------------
// ORM_O01
// ---------------------------------------------------------------------------

pub static ORM_O01_PATIENT: GroupDef = GroupDef {
    name: "PATIENT",
    marker: Some("patientIdentification"),
    children: &[
        NodeDef::segment("patientIdentification", &PID).required(),
        NodeDef::segment("patientAdditionalDemographic", &PD1),
        notes(),
        NodeDef::segment("patientVisit", &PV1),
        NodeDef::group("insurance", &INSURANCE).repeating(),
        NodeDef::segment("allergyInformation", &AL1).repeating(),
    ],
};

pub static ORM_O01_ORDER_DETAIL: GroupDef = GroupDef {
    name: "ORDER_DETAIL",
    marker: Some("observationRequest"),
    children: &[
        NodeDef::segment("observationRequest", &OBR).required(),
        notes(),
        NodeDef::segment("diagnosis", &DG1).repeating(),
        NodeDef::group("observation", &OBSERVATION).repeating(),
    ],
};

pub static ORM_O01_ORDER: GroupDef = GroupDef {
    name: "ORDER",
    marker: Some("commonOrder"),
    children: &[
        NodeDef::segment("commonOrder", &ORC).required(),
        NodeDef::group("orderDetail", &ORM_O01_ORDER_DETAIL),
    ],
};

pub static ORM_O01: MessageStructure = MessageStructure {
    id: "ORM_O01",
    description: "General order message",
    root: GroupDef {
        name: "ORM_O01",
        marker: None,
        children: &[
            header(),
            notes(),
            NodeDef::group("patient", &ORM_O01_PATIENT),
            NodeDef::group("order", &ORM_O01_ORDER)
                .repeating()
                .required(),
        ],
    },
};

// ---------------------------------------------------------------------------
// ORU_R01
// ---------------------------------------------------------------------------

pub static ORU_R01_PATIENT: GroupDef = GroupDef {
    name: "PATIENT",
    marker: Some("patientIdentification"),
    children: &[
        NodeDef::segment("patientIdentification", &PID).required(),
        NodeDef::segment("patientAdditionalDemographic", &PD1),
        notes(),
        NodeDef::segment("nextOfKin", &NK1).repeating(),
        NodeDef::segment("patientVisit", &PV1),
    ],
};

pub static ORU_R01_SPECIMEN: GroupDef = GroupDef {
    name: "SPECIMEN",
    marker: Some("specimen"),
    children: &[
        NodeDef::segment("specimen", &SPM).required(),
        NodeDef::segment("observationResult", &OBX).repeating(),
    ],
};

pub static ORU_R01_ORDER_OBSERVATION: GroupDef = GroupDef {
    name: "ORDER_OBSERVATION",
    marker: Some("observationRequest"),
    children: &[
        NodeDef::segment("commonOrder", &ORC),
        NodeDef::segment("observationRequest", &OBR).required(),
        notes(),
        NodeDef::segment("timingQuantity", &TQ1).repeating(),
        NodeDef::group("observation", &OBSERVATION).repeating(),
        NodeDef::group("specimen", &ORU_R01_SPECIMEN).repeating(),
    ],
};

pub static ORU_R01_PATIENT_RESULT: GroupDef = GroupDef {
    name: "PATIENT_RESULT",
    marker: None,
    children: &[
        NodeDef::group("patient", &ORU_R01_PATIENT),
        NodeDef::group("orderObservation", &ORU_R01_ORDER_OBSERVATION)
            .repeating()
            .required(),
    ],
};

pub static ORU_R01: MessageStructure = MessageStructure {
    id: "ORU_R01",
    description: "Unsolicited transmission of an observation message",
    root: GroupDef {
        name: "ORU_R01",
        marker: None,
        children: &[
            header(),
            NodeDef::group("patientResult", &ORU_R01_PATIENT_RESULT)
                .repeating()
                .required(),
        ],
    },
};

// ---------------------------------------------------------------------------
// OML_O21
// ---------------------------------------------------------------------------

pub static OML_O21_PATIENT: GroupDef = GroupDef {
    name: "PATIENT",
    marker: Some("patientIdentification"),
    children: &[
        NodeDef::segment("patientIdentification", &PID).required(),
        NodeDef::segment("patientAdditionalDemographic", &PD1),
        notes(),
        NodeDef::segment("nextOfKin", &NK1).repeating(),
        NodeDef::segment("patientVisit", &PV1),
        NodeDef::group("insurance", &INSURANCE).repeating(),
        NodeDef::segment("allergyInformation", &AL1).repeating(),
    ],
};

pub static OML_O21_SPECIMEN: GroupDef = GroupDef {
    name: "SPECIMEN",
    marker: Some("specimen"),
    children: &[NodeDef::segment("specimen", &SPM).required()],
};

pub static OML_O21_OBSERVATION_REQUEST: GroupDef = GroupDef {
    name: "OBSERVATION_REQUEST",
    marker: Some("observationRequest"),
    children: &[
        NodeDef::segment("observationRequest", &OBR).required(),
        notes(),
        NodeDef::segment("diagnosis", &DG1).repeating(),
        NodeDef::group("observation", &OBSERVATION).repeating(),
        NodeDef::group("specimen", &OML_O21_SPECIMEN).repeating(),
    ],
};

pub static OML_O21_ORDER: GroupDef = GroupDef {
    name: "ORDER",
    marker: Some("commonOrder"),
    children: &[
        NodeDef::segment("commonOrder", &ORC).required(),
        NodeDef::segment("role", &ROL).repeating(),
        NodeDef::segment("timingQuantity", &TQ1).repeating(),
        NodeDef::group("observationRequest", &OML_O21_OBSERVATION_REQUEST),
    ],
};

pub static OML_O21: MessageStructure = MessageStructure {
    id: "OML_O21",
    description: "Laboratory order message",
    root: GroupDef {
        name: "OML_O21",
        marker: None,
        children: &[
            header(),
            notes(),
            NodeDef::group("patient", &OML_O21_PATIENT),
            NodeDef::group("order", &OML_O21_ORDER)
                .repeating()
                .required(),
        ],
    },
};

// ---------------------------------------------------------------------------
// ACK
// ---------------------------------------------------------------------------

pub static ACK: MessageStructure = MessageStructure {
    id: "ACK",
    description: "General acknowledgment message",
    root: GroupDef {
        name: "ACK",
        marker: None,
        children: &[
            header(),
            NodeDef::segment("messageAcknowledgment", &MSA).required(),
            NodeDef::segment("error", &ERR).repeating(),
        ],
    },
};

/// Every registered structure.
pub static ALL: &[&MessageStructure] = &[&ADT_A01, &ORM_O01, &ORU_R01, &OML_O21, &ACK];

/// Look up a structure by its ID (MSH-9.3).
pub fn structure(id: &str) -> Option<&'static MessageStructure> {
    ALL.iter()
        .copied()
        .find(|structure| structure.id.eq_ignore_ascii_case(id))
}
