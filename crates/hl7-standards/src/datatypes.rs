//! Composite field catalog (HL7 v2.5.1 chapter 2A).
//!
//! Every composite lists its components in wire order. A component may itself
//! be composite, but only one level down: the components of a nested type are
//! always primitive. Where v2.5.1 nests a `TS` inside another composite the
//! catalog uses `DTM` instead, which is what v2.6+ does and what encodes
//! identically for the first sub-component.

use hl7_model::{ComponentDef, DataType, Primitive};

const fn st(key: &'static str) -> ComponentDef {
    ComponentDef::primitive(key, Primitive::St)
}

const fn tx(key: &'static str) -> ComponentDef {
    ComponentDef::primitive(key, Primitive::Tx)
}

const fn id(key: &'static str) -> ComponentDef {
    ComponentDef::primitive(key, Primitive::Id)
}

const fn is(key: &'static str) -> ComponentDef {
    ComponentDef::primitive(key, Primitive::Is)
}

const fn nm(key: &'static str) -> ComponentDef {
    ComponentDef::primitive(key, Primitive::Nm)
}

const fn dt(key: &'static str) -> ComponentDef {
    ComponentDef::primitive(key, Primitive::Dt)
}

const fn dtm(key: &'static str) -> ComponentDef {
    ComponentDef::primitive(key, Primitive::Dtm)
}

const fn of(key: &'static str, data_type: &'static DataType) -> ComponentDef {
    ComponentDef::composite(key, data_type)
}

// ---------------------------------------------------------------------------
// Identifiers and designators
// ---------------------------------------------------------------------------

pub static HD: DataType = DataType {
    code: "HD",
    description: "Hierarchic Designator",
    components: &[
        is("namespaceId"),
        st("universalId"),
        id("universalIdType"),
    ],
};

pub static EI: DataType = DataType {
    code: "EI",
    description: "Entity Identifier",
    components: &[
        st("entityIdentifier"),
        is("namespaceId"),
        st("universalId"),
        id("universalIdType"),
    ],
};

pub static EIP: DataType = DataType {
    code: "EIP",
    description: "Entity Identifier Pair",
    components: &[
        of("placerAssignedIdentifier", &EI),
        of("fillerAssignedIdentifier", &EI),
    ],
};

pub static CX: DataType = DataType {
    code: "CX",
    description: "Extended Composite ID with Check Digit",
    components: &[
        st("idNumber"),
        st("checkDigit"),
        id("checkDigitScheme"),
        of("assigningAuthority", &HD),
        id("identifierTypeCode"),
        of("assigningFacility", &HD),
        dt("effectiveDate"),
        dt("expirationDate"),
        of("assigningJurisdiction", &CWE),
        of("assigningAgencyOrDepartment", &CWE),
    ],
};

pub static DLN: DataType = DataType {
    code: "DLN",
    description: "Driver's License Number",
    components: &[
        st("licenseNumber"),
        is("issuingStateProvinceCountry"),
        dt("expirationDate"),
    ],
};

// ---------------------------------------------------------------------------
// Coded values
// ---------------------------------------------------------------------------

pub static CE: DataType = DataType {
    code: "CE",
    description: "Coded Element",
    components: &[
        st("identifier"),
        st("text"),
        id("nameOfCodingSystem"),
        st("alternateIdentifier"),
        st("alternateText"),
        id("nameOfAlternateCodingSystem"),
    ],
};

pub static CWE: DataType = DataType {
    code: "CWE",
    description: "Coded with Exceptions",
    components: &[
        st("identifier"),
        st("text"),
        id("nameOfCodingSystem"),
        st("alternateIdentifier"),
        st("alternateText"),
        id("nameOfAlternateCodingSystem"),
        st("codingSystemVersionId"),
        st("alternateCodingSystemVersionId"),
        st("originalText"),
    ],
};

pub static CNE: DataType = DataType {
    code: "CNE",
    description: "Coded with No Exceptions",
    components: &[
        st("identifier"),
        st("text"),
        id("nameOfCodingSystem"),
        st("alternateIdentifier"),
        st("alternateText"),
        id("nameOfAlternateCodingSystem"),
        st("codingSystemVersionId"),
        st("alternateCodingSystemVersionId"),
        st("originalText"),
    ],
};

pub static CF: DataType = DataType {
    code: "CF",
    description: "Coded Element with Formatted Values",
    components: &[
        st("identifier"),
        ComponentDef::primitive("formattedText", Primitive::Ft),
        id("nameOfCodingSystem"),
        st("alternateIdentifier"),
        ComponentDef::primitive("alternateFormattedText", Primitive::Ft),
        id("nameOfAlternateCodingSystem"),
    ],
};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

pub static TS: DataType = DataType {
    code: "TS",
    description: "Time Stamp",
    components: &[dtm("time"), id("degreeOfPrecision")],
};

pub static DR: DataType = DataType {
    code: "DR",
    description: "Date/Time Range",
    components: &[dtm("rangeStartDateTime"), dtm("rangeEndDateTime")],
};

pub static RI: DataType = DataType {
    code: "RI",
    description: "Repeat Interval",
    components: &[is("repeatPattern"), st("explicitTimeInterval")],
};

pub static RPT: DataType = DataType {
    code: "RPT",
    description: "Repeat Pattern",
    components: &[
        of("repeatPatternCode", &CWE),
        id("calendarAlignment"),
        nm("phaseRangeBeginValue"),
        nm("phaseRangeEndValue"),
        nm("periodQuantity"),
        is("periodUnits"),
        id("institutionSpecifiedTime"),
        id("event"),
        nm("eventOffsetQuantity"),
        is("eventOffsetUnits"),
        st("generalTimingSpecification"),
    ],
};

// ---------------------------------------------------------------------------
// People, organizations and places
// ---------------------------------------------------------------------------

pub static FN: DataType = DataType {
    code: "FN",
    description: "Family Name",
    components: &[
        st("surname"),
        st("ownSurnamePrefix"),
        st("ownSurname"),
        st("surnamePrefixFromPartner"),
        st("surnameFromPartner"),
    ],
};

pub static XPN: DataType = DataType {
    code: "XPN",
    description: "Extended Person Name",
    components: &[
        of("familyName", &FN),
        st("givenName"),
        st("secondAndFurtherGivenNames"),
        st("suffix"),
        st("prefix"),
        is("degree"),
        id("nameTypeCode"),
        id("nameRepresentationCode"),
        of("nameContext", &CE),
        of("nameValidityRange", &DR),
        id("nameAssemblyOrder"),
        dtm("effectiveDate"),
        dtm("expirationDate"),
        st("professionalSuffix"),
    ],
};

pub static XCN: DataType = DataType {
    code: "XCN",
    description: "Extended Composite ID Number and Name for Persons",
    components: &[
        st("idNumber"),
        of("familyName", &FN),
        st("givenName"),
        st("secondAndFurtherGivenNames"),
        st("suffix"),
        st("prefix"),
        is("degree"),
        is("sourceTable"),
        of("assigningAuthority", &HD),
        id("nameTypeCode"),
        st("identifierCheckDigit"),
        id("checkDigitScheme"),
        id("identifierTypeCode"),
        of("assigningFacility", &HD),
        id("nameRepresentationCode"),
        of("nameContext", &CE),
        of("nameValidityRange", &DR),
        id("nameAssemblyOrder"),
        dtm("effectiveDate"),
        dtm("expirationDate"),
        st("professionalSuffix"),
        of("assigningJurisdiction", &CWE),
        of("assigningAgencyOrDepartment", &CWE),
    ],
};

pub static XON: DataType = DataType {
    code: "XON",
    description: "Extended Composite Name and Identification Number for Organizations",
    components: &[
        st("organizationName"),
        is("organizationNameTypeCode"),
        nm("idNumber"),
        nm("checkDigit"),
        id("checkDigitScheme"),
        of("assigningAuthority", &HD),
        id("identifierTypeCode"),
        of("assigningFacility", &HD),
        id("nameRepresentationCode"),
        st("organizationIdentifier"),
    ],
};

pub static SAD: DataType = DataType {
    code: "SAD",
    description: "Street Address",
    components: &[
        st("streetOrMailingAddress"),
        st("streetName"),
        st("dwellingNumber"),
    ],
};

pub static XAD: DataType = DataType {
    code: "XAD",
    description: "Extended Address",
    components: &[
        of("streetAddress", &SAD),
        st("otherDesignation"),
        st("city"),
        st("stateOrProvince"),
        st("zipOrPostalCode"),
        id("country"),
        id("addressType"),
        st("otherGeographicDesignation"),
        is("countyParishCode"),
        is("censusTract"),
        id("addressRepresentationCode"),
        of("addressValidityRange", &DR),
        dtm("effectiveDate"),
        dtm("expirationDate"),
    ],
};

pub static XTN: DataType = DataType {
    code: "XTN",
    description: "Extended Telecommunication Number",
    components: &[
        st("telephoneNumber"),
        id("telecommunicationUseCode"),
        id("telecommunicationEquipmentType"),
        st("emailAddress"),
        nm("countryCode"),
        nm("areaCityCode"),
        nm("localNumber"),
        nm("extension"),
        st("anyText"),
        st("extensionPrefix"),
        st("speedDialCode"),
        st("unformattedTelephoneNumber"),
    ],
};

pub static PL: DataType = DataType {
    code: "PL",
    description: "Person Location",
    components: &[
        is("pointOfCare"),
        is("room"),
        is("bed"),
        of("facility", &HD),
        is("locationStatus"),
        is("personLocationType"),
        is("building"),
        is("floor"),
        st("locationDescription"),
        of("comprehensiveLocationIdentifier", &EI),
        of("assigningAuthorityForLocation", &HD),
    ],
};

pub static JCC: DataType = DataType {
    code: "JCC",
    description: "Job Code/Class",
    components: &[is("jobCode"), is("jobClass"), tx("jobDescriptionText")],
};

pub static DLD: DataType = DataType {
    code: "DLD",
    description: "Discharge to Location and Date",
    components: &[is("dischargeLocation"), dtm("effectiveDate")],
};

pub static FC: DataType = DataType {
    code: "FC",
    description: "Financial Class",
    components: &[is("financialClassCode"), dtm("effectiveDate")],
};

// ---------------------------------------------------------------------------
// Money and quantities
// ---------------------------------------------------------------------------

pub static MO: DataType = DataType {
    code: "MO",
    description: "Money",
    components: &[nm("quantity"), id("denomination")],
};

pub static MOC: DataType = DataType {
    code: "MOC",
    description: "Money and Charge Code",
    components: &[of("monetaryAmount", &MO), of("chargeCode", &CE)],
};

pub static MOP: DataType = DataType {
    code: "MOP",
    description: "Money or Percentage",
    components: &[
        id("moneyOrPercentageIndicator"),
        nm("moneyOrPercentageQuantity"),
        id("currencyDenomination"),
    ],
};

pub static CP: DataType = DataType {
    code: "CP",
    description: "Composite Price",
    components: &[
        of("price", &MO),
        id("priceType"),
        nm("fromValue"),
        nm("toValue"),
        of("rangeUnits", &CE),
        id("rangeType"),
    ],
};

pub static NR: DataType = DataType {
    code: "NR",
    description: "Numeric Range",
    components: &[nm("lowValue"), nm("highValue")],
};

pub static CQ: DataType = DataType {
    code: "CQ",
    description: "Composite Quantity with Units",
    components: &[nm("quantity"), of("units", &CE)],
};

pub static SN: DataType = DataType {
    code: "SN",
    description: "Structured Numeric",
    components: &[
        st("comparator"),
        nm("num1"),
        st("separatorOrSuffix"),
        nm("num2"),
    ],
};

// ---------------------------------------------------------------------------
// Data and references
// ---------------------------------------------------------------------------

pub static ED: DataType = DataType {
    code: "ED",
    description: "Encapsulated Data",
    components: &[
        of("sourceApplication", &HD),
        id("typeOfData"),
        id("dataSubtype"),
        id("encoding"),
        tx("data"),
    ],
};

pub static RP: DataType = DataType {
    code: "RP",
    description: "Reference Pointer",
    components: &[
        st("pointer"),
        of("applicationId", &HD),
        id("typeOfData"),
        id("subtype"),
    ],
};

pub static PRL: DataType = DataType {
    code: "PRL",
    description: "Parent Result Link",
    components: &[
        of("parentObservationIdentifier", &CE),
        st("parentObservationSubIdentifier"),
        tx("parentObservationValueDescriptor"),
    ],
};

pub static SPS: DataType = DataType {
    code: "SPS",
    description: "Specimen Source",
    components: &[
        of("specimenSourceNameOrCode", &CWE),
        of("additives", &CWE),
        tx("specimenCollectionMethod"),
        of("bodySite", &CWE),
        of("siteModifier", &CWE),
        of("collectionMethodModifierCode", &CWE),
        of("specimenRole", &CWE),
    ],
};

// ---------------------------------------------------------------------------
// Message control
// ---------------------------------------------------------------------------

pub static MSG: DataType = DataType {
    code: "MSG",
    description: "Message Type",
    components: &[
        id("messageCode"),
        id("triggerEvent"),
        id("messageStructure"),
    ],
};

pub static PT: DataType = DataType {
    code: "PT",
    description: "Processing Type",
    components: &[id("processingId"), id("processingMode")],
};

pub static VID: DataType = DataType {
    code: "VID",
    description: "Version Identifier",
    components: &[
        id("versionId"),
        of("internationalizationCode", &CE),
        of("internationalVersionId", &CE),
    ],
};

pub static ERL: DataType = DataType {
    code: "ERL",
    description: "Error Location",
    components: &[
        st("segmentId"),
        nm("segmentSequence"),
        nm("fieldPosition"),
        nm("fieldRepetition"),
        nm("componentNumber"),
        nm("subComponentNumber"),
    ],
};

/// Every composite in the catalog, for lookups and consistency checks.
pub static ALL: &[&DataType] = &[
    &HD, &EI, &EIP, &CX, &DLN, &CE, &CWE, &CNE, &CF, &TS, &DR, &RI, &RPT, &FN, &XPN, &XCN,
    &XON, &SAD, &XAD, &XTN, &PL, &JCC, &DLD, &FC, &MO, &MOC, &MOP, &CP, &NR, &CQ, &SN, &ED,
    &RP, &PRL, &SPS, &MSG, &PT, &VID, &ERL,
];

/// Look up a composite by its HL7 code.
pub fn data_type(code: &str) -> Option<&'static DataType> {
    ALL.iter()
        .copied()
        .find(|data_type| data_type.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7_model::ValueKind;
    use std::collections::BTreeSet;

    #[test]
    fn nesting_never_exceeds_two_levels() {
        for data_type in ALL {
            for component in data_type.components {
                if let ValueKind::Composite(nested) = component.kind {
                    assert!(
                        nested
                            .components
                            .iter()
                            .all(|sub| !sub.kind.is_composite()),
                        "{}.{} nests {} which has composite components",
                        data_type.code,
                        component.key,
                        nested.code
                    );
                }
            }
        }
    }

    #[test]
    fn component_keys_are_unique_per_type() {
        for data_type in ALL {
            let keys: BTreeSet<&str> = data_type.component_keys().collect();
            assert_eq!(
                keys.len(),
                data_type.components.len(),
                "duplicate component key in {}",
                data_type.code
            );
        }
    }

    #[test]
    fn codes_are_unique_and_resolvable() {
        let codes: BTreeSet<&str> = ALL.iter().map(|data_type| data_type.code).collect();
        assert_eq!(codes.len(), ALL.len());
        assert_eq!(data_type("xpn").map(|dt| dt.code), Some("XPN"));
        assert!(data_type("ZZZ").is_none());
    }
}
