//! Segment catalog (HL7 v2.5.1).
//!
//! Field lists follow the standard's sequence numbers exactly, so the 1-based
//! position of a field in `fields` is its wire position. Fields whose v2.5.1
//! type is outside the composite catalog (TQ, NDL, AUI, ELD) are carried as
//! plain strings.

use hl7_model::{DataType, FieldDef, Primitive, SegmentDef};

use crate::datatypes::{
    CE, CNE, CP, CQ, CWE, CX, DLD, DLN, DR, EI, EIP, ERL, FC, HD, JCC, MOC, MSG, PL, PRL, PT,
    RPT, SPS, TS, VID, XAD, XCN, XON, XPN, XTN,
};

const fn st(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::St)
}

const fn tx(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::Tx)
}

const fn ft(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::Ft)
}

const fn id(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::Id)
}

const fn is(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::Is)
}

const fn nm(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::Nm)
}

const fn si(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::Si)
}

const fn dt(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::Dt)
}

const fn tm(key: &'static str) -> FieldDef {
    FieldDef::primitive(key, Primitive::Tm)
}

const fn of(key: &'static str, data_type: &'static DataType) -> FieldDef {
    FieldDef::composite(key, data_type)
}

pub static MSH: SegmentDef = SegmentDef {
    id: "MSH",
    description: "Message Header",
    fields: &[
        st("fieldSeparator"),
        st("encodingCharacters"),
        of("sendingApplication", &HD),
        of("sendingFacility", &HD),
        of("receivingApplication", &HD),
        of("receivingFacility", &HD),
        of("dateTimeOfMessage", &TS),
        st("security"),
        of("messageType", &MSG),
        st("messageControlId"),
        of("processingId", &PT),
        of("versionId", &VID),
        nm("sequenceNumber"),
        st("continuationPointer"),
        id("acceptAcknowledgmentType"),
        id("applicationAcknowledgmentType"),
        id("countryCode"),
        id("characterSet").repeating(),
        of("principalLanguageOfMessage", &CE),
        id("alternateCharacterSetHandlingScheme"),
        of("messageProfileIdentifier", &EI).repeating(),
    ],
};

pub static MSA: SegmentDef = SegmentDef {
    id: "MSA",
    description: "Message Acknowledgment",
    fields: &[
        id("acknowledgmentCode"),
        st("messageControlId"),
        st("textMessage"),
        nm("expectedSequenceNumber"),
        id("delayedAcknowledgmentType"),
        of("errorCondition", &CE),
    ],
};

pub static ERR: SegmentDef = SegmentDef {
    id: "ERR",
    description: "Error",
    fields: &[
        st("errorCodeAndLocation").repeating(),
        of("errorLocation", &ERL).repeating(),
        of("hl7ErrorCode", &CWE),
        id("severity"),
        of("applicationErrorCode", &CWE),
        st("applicationErrorParameter").repeating(),
        tx("diagnosticInformation"),
        tx("userMessage"),
        is("informPersonIndicator").repeating(),
        of("overrideType", &CWE),
        of("overrideReasonCode", &CWE).repeating(),
        of("helpDeskContactPoint", &XTN).repeating(),
    ],
};

pub static EVN: SegmentDef = SegmentDef {
    id: "EVN",
    description: "Event Type",
    fields: &[
        id("eventTypeCode"),
        of("recordedDateTime", &TS),
        of("dateTimePlannedEvent", &TS),
        is("eventReasonCode"),
        of("operatorId", &XCN).repeating(),
        of("eventOccurred", &TS),
        of("eventFacility", &HD),
    ],
};

pub static PID: SegmentDef = SegmentDef {
    id: "PID",
    description: "Patient Identification",
    fields: &[
        si("setId"),
        of("patientId", &CX),
        of("patientIdentifierList", &CX).repeating(),
        of("alternatePatientId", &CX).repeating(),
        of("patientName", &XPN).repeating(),
        of("mothersMaidenName", &XPN).repeating(),
        of("dateTimeOfBirth", &TS),
        of("administrativeSex", &CWE),
        of("patientAlias", &XPN).repeating(),
        of("race", &CE).repeating(),
        of("patientAddress", &XAD).repeating(),
        is("countyCode"),
        of("phoneNumberHome", &XTN).repeating(),
        of("phoneNumberBusiness", &XTN).repeating(),
        of("primaryLanguage", &CE),
        of("maritalStatus", &CE),
        of("religion", &CE),
        of("patientAccountNumber", &CX),
        st("ssnNumber"),
        of("driversLicenseNumber", &DLN),
        of("mothersIdentifier", &CX).repeating(),
        of("ethnicGroup", &CE).repeating(),
        st("birthPlace"),
        id("multipleBirthIndicator"),
        nm("birthOrder"),
        of("citizenship", &CE).repeating(),
        of("veteransMilitaryStatus", &CE),
        of("nationality", &CE),
        of("patientDeathDateAndTime", &TS),
        id("patientDeathIndicator"),
        id("identityUnknownIndicator"),
        is("identityReliabilityCode").repeating(),
        of("lastUpdateDateTime", &TS),
        of("lastUpdateFacility", &HD),
        of("speciesCode", &CE),
        of("breedCode", &CE),
        st("strain"),
        of("productionClassCode", &CE),
        of("tribalCitizenship", &CWE).repeating(),
    ],
};

pub static PD1: SegmentDef = SegmentDef {
    id: "PD1",
    description: "Patient Additional Demographic",
    fields: &[
        is("livingDependency").repeating(),
        is("livingArrangement"),
        of("patientPrimaryFacility", &XON).repeating(),
        of("patientPrimaryCareProvider", &XCN).repeating(),
        is("studentIndicator"),
        is("handicap"),
        is("livingWillCode"),
        is("organDonorCode"),
        id("separateBill"),
        of("duplicatePatient", &CX).repeating(),
        of("publicityCode", &CE),
        id("protectionIndicator"),
        dt("protectionIndicatorEffectiveDate"),
        of("placeOfWorship", &XON).repeating(),
        of("advanceDirectiveCode", &CE).repeating(),
        is("immunizationRegistryStatus"),
        dt("immunizationRegistryStatusEffectiveDate"),
        dt("publicityCodeEffectiveDate"),
        is("militaryBranch"),
        is("militaryRankGrade"),
        is("militaryStatus"),
    ],
};

pub static NK1: SegmentDef = SegmentDef {
    id: "NK1",
    description: "Next of Kin / Associated Parties",
    fields: &[
        si("setId"),
        of("name", &XPN).repeating(),
        of("relationship", &CE),
        of("address", &XAD).repeating(),
        of("phoneNumber", &XTN).repeating(),
        of("businessPhoneNumber", &XTN).repeating(),
        of("contactRole", &CE),
        dt("startDate"),
        dt("endDate"),
        st("jobTitle"),
        of("jobCodeClass", &JCC),
        of("employeeNumber", &CX),
        of("organizationName", &XON).repeating(),
        of("maritalStatus", &CE),
        is("administrativeSex"),
        of("dateTimeOfBirth", &TS),
        is("livingDependency").repeating(),
        is("ambulatoryStatus").repeating(),
        of("citizenship", &CE).repeating(),
        of("primaryLanguage", &CE),
        is("livingArrangement"),
        of("publicityCode", &CE),
        id("protectionIndicator"),
        is("studentIndicator"),
        of("religion", &CE),
        of("mothersMaidenName", &XPN).repeating(),
        of("nationality", &CE),
        of("ethnicGroup", &CE).repeating(),
        of("contactReason", &CE).repeating(),
        of("contactPersonsName", &XPN).repeating(),
        of("contactPersonsTelephoneNumber", &XTN).repeating(),
        of("contactPersonsAddress", &XAD).repeating(),
        of("associatedPartysIdentifiers", &CX).repeating(),
        is("jobStatus"),
        of("race", &CE).repeating(),
        is("handicap"),
        st("contactPersonSocialSecurityNumber"),
        st("birthPlace"),
        is("vipIndicator"),
    ],
};

pub static PV1: SegmentDef = SegmentDef {
    id: "PV1",
    description: "Patient Visit",
    fields: &[
        si("setId"),
        is("patientClass"),
        of("assignedPatientLocation", &PL),
        is("admissionType"),
        of("preadmitNumber", &CX),
        of("priorPatientLocation", &PL),
        of("attendingDoctor", &XCN).repeating(),
        of("referringDoctor", &XCN).repeating(),
        of("consultingDoctor", &XCN).repeating(),
        is("hospitalService"),
        of("temporaryLocation", &PL),
        is("preadmitTestIndicator"),
        is("readmissionIndicator"),
        is("admitSource"),
        is("ambulatoryStatus").repeating(),
        is("vipIndicator"),
        of("admittingDoctor", &XCN).repeating(),
        is("patientType"),
        of("visitNumber", &CX),
        of("financialClass", &FC).repeating(),
        is("chargePriceIndicator"),
        is("courtesyCode"),
        is("creditRating"),
        is("contractCode").repeating(),
        dt("contractEffectiveDate").repeating(),
        nm("contractAmount").repeating(),
        nm("contractPeriod").repeating(),
        is("interestCode"),
        is("transferToBadDebtCode"),
        dt("transferToBadDebtDate"),
        is("badDebtAgencyCode"),
        nm("badDebtTransferAmount"),
        nm("badDebtRecoveryAmount"),
        is("deleteAccountIndicator"),
        dt("deleteAccountDate"),
        is("dischargeDisposition"),
        of("dischargedToLocation", &DLD),
        of("dietType", &CE),
        is("servicingFacility"),
        is("bedStatus"),
        is("accountStatus"),
        of("pendingLocation", &PL),
        of("priorTemporaryLocation", &PL),
        of("admitDateTime", &TS),
        of("dischargeDateTime", &TS).repeating(),
        nm("currentPatientBalance"),
        nm("totalCharges"),
        nm("totalAdjustments"),
        nm("totalPayments"),
        of("alternateVisitId", &CX),
        is("visitIndicator"),
        of("otherHealthcareProvider", &XCN).repeating(),
    ],
};

pub static AL1: SegmentDef = SegmentDef {
    id: "AL1",
    description: "Patient Allergy Information",
    fields: &[
        si("setId"),
        of("allergenTypeCode", &CE),
        of("allergenCode", &CE),
        of("allergySeverityCode", &CE),
        st("allergyReactionCode").repeating(),
        dt("identificationDate"),
    ],
};

pub static DG1: SegmentDef = SegmentDef {
    id: "DG1",
    description: "Diagnosis",
    fields: &[
        si("setId"),
        id("diagnosisCodingMethod"),
        of("diagnosisCode", &CE),
        st("diagnosisDescription"),
        of("diagnosisDateTime", &TS),
        is("diagnosisType"),
        of("majorDiagnosticCategory", &CE),
        of("diagnosticRelatedGroup", &CE),
        id("drgApprovalIndicator"),
        is("drgGrouperReviewCode"),
        of("outlierType", &CE),
        nm("outlierDays"),
        of("outlierCost", &CP),
        st("grouperVersionAndType"),
        id("diagnosisPriority"),
        of("diagnosingClinician", &XCN).repeating(),
        is("diagnosisClassification"),
        id("confidentialIndicator"),
        of("attestationDateTime", &TS),
        of("diagnosisIdentifier", &EI),
        id("diagnosisActionCode"),
    ],
};

pub static OBX: SegmentDef = SegmentDef {
    id: "OBX",
    description: "Observation/Result",
    fields: &[
        si("setId"),
        id("valueType"),
        of("observationIdentifier", &CE),
        st("observationSubId"),
        FieldDef::varies("observationValue", "valueType").repeating(),
        of("units", &CE),
        st("referencesRange"),
        is("abnormalFlags").repeating(),
        nm("probability"),
        id("natureOfAbnormalTest").repeating(),
        id("observationResultStatus"),
        of("effectiveDateOfReferenceRange", &TS),
        st("userDefinedAccessChecks"),
        of("dateTimeOfTheObservation", &TS),
        of("producersId", &CE),
        of("responsibleObserver", &XCN).repeating(),
        of("observationMethod", &CE).repeating(),
        of("equipmentInstanceIdentifier", &EI).repeating(),
        of("dateTimeOfTheAnalysis", &TS),
        st("reservedField20"),
        st("reservedField21"),
        st("reservedField22"),
        of("performingOrganizationName", &XON),
        of("performingOrganizationAddress", &XAD),
        of("performingOrganizationMedicalDirector", &XCN),
    ],
};

pub static NTE: SegmentDef = SegmentDef {
    id: "NTE",
    description: "Notes and Comments",
    fields: &[
        si("setId"),
        id("sourceOfComment"),
        ft("comment").repeating(),
        of("commentType", &CE),
    ],
};

pub static ORC: SegmentDef = SegmentDef {
    id: "ORC",
    description: "Common Order",
    fields: &[
        id("orderControl"),
        of("placerOrderNumber", &EI),
        of("fillerOrderNumber", &EI),
        of("placerGroupNumber", &EI),
        id("orderStatus"),
        id("responseFlag"),
        st("quantityTiming").repeating(),
        of("parent", &EIP),
        of("dateTimeOfTransaction", &TS),
        of("enteredBy", &XCN).repeating(),
        of("verifiedBy", &XCN).repeating(),
        of("orderingProvider", &XCN).repeating(),
        of("enterersLocation", &PL),
        of("callBackPhoneNumber", &XTN).repeating(),
        of("orderEffectiveDateTime", &TS),
        of("orderControlCodeReason", &CE),
        of("enteringOrganization", &CE),
        of("enteringDevice", &CE),
        of("actionBy", &XCN).repeating(),
        of("advancedBeneficiaryNoticeCode", &CE),
        of("orderingFacilityName", &XON).repeating(),
        of("orderingFacilityAddress", &XAD).repeating(),
        of("orderingFacilityPhoneNumber", &XTN).repeating(),
        of("orderingProviderAddress", &XAD).repeating(),
        of("orderStatusModifier", &CWE),
        of("advancedBeneficiaryNoticeOverrideReason", &CWE),
        of("fillersExpectedAvailabilityDateTime", &TS),
        of("confidentialityCode", &CWE),
        of("orderType", &CWE),
        of("entererAuthorizationMode", &CNE),
        of("parentUniversalServiceIdentifier", &CWE),
    ],
};

pub static OBR: SegmentDef = SegmentDef {
    id: "OBR",
    description: "Observation Request",
    fields: &[
        si("setId"),
        of("placerOrderNumber", &EI),
        of("fillerOrderNumber", &EI),
        of("universalServiceIdentifier", &CE),
        id("priority"),
        of("requestedDateTime", &TS),
        of("observationDateTime", &TS),
        of("observationEndDateTime", &TS),
        of("collectionVolume", &CQ),
        of("collectorIdentifier", &XCN).repeating(),
        id("specimenActionCode"),
        of("dangerCode", &CE),
        st("relevantClinicalInformation"),
        of("specimenReceivedDateTime", &TS),
        of("specimenSource", &SPS),
        of("orderingProvider", &XCN).repeating(),
        of("orderCallbackPhoneNumber", &XTN).repeating(),
        st("placerField1"),
        st("placerField2"),
        st("fillerField1"),
        st("fillerField2"),
        of("resultsRptStatusChngDateTime", &TS),
        of("chargeToPractice", &MOC),
        id("diagnosticServSectId"),
        id("resultStatus"),
        of("parentResult", &PRL),
        st("quantityTiming").repeating(),
        of("resultCopiesTo", &XCN).repeating(),
        of("parent", &EIP),
        id("transportationMode"),
        of("reasonForStudy", &CE).repeating(),
        st("principalResultInterpreter"),
        st("assistantResultInterpreter").repeating(),
        st("technician").repeating(),
        st("transcriptionist").repeating(),
        of("scheduledDateTime", &TS),
        nm("numberOfSampleContainers"),
        of("transportLogisticsOfCollectedSample", &CE).repeating(),
        of("collectorsComment", &CE).repeating(),
        of("transportArrangementResponsibility", &CE),
        id("transportArranged"),
        id("escortRequired"),
        of("plannedPatientTransportComment", &CE).repeating(),
        of("procedureCode", &CE),
        of("procedureCodeModifier", &CE).repeating(),
        of("placerSupplementalServiceInformation", &CE).repeating(),
        of("fillerSupplementalServiceInformation", &CE).repeating(),
        of("medicallyNecessaryDuplicateProcedureReason", &CWE),
        is("resultHandling"),
        of("parentUniversalServiceIdentifier", &CWE),
    ],
};

pub static TQ1: SegmentDef = SegmentDef {
    id: "TQ1",
    description: "Timing/Quantity",
    fields: &[
        si("setId"),
        of("quantity", &CQ),
        of("repeatPattern", &RPT).repeating(),
        tm("explicitTime").repeating(),
        of("relativeTimeAndUnits", &CQ).repeating(),
        of("serviceDuration", &CQ),
        of("startDateTime", &TS),
        of("endDateTime", &TS),
        of("priority", &CWE).repeating(),
        tx("conditionText"),
        tx("textInstruction"),
        id("conjunction"),
        of("occurrenceDuration", &CQ),
        nm("totalOccurrences"),
    ],
};

pub static SPM: SegmentDef = SegmentDef {
    id: "SPM",
    description: "Specimen",
    fields: &[
        si("setId"),
        of("specimenId", &EIP),
        of("specimenParentIds", &EIP).repeating(),
        of("specimenType", &CWE),
        of("specimenTypeModifier", &CWE).repeating(),
        of("specimenAdditives", &CWE).repeating(),
        of("specimenCollectionMethod", &CWE),
        of("specimenSourceSite", &CWE),
        of("specimenSourceSiteModifier", &CWE).repeating(),
        of("specimenCollectionSite", &CWE),
        of("specimenRole", &CWE).repeating(),
        of("specimenCollectionAmount", &CQ),
        nm("groupedSpecimenCount"),
        st("specimenDescription").repeating(),
        of("specimenHandlingCode", &CWE).repeating(),
        of("specimenRiskCode", &CWE).repeating(),
        of("specimenCollectionDateTime", &DR),
        of("specimenReceivedDateTime", &TS),
        of("specimenExpirationDateTime", &TS),
        id("specimenAvailability"),
        of("specimenRejectReason", &CWE).repeating(),
        of("specimenQuality", &CWE),
        of("specimenAppropriateness", &CWE),
        of("specimenCondition", &CWE).repeating(),
        of("specimenCurrentQuantity", &CQ),
        nm("numberOfSpecimenContainers"),
        of("containerType", &CWE),
        of("containerCondition", &CWE),
        of("specimenChildRole", &CWE),
    ],
};

pub static IN1: SegmentDef = SegmentDef {
    id: "IN1",
    description: "Insurance",
    fields: &[
        si("setId"),
        of("insurancePlanId", &CE),
        of("insuranceCompanyId", &CX).repeating(),
        of("insuranceCompanyName", &XON).repeating(),
        of("insuranceCompanyAddress", &XAD).repeating(),
        of("insuranceCoContactPerson", &XPN).repeating(),
        of("insuranceCoPhoneNumber", &XTN).repeating(),
        st("groupNumber"),
        of("groupName", &XON).repeating(),
        of("insuredsGroupEmpId", &CX).repeating(),
        of("insuredsGroupEmpName", &XON).repeating(),
        dt("planEffectiveDate"),
        dt("planExpirationDate"),
        st("authorizationInformation"),
        is("planType"),
        of("nameOfInsured", &XPN).repeating(),
        of("insuredsRelationshipToPatient", &CE),
        of("insuredsDateOfBirth", &TS),
        of("insuredsAddress", &XAD).repeating(),
        is("assignmentOfBenefits"),
        is("coordinationOfBenefits"),
        st("coordOfBenPriority"),
        id("noticeOfAdmissionFlag"),
        dt("noticeOfAdmissionDate"),
        id("reportOfEligibilityFlag"),
        dt("reportOfEligibilityDate"),
        is("releaseInformationCode"),
        st("preAdmitCert"),
        of("verificationDateTime", &TS),
        of("verificationBy", &XCN).repeating(),
        is("typeOfAgreementCode"),
        is("billingStatus"),
        nm("lifetimeReserveDays"),
        nm("delayBeforeLrDay"),
        is("companyPlanCode"),
        st("policyNumber"),
        of("policyDeductible", &CP),
        of("policyLimitAmount", &CP),
        nm("policyLimitDays"),
        of("roomRateSemiPrivate", &CP),
        of("roomRatePrivate", &CP),
        of("insuredsEmploymentStatus", &CE),
        is("insuredsAdministrativeSex"),
        of("insuredsEmployersAddress", &XAD).repeating(),
        st("verificationStatus"),
        is("priorInsurancePlanId"),
        is("coverageType"),
        is("handicap"),
        of("insuredsIdNumber", &CX).repeating(),
        is("signatureCode"),
        dt("signatureCodeDate"),
        st("insuredsBirthPlace"),
        is("vipIndicator"),
    ],
};

pub static ROL: SegmentDef = SegmentDef {
    id: "ROL",
    description: "Role",
    fields: &[
        of("roleInstanceId", &EI),
        id("actionCode"),
        of("roleRol", &CE),
        of("rolePerson", &XCN).repeating(),
        of("roleBeginDateTime", &TS),
        of("roleEndDateTime", &TS),
        of("roleDuration", &CE),
        of("roleActionReason", &CE),
        of("providerType", &CE).repeating(),
        of("organizationUnitType", &CE),
        of("officeHomeAddressBirthplace", &XAD).repeating(),
        of("phone", &XTN).repeating(),
    ],
};

/// Every segment in the catalog.
pub static ALL: &[&SegmentDef] = &[
    &MSH, &MSA, &ERR, &EVN, &PID, &PD1, &NK1, &PV1, &AL1, &DG1, &OBX, &NTE, &ORC, &OBR, &TQ1,
    &SPM, &IN1, &ROL,
];

/// Look up a segment definition by its three-character ID.
pub fn segment(id: &str) -> Option<&'static SegmentDef> {
    ALL.iter().copied().find(|segment| segment.id == id)
}
