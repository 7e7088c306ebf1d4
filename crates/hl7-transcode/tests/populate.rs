use chrono::{TimeZone, Utc};
use hl7_model::{
    Datum, Document, DocumentMap, MessageType, ModelError, Node, PRIMARY_VALUE_KEY, Segment,
    TriggerEvent, TypedMessage, ValueKind,
};
use hl7_standards::datatypes;
use hl7_transcode::header::apply_header_defaults;
use hl7_transcode::populate::composite;
use hl7_transcode::{
    ArgumentError, HierarchicDesignator, TranscodeConfig, UnknownValueTypePolicy, new_message,
    populate_message,
};

fn config() -> TranscodeConfig {
    TranscodeConfig::default().without_stamp()
}

fn doc(json: &str) -> Document {
    Document::parse(json).expect("test document is valid JSON")
}

fn populated(
    message_type: MessageType,
    trigger: TriggerEvent,
    json: &str,
) -> Result<TypedMessage, ArgumentError> {
    let mut message = new_message(message_type, trigger).expect("registered pair");
    populate_message(&mut message, &doc(json), &config())?;
    Ok(message)
}

fn pid(message: &TypedMessage) -> &Segment {
    message
        .root()
        .segment("patientIdentification", 0)
        .expect("PID populated")
}

fn leaves(datum: &Datum) -> Vec<&str> {
    match datum {
        Datum::Primitive(value) => vec![value.as_str()],
        Datum::Composite(components) => components.iter().flat_map(leaves).collect(),
    }
}

#[test]
fn patient_name_and_sex_scenario() {
    let message = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{"patientIdentification": {
            "patientName": [{"familyName": "Doe", "givenName": "Jane"}],
            "administrativeSex": "F"
        }}"#,
    )
    .unwrap();
    let pid = pid(&message);

    assert_eq!(pid.field(5).len(), 1);
    assert_eq!(pid.value(5, 0, &[1, 1]), "Doe");
    assert_eq!(pid.value(5, 0, &[2]), "Jane");

    let sex = &pid.field(8)[0];
    assert_eq!(sex.text(&[1]), "F");
    let sex_leaves = leaves(sex);
    assert_eq!(sex_leaves.len(), datatypes::CWE.components.len());
    assert!(sex_leaves[1..].iter().all(|leaf| leaf.is_empty()));
}

#[test]
fn observation_value_resolves_through_value_type() {
    let message = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{"observationResult": "[{\"valueType\":\"NM\",\"observationValue\":[{\"mainValue\":\"7.2\"}]}]"}"#,
    )
    .unwrap();
    let obx = message.root().segment("observationResult", 0).unwrap();
    assert_eq!(obx.value(2, 0, &[]), "NM");
    assert_eq!(obx.field(5), &[Datum::primitive("7.2")]);
}

#[test]
fn numeric_values_keep_their_digits() {
    let message = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{
            "patientIdentification": {"patientIdentifierList": [12345678901234567890123]},
            "observationResult": [
                {"valueType": "NM", "observationValue": [7.20]},
                {"valueType": "NM", "observationValue": "[1.50]"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(pid(&message).value(3, 0, &[1]), "12345678901234567890123");
    let values: Vec<&Datum> = message
        .root()
        .repetitions("observationResult")
        .iter()
        .filter_map(Node::as_segment)
        .flat_map(|obx| obx.field(5))
        .collect();
    assert_eq!(values, [&Datum::primitive("7.20"), &Datum::primitive("1.50")]);
}

#[test]
fn discriminator_may_follow_the_value_or_be_composite() {
    let message = populated(
        MessageType::Oru,
        TriggerEvent::R01,
        r#"{"patientResult": [{"orderObservation": [{
            "observationRequest": {"placerOrderNumber": "P1"},
            "observation": [
                {"observationValue": {"identifier": "POS", "text": "Positive"}, "valueType": "CWE"},
                {"observationResult": {"valueType": "ST", "observationValue": ["a", "b"]}}
            ]
        }]}]}"#,
    )
    .unwrap();
    let order = message
        .root()
        .group("patientResult", 0)
        .and_then(|result| result.group("orderObservation", 0))
        .unwrap();
    let coded = order
        .group("observation", 0)
        .and_then(|observation| observation.segment("observationResult", 0))
        .unwrap();
    assert_eq!(coded.value(5, 0, &[1]), "POS");
    assert_eq!(coded.value(5, 0, &[2]), "Positive");

    let text = order
        .group("observation", 1)
        .and_then(|observation| observation.segment("observationResult", 0))
        .unwrap();
    assert_eq!(text.field(5), &[Datum::primitive("a"), Datum::primitive("b")]);
}

#[test]
fn unknown_value_type_is_dropped_by_default() {
    let message = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{"observationResult": [{"valueType": "ZZ", "observationValue": "7.2"}]}"#,
    )
    .unwrap();
    let obx = message.root().segment("observationResult", 0).unwrap();
    assert_eq!(obx.value(2, 0, &[]), "ZZ");
    assert!(obx.field(5).is_empty());
}

#[test]
fn unknown_value_type_can_be_rejected() {
    let mut message = new_message(MessageType::Adt, TriggerEvent::A01).unwrap();
    let config = config().with_unknown_value_type(UnknownValueTypePolicy::Reject);
    let error = populate_message(
        &mut message,
        &doc(r#"{"observationResult": [{"valueType": "ZZ", "observationValue": "7.2"}]}"#),
        &config,
    )
    .unwrap_err();
    assert_eq!(
        error,
        ArgumentError::UnknownValueType {
            path: "observationResult[0].observationValue".to_string(),
            tag: "ZZ".to_string(),
        }
    );
}

#[test]
fn unknown_keys_report_their_dotted_path() {
    let error = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{"patientIdentification": {"nonExistentField": "x"}}"#,
    )
    .unwrap_err();
    assert_eq!(error.path(), "patientIdentification.nonExistentField");
    assert!(matches!(error, ArgumentError::UnknownKey { host: "PID", .. }));

    let error = populated(
        MessageType::Orm,
        TriggerEvent::O01,
        r#"{"order": [
            {"commonOrder": {"orderControl": "NW"}},
            {"commonOrder": {"fooBar": "x"}}
        ]}"#,
    )
    .unwrap_err();
    assert_eq!(error.path(), "order[1].commonOrder.fooBar");

    let error = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{"patientIdentification": {"patientName": [{"familyName": "Doe", "nickname": "J"}]}}"#,
    )
    .unwrap_err();
    assert_eq!(error.path(), "patientIdentification.patientName[0].nickname");
    assert!(matches!(error, ArgumentError::UnknownKey { host: "XPN", .. }));

    let error = populated(MessageType::Adt, TriggerEvent::A01, r#"{"visit": {}}"#).unwrap_err();
    assert_eq!(error.path(), "visit");
    assert_eq!(error.to_string(), "unrecognized key `visit` (not defined for ADT_A01)");
}

#[test]
fn empty_body_is_rejected() {
    let mut message = new_message(MessageType::Adt, TriggerEvent::A01).unwrap();
    for body in [Document::empty_object(), Document::scalar(""), Document::scalar("{}")] {
        let error = populate_message(&mut message, &body, &config()).unwrap_err();
        assert_eq!(error, ArgumentError::EmptyBody);
        assert_eq!(error.to_string(), "body cannot be empty");
    }
}

#[test]
fn repeatable_destinations_get_one_repetition_per_element() {
    let message = populated(
        MessageType::Orm,
        TriggerEvent::O01,
        r#"{
            "patient": {"patientIdentification": {
                "patientName": "[{\"familyName\":\"Doe\"},{\"familyName\":\"Roe\"},{\"familyName\":\"Poe\"}]"
            }},
            "order": [
                {"orderControl": "NW"},
                {"orderControl": "CA"},
                {"orderControl": "XO"}
            ]
        }"#,
    )
    .unwrap();

    let names: Vec<&str> = message
        .root()
        .group("patient", 0)
        .and_then(|patient| patient.segment("patientIdentification", 0))
        .map(|pid| pid.field(5).iter().map(|name| name.text(&[1, 1])).collect())
        .unwrap();
    assert_eq!(names, vec!["Doe", "Roe", "Poe"]);

    let controls: Vec<&str> = message
        .root()
        .groups("order")
        .filter_map(|order| order.segment("commonOrder", 0))
        .map(|orc| orc.value(1, 0, &[]))
        .collect();
    assert_eq!(controls, vec!["NW", "CA", "XO"]);
}

#[test]
fn marker_key_selects_bundle_or_shorthand_form() {
    let bundle = populated(
        MessageType::Oml,
        TriggerEvent::O21,
        r#"{"order": [{
            "commonOrder": {"orderControl": "NW"},
            "role": [{"actionCode": "AD"}],
            "observationRequest": {"universalServiceIdentifier": "CBC"}
        }]}"#,
    )
    .unwrap();
    let order = bundle.root().group("order", 0).unwrap();
    assert_eq!(order.segment("commonOrder", 0).unwrap().value(1, 0, &[]), "NW");
    assert_eq!(order.segment("role", 0).unwrap().value(2, 0, &[]), "AD");
    let request = order
        .group("observationRequest", 0)
        .and_then(|group| group.segment("observationRequest", 0))
        .unwrap();
    assert_eq!(request.value(4, 0, &[1]), "CBC");

    let shorthand = populated(
        MessageType::Oml,
        TriggerEvent::O21,
        r#"{"order": [{"orderControl": "NW", "placerOrderNumber": "P1"}]}"#,
    )
    .unwrap();
    let order = shorthand.root().group("order", 0).unwrap();
    let orc = order.segment("commonOrder", 0).unwrap();
    assert_eq!(orc.value(1, 0, &[]), "NW");
    assert_eq!(orc.value(2, 0, &[1]), "P1");
    assert!(order.repetitions("role").is_empty());
    assert!(order.repetitions("observationRequest").is_empty());

    let error = populated(
        MessageType::Oml,
        TriggerEvent::O21,
        r#"{"order": [{"orderControl": "NW", "role": []}]}"#,
    )
    .unwrap_err();
    assert_eq!(error.path(), "order[0].role");
}

#[test]
fn identifying_component_round_trips_for_every_composite() {
    for data_type in datatypes::ALL {
        let first = data_type.components[0].key;
        for key in [first, PRIMARY_VALUE_KEY] {
            let input = DocumentMap::from([(key.to_string(), Document::scalar("X1"))]);
            let datum = composite(data_type, &input, "value")
                .unwrap_or_else(|error| panic!("{}: {error}", data_type.code));

            assert_eq!(datum.as_str(), "X1", "{} via {key}", data_type.code);
            let all = leaves(&datum);
            assert!(
                all[1..].iter().all(|leaf| leaf.is_empty()),
                "{} via {key} wrote more than the identifying component",
                data_type.code
            );
            assert_eq!(
                datum,
                {
                    let mut expected = Datum::empty_for(ValueKind::Composite(data_type));
                    set_first_leaf(&mut expected, "X1");
                    expected
                },
                "{} keeps the catalog shape",
                data_type.code
            );
        }
    }
}

fn set_first_leaf(datum: &mut Datum, value: &str) {
    match datum {
        Datum::Primitive(slot) => *slot = value.to_string(),
        Datum::Composite(components) => {
            if let Some(first) = components.first_mut() {
                set_first_leaf(first, value);
            }
        }
    }
}

#[test]
fn encoded_values_nest_at_any_depth() {
    let message = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{"patientIdentification": "{\"patientAddress\": \"[{\\\"streetAddress\\\": {\\\"streetName\\\": \\\"Main\\\"}, \\\"city\\\": \\\"Oslo\\\"}]\"}"}"#,
    )
    .unwrap();
    let pid = pid(&message);
    assert_eq!(pid.value(11, 0, &[1, 2]), "Main");
    assert_eq!(pid.value(11, 0, &[3]), "Oslo");
}

#[test]
fn malformed_json_reports_path_and_shape() {
    let error = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{"patientIdentification": {"patientName": "[{\"familyName\": "}}"#,
    )
    .unwrap_err();
    assert_eq!(error.path(), "patientIdentification.patientName");
    assert!(error
        .to_string()
        .starts_with("`patientIdentification.patientName` must be array of objects or scalars"));
}

#[test]
fn failed_population_keeps_earlier_writes() {
    let mut message = new_message(MessageType::Adt, TriggerEvent::A01).unwrap();
    let result = populate_message(
        &mut message,
        &doc(r#"{"eventType": {"eventTypeCode": "A01"}, "patientIdentification": {"bogus": "1"}}"#),
        &config(),
    );
    assert!(result.is_err());
    assert_eq!(
        message.root().segment("eventType", 0).map(|evn| evn.value(1, 0, &[])),
        Some("A01")
    );
}

#[test]
fn non_repeatable_primitive_rejects_arrays() {
    let error = populated(
        MessageType::Adt,
        TriggerEvent::A01,
        r#"{"patientIdentification": {"setId": ["1", "2"]}}"#,
    )
    .unwrap_err();
    assert!(matches!(
        error,
        ArgumentError::MalformedShape { ref path, .. } if path == "patientIdentification.setId"
    ));
}

#[test]
fn header_defaults_fill_only_empty_fields() {
    let mut message = new_message(MessageType::Oru, TriggerEvent::R01).unwrap();
    let config = TranscodeConfig::default()
        .with_sending_application(HierarchicDesignator::new("LAB"))
        .with_sending_facility(HierarchicDesignator::new("MAIN"));
    populate_message(
        &mut message,
        &doc(r#"{"messageHeader": {"sendingApplication": "EMR", "messageControlId": "CTRL-9"}}"#),
        &config,
    )
    .unwrap();

    let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    apply_header_defaults(&mut message, &config, now).unwrap();

    let msh = message.header().unwrap();
    assert_eq!(msh.value(1, 0, &[]), "|");
    assert_eq!(msh.value(2, 0, &[]), "^~\\&");
    assert_eq!(msh.value(3, 0, &[1]), "EMR");
    assert_eq!(msh.value(4, 0, &[1]), "MAIN");
    assert_eq!(msh.value(9, 0, &[1]), "ORU");
    assert_eq!(msh.value(9, 0, &[2]), "R01");
    assert_eq!(msh.value(9, 0, &[3]), "ORU_R01");
    assert_eq!(msh.value(10, 0, &[]), "CTRL-9");
    assert_eq!(msh.value(11, 0, &[1]), "P");
    assert_eq!(msh.value(12, 0, &[1]), "2.5.1");
    assert!(!msh.value(7, 0, &[1]).is_empty());
}

#[test]
fn header_stamp_uses_the_given_time() {
    let mut message = new_message(MessageType::Adt, TriggerEvent::A04).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    apply_header_defaults(&mut message, &TranscodeConfig::default(), now).unwrap();

    let msh = message.header().unwrap();
    assert_eq!(msh.value(7, 0, &[1]), "20240102030405");
    assert_eq!(msh.value(10, 0, &[]), "20240102030405000");
    assert_eq!(msh.value(9, 0, &[3]), "ADT_A01");

    let unstamped = {
        let mut message = new_message(MessageType::Adt, TriggerEvent::A04).unwrap();
        apply_header_defaults(&mut message, &config(), now).unwrap();
        message
    };
    assert!(unstamped.header().unwrap().field(7).is_empty());
}

#[test]
fn model_rejects_what_the_engine_lets_through() {
    let mut message = new_message(MessageType::Adt, TriggerEvent::A01).unwrap();
    let error = message.root_mut().acquire_by_key("patientIdentification", 1).unwrap_err();
    assert!(matches!(error, ModelError::NotRepeatable { .. }));
}
