use chrono::{TimeZone, Utc};
use hl7_er7::{Er7Codec, Er7Error, acknowledgement, read_er7, write_er7};
use hl7_model::{AckCode, Document, MessageType, TriggerEvent, TypedMessage, WireCodec};
use hl7_standards::RegistryError;
use hl7_transcode::{TranscodeConfig, extract_orders, new_message, populate_message};

/// Segments one per line, for readable snapshots.
fn lines(encoded: &str) -> String {
    encoded.trim_end_matches('\r').replace('\r', "\n")
}

fn populated(message_type: MessageType, trigger: TriggerEvent, json: &str) -> TypedMessage {
    let mut message = new_message(message_type, trigger).expect("registered pair");
    let document = Document::parse(json).expect("valid JSON");
    populate_message(&mut message, &document, &TranscodeConfig::default().without_stamp())
        .expect("population succeeds");
    message
}

const GLUCOSE_RESULT: &str = r#"{
    "patientResult": [{
        "patient": {
            "patientName": [{"familyName": "Doe", "givenName": "Jane"}],
            "administrativeSex": "F"
        },
        "orderObservation": [{
            "observationRequest": {
                "placerOrderNumber": "P1",
                "universalServiceIdentifier": {"identifier": "GLU", "text": "Glucose"}
            },
            "observation": [{
                "setId": "1",
                "valueType": "NM",
                "observationIdentifier": "GLU",
                "observationValue": "7.2",
                "units": "mmol/L"
            }]
        }]
    }]
}"#;

const GENERAL_ORDER: &str = "MSH|^~\\&|LAB|HOSP|EHR|CLINIC|20240101120000||ORM^O01^ORM_O01|MSG1|P|2.5.1\r\
PID|||MRN-1||Doe^Jane\r\
ORC|NW|P1\r\
OBR|1|P1|F1|CBC^Blood count\r\
OBX|1|CWE|X||POS^Positive\r\
ORC|CA|P2\r";

#[test]
fn test_encode_populated_result() {
    let message = populated(MessageType::Oru, TriggerEvent::R01, GLUCOSE_RESULT);
    let encoded = Er7Codec::new().encode(&message).unwrap();
    insta::assert_snapshot!(lines(&encoded), @r"
    MSH|^~\&|||||||ORU^R01^ORU_R01||P|2.5.1
    PID|||||Doe^Jane|||F
    OBR||P1||GLU^Glucose
    OBX|1|NM|GLU||7.2|mmol/L
    ");
}

#[test]
fn test_decode_restores_populated_message() {
    let codec = Er7Codec::new();
    let message = populated(MessageType::Oru, TriggerEvent::R01, GLUCOSE_RESULT);
    let encoded = codec.encode(&message).unwrap();
    let decoded = codec.decode(&encoded).unwrap();
    assert_eq!(decoded, message);
    assert_eq!(codec.encode(&decoded).unwrap(), encoded);
}

#[test]
fn test_escaped_text_survives_the_wire() {
    let codec = Er7Codec::new();
    let message = populated(
        MessageType::Orm,
        TriggerEvent::O01,
        r#"{"notesAndComments": [{"comment": "5 < 6 | check ^ \\ done"}],
            "order": [{"placerOrderNumber": "P1"}]}"#,
    );
    let encoded = codec.encode(&message).unwrap();
    assert!(encoded.contains("NTE|||5 < 6 \\F\\ check \\S\\ \\E\\ done\r"));

    let decoded = codec.decode(&encoded).unwrap();
    let note = decoded.root().segment("notesAndComments", 0).unwrap();
    assert_eq!(note.value(3, 0, &[]), "5 < 6 | check ^ \\ done");
}

#[test]
fn test_decode_places_segments_into_groups() {
    let message = Er7Codec::new().decode(GENERAL_ORDER).unwrap();
    assert_eq!(message.message_type(), MessageType::Orm);
    assert_eq!(message.structure().id, "ORM_O01");

    let root = message.root();
    assert_eq!(root.groups("order").count(), 2);
    let first = root.group("order", 0).unwrap();
    let detail = first.group("orderDetail", 0).unwrap();
    let observation = detail
        .group("observation", 0)
        .and_then(|group| group.segment("observationResult", 0))
        .unwrap();
    // OBX-5 is typed by OBX-2.
    assert_eq!(observation.value(5, 0, &[2]), "Positive");

    let second = root.group("order", 1).unwrap();
    assert!(second.group("orderDetail", 0).is_none());
}

#[test]
fn test_decoded_orders_extract() {
    let message = Er7Codec::new().decode(GENERAL_ORDER).unwrap();
    let orders = extract_orders(&message, TriggerEvent::O01).unwrap();
    assert_eq!(orders.len(), 2);
    let scalar = |index: usize, key: &str| {
        orders[index]
            .get(key)
            .and_then(Document::as_scalar)
            .unwrap_or_default()
            .to_string()
    };
    assert_eq!(scalar(0, "placerOrderNumber"), "P1");
    assert_eq!(scalar(0, "fillerOrderNumber"), "F1");
    assert_eq!(scalar(0, "universalServiceText"), "Blood count");
    assert_eq!(scalar(0, "patientId"), "MRN-1");
    assert_eq!(scalar(1, "orderControl"), "CA");
}

#[test]
fn test_decode_accepts_newline_terminators() {
    let text = GENERAL_ORDER.replace('\r', "\r\n");
    let message = Er7Codec::new().decode(&text).unwrap();
    assert_eq!(message.root().groups("order").count(), 2);
}

#[test]
fn test_decode_errors() {
    let codec = Er7Codec::new();
    assert!(matches!(codec.decode(""), Err(Er7Error::Empty)));
    assert!(matches!(
        codec.decode("PID|1\r"),
        Err(Er7Error::MissingHeader { found }) if found == "PID"
    ));
    assert!(matches!(
        codec.decode("MSH|^~\\&|||||||XYZ^R01\r"),
        Err(Er7Error::Registry(RegistryError::UnknownMessageType { .. }))
    ));
    assert!(matches!(
        codec.decode("MSH|^~\\&|||||||ORM^O01^ORM_O01\rZPI|1\r"),
        Err(Er7Error::UnexpectedSegment { segment, index: 2 }) if segment == "ZPI"
    ));
    // EVN cannot follow PV1 in ADT_A01.
    assert!(matches!(
        codec.decode("MSH|^~\\&|||||||ADT^A01^ADT_A01\rPV1|1\rEVN|A01\r"),
        Err(Er7Error::UnexpectedSegment { segment, index: 3 }) if segment == "EVN"
    ));
}

#[test]
fn test_error_acknowledgement() {
    let message = Er7Codec::new().decode(GENERAL_ORDER).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let ack = acknowledgement(&message, AckCode::AE, Some("bad"), now).unwrap();
    let encoded = Er7Codec::new().encode(&ack).unwrap();
    insta::assert_snapshot!(lines(&encoded), @r"
    MSH|^~\&|EHR|CLINIC|LAB|HOSP|20240102030405||ACK^O01^ACK|20240102030405000|P|2.5.1
    MSA|AE|MSG1|bad
    ERR|||207^Application internal error^HL70357|E||||bad
    ");
}

#[test]
fn test_accept_acknowledgement_round_trips() {
    let codec = Er7Codec::new();
    let message = codec.decode(GENERAL_ORDER).unwrap();
    let ack = codec.acknowledge(&message, AckCode::AA).unwrap();
    assert_eq!(ack.message_type(), MessageType::Ack);
    assert!(ack.root().repetitions("error").is_empty());

    let decoded = codec.decode(&codec.encode(&ack).unwrap()).unwrap();
    let msa = decoded.root().segment("messageAcknowledgment", 0).unwrap();
    assert_eq!(msa.value(1, 0, &[]), "AA");
    assert_eq!(msa.value(2, 0, &[]), "MSG1");
}

#[test]
fn test_decode_acknowledgement_without_trigger() {
    let codec = Er7Codec::new();
    let message = codec
        .decode("MSH|^~\\&|LAB|HOSP|EHR|CLINIC|20240101120000||ACK|ACK1|P|2.5.1\rMSA|AE|MSG1|bad\r")
        .unwrap();
    assert_eq!(message.message_type(), MessageType::Ack);
    assert_eq!(message.structure().id, "ACK");

    let msa = message.root().segment("messageAcknowledgment", 0).unwrap();
    assert_eq!(msa.value(1, 0, &[]), "AE");
    assert_eq!(msa.value(2, 0, &[]), "MSG1");
    assert!(codec.encode(&message).unwrap().contains("||ACK|ACK1|"));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.hl7");
    let message = Er7Codec::new().decode(GENERAL_ORDER).unwrap();
    write_er7(&path, &message).unwrap();
    assert_eq!(read_er7(&path).unwrap(), message);

    let missing = dir.path().join("missing.hl7");
    assert!(matches!(read_er7(&missing), Err(Er7Error::Io(_))));
}
