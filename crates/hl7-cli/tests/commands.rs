//! Integration tests for the bridge subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use hl7_cli::cli::{AckArgs, ExtractArgs, PopulateArgs};
use hl7_cli::commands::{load_config, run_ack, run_extract, run_populate, structures_table};
use hl7_model::{AckCode, MessageType, TriggerEvent};
use hl7_transcode::UnknownValueTypePolicy;
use serde_json::Value;

const ORDER_DOCUMENT: &str = r#"{
    "messageHeader": {"messageControlId": "CTRL-1"},
    "patient": {"patientIdentifierList": "MRN-7"},
    "order": [{
        "commonOrder": {"orderControl": "NW", "placerOrderNumber": "P1"},
        "orderDetail": {"observationRequest": {
            "universalServiceIdentifier": {"identifier": "CBC", "text": "Blood count"}
        }}
    }]
}"#;

const CONFIG: &str = r#"
processing_id = "T"
unknown_value_type = "reject"

[sending_application]
namespace_id = "BRIDGE"
"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn populate_order(dir: &Path) -> PathBuf {
    let output = dir.join("order.hl7");
    let args = PopulateArgs {
        document: write(dir, "order.json", ORDER_DOCUMENT),
        message_type: MessageType::Orm,
        trigger: TriggerEvent::O01,
        config: Some(write(dir, "bridge.toml", CONFIG)),
        output: Some(output.clone()),
    };
    run_populate(&args).unwrap();
    output
}

#[test]
fn test_load_config_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(Some(&write(dir.path(), "bridge.toml", CONFIG))).unwrap();
    assert_eq!(config.processing_id, "T");
    assert_eq!(config.unknown_value_type, UnknownValueTypePolicy::Reject);
    assert_eq!(
        config.sending_application.map(|hd| hd.namespace_id),
        Some("BRIDGE".to_string())
    );
    assert!(config.stamp_header);

    assert_eq!(load_config(None).unwrap().processing_id, "P");
    assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
}

#[test]
fn test_populate_writes_er7() {
    let dir = tempfile::tempdir().unwrap();
    let output = populate_order(dir.path());
    let encoded = fs::read_to_string(output).unwrap();

    let header = encoded.split('\r').next().unwrap();
    assert!(header.starts_with("MSH|^~\\&|BRIDGE|"));
    assert!(header.contains("|ORM^O01^ORM_O01|CTRL-1|T|2.5.1"));
    assert!(encoded.contains("\rPID|||MRN-7\r"));
    assert!(encoded.contains("\rORC|NW|P1\r"));
    assert!(encoded.contains("\rOBR||||CBC^Blood count\r"));
}

#[test]
fn test_populate_reports_document_errors() {
    let dir = tempfile::tempdir().unwrap();
    let args = PopulateArgs {
        document: write(dir.path(), "bad.json", r#"{"patient": {"nickname": "x"}}"#),
        message_type: MessageType::Orm,
        trigger: TriggerEvent::O01,
        config: None,
        output: None,
    };
    let error = run_populate(&args).unwrap_err();
    assert!(format!("{error:#}").contains("patient.nickname"));
}

#[test]
fn test_extract_prints_orders() {
    let dir = tempfile::tempdir().unwrap();
    let message = populate_order(dir.path());
    let json = run_extract(&ExtractArgs {
        message,
        trigger: None,
    })
    .unwrap();

    let orders: Value = serde_json::from_str(&json).unwrap();
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["placerOrderNumber"], "P1");
    assert_eq!(orders[0]["universalServiceText"], "Blood count");
    assert_eq!(orders[0]["patientId"], "MRN-7");
}

#[test]
fn test_extract_rejects_unsupported_trigger() {
    let dir = tempfile::tempdir().unwrap();
    let message = populate_order(dir.path());
    let result = run_extract(&ExtractArgs {
        message,
        trigger: Some(TriggerEvent::A08),
    });
    assert!(result.is_err());
}

#[test]
fn test_ack_echoes_control_id() {
    let dir = tempfile::tempdir().unwrap();
    let message = populate_order(dir.path());
    let ack = run_ack(&AckArgs {
        message,
        code: AckCode::AR,
        text: Some("no route".to_string()),
    })
    .unwrap();

    let lines: Vec<&str> = ack.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("MSH|^~\\&|||BRIDGE|"));
    assert!(lines[0].contains("|ACK^O01^ACK|"));
    assert_eq!(lines[1], "MSA|AR|CTRL-1|no route");
    assert!(lines[2].starts_with("ERR|||200^Unsupported message type^HL70357|E|"));
}

#[test]
fn test_structures_table_lists_registry() {
    let rendered = structures_table().to_string();
    for id in ["ADT_A01", "ORM_O01", "ORU_R01", "OML_O21", "ACK"] {
        assert!(rendered.contains(id), "missing {id}");
    }
}
