//! Subcommand implementations.
//!
//! Each command returns its output text; `main` decides where it goes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use hl7_er7::{Er7Codec, read_er7};
use hl7_model::{Document, MessageType, TypedMessage, WireCodec};
use hl7_standards::entries;
use hl7_standards::structures::ACK;
use hl7_transcode::{TranscodeConfig, extract_orders, new_message, populate_message};
use tracing::{info, info_span, trace};

use crate::cli::{AckArgs, ExtractArgs, PopulateArgs};
use crate::logging::redact_value;

/// Load transcoding options from a TOML file, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<TranscodeConfig> {
    let Some(path) = path else {
        return Ok(TranscodeConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Segments one per line for terminal output.
pub fn display_er7(encoded: &str) -> String {
    encoded.replace('\r', "\n")
}

pub fn run_populate(args: &PopulateArgs) -> Result<String> {
    let span = info_span!(
        "populate",
        message_type = %args.message_type,
        trigger = %args.trigger
    );
    let _guard = span.enter();

    let config = load_config(args.config.as_deref())?;
    let text = fs::read_to_string(&args.document)
        .with_context(|| format!("read document {}", args.document.display()))?;
    let document = Document::parse(&text)
        .with_context(|| format!("parse document {}", args.document.display()))?;
    trace!(document = redact_value(&text), "loaded document");

    let mut message = new_message(args.message_type, args.trigger)?;
    populate_message(&mut message, &document, &config).context("populate message")?;
    let encoded = Er7Codec::new().encode(&message)?;
    info!(structure = message.structure().id, "populated message");
    trace!(message = redact_value(&encoded), "encoded message");

    match &args.output {
        Some(path) => {
            fs::write(path, &encoded)
                .with_context(|| format!("write message {}", path.display()))?;
            Ok(format!("Wrote {}", path.display()))
        }
        None => Ok(display_er7(&encoded)),
    }
}

fn read_message(path: &Path) -> Result<TypedMessage> {
    let message = read_er7(path).with_context(|| format!("read message {}", path.display()))?;
    info!(
        message_type = %message.message_type(),
        trigger = %message.trigger_event(),
        structure = message.structure().id,
        "decoded message"
    );
    Ok(message)
}

pub fn run_extract(args: &ExtractArgs) -> Result<String> {
    let span = info_span!("extract", path = %args.message.display());
    let _guard = span.enter();

    let message = read_message(&args.message)?;
    let trigger = args.trigger.unwrap_or(message.trigger_event());
    let orders = extract_orders(&message, trigger).context("extract orders")?;
    info!(orders = orders.len(), "extracted orders");

    let json = serde_json::to_string_pretty(&Document::Array(orders).to_json())?;
    trace!(orders = redact_value(&json), "extracted documents");
    Ok(json)
}

pub fn run_ack(args: &AckArgs) -> Result<String> {
    let span = info_span!("ack", code = %args.code);
    let _guard = span.enter();

    let message = read_message(&args.message)?;
    let codec = Er7Codec::new();
    let ack = codec
        .acknowledge_with_text(&message, args.code, args.text.as_deref())
        .context("build acknowledgement")?;
    Ok(display_er7(&codec.encode(&ack)?))
}

/// The registry as a table: one row per supported (type, trigger) pair.
pub fn structures_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Message type"),
        header_cell("Trigger"),
        header_cell("Structure"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for entry in entries() {
        table.add_row(vec![
            Cell::new(entry.message_type),
            Cell::new(entry.trigger_event),
            Cell::new(entry.structure.id),
            Cell::new(entry.structure.description),
        ]);
    }
    table.add_row(vec![
        Cell::new(MessageType::Ack),
        Cell::new("*"),
        Cell::new(ACK.id),
        Cell::new(ACK.description),
    ]);
    table
}

pub fn run_structures() -> Result<()> {
    println!("{}", structures_table());
    Ok(())
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}
