//! CLI argument definitions for the HL7 bridge.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hl7_model::{AckCode, MessageType, TriggerEvent};

#[derive(Parser)]
#[command(
    name = "hl7-bridge",
    version,
    about = "HL7 v2 bridge - Convert JSON documents to and from HL7 v2 messages",
    long_about = "Convert generic JSON documents into HL7 v2.5.1 messages and read orders back out.\n\n\
                  Messages are read and written in ER7 (pipe-delimited) encoding.\n\
                  Supports ADT^A01/A04/A08, ORM^O01, ORU^R01, OML^O21 and ACK."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow field values (PHI) to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Populate a message from a JSON document and print its ER7 encoding.
    Populate(PopulateArgs),

    /// Extract orders from an ER7 message as JSON.
    Extract(ExtractArgs),

    /// Build the acknowledgement for an ER7 message.
    Ack(AckArgs),

    /// List the supported message structures.
    Structures,
}

#[derive(Parser)]
pub struct PopulateArgs {
    /// Path to the JSON document.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Message type (MSH-9.1), e.g. ORU.
    #[arg(long = "message-type", value_name = "TYPE")]
    pub message_type: MessageType,

    /// Trigger event (MSH-9.2), e.g. R01.
    #[arg(long = "trigger", value_name = "EVENT")]
    pub trigger: TriggerEvent,

    /// TOML file with transcoding options (sending application, processing ID, ...).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the message to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Path to the ER7 message.
    #[arg(value_name = "MESSAGE")]
    pub message: PathBuf,

    /// Trigger event to extract for (default: the message's own MSH-9.2).
    #[arg(long = "trigger", value_name = "EVENT")]
    pub trigger: Option<TriggerEvent>,
}

#[derive(Parser)]
pub struct AckArgs {
    /// Path to the ER7 message to acknowledge.
    #[arg(value_name = "MESSAGE")]
    pub message: PathBuf,

    /// Acknowledgement code.
    #[arg(long = "code", value_name = "CODE", default_value = "AA")]
    pub code: AckCode,

    /// Text for MSA-3 (and ERR-8 on error codes).
    #[arg(long = "text", value_name = "TEXT")]
    pub text: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
