//! CLI library components for the HL7 bridge.

pub mod cli;
pub mod commands;
pub mod logging;
