//! HL7 v2 ER7 wire codec.
//!
//! ER7 is the classic pipe-delimited encoding: segments terminated by `\r`,
//! fields by `|`, repetitions by `~`, components by `^` and sub-components by
//! `&`, with `\` introducing escape sequences.
//!
//! # Example
//!
//! ```no_run
//! use hl7_er7::Er7Codec;
//! use hl7_model::{AckCode, WireCodec};
//!
//! let codec = Er7Codec::new();
//! let message = codec.decode("MSH|^~\\&|LAB||EHR||||ORU^R01^ORU_R01|42|P|2.5.1\r").unwrap();
//! let ack = codec.acknowledge(&message, AckCode::AA).unwrap();
//! println!("{}", codec.encode(&ack).unwrap());
//! ```

#![deny(unsafe_code)]

mod ack;
mod codec;
mod decode;
mod encode;
mod error;
pub mod escape;

use std::fs;
use std::path::Path;

use hl7_model::{TypedMessage, WireCodec};

pub use ack::acknowledgement;
pub use codec::Er7Codec;
pub use error::{Er7Error, Result};
pub use escape::Delimiters;

/// Read and decode an ER7 file.
pub fn read_er7(path: &Path) -> Result<TypedMessage> {
    let text = fs::read_to_string(path)?;
    Er7Codec::new().decode(&text)
}

/// Encode `message` and write it to `path`.
pub fn write_er7(path: &Path, message: &TypedMessage) -> Result<()> {
    let text = Er7Codec::new().encode(message)?;
    fs::write(path, text)?;
    Ok(())
}
