//! [`WireCodec`] implementation for ER7.

use chrono::Utc;
use hl7_model::{AckCode, TypedMessage, WireCodec};

use crate::ack::acknowledgement;
use crate::decode::decode_message;
use crate::encode::encode_message;
use crate::error::{Er7Error, Result};
use crate::escape::Delimiters;

/// ER7 codec.
///
/// Decoding honours whatever delimiters the message's MSH declares; encoding
/// always writes the codec's own delimiters into MSH-1 and MSH-2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Er7Codec {
    delimiters: Delimiters,
}

impl Er7Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiters(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Acknowledge `message`, carrying `text` in MSA-3 (and ERR-8 for errors).
    pub fn acknowledge_with_text(
        &self,
        message: &TypedMessage,
        code: AckCode,
        text: Option<&str>,
    ) -> Result<TypedMessage> {
        acknowledgement(message, code, text, Utc::now())
    }
}

impl WireCodec for Er7Codec {
    type Error = Er7Error;

    fn encode(&self, message: &TypedMessage) -> Result<String> {
        Ok(encode_message(message, &self.delimiters))
    }

    fn decode(&self, text: &str) -> Result<TypedMessage> {
        decode_message(text)
    }

    fn acknowledge(&self, message: &TypedMessage, code: AckCode) -> Result<TypedMessage> {
        self.acknowledge_with_text(message, code, None)
    }
}
