//! Wire codec seam.
//!
//! The transcoding engine never touches wire bytes; hosts plug a codec in
//! here to move between serialized text and [`TypedMessage`] instances.

use crate::enums::AckCode;
use crate::message::TypedMessage;

pub trait WireCodec {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Serialize a typed message to its wire text.
    fn encode(&self, message: &TypedMessage) -> Result<String, Self::Error>;

    /// Parse wire text into a typed message.
    fn decode(&self, text: &str) -> Result<TypedMessage, Self::Error>;

    /// Build the acknowledgement answering `message`.
    fn acknowledge(&self, message: &TypedMessage, code: AckCode)
    -> Result<TypedMessage, Self::Error>;
}
