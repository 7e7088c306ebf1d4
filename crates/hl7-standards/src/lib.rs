//! HL7 v2.5.1 definitions.
//!
//! Static tables only: the composite catalog ([`datatypes`]), segments
//! ([`segments`]), the OBX value-type table ([`value_type`]), message
//! structures ([`structures`]) and the (type, trigger) registry
//! ([`registry`]).

#![deny(unsafe_code)]

pub mod datatypes;
pub mod error;
pub mod registry;
pub mod segments;
pub mod structures;
pub mod value_type;

/// Version written to MSH-12.
pub const HL7_VERSION: &str = "2.5.1";

pub use crate::error::RegistryError;
pub use crate::registry::{
    RegistryEntry, UNTRIGGERED_ACK_EVENT, entries, resolve_codes, structure_for,
};
pub use crate::value_type::ValueType;
