//! HL7 table 0125 (value type) and its mapping onto the catalog.
//!
//! OBX-5 is typed by the code in OBX-2. Every code in the table maps to exactly
//! one concrete [`ValueKind`]; legacy types that have no catalog entry of their
//! own resolve to their successor (`CK` to `CX`, `CN` to `XCN`, `PN` to `XPN`,
//! `AD` to `XAD`) or to plain text (`TN`, `MA`, `NA`).

use std::fmt;
use std::str::FromStr;

use hl7_model::{Primitive, ValueKind};
use serde::{Deserialize, Serialize};

use crate::datatypes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    Ad,
    Ce,
    Cf,
    Ck,
    Cn,
    Cne,
    Cp,
    Cq,
    Cwe,
    Cx,
    Dr,
    Dt,
    Dtm,
    Ed,
    Ft,
    Id,
    Is,
    Ma,
    Mo,
    Na,
    Nm,
    Pn,
    Rp,
    Sn,
    St,
    Tm,
    Tn,
    Ts,
    Tx,
    Xad,
    Xcn,
    Xon,
    Xpn,
    Xtn,
}

impl ValueType {
    pub const ALL: [ValueType; 34] = [
        ValueType::Ad,
        ValueType::Ce,
        ValueType::Cf,
        ValueType::Ck,
        ValueType::Cn,
        ValueType::Cne,
        ValueType::Cp,
        ValueType::Cq,
        ValueType::Cwe,
        ValueType::Cx,
        ValueType::Dr,
        ValueType::Dt,
        ValueType::Dtm,
        ValueType::Ed,
        ValueType::Ft,
        ValueType::Id,
        ValueType::Is,
        ValueType::Ma,
        ValueType::Mo,
        ValueType::Na,
        ValueType::Nm,
        ValueType::Pn,
        ValueType::Rp,
        ValueType::Sn,
        ValueType::St,
        ValueType::Tm,
        ValueType::Tn,
        ValueType::Ts,
        ValueType::Tx,
        ValueType::Xad,
        ValueType::Xcn,
        ValueType::Xon,
        ValueType::Xpn,
        ValueType::Xtn,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ValueType::Ad => "AD",
            ValueType::Ce => "CE",
            ValueType::Cf => "CF",
            ValueType::Ck => "CK",
            ValueType::Cn => "CN",
            ValueType::Cne => "CNE",
            ValueType::Cp => "CP",
            ValueType::Cq => "CQ",
            ValueType::Cwe => "CWE",
            ValueType::Cx => "CX",
            ValueType::Dr => "DR",
            ValueType::Dt => "DT",
            ValueType::Dtm => "DTM",
            ValueType::Ed => "ED",
            ValueType::Ft => "FT",
            ValueType::Id => "ID",
            ValueType::Is => "IS",
            ValueType::Ma => "MA",
            ValueType::Mo => "MO",
            ValueType::Na => "NA",
            ValueType::Nm => "NM",
            ValueType::Pn => "PN",
            ValueType::Rp => "RP",
            ValueType::Sn => "SN",
            ValueType::St => "ST",
            ValueType::Tm => "TM",
            ValueType::Tn => "TN",
            ValueType::Ts => "TS",
            ValueType::Tx => "TX",
            ValueType::Xad => "XAD",
            ValueType::Xcn => "XCN",
            ValueType::Xon => "XON",
            ValueType::Xpn => "XPN",
            ValueType::Xtn => "XTN",
        }
    }

    /// Resolve a discriminator value. Codes are matched after trimming,
    /// case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|value_type| value_type.code().eq_ignore_ascii_case(code))
    }

    /// Concrete type a value of this kind is written as.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            ValueType::Ad | ValueType::Xad => ValueKind::Composite(&datatypes::XAD),
            ValueType::Ce => ValueKind::Composite(&datatypes::CE),
            ValueType::Cf => ValueKind::Composite(&datatypes::CF),
            ValueType::Ck | ValueType::Cx => ValueKind::Composite(&datatypes::CX),
            ValueType::Cn | ValueType::Xcn => ValueKind::Composite(&datatypes::XCN),
            ValueType::Cne => ValueKind::Composite(&datatypes::CNE),
            ValueType::Cp => ValueKind::Composite(&datatypes::CP),
            ValueType::Cq => ValueKind::Composite(&datatypes::CQ),
            ValueType::Cwe => ValueKind::Composite(&datatypes::CWE),
            ValueType::Dr => ValueKind::Composite(&datatypes::DR),
            ValueType::Ed => ValueKind::Composite(&datatypes::ED),
            ValueType::Mo => ValueKind::Composite(&datatypes::MO),
            ValueType::Pn | ValueType::Xpn => ValueKind::Composite(&datatypes::XPN),
            ValueType::Rp => ValueKind::Composite(&datatypes::RP),
            ValueType::Sn => ValueKind::Composite(&datatypes::SN),
            ValueType::Ts => ValueKind::Composite(&datatypes::TS),
            ValueType::Xon => ValueKind::Composite(&datatypes::XON),
            ValueType::Xtn => ValueKind::Composite(&datatypes::XTN),
            ValueType::Dt => ValueKind::Primitive(Primitive::Dt),
            ValueType::Dtm => ValueKind::Primitive(Primitive::Dtm),
            ValueType::Ft => ValueKind::Primitive(Primitive::Ft),
            ValueType::Id => ValueKind::Primitive(Primitive::Id),
            ValueType::Is => ValueKind::Primitive(Primitive::Is),
            ValueType::Nm => ValueKind::Primitive(Primitive::Nm),
            ValueType::Tm => ValueKind::Primitive(Primitive::Tm),
            ValueType::Tx => ValueKind::Primitive(Primitive::Tx),
            ValueType::Ma | ValueType::Na | ValueType::St | ValueType::Tn => {
                ValueKind::Primitive(Primitive::St)
            }
        }
    }

    /// Whether values of this type are written as a single scalar.
    pub fn is_scalar(&self) -> bool {
        !self.value_kind().is_composite()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Unknown value type: {s}"))
    }
}
