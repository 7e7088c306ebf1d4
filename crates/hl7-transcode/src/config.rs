//! Options threaded into population.

use serde::{Deserialize, Serialize};

/// An HD value for MSH-3 / MSH-4.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchicDesignator {
    pub namespace_id: String,
    pub universal_id: String,
    pub universal_id_type: String,
}

impl HierarchicDesignator {
    pub fn new(namespace_id: impl Into<String>) -> Self {
        Self {
            namespace_id: namespace_id.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.namespace_id.is_empty() && self.universal_id.is_empty()
    }
}

/// What to do with an OBX value whose value type is not in table 0125.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownValueTypePolicy {
    /// Skip the value and emit a warning.
    #[default]
    Drop,
    /// Fail population with [`crate::ArgumentError::UnknownValueType`].
    Reject,
}

/// Options for [`crate::populate_message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Written to MSH-3 when the document leaves it empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_application: Option<HierarchicDesignator>,

    /// Written to MSH-4 when the document leaves it empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_facility: Option<HierarchicDesignator>,

    /// MSH-11 processing ID (`P`, `T` or `D`).
    pub processing_id: String,

    /// Fill MSH-7 and MSH-10 from the current time when empty.
    pub stamp_header: bool,

    pub unknown_value_type: UnknownValueTypePolicy,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            sending_application: None,
            sending_facility: None,
            processing_id: "P".to_string(),
            stamp_header: true,
            unknown_value_type: UnknownValueTypePolicy::Drop,
        }
    }
}

impl TranscodeConfig {
    pub fn with_sending_application(mut self, application: HierarchicDesignator) -> Self {
        self.sending_application = Some(application);
        self
    }

    pub fn with_sending_facility(mut self, facility: HierarchicDesignator) -> Self {
        self.sending_facility = Some(facility);
        self
    }

    pub fn with_unknown_value_type(mut self, policy: UnknownValueTypePolicy) -> Self {
        self.unknown_value_type = policy;
        self
    }

    /// Disable header time stamping, for reproducible output.
    pub fn without_stamp(mut self) -> Self {
        self.stamp_header = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: TranscodeConfig = serde_json::from_str(
            r#"{"sending_application": {"namespace_id": "LAB"}, "unknown_value_type": "reject"}"#,
        )
        .unwrap();
        assert_eq!(
            config.sending_application,
            Some(HierarchicDesignator::new("LAB"))
        );
        assert_eq!(config.processing_id, "P");
        assert!(config.stamp_header);
        assert_eq!(config.unknown_value_type, UnknownValueTypePolicy::Reject);
    }
}
