//! Interface synthesis.

use crate::descriptor::TypeDescriptor;
use crate::naming::interface_name;
use crate::records::RecordArtifact;
use ironmodel_schema::InterfaceHint;
use serde::Serialize;

/// Structural interface mirroring a record's public properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceArtifact {
    /// Interface name.
    pub name: String,
    /// Record implementing the interface.
    pub record_name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Copyright notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_notice: Option<String>,
    /// Public properties in declaration order.
    pub properties: Vec<TypeDescriptor>,
}

/// Builds interfaces from records.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterfaceSynthesizer;

impl InterfaceSynthesizer {
    /// Creates a new interface synthesizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Synthesizes `I<Record>` from `record`.
    #[must_use]
    pub fn synthesize(&self, record: &RecordArtifact, hint: &InterfaceHint) -> InterfaceArtifact {
        InterfaceArtifact {
            name: interface_name(&record.name),
            record_name: record.name.clone(),
            description: hint
                .description
                .clone()
                .or_else(|| record.description.clone()),
            namespace: record.namespace.clone(),
            copyright_notice: record.copyright_notice.clone(),
            properties: record
                .properties
                .iter()
                .filter(|p| p.is_public())
                .cloned()
                .collect(),
        }
    }
}
