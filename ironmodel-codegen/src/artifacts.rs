//! Generated artifacts.
//!
//! [`GeneratedTypes`] is the output of one generation run, keyed by type
//! name. It is handed to an [`Emitter`](crate::emit::Emitter) for formatting
//! and can execute its own programs through
//! [`ObjectModel`](ironmodel_core::ObjectModel).

use crate::enums::EnumArtifact;
use crate::interfaces::InterfaceArtifact;
use crate::records::{EqualityComparerArtifact, RecordArtifact};
use crate::visitor::VisitorArtifact;
use ironmodel_core::{ProgramSource, RecordProgram, VisitorProgram};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArtifactKind {
    /// Record.
    Record,
    /// Interface.
    Interface,
    /// Enum.
    Enum,
    /// Equality comparer.
    EqualityComparer,
    /// Rewriting visitor.
    Visitor,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Record => "record",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::EqualityComparer => "equality comparer",
            Self::Visitor => "visitor",
        };
        f.write_str(name)
    }
}

/// One generated type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Artifact {
    /// Record with its programs.
    Record(RecordArtifact),
    /// Structural interface.
    Interface(InterfaceArtifact),
    /// Enum.
    Enum(EnumArtifact),
    /// Separate equality comparer.
    EqualityComparer(EqualityComparerArtifact),
    /// Rewriting visitor.
    Visitor(VisitorArtifact),
}

impl Artifact {
    /// Returns the generated type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Record(a) => &a.name,
            Self::Interface(a) => &a.name,
            Self::Enum(a) => &a.name,
            Self::EqualityComparer(a) => &a.name,
            Self::Visitor(a) => &a.name,
        }
    }

    /// Returns the artifact kind.
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        match self {
            Self::Record(_) => ArtifactKind::Record,
            Self::Interface(_) => ArtifactKind::Interface,
            Self::Enum(_) => ArtifactKind::Enum,
            Self::EqualityComparer(_) => ArtifactKind::EqualityComparer,
            Self::Visitor(_) => ArtifactKind::Visitor,
        }
    }
}

/// Complete output of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedTypes {
    types: BTreeMap<String, Artifact>,
    #[serde(skip)]
    visitor: Option<String>,
}

impl GeneratedTypes {
    pub(crate) fn new(types: BTreeMap<String, Artifact>) -> Self {
        let visitor = types
            .values()
            .find(|a| a.kind() == ArtifactKind::Visitor)
            .map(|a| a.name().to_string());
        Self { types, visitor }
    }

    /// Returns an artifact by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.types.get(name)
    }

    /// Returns a record by name.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&RecordArtifact> {
        match self.types.get(name) {
            Some(Artifact::Record(record)) => Some(record),
            _ => None,
        }
    }

    /// Returns an enum by name.
    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&EnumArtifact> {
        match self.types.get(name) {
            Some(Artifact::Enum(artifact)) => Some(artifact),
            _ => None,
        }
    }

    /// Returns the rewriting visitor, if one was generated.
    #[must_use]
    pub fn visitor(&self) -> Option<&VisitorArtifact> {
        match self.types.get(self.visitor.as_deref()?) {
            Some(Artifact::Visitor(visitor)) => Some(visitor),
            _ => None,
        }
    }

    /// Iterates over all artifacts, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.types.values()
    }

    /// Iterates over artifact names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Returns the number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ProgramSource for GeneratedTypes {
    fn record_program(&self, type_name: &str) -> Option<&RecordProgram> {
        self.record(type_name).map(|r| &r.program)
    }

    fn visitor_program(&self) -> Option<&VisitorProgram> {
        self.visitor().map(|v| &v.program)
    }
}
