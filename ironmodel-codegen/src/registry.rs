//! Registry of generated types.

use crate::artifacts::{Artifact, GeneratedTypes};
use crate::enums::EnumArtifact;
use crate::error::{CodegenError, Result};
use crate::records::RecordArtifact;
use std::collections::BTreeMap;

/// Generated types of one run, each registered exactly once.
///
/// Entries are immutable once inserted. Iteration is sorted by name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: BTreeMap<String, Artifact>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an artifact under its name.
    ///
    /// # Errors
    /// Returns `CodegenError::NameCollision` if the name is taken.
    pub fn insert(&mut self, artifact: Artifact) -> Result<()> {
        if let Some(existing) = self.entries.get(artifact.name()) {
            return Err(CodegenError::name_collision(
                artifact.name(),
                format!("{} '{}'", existing.kind(), existing.name()),
                format!("{} '{}'", artifact.kind(), artifact.name()),
            ));
        }
        self.entries.insert(artifact.name().to_string(), artifact);
        Ok(())
    }

    /// Returns an artifact by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.entries.get(name)
    }

    /// Returns a record by name.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&RecordArtifact> {
        match self.entries.get(name) {
            Some(Artifact::Record(record)) => Some(record),
            _ => None,
        }
    }

    /// Returns an enum by name.
    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&EnumArtifact> {
        match self.entries.get(name) {
            Some(Artifact::Enum(artifact)) => Some(artifact),
            _ => None,
        }
    }

    /// Iterates over records, sorted by name.
    pub fn records(&self) -> impl Iterator<Item = &RecordArtifact> {
        self.entries.values().filter_map(|a| match a {
            Artifact::Record(record) => Some(record),
            _ => None,
        })
    }

    /// Returns the number of registered artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finalizes the registry into the run's output.
    #[must_use]
    pub fn into_generated(self) -> GeneratedTypes {
        GeneratedTypes::new(self.entries)
    }
}
