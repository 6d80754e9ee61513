//! Declared generated names.
//!
//! Every generated name is declared before any descriptor is built, so a
//! reference to a record, including a self or mutual reference, resolves to a
//! known name without recursing into the referenced schema.

use crate::error::{CodegenError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// What a declared name generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclaredKind {
    /// A record.
    Record,
    /// An enum.
    Enum,
}

#[derive(Debug, Clone)]
struct Declaration {
    kind: DeclaredKind,
    claimant: String,
}

/// Table of declared names and the definitions bound to them.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: IndexMap<String, Declaration>,
    definitions: HashMap<String, String>,
}

impl NameTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a generated name on behalf of `claimant`.
    ///
    /// # Errors
    /// Returns `CodegenError::NameCollision` if the name is already declared.
    pub fn declare(&mut self, name: &str, kind: DeclaredKind, claimant: &str) -> Result<()> {
        if let Some(existing) = self.names.get(name) {
            return Err(CodegenError::name_collision(
                name,
                existing.claimant.clone(),
                claimant,
            ));
        }
        self.names.insert(
            name.to_string(),
            Declaration {
                kind,
                claimant: claimant.to_string(),
            },
        );
        Ok(())
    }

    /// Declares the name generated for a schema definition.
    ///
    /// # Errors
    /// Returns `CodegenError::NameCollision` if the name is already declared.
    pub fn declare_definition(
        &mut self,
        definition: &str,
        name: &str,
        kind: DeclaredKind,
    ) -> Result<()> {
        self.declare(name, kind, &format!("definition '{definition}'"))?;
        self.definitions
            .insert(definition.to_string(), name.to_string());
        Ok(())
    }

    /// Returns the generated name and kind of a definition.
    #[must_use]
    pub fn definition(&self, definition: &str) -> Option<(&str, DeclaredKind)> {
        let name = self.definitions.get(definition)?;
        let declaration = self.names.get(name)?;
        Some((name.as_str(), declaration.kind))
    }

    /// Returns the kind of a declared name.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<DeclaredKind> {
        self.names.get(name).map(|d| d.kind)
    }

    /// Returns the claimant of a declared name.
    #[must_use]
    pub fn claimant(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(|d| d.claimant.as_str())
    }

    /// Iterates over declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = (&str, DeclaredKind)> {
        self.names.iter().map(|(name, d)| (name.as_str(), d.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_resolve() {
        let mut table = NameTable::new();
        table
            .declare("Root", DeclaredKind::Record, "root")
            .expect("Failed to declare");
        table
            .declare_definition("level", "Level", DeclaredKind::Enum)
            .expect("Failed to declare");

        assert_eq!(table.definition("level"), Some(("Level", DeclaredKind::Enum)));
        assert_eq!(table.kind_of("Root"), Some(DeclaredKind::Record));
        assert!(table.definition("missing").is_none());
        assert_eq!(table.names().count(), 2);
    }

    #[test]
    fn test_collision_names_both_claimants() {
        let mut table = NameTable::new();
        table
            .declare_definition("run_info", "RunInfo", DeclaredKind::Record)
            .expect("Failed to declare");
        match table.declare_definition("run-info", "RunInfo", DeclaredKind::Record) {
            Err(CodegenError::NameCollision { name, first, second }) => {
                assert_eq!(name, "RunInfo");
                assert_eq!(first, "definition 'run_info'");
                assert_eq!(second, "definition 'run-info'");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
