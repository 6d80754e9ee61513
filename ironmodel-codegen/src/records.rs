//! Record synthesis.
//!
//! The [`RecordSynthesizer`] turns a [`TypeModel`] into a [`RecordArtifact`]:
//! the property declarations plus the equality, hash and init programs. Each
//! program step is built by one recursive routine per algorithm that reads
//! the descriptor at the property key, then at `"Prop[]"` or `"Prop{}"`, and
//! so on down, so every combination of list and map nesting is covered by
//! the same code path.

use crate::builder::{Capabilities, TypeModel};
use crate::descriptor::{CloneKind, ComparisonKind, HashKind, TypeDescriptor};
use crate::error::{CodegenError, Result};
use crate::naming::{comparer_name, element_key, value_key};
use crate::settings::GeneratorSettings;
use ironmodel_core::{
    CloneOp, CompareOp, HASH_MULTIPLIER, HASH_SEED, HashOp, HashProgram, PropertySlot,
    PropertyStep, RecordProgram,
};
use serde::Serialize;
use std::collections::BTreeSet;

/// Constructors a record exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstructorKind {
    /// Every property takes its default.
    Default,
    /// Deep copy of another instance; a null source is a contract violation.
    Copy,
    /// One argument per property.
    Init,
}

/// Visibility of the init routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Visibility {
    /// Callable by the record only.
    Private,
    /// Callable by derived records.
    Protected,
}

/// Synthesized record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordArtifact {
    /// Record name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Copyright notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_notice: Option<String>,
    /// Base types and interfaces.
    pub capabilities: Capabilities,
    /// Property declarations in declaration order.
    pub properties: Vec<TypeDescriptor>,
    /// Imports the declarations need, sorted.
    pub imports: BTreeSet<String>,
    /// The record is sealed.
    pub sealed: bool,
    /// Members are virtual.
    pub virtual_members: bool,
    /// Constructors, empty when cloning code is disabled.
    pub constructors: Vec<ConstructorKind>,
    /// Visibility of the init routine.
    pub init_visibility: Visibility,
    /// Equality, hash and init programs.
    pub program: RecordProgram,
}

/// Separate equality comparer for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualityComparerArtifact {
    /// Comparer name.
    pub name: String,
    /// Record compared.
    pub record_name: String,
    /// Equality steps.
    pub equality: Vec<PropertyStep<CompareOp>>,
    /// Hash program.
    pub hash: HashProgram,
}

/// Builds records from type models.
pub struct RecordSynthesizer<'a> {
    settings: &'a GeneratorSettings,
}

impl<'a> RecordSynthesizer<'a> {
    /// Creates a new record synthesizer.
    #[must_use]
    pub fn new(settings: &'a GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Synthesizes the record described by `model`.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if a nesting layer has no
    /// descriptor.
    pub fn synthesize(&self, model: &TypeModel) -> Result<RecordArtifact> {
        let mut slots = Vec::with_capacity(model.properties.len());
        let mut equality = Vec::with_capacity(model.properties.len());
        let mut hash_steps = Vec::with_capacity(model.properties.len());
        let mut init = Vec::with_capacity(model.properties.len());
        let mut imports = BTreeSet::new();

        for (key, descriptor) in &model.properties {
            slots.push(PropertySlot {
                name: descriptor.name.clone(),
                serialized_name: descriptor.serialized_name.clone(),
                signature: descriptor.signature.clone(),
                default_value: descriptor.default_value.clone(),
            });
            equality.push(PropertyStep::new(key.as_str(), compare_op(model, key, descriptor)?));
            hash_steps.push(PropertyStep::new(key.as_str(), hash_op(model, key, descriptor)?));
            init.push(PropertyStep::new(key.as_str(), clone_op(model, key, descriptor)?));
            imports.extend(descriptor.required_import.iter().cloned());
        }

        let cloning = self.settings.generate_cloning_code;
        let program = RecordProgram {
            type_name: model.type_name.clone(),
            slots,
            equality,
            hash: HashProgram {
                seed: HASH_SEED,
                multiplier: HASH_MULTIPLIER,
                steps: hash_steps,
            },
            init: cloning.then_some(init),
        };

        Ok(RecordArtifact {
            name: model.type_name.clone(),
            description: model.description.clone(),
            namespace: self.settings.namespace_name.clone(),
            copyright_notice: self.settings.copyright_notice.clone(),
            capabilities: model.capabilities.clone(),
            properties: model.properties.values().cloned().collect(),
            imports,
            sealed: self.settings.seal_classes,
            virtual_members: self.settings.virtual_members,
            constructors: if cloning {
                vec![ConstructorKind::Default, ConstructorKind::Copy, ConstructorKind::Init]
            } else {
                Vec::new()
            },
            init_visibility: if self.settings.protected_init_methods {
                Visibility::Protected
            } else {
                Visibility::Private
            },
            program,
        })
    }

    /// Builds the separate equality comparer of a record.
    #[must_use]
    pub fn comparer(&self, record: &RecordArtifact) -> EqualityComparerArtifact {
        EqualityComparerArtifact {
            name: comparer_name(&record.name),
            record_name: record.name.clone(),
            equality: record.program.equality.clone(),
            hash: record.program.hash.clone(),
        }
    }
}

fn layer<'m>(model: &'m TypeModel, key: &str) -> Result<&'m TypeDescriptor> {
    model.layers.get(key).ok_or_else(|| {
        CodegenError::generation(format!(
            "'{}' has no descriptor for layer '{key}'",
            model.type_name
        ))
    })
}

fn compare_op(model: &TypeModel, key: &str, descriptor: &TypeDescriptor) -> Result<CompareOp> {
    let op = match descriptor.comparison_kind {
        ComparisonKind::ValueEquals => CompareOp::ValueEquals,
        ComparisonKind::StructuralEquals => CompareOp::StructuralEquals,
        ComparisonKind::Collection => {
            let key = element_key(key);
            CompareOp::Collection(Box::new(compare_op(model, &key, layer(model, &key)?)?))
        }
        ComparisonKind::Dictionary => {
            let key = value_key(key);
            CompareOp::Dictionary(Box::new(compare_op(model, &key, layer(model, &key)?)?))
        }
    };
    Ok(op)
}

fn hash_op(model: &TypeModel, key: &str, descriptor: &TypeDescriptor) -> Result<HashOp> {
    let op = match descriptor.hash_kind {
        HashKind::ScalarValue => HashOp::ScalarValue,
        HashKind::ScalarRef => HashOp::ScalarRef,
        HashKind::Collection => {
            let key = element_key(key);
            HashOp::Collection(Box::new(hash_op(model, &key, layer(model, &key)?)?))
        }
        HashKind::Dictionary => {
            let key = value_key(key);
            HashOp::Dictionary(Box::new(hash_op(model, &key, layer(model, &key)?)?))
        }
    };
    Ok(op)
}

fn clone_op(model: &TypeModel, key: &str, descriptor: &TypeDescriptor) -> Result<CloneOp> {
    let op = match descriptor.clone_kind {
        CloneKind::Assign => CloneOp::Assign,
        CloneKind::Uri => CloneOp::Uri,
        CloneKind::Clone => {
            let name = descriptor.signature.record_name().ok_or_else(|| {
                CodegenError::generation(format!(
                    "'{}.{key}' is cloned but is not a record",
                    model.type_name
                ))
            })?;
            CloneOp::Clone(name.to_string())
        }
        CloneKind::Collection => {
            let key = element_key(key);
            CloneOp::Collection(Box::new(clone_op(model, &key, layer(model, &key)?)?))
        }
        CloneKind::Dictionary => {
            let key = value_key(key);
            CloneOp::Dictionary(Box::new(clone_op(model, &key, layer(model, &key)?)?))
        }
    };
    Ok(op)
}
