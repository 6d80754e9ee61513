//! # IronModel Codegen
//!
//! Object model synthesis from JSON schemas.
//!
//! This crate provides:
//! - Type inference per property, driven by schema shape and hints
//! - Record, enum and interface synthesis
//! - Equality, hash and clone programs for arbitrarily nested properties
//! - The rewriting visitor over every generated record
//! - The fixed-point driver and the emitter boundary

pub mod artifacts;
pub mod builder;
pub mod descriptor;
pub mod emit;
pub mod enums;
pub mod error;
pub mod generator;
pub mod interfaces;
pub mod names;
pub mod naming;
pub mod records;
pub mod registry;
pub mod settings;
pub mod visitor;

pub use artifacts::{Artifact, ArtifactKind, GeneratedTypes};
pub use builder::{AdditionalTypeRequest, Capabilities, TypeModel, TypeModelBuilder};
pub use descriptor::{CloneKind, ComparisonKind, HashKind, TypeDescriptor};
pub use emit::{Emitter, JsonEmitter};
pub use enums::{EnumArtifact, EnumMember, EnumSynthesizer};
pub use error::{CodegenError, Result};
pub use generator::Generator;
pub use interfaces::{InterfaceArtifact, InterfaceSynthesizer};
pub use records::{
    ConstructorKind, EqualityComparerArtifact, RecordArtifact, RecordSynthesizer, Visibility,
};
pub use registry::TypeRegistry;
pub use settings::GeneratorSettings;
pub use visitor::{VisitorArtifact, VisitorSynthesizer};

/// Generates an object model from a schema and a hint document.
///
/// # Arguments
/// * `schema` - JSON schema content
/// * `hints` - Hint document content (`"{}"` for none)
/// * `settings` - Generator settings
///
/// # Errors
/// Returns `CodegenError` if loading or generation fails.
pub fn generate_from_json(
    schema: &str,
    hints: &str,
    settings: &GeneratorSettings,
) -> Result<GeneratedTypes> {
    let schema = ironmodel_schema::parse_schema(schema)?;
    let hints = ironmodel_schema::HintDictionary::from_json_str(hints)?;
    Generator::new(&schema, &hints, settings).generate()
}

/// Generates an object model from a schema file and an optional hint file.
///
/// # Errors
/// Returns `CodegenError` if reading, loading, or generation fails.
pub fn generate_from_files(
    schema_path: &std::path::Path,
    hints_path: Option<&std::path::Path>,
    settings: &GeneratorSettings,
) -> Result<GeneratedTypes> {
    let schema = ironmodel_schema::parse_schema_file(schema_path)?;
    let hints = match hints_path {
        Some(path) => ironmodel_schema::HintDictionary::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ironmodel_schema::HintDictionary::new(),
    };
    Generator::new(&schema, &hints, settings).generate()
}
