//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ironmodel::prelude::*;
//! ```

// Core types
pub use ironmodel_core::error::{Result as RuntimeResult, RuntimeError};
pub use ironmodel_core::{
    IdentityHook, NodeKind, ObjectModel, ProgramSource, Record, RewritingVisitor, ScalarKind,
    TypeSignature, UriKind, UriValue, Value, VisitHook,
};

// Schema types
pub use ironmodel_schema::{Hint, HintDictionary, HintError, HintScope, JsonSchema, SchemaError};
pub use ironmodel_schema::{parse_schema, parse_schema_file};

// Generation
pub use ironmodel_codegen::{
    Artifact, ArtifactKind, CodegenError, Emitter, EnumArtifact, GeneratedTypes, Generator,
    GeneratorSettings, InterfaceArtifact, JsonEmitter, RecordArtifact, TypeDescriptor,
    VisitorArtifact,
};
pub use ironmodel_codegen::{generate_from_files, generate_from_json};
