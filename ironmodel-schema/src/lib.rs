//! # IronModel Schema
//!
//! JSON schema tree and code generation hints.
//!
//! This crate provides:
//! - The reference-resolved schema tree the generator consumes
//! - Schema loading with path-annotated errors
//! - The hint document and scope resolution (exact, wildcard, type-level)

pub mod error;
pub mod hints;
pub mod parser;
pub mod types;

pub use error::{HintError, SchemaError};
pub use hints::{
    AttributeHint, BaseTypeHint, ClassNameHint, DictionaryHint, EnumHint, Hint, HintDictionary,
    HintKind, HintScope, HintVariant, InterfaceHint, Modifier, PropertyHint,
    PropertyModifiersHint, PropertyNameHint, PropertyTypeHint,
};
pub use parser::{parse_schema, parse_schema_file};
pub use types::{AdditionalProperties, JsonSchema, SchemaType};
